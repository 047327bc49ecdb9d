//! Browser utilities shared by every page.
//!
//! - **Toasts**: short-lived notifications injected at the bottom of the
//!   page; every success and failure of an API call surfaces through them.
//! - **Downloads**: offering fetched bytes as a browser file save.
//! - **Dirty flag**: `window.app_dirty`, read by the app shell's
//!   `beforeunload` guard to warn before leaving an editor with unsaved
//!   changes.
//! - **Input helpers**: reading values out of form events.

use common::api::ApiError;
use gloo_file::{Blob, ObjectUrl};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BeforeUnloadEvent, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone, Copy)]
enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn background(&self) -> &'static str {
        match self {
            Self::Info => "rgba(0, 0, 0, 0.8)",
            Self::Success => "rgba(22, 101, 52, 0.92)",
            Self::Error => "rgba(185, 28, 28, 0.92)",
        }
    }
}

pub fn show_toast(message: &str) {
    toast(message, ToastKind::Info);
}

pub fn show_success(message: &str) {
    toast(message, ToastKind::Success);
}

pub fn show_error(message: &str) {
    toast(message, ToastKind::Error);
}

/// Surfaces a failed API call. A rejected credential is already reported by
/// the app shell when it routes back to login, so it is not repeated here.
pub fn report_error(err: &ApiError) {
    if !err.is_unauthorized() {
        show_error(&err.to_string());
    }
}

fn toast(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    // Server messages are shown verbatim, never interpreted as markup.
    toast.set_text_content(Some(message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", kind.background()).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Offers `bytes` as a file save named `file_name`.
pub fn save_file(file_name: &str, bytes: &[u8], mime_type: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(anchor), Some(body)) = (document.create_element("a"), document.body()) else {
        return;
    };
    let url = ObjectUrl::from(Blob::new_with_options(bytes, Some(mime_type)));
    let anchor: HtmlAnchorElement = anchor.unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    if body.append_child(&anchor).is_ok() {
        anchor.click();
        anchor.remove();
    }
    // Revoking the object URL right away can abort the download in some
    // browsers; keep it alive for a moment.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1000).await;
        drop(url);
    });
}

/// Opens a URL (e.g. a presigned storage link) in a new tab.
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        window.open_with_url_and_target(url, "_blank").ok();
    }
}

/// `beforeunload` handler asking for confirmation while `app_dirty` is set.
pub fn unsaved_changes_guard() -> Closure<dyn FnMut(BeforeUnloadEvent)> {
    Closure::new(move |event: BeforeUnloadEvent| {
        let dirty = web_sys::window()
            .and_then(|w| Reflect::get(&w, &JsValue::from_str("app_dirty")).ok())
            .is_some_and(|flag| flag.is_truthy());
        if dirty {
            event.prevent_default();
            event.set_return_value("You have unsaved changes.");
        }
    })
}

/// Sets the global `app_dirty` flag consulted before the page unloads.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

pub fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn select_value(e: Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// First file picked in an `<input type="file">`.
pub fn selected_file(e: Event) -> Option<web_sys::File> {
    e.target_unchecked_into::<HtmlInputElement>()
        .files()
        .and_then(|files| files.get(0))
}
