//! Modal sheet used by every dialog (new document, upload, test render,
//! client form). The sheet is always mounted; `open_top_sheet` and
//! `close_top_sheet` toggle its `show` class so the CSS transition in
//! `index.html` can run.

use uuid::Uuid;
use yew::prelude::*;

pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    pub title: String,
    #[prop_or_default]
    pub subtitle: Option<String>,
    /// Fired by the close button, after the sheet has been hidden.
    #[prop_or_default]
    pub on_close: Callback<()>,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_close = {
            let sheet = props.node_ref.clone();
            let notify = props.on_close.clone();
            Callback::from(move |_: MouseEvent| {
                close_top_sheet(sheet.clone());
                notify.emit(());
            })
        };

        html! {
            <div class="top-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <div class="top-sheet-panel">
                    <div class="top-sheet-header">
                        <div>
                            <h2>{ &props.title }</h2>
                            {
                                if let Some(subtitle) = &props.subtitle {
                                    html! { <p class="muted">{ subtitle }</p> }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                        <button type="button" class="icon-btn" title="Close" onclick={on_close}>{ "✕" }</button>
                    </div>
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    // Deferred so a sheet mounted in the same render is in the DOM first.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
            top_sheet.class_list().add_1("show").ok();
        }
    });
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
        top_sheet.class_list().remove_1("show").ok();
    }
}
