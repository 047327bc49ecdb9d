//! Application shell: owns the session and the API client, tracks the
//! current page from `location.hash`, and enforces that private pages are
//! only shown with a session.

use std::rc::Rc;

use common::api::ApiError;
use common::config::AppConfig;
use common::route::Route;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::BeforeUnloadEvent;
use yew::{html, Callback, Component, Context, Html};

use crate::api::ApiClient;
use crate::components::accountant::AccountantPage;
use crate::components::auth::login::LoginPage;
use crate::components::auth::register::RegisterPage;
use crate::components::clients::ClientsPage;
use crate::components::dashboard::DashboardPage;
use crate::components::documents::editor::DocumentEditorPage;
use crate::components::documents::list::DocumentsPage;
use crate::components::layout::sidebar::Sidebar;
use crate::components::settings::SettingsPage;
use crate::components::templates::TemplatesPage;
use crate::helpers::{show_error, show_toast, unsaved_changes_guard};
use crate::session::{BrowserSession, LocalStore};

pub enum Msg {
    Navigate(Route),
    HashChanged,
    SessionExpired,
    Logout,
}

pub struct App {
    route: Route,
    api: ApiClient,
    hash_listener: Closure<dyn FnMut()>,
    unload_guard: Closure<dyn FnMut(BeforeUnloadEvent)>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let session = Rc::new(BrowserSession::restore(LocalStore::open()));
        let config = AppConfig::from_build_env();
        gloo_console::log!(format!("API base URL: {}", config.api_base_url));
        let api = ApiClient::new(config, session, ctx.link().callback(|_| Msg::SessionExpired));

        let link = ctx.link().clone();
        let hash_listener = Closure::<dyn FnMut()>::new(move || link.send_message(Msg::HashChanged));
        let unload_guard = unsaved_changes_guard();
        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback("hashchange", hash_listener.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("beforeunload", unload_guard.as_ref().unchecked_ref())
                .ok();
        }

        let mut app = Self {
            route: Route::Dashboard,
            api,
            hash_listener,
            unload_guard,
        };
        app.route = app.guard(Route::from_hash(&current_hash()));
        set_hash(&app.route);
        app
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => self.go(route),
            Msg::HashChanged => {
                let route = Route::from_hash(&current_hash());
                self.go(route)
            }
            Msg::SessionExpired => {
                show_error(&ApiError::Unauthorized.to_string());
                self.go(Route::Login)
            }
            Msg::Logout => {
                self.api.session().end();
                show_toast("Logged out");
                self.go(Route::Login)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let navigate = ctx.link().callback(Msg::Navigate);
        let api = self.api.clone();

        let page = match self.route {
            Route::Login => html! { <LoginPage {api} {navigate} /> },
            Route::Register => html! { <RegisterPage {api} {navigate} /> },
            Route::Dashboard => html! { <DashboardPage {api} {navigate} /> },
            Route::Templates => html! { <TemplatesPage {api} /> },
            Route::Clients => html! { <ClientsPage {api} /> },
            Route::Documents => html! { <DocumentsPage {api} {navigate} /> },
            Route::DocumentEditor(id) => html! {
                <DocumentEditorPage key={id.to_string()} document_id={id} {api} {navigate} />
            },
            Route::Settings => html! { <SettingsPage {api} /> },
            Route::Accountant => html! { <AccountantPage {api} {navigate} /> },
        };

        if self.route.is_public() {
            return html! { <div class="auth-shell">{ page }</div> };
        }

        html! {
            <div class="layout">
                <Sidebar
                    current={self.route.section()}
                    navigate={ctx.link().callback(Msg::Navigate)}
                    on_logout={ctx.link().callback(|_| Msg::Logout)}
                />
                <main class="content">{ page }</main>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(window) = web_sys::window() {
            window
                .remove_event_listener_with_callback("hashchange", self.hash_listener.as_ref().unchecked_ref())
                .ok();
            window
                .remove_event_listener_with_callback("beforeunload", self.unload_guard.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl App {
    /// Private pages require a session; auth pages are skipped when one
    /// exists.
    fn guard(&self, route: Route) -> Route {
        let authenticated = self.api.session().is_authenticated();
        if !route.is_public() && !authenticated {
            Route::Login
        } else if route.is_public() && authenticated {
            Route::Dashboard
        } else {
            route
        }
    }

    fn go(&mut self, requested: Route) -> bool {
        let route = self.guard(requested);
        if route.to_hash() != current_hash() {
            set_hash(&route);
        }
        if route == self.route {
            return false;
        }
        self.route = route;
        true
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

fn set_hash(route: &Route) {
    if let Some(window) = web_sys::window() {
        window.location().set_hash(&route.to_hash()).ok();
    }
}

/// Navigation callback handed to pages.
pub type Navigate = Callback<Route>;
