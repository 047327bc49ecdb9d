use common::api::{endpoints, ApiError};
use common::model::auth::TokenPair;
use common::requests::LoginRequest;
use common::route::Route;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Navigate;
use crate::helpers::{input_value, report_error, show_success};

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub api: ApiClient,
    pub navigate: Navigate,
}

pub enum Msg {
    SetEmail(String),
    SetPassword(String),
    Submit,
    Succeeded(TokenPair),
    Failed(ApiError),
}

pub struct LoginPage {
    email: String,
    password: String,
    loading: bool,
}

impl Component for LoginPage {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            loading: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetEmail(email) => {
                self.email = email;
                false
            }
            Msg::SetPassword(password) => {
                self.password = password;
                false
            }
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                self.loading = true;
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                let body = LoginRequest {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                spawn_local(async move {
                    match api.post::<_, TokenPair>(endpoints::login(), &body).await {
                        Ok(tokens) => link.send_message(Msg::Succeeded(tokens)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Succeeded(tokens) => {
                self.loading = false;
                ctx.props().api.session().begin(&tokens.access_token);
                show_success("Welcome back!");
                ctx.props().navigate.emit(Route::Dashboard);
                true
            }
            Msg::Failed(err) => {
                self.loading = false;
                report_error(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let to_register = ctx.props().navigate.reform(|_: MouseEvent| Route::Register);

        html! {
            <div class="card auth-card">
                <h1>{"Login"}</h1>
                <p class="muted">{"Enter your credentials to access your account"}</p>
                <form {onsubmit}>
                    <label for="email">{"Email"}</label>
                    <input
                        id="email"
                        type="email"
                        placeholder="name@example.com"
                        required=true
                        oninput={link.callback(|e: InputEvent| Msg::SetEmail(input_value(e)))}
                    />
                    <label for="password">{"Password"}</label>
                    <input
                        id="password"
                        type="password"
                        required=true
                        oninput={link.callback(|e: InputEvent| Msg::SetPassword(input_value(e)))}
                    />
                    <button type="submit" class="btn primary" disabled={self.loading}>
                        { if self.loading { "Logging in..." } else { "Login" } }
                    </button>
                </form>
                <p class="muted">
                    {"Don't have an account? "}
                    <a href="#/register" onclick={to_register}>{"Register"}</a>
                </p>
            </div>
        }
    }
}
