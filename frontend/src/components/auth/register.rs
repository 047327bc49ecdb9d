use common::api::{endpoints, ApiError};
use common::requests::RegisterRequest;
use common::route::Route;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Navigate;
use crate::helpers::{input_value, report_error, show_success};

#[derive(Properties, PartialEq)]
pub struct RegisterProps {
    pub api: ApiClient,
    pub navigate: Navigate,
}

pub enum Msg {
    SetFullName(String),
    SetEmail(String),
    SetPassword(String),
    Submit,
    Succeeded,
    Failed(ApiError),
}

#[derive(Default)]
pub struct RegisterPage {
    full_name: String,
    email: String,
    password: String,
    loading: bool,
}

impl Component for RegisterPage {
    type Message = Msg;
    type Properties = RegisterProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetFullName(value) => {
                self.full_name = value;
                false
            }
            Msg::SetEmail(value) => {
                self.email = value;
                false
            }
            Msg::SetPassword(value) => {
                self.password = value;
                false
            }
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                self.loading = true;
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                let body = RegisterRequest {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                    full_name: self.full_name.trim().to_string(),
                };
                spawn_local(async move {
                    match api.post::<_, Value>(endpoints::register(), &body).await {
                        Ok(_) => link.send_message(Msg::Succeeded),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Succeeded => {
                self.loading = false;
                show_success("Account created! Please login.");
                ctx.props().navigate.emit(Route::Login);
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
        let to_login = ctx.props().navigate.reform(|_: MouseEvent| Route::Login);

        html! {
            <div class="card auth-card">
                <h1>{"Create Account"}</h1>
                <p class="muted">{"Get started with FactureZen today"}</p>
                <form {onsubmit}>
                    <label for="full_name">{"Full Name"}</label>
                    <input
                        id="full_name"
                        required=true
                        oninput={link.callback(|e: InputEvent| Msg::SetFullName(input_value(e)))}
                    />
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
                        { if self.loading { "Creating account..." } else { "Register" } }
                    </button>
                </form>
                <p class="muted">
                    {"Already have an account? "}
                    <a href="#/login" onclick={to_login}>{"Login"}</a>
                </p>
            </div>
        }
    }
}
