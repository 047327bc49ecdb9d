//! Accountant space: the companies an accountant works for, switching the
//! active one, locking fiscal periods and exporting documents as CSV.

use std::collections::HashMap;

use common::api::{endpoints, ApiError};
use common::model::company::Company;
use common::route::Route;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Navigate;
use crate::helpers::{input_value, report_error, save_file, show_error, show_success};

const CSV_FILE_NAME: &str = "documents.csv";

#[derive(Properties, PartialEq)]
pub struct AccountantProps {
    pub api: ApiClient,
    pub navigate: Navigate,
}

pub enum Msg {
    Load,
    Loaded(Vec<Company>),
    Switch(i64),
    SetLockDate(i64, String),
    Lock(i64),
    Locked,
    Export,
    Exported(Vec<u8>),
    Failed(ApiError),
}

pub struct AccountantPage {
    companies: Vec<Company>,
    loading: bool,
    lock_dates: HashMap<i64, String>,
    exporting: bool,
}

impl Component for AccountantPage {
    type Message = Msg;
    type Properties = AccountantProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            companies: Vec::new(),
            loading: true,
            lock_dates: HashMap::new(),
            exporting: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        match msg {
            Msg::Load => {
                spawn_local(async move {
                    match api.get::<Vec<Company>>(endpoints::accountant_companies()).await {
                        Ok(companies) => link.send_message(Msg::Loaded(companies)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Loaded(companies) => {
                self.loading = false;
                self.companies = companies;
                true
            }
            Msg::Switch(id) => {
                api.session().switch_company(id);
                let name = self
                    .companies
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("company #{id}"));
                show_success(&format!("Now working on {name}"));
                ctx.props().navigate.emit(Route::Dashboard);
                false
            }
            Msg::SetLockDate(id, date) => {
                self.lock_dates.insert(id, date);
                false
            }
            Msg::Lock(id) => {
                let Some(date) = self.lock_dates.get(&id).filter(|d| !d.is_empty()).cloned() else {
                    show_error("Please pick a date");
                    return false;
                };
                spawn_local(async move {
                    match api.post::<_, Value>(endpoints::lock_period(id, &date), &serde_json::json!({})).await {
                        Ok(_) => link.send_message(Msg::Locked),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Locked => {
                show_success("Period locked");
                ctx.link().send_message(Msg::Load);
                false
            }
            Msg::Export => {
                if self.exporting {
                    return false;
                }
                self.exporting = true;
                spawn_local(async move {
                    match api.get_bytes(endpoints::export_documents_csv()).await {
                        Ok(bytes) => link.send_message(Msg::Exported(bytes)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Exported(bytes) => {
                self.exporting = false;
                save_file(CSV_FILE_NAME, &bytes, "text/csv");
                true
            }
            Msg::Failed(err) => {
                self.loading = false;
                self.exporting = false;
                report_error(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let current = ctx.props().api.session().session().company_id;

        html! {
            <div class="page">
                <div class="page-header">
                    <div>
                        <h1>{"Accountant Space"}</h1>
                        <p class="muted">{"Companies you manage"}</p>
                    </div>
                    <button class="btn" disabled={self.exporting} onclick={link.callback(|_| Msg::Export)}>
                        <i class="material-icons">{"table_view"}</i>
                        { if self.exporting { "Exporting..." } else { "Export CSV" } }
                    </button>
                </div>
                {
                    if self.loading {
                        html! { <p class="muted">{"Loading..."}</p> }
                    } else if self.companies.is_empty() {
                        html! { <div class="card empty">{"No companies linked to your account."}</div> }
                    } else {
                        html! {
                            <div class="cards">
                                { for self.companies.iter().map(|company| self.company_card(company, current, link)) }
                            </div>
                        }
                    }
                }
            </div>
        }
    }
}

impl AccountantPage {
    fn company_card(&self, company: &Company, current: Option<i64>, link: &yew::html::Scope<Self>) -> Html {
        let id = company.id;
        let active = current == Some(id);

        html! {
            <div class={classes!("card", "row", active.then_some("active"))} key={id.to_string()}>
                <div>
                    <h3>{ &company.name }</h3>
                    <span class="muted">{ company.vat_number.clone().unwrap_or_default() }</span>
                    <span class="muted">
                        {
                            match &company.period_locked_until {
                                Some(date) => format!("Locked until {date}"),
                                None => "No locked period".to_string(),
                            }
                        }
                    </span>
                </div>
                <div class="actions">
                    <input
                        type="date"
                        value={self.lock_dates.get(&id).cloned().unwrap_or_default()}
                        oninput={link.callback(move |e: InputEvent| Msg::SetLockDate(id, input_value(e)))}
                    />
                    <button class="btn ghost" title="Lock period" onclick={link.callback(move |_| Msg::Lock(id))}>
                        <i class="material-icons">{"lock"}</i>
                    </button>
                    <button class="btn primary" disabled={active} onclick={link.callback(move |_| Msg::Switch(id))}>
                        { if active { "Current" } else { "Switch" } }
                    </button>
                </div>
            </div>
        }
    }
}
