//! Company profile of the current tenant, edited in place.

use common::api::{endpoints, ApiError};
use common::model::company::Company;
use common::requests::{non_blank, CompanyUpdate};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::{input_value, report_error, show_success};

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub api: ApiClient,
}

#[derive(Clone, Copy)]
pub enum CompanyField {
    Name,
    LegalForm,
    Address,
    Vat,
    Registration,
}

pub enum Msg {
    Loaded(Company),
    Set(CompanyField, String),
    Save,
    Saved(Company),
    Failed(ApiError),
}

pub struct SettingsPage {
    company: Option<Company>,
    saving: bool,
}

impl Component for SettingsPage {
    type Message = Msg;
    type Properties = SettingsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            match api.get::<Company>(endpoints::my_company()).await {
                Ok(company) => link.send_message(Msg::Loaded(company)),
                Err(err) => link.send_message(Msg::Failed(err)),
            }
        });
        Self {
            company: None,
            saving: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(company) => {
                self.company = Some(company);
                true
            }
            Msg::Set(field, value) => {
                if let Some(company) = self.company.as_mut() {
                    match field {
                        CompanyField::Name => company.name = value,
                        CompanyField::LegalForm => company.legal_form = non_blank(&value),
                        CompanyField::Address => company.address = non_blank(&value),
                        CompanyField::Vat => company.vat_number = non_blank(&value),
                        CompanyField::Registration => company.registration_number = non_blank(&value),
                    }
                }
                false
            }
            Msg::Save => {
                let Some(company) = &self.company else {
                    return false;
                };
                if self.saving {
                    return false;
                }
                let body = CompanyUpdate::from(company);
                self.saving = true;
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.patch::<_, Company>(endpoints::my_company(), &body).await {
                        Ok(company) => link.send_message(Msg::Saved(company)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Saved(company) => {
                self.saving = false;
                self.company = Some(company);
                show_success("Company settings saved");
                true
            }
            Msg::Failed(err) => {
                self.saving = false;
                report_error(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(company) = &self.company else {
            return html! {
                <div class="page">
                    <h1>{"Settings"}</h1>
                    <p class="muted">{"Loading..."}</p>
                </div>
            };
        };

        let field = |label: &'static str, id: &'static str, kind: CompanyField, value: Option<&str>| {
            html! {
                <>
                    <label for={id}>{ label }</label>
                    <input
                        id={id}
                        value={value.unwrap_or_default().to_string()}
                        oninput={link.callback(move |e: InputEvent| Msg::Set(kind, input_value(e)))}
                    />
                </>
            }
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Save
        });

        html! {
            <div class="page">
                <div class="page-header">
                    <div>
                        <h1>{"Settings"}</h1>
                        <p class="muted">{"Legal details printed on your documents"}</p>
                    </div>
                </div>
                <form class="card" {onsubmit}>
                    { field("Company Name", "company-name", CompanyField::Name, Some(company.name.as_str())) }
                    { field("Legal Form", "company-legal-form", CompanyField::LegalForm, company.legal_form.as_deref()) }
                    { field("Address", "company-address", CompanyField::Address, company.address.as_deref()) }
                    { field("VAT Number", "company-vat", CompanyField::Vat, company.vat_number.as_deref()) }
                    { field("SIRET", "company-siret", CompanyField::Registration, company.registration_number.as_deref()) }
                    {
                        if let Some(locked) = &company.period_locked_until {
                            html! { <p class="muted">{ format!("Period locked until {locked}") }</p> }
                        } else {
                            html! {}
                        }
                    }
                    <div class="actions">
                        <button type="submit" class="btn primary" disabled={self.saving}>
                            { if self.saving { "Saving..." } else { "Save Changes" } }
                        </button>
                    </div>
                </form>
            </div>
        }
    }
}
