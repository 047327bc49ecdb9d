//! Client list: live search, archive, and a create/edit sheet.
//!
//! Every keystroke in the search box issues a new request; an answer that
//! arrives after the query changed is dropped. Mutations reload the list.

use common::api::{endpoints, ApiError};
use common::listing::LiveSearch;
use common::model::client::Client;
use common::requests::{ClientPayload, ClientUpdate};
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::{input_value, report_error, show_success};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};

#[derive(Properties, PartialEq)]
pub struct ClientsProps {
    pub api: ApiClient,
}

#[derive(Clone, Copy)]
pub enum FormField {
    Name,
    Email,
    Address,
    Vat,
    Registration,
}

#[derive(Default, Clone)]
struct ClientForm {
    /// `None` when creating.
    editing: Option<i64>,
    name: String,
    email: String,
    address: String,
    vat_number: String,
    registration_number: String,
}

impl ClientForm {
    fn from_client(client: &Client) -> Self {
        Self {
            editing: Some(client.id),
            name: client.name.clone(),
            email: client.email.clone().unwrap_or_default(),
            address: client.address.clone().unwrap_or_default(),
            vat_number: client.vat_number.clone().unwrap_or_default(),
            registration_number: client.registration_number.clone().unwrap_or_default(),
        }
    }

    fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Address => self.address = value,
            FormField::Vat => self.vat_number = value,
            FormField::Registration => self.registration_number = value,
        }
    }

    fn payload(&self) -> ClientPayload {
        ClientPayload::from_form(
            &self.name,
            &self.email,
            &self.address,
            &self.vat_number,
            &self.registration_number,
        )
    }

    fn update_payload(&self) -> ClientUpdate {
        ClientUpdate::from_form(
            &self.name,
            &self.email,
            &self.address,
            &self.vat_number,
            &self.registration_number,
        )
    }
}

pub enum Msg {
    Load,
    /// The query the list answers, and the list.
    Loaded(String, Vec<Client>),
    SetSearch(String),
    Archive(i64),
    Archived,
    OpenCreate,
    OpenEdit(i64),
    SetField(FormField, String),
    Submit,
    Saved(bool),
    Failed(ApiError),
}

pub struct ClientsPage {
    search: LiveSearch<Client>,
    form: ClientForm,
    saving: bool,
    sheet_ref: NodeRef,
}

impl Component for ClientsPage {
    type Message = Msg;
    type Properties = ClientsProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            search: LiveSearch::new(),
            form: ClientForm::default(),
            saving: false,
            sheet_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        match msg {
            Msg::Load => {
                let query = self.search.query().to_string();
                spawn_local(async move {
                    match api.get::<Vec<Client>>(endpoints::clients(&query)).await {
                        Ok(clients) => link.send_message(Msg::Loaded(query, clients)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Loaded(query, clients) => self.search.apply(&query, clients),
            Msg::SetSearch(query) => {
                self.search.set_query(query);
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::Archive(id) => {
                spawn_local(async move {
                    match api.post::<_, Value>(endpoints::archive_client(id), &serde_json::json!({})).await {
                        Ok(_) => link.send_message(Msg::Archived),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Archived => {
                show_success("Client archived");
                ctx.link().send_message(Msg::Load);
                false
            }
            Msg::OpenCreate => {
                self.form = ClientForm::default();
                open_top_sheet(self.sheet_ref.clone());
                true
            }
            Msg::OpenEdit(id) => {
                if let Some(client) = self.search.results().iter().find(|c| c.id == id) {
                    self.form = ClientForm::from_client(client);
                    open_top_sheet(self.sheet_ref.clone());
                }
                true
            }
            Msg::SetField(field, value) => {
                self.form.set(field, value);
                false
            }
            Msg::Submit => {
                if self.saving {
                    return false;
                }
                self.saving = true;
                let form = self.form.clone();
                let editing = form.editing;
                spawn_local(async move {
                    let result = match editing {
                        Some(id) => api.patch::<_, Client>(endpoints::client(id), &form.update_payload()).await,
                        None => api.post::<_, Client>(endpoints::clients(""), &form.payload()).await,
                    };
                    match result {
                        Ok(_) => link.send_message(Msg::Saved(editing.is_some())),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Saved(updated) => {
                self.saving = false;
                show_success(if updated { "Client updated" } else { "Client created" });
                close_top_sheet(self.sheet_ref.clone());
                ctx.link().send_message(Msg::Load);
                true
            }
            Msg::Failed(err) => {
                self.search.failed();
                self.saving = false;
                report_error(&err);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="page">
                <div class="page-header">
                    <div>
                        <h1>{"Clients"}</h1>
                        <p class="muted">{"Manage the customers you invoice"}</p>
                    </div>
                    <button class="btn primary" onclick={link.callback(|_| Msg::OpenCreate)}>
                        <i class="material-icons">{"add"}</i>{"Add Client"}
                    </button>
                </div>
                <div class="search">
                    <i class="material-icons">{"search"}</i>
                    <input
                        placeholder="Search clients..."
                        value={self.search.query().to_string()}
                        oninput={link.callback(|e: InputEvent| Msg::SetSearch(input_value(e)))}
                    />
                </div>
                { self.list(link) }
                { self.form_sheet(link) }
            </div>
        }
    }
}

impl ClientsPage {
    fn list(&self, link: &yew::html::Scope<Self>) -> Html {
        if self.search.is_loading() {
            return html! { <p class="muted">{"Loading..."}</p> };
        }
        if self.search.results().is_empty() {
            return html! { <div class="card empty">{"No clients found."}</div> };
        }
        html! {
            <div class="cards">
                {
                    for self.search.results().iter().map(|client| {
                        let id = client.id;
                        html! {
                            <div class="card row" key={id.to_string()}>
                                <div>
                                    <h3>{ &client.name }</h3>
                                    <span class="muted">{ client.email.clone().unwrap_or_else(|| "No email".into()) }</span>
                                    <span class="muted">{ client.address.clone().unwrap_or_default() }</span>
                                </div>
                                <div class="actions">
                                    <button class="btn" onclick={link.callback(move |_| Msg::OpenEdit(id))}>{"Edit"}</button>
                                    <button class="btn ghost" title="Archive" onclick={link.callback(move |_| Msg::Archive(id))}>
                                        <i class="material-icons">{"archive"}</i>
                                    </button>
                                </div>
                            </div>
                        }
                    })
                }
            </div>
        }
    }

    fn form_sheet(&self, link: &yew::html::Scope<Self>) -> Html {
        let title = if self.form.editing.is_some() { "Edit Client" } else { "Add Client" };
        let field = |label: &'static str, id: &'static str, kind: FormField, value: &str, required: bool| {
            html! {
                <>
                    <label for={id}>{ label }</label>
                    <input
                        id={id}
                        value={value.to_string()}
                        {required}
                        oninput={link.callback(move |e: InputEvent| Msg::SetField(kind, input_value(e)))}
                    />
                </>
            }
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <YwMaterialTopSheet node_ref={self.sheet_ref.clone()} title={title}>
                <form {onsubmit}>
                    { field("Name", "client-name", FormField::Name, &self.form.name, true) }
                    { field("Email", "client-email", FormField::Email, &self.form.email, false) }
                    { field("Address", "client-address", FormField::Address, &self.form.address, false) }
                    { field("VAT Number", "client-vat", FormField::Vat, &self.form.vat_number, false) }
                    { field("Registration Number (SIRET)", "client-siret", FormField::Registration, &self.form.registration_number, false) }
                    <div class="actions">
                        <button type="submit" class="btn primary" disabled={self.saving}>
                            { if self.saving { "Saving..." } else { "Save" } }
                        </button>
                    </div>
                </form>
            </YwMaterialTopSheet>
        }
    }
}
