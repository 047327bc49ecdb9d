//! Documents page: the document table and the "new document" sheet.
//!
//! The sheet needs templates and clients, so all three lists are fetched
//! together whenever the page (re)loads.

use common::api::{endpoints, ApiError};
use common::listing::{client_label, pickable_clients};
use common::model::client::Client;
use common::model::display_date;
use common::model::document::Document;
use common::model::template::Template;
use common::requests::CreateDocumentRequest;
use common::route::Route;
use futures_util::future::try_join3;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Navigate;
use crate::helpers::{report_error, select_value, show_error, show_success};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet, YwMaterialTopSheet};

#[derive(Properties, PartialEq)]
pub struct DocumentsProps {
    pub api: ApiClient,
    pub navigate: Navigate,
}

pub enum Msg {
    Load,
    Loaded(Vec<Document>, Vec<Template>, Vec<Client>),
    OpenCreate,
    SelectTemplate(String),
    SelectClient(String),
    Create,
    Created(Document),
    Delete(i64),
    Deleted,
    Open(i64),
    Failed(ApiError),
}

pub struct DocumentsPage {
    documents: Vec<Document>,
    templates: Vec<Template>,
    clients: Vec<Client>,
    loading: bool,
    template_id: Option<i64>,
    client_id: Option<i64>,
    creating: bool,
    sheet_ref: NodeRef,
}

impl Component for DocumentsPage {
    type Message = Msg;
    type Properties = DocumentsProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            documents: Vec::new(),
            templates: Vec::new(),
            clients: Vec::new(),
            loading: true,
            template_id: None,
            client_id: None,
            creating: false,
            sheet_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        match msg {
            Msg::Load => {
                spawn_local(async move {
                    let loaded = try_join3(
                        api.get::<Vec<Document>>(endpoints::documents()),
                        api.get::<Vec<Template>>(endpoints::templates()),
                        api.get::<Vec<Client>>(endpoints::clients("")),
                    )
                    .await;
                    match loaded {
                        Ok((documents, templates, clients)) => {
                            link.send_message(Msg::Loaded(documents, templates, clients))
                        }
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Loaded(documents, templates, clients) => {
                self.loading = false;
                self.documents = documents;
                self.templates = templates;
                self.clients = clients;
                true
            }
            Msg::OpenCreate => {
                self.template_id = None;
                self.client_id = None;
                open_top_sheet(self.sheet_ref.clone());
                true
            }
            Msg::SelectTemplate(raw) => {
                self.template_id = raw.parse().ok();
                true
            }
            Msg::SelectClient(raw) => {
                self.client_id = raw.parse().ok();
                true
            }
            Msg::Create => {
                if self.creating {
                    return false;
                }
                let Some(template) = self
                    .template_id
                    .and_then(|id| self.templates.iter().find(|t| t.id == id))
                else {
                    show_error("Please select a template");
                    return false;
                };
                let Some(client_id) = self.client_id else {
                    show_error("Please select a client");
                    return false;
                };
                let body = CreateDocumentRequest::draft(template.id, client_id, template.doc_type);
                self.creating = true;
                spawn_local(async move {
                    match api.post::<_, Document>(endpoints::documents(), &body).await {
                        Ok(document) => link.send_message(Msg::Created(document)),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                true
            }
            Msg::Created(document) => {
                self.creating = false;
                close_top_sheet(self.sheet_ref.clone());
                show_success("Document created");
                ctx.props().navigate.emit(Route::DocumentEditor(document.id));
                true
            }
            Msg::Delete(id) => {
                spawn_local(async move {
                    match api.delete(endpoints::document(id)).await {
                        Ok(()) => link.send_message(Msg::Deleted),
                        Err(err) => link.send_message(Msg::Failed(err)),
                    }
                });
                false
            }
            Msg::Deleted => {
                show_success("Document deleted");
                ctx.link().send_message(Msg::Load);
                false
            }
            Msg::Open(id) => {
                ctx.props().navigate.emit(Route::DocumentEditor(id));
                false
            }
            Msg::Failed(err) => {
                self.loading = false;
                self.creating = false;
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
                        <h1>{"Documents"}</h1>
                        <p class="muted">{"Quotes, invoices and contracts"}</p>
                    </div>
                    <button class="btn primary" onclick={link.callback(|_| Msg::OpenCreate)}>
                        <i class="material-icons">{"add"}</i>{"New Document"}
                    </button>
                </div>
                { self.table(link) }
                { self.create_sheet(link) }
            </div>
        }
    }
}

impl DocumentsPage {
    fn table(&self, link: &yew::html::Scope<Self>) -> Html {
        if self.loading {
            return html! { <p class="muted">{"Loading..."}</p> };
        }
        if self.documents.is_empty() {
            return html! { <div class="card empty">{"No documents yet."}</div> };
        }
        html! {
            <table class="card table">
                <thead>
                    <tr>
                        <th>{"Document"}</th>
                        <th>{"Client"}</th>
                        <th>{"Status"}</th>
                        <th>{"Date"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for self.documents.iter().map(|doc| {
                            let id = doc.id;
                            html! {
                                <tr key={id.to_string()}>
                                    <td>{ format!("{} #{}", doc.doc_type, id) }</td>
                                    <td>{ client_label(&self.clients, doc.client_id) }</td>
                                    <td>
                                        <span class={classes!("badge", doc.status.is_draft().then_some("draft"))}>
                                            { doc.status.as_str() }
                                        </span>
                                    </td>
                                    <td class="muted">{ doc.created_at.as_deref().map(display_date).unwrap_or_default() }</td>
                                    <td class="actions">
                                        <button class="btn" onclick={link.callback(move |_| Msg::Open(id))}>{"Open"}</button>
                                        <button class="btn ghost" title="Delete" onclick={link.callback(move |_| Msg::Delete(id))}>
                                            <i class="material-icons">{"delete"}</i>
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                    }
                </tbody>
            </table>
        }
    }

    fn create_sheet(&self, link: &yew::html::Scope<Self>) -> Html {
        let clients = pickable_clients(&self.clients);
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Create
        });

        html! {
            <YwMaterialTopSheet
                node_ref={self.sheet_ref.clone()}
                title="New Document"
                subtitle={Some("Pick a template and a client to start a draft".to_string())}
            >
                <form {onsubmit}>
                    <label for="doc-template">{"Template"}</label>
                    <select id="doc-template" required=true onchange={link.callback(|e: Event| Msg::SelectTemplate(select_value(e)))}>
                        <option value="" selected={self.template_id.is_none()}>{"Select a template"}</option>
                        {
                            for self.templates.iter().filter(|t| t.is_active).map(|t| html! {
                                <option value={t.id.to_string()} selected={self.template_id == Some(t.id)}>
                                    { t.picker_label() }
                                </option>
                            })
                        }
                    </select>
                    <label for="doc-client">{"Client"}</label>
                    <select id="doc-client" required=true onchange={link.callback(|e: Event| Msg::SelectClient(select_value(e)))}>
                        <option value="" selected={self.client_id.is_none()}>{"Select a client"}</option>
                        {
                            for clients.iter().map(|c| html! {
                                <option value={c.id.to_string()} selected={self.client_id == Some(c.id)}>
                                    { &c.name }
                                </option>
                            })
                        }
                    </select>
                    <div class="actions">
                        <button type="submit" class="btn primary" disabled={self.creating}>
                            { if self.creating { "Creating..." } else { "Create Draft" } }
                        </button>
                    </div>
                </form>
            </YwMaterialTopSheet>
        }
    }
}
