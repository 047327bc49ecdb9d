//! Landing page: counts and recent activity derived from the live lists.

use common::api::{endpoints, ApiError};
use common::listing::{client_label, DashboardStats};
use common::model::client::Client;
use common::model::display_date;
use common::model::document::Document;
use common::model::template::Template;
use common::route::Route;
use futures_util::future::try_join3;
use num_format::{Locale, ToFormattedString};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Navigate;
use crate::helpers::report_error;

const RECENT_LIMIT: usize = 5;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub api: ApiClient,
    pub navigate: Navigate,
}

pub enum Msg {
    Loaded(Vec<Document>, Vec<Client>, Vec<Template>),
    Failed(ApiError),
}

pub struct DashboardPage {
    loading: bool,
    stats: DashboardStats,
    recent: Vec<Document>,
    clients: Vec<Client>,
}

impl Component for DashboardPage {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let loaded = try_join3(
                api.get::<Vec<Document>>(endpoints::documents()),
                api.get::<Vec<Client>>(endpoints::clients("")),
                api.get::<Vec<Template>>(endpoints::templates()),
            )
            .await;
            match loaded {
                Ok((documents, clients, templates)) => link.send_message(Msg::Loaded(documents, clients, templates)),
                Err(err) => link.send_message(Msg::Failed(err)),
            }
        });

        Self {
            loading: true,
            stats: DashboardStats::default(),
            recent: Vec::new(),
            clients: Vec::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        self.loading = false;
        match msg {
            Msg::Loaded(mut documents, clients, templates) => {
                self.stats = DashboardStats::from_lists(&documents, &clients, &templates);
                documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                documents.truncate(RECENT_LIMIT);
                self.recent = documents;
                self.clients = clients;
            }
            Msg::Failed(err) => report_error(&err),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let navigate = &ctx.props().navigate;
        let cards = [
            ("trending_up", "Total Generated", self.stats.generated),
            ("schedule", "Pending Drafts", self.stats.drafts),
            ("group", "Active Clients", self.stats.clients),
            ("library_books", "Templates", self.stats.templates),
        ];

        html! {
            <div class="page">
                <div class="page-header">
                    <div>
                        <h1>{"Dashboard"}</h1>
                        <p class="muted">{"Overview of your documents and clients"}</p>
                    </div>
                    <button class="btn primary" onclick={navigate.reform(|_: MouseEvent| Route::Documents)}>
                        <i class="material-icons">{"add"}</i>{"New Document"}
                    </button>
                </div>
                <div class="stats-grid">
                    {
                        for cards.iter().map(|(icon, label, value)| html! {
                            <div class="card stat">
                                <i class="material-icons">{ *icon }</i>
                                <span class="muted">{ *label }</span>
                                <strong>
                                    { if self.loading { "…".to_string() } else { value.to_formatted_string(&Locale::fr) } }
                                </strong>
                            </div>
                        })
                    }
                </div>
                <div class="card">
                    <h2>{"Recent Activity"}</h2>
                    {
                        if self.recent.is_empty() {
                            html! { <p class="muted">{ if self.loading { "Loading..." } else { "No documents yet." } }</p> }
                        } else {
                            html! {
                                <ul class="rows">
                                    { for self.recent.iter().map(|doc| self.recent_row(doc, navigate)) }
                                </ul>
                            }
                        }
                    }
                </div>
            </div>
        }
    }
}

impl DashboardPage {
    fn recent_row(&self, doc: &Document, navigate: &Navigate) -> Html {
        let id = doc.id;
        html! {
            <li class="row clickable" onclick={navigate.reform(move |_: MouseEvent| Route::DocumentEditor(id))}>
                <span>{ format!("{} #{}", doc.doc_type, doc.id) }</span>
                <span class="muted">{ client_label(&self.clients, doc.client_id) }</span>
                <span class={classes!("badge", doc.status.is_draft().then_some("draft"))}>{ doc.status.as_str() }</span>
                <span class="muted">{ doc.updated_at.as_deref().map(display_date).unwrap_or_default() }</span>
            </li>
        }
    }
}
