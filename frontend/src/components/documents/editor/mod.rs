//! Document editor: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic and view rendering.
//!
//! Loading happens in two rounds. The document and its version history are
//! fetched together; once the document is known, its template (for the
//! field schema) and client (for the header) are fetched together.

use common::api::endpoints;
use common::model::document::{Document, DocumentVersion};
use futures_util::future::try_join;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::set_window_dirty_flag;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DocumentEditorProps;
pub use state::DocumentEditorPage;

impl Component for DocumentEditorPage {
    type Message = Msg;
    type Properties = DocumentEditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let link = ctx.link().clone();
        let api = props.api.clone();
        let id = props.document_id;
        spawn_local(async move {
            match fetch_document(&api, id).await {
                Ok((document, versions)) => link.send_message(Msg::Loaded(document, versions)),
                Err(err) => link.send_message(Msg::LoadFailed(err)),
            }
        });
        DocumentEditorPage::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let render = update::update(self, ctx, msg);
        set_window_dirty_flag(self.is_dirty());
        render
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        set_window_dirty_flag(false);
    }
}

/// Reads a document and its versions concurrently.
async fn fetch_document(
    api: &ApiClient,
    id: i64,
) -> Result<(Document, Vec<DocumentVersion>), common::api::ApiError> {
    try_join(
        api.get::<Document>(endpoints::document(id)),
        api.get::<Vec<DocumentVersion>>(endpoints::document_versions(id)),
    )
    .await
}
