use common::api::ApiError;
use common::model::client::Client;
use common::model::document::{Document, DocumentVersion, DownloadFormat};
use common::model::template::Template;

pub enum Msg {
    Loaded(Document, Vec<DocumentVersion>),
    RelatedLoaded(Template, Client),
    /// The template or client fetch failed; the form shows an error.
    RelatedFailed(ApiError),
    LoadFailed(ApiError),
    SetField(String, String),
    Save,
    Saved(Option<Document>),
    SaveFailed(ApiError),
    Generate,
    GenerateQueued,
    GenerateFailed(ApiError),
    Poll,
    /// One polling read; `None` when the request failed.
    Polled(Option<(Document, Vec<DocumentVersion>)>),
    Preview,
    PreviewReady(Vec<u8>),
    Download(DocumentVersion, DownloadFormat),
    FileReady {
        name: String,
        bytes: Vec<u8>,
        mime_type: &'static str,
    },
    RequestFailed(ApiError),
    Back,
}
