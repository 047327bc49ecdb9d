use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Navigate;

/// Properties for the `DocumentEditorPage`.
///
/// The page is keyed on `document_id` by the app shell, so a different id
/// mounts a fresh editor rather than reusing the loaded state.
#[derive(Properties, PartialEq, Clone)]
pub struct DocumentEditorProps {
    pub document_id: i64,
    pub api: ApiClient,
    /// Used by the back button; the editor never navigates on its own.
    pub navigate: Navigate,
}
