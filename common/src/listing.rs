//! Helpers shared by the list pages and the dashboard.

use crate::api::ApiError;
use crate::model::client::Client;
use crate::model::document::Document;
use crate::model::template::Template;

/// Clients offered when creating a document: archived ones are left out.
/// Existing documents keep pointing at archived clients; only the picker
/// hides them.
pub fn pickable_clients(clients: &[Client]) -> Vec<Client> {
    clients.iter().filter(|c| !c.is_archived).cloned().collect()
}

/// Display name of a document's client, falling back to its id when the
/// client is not in the loaded list (e.g. archived).
pub fn client_label(clients: &[Client], client_id: i64) -> String {
    clients
        .iter()
        .find(|c| c.id == client_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Client #{client_id}"))
}

/// Checks the template upload form before it is sent.
pub fn validate_template_upload(name: &str, file_name: Option<&str>) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("Please enter a template name".into()));
    }
    let Some(file_name) = file_name else {
        return Err(ApiError::Validation("Please select a file".into()));
    };
    if !file_name.to_ascii_lowercase().ends_with(".docx") {
        return Err(ApiError::Validation("Only .docx files are allowed".into()));
    }
    Ok(())
}

/// Results of a search box that fires one request per keystroke. Answers
/// can arrive out of order, so each one carries the query it was sent for
/// and only the answer to the current query is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSearch<T> {
    query: String,
    results: Vec<T>,
    loading: bool,
}

impl<T> LiveSearch<T> {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: true,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Stores `results` if they answer the current query. Returns whether
    /// they were applied.
    pub fn apply(&mut self, query: &str, results: Vec<T>) -> bool {
        if query != self.query {
            return false;
        }
        self.results = results;
        self.loading = false;
        true
    }

    pub fn failed(&mut self) {
        self.loading = false;
    }
}

impl<T> Default for LiveSearch<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub generated: usize,
    pub drafts: usize,
    pub clients: usize,
    pub templates: usize,
}

impl DashboardStats {
    pub fn from_lists(documents: &[Document], clients: &[Client], templates: &[Template]) -> Self {
        let drafts = documents.iter().filter(|d| d.status.is_draft()).count();
        Self {
            generated: documents.len() - drafts,
            drafts,
            clients: clients.iter().filter(|c| !c.is_archived).count(),
            templates: templates.iter().filter(|t| t.is_active).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::{DocumentData, DocumentStatus, DocumentType};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn client(id: i64, name: &str, archived: bool) -> Client {
        Client {
            id,
            name: name.into(),
            email: None,
            address: None,
            vat_number: None,
            registration_number: None,
            is_archived: archived,
            created_at: None,
        }
    }

    fn document(id: i64, client_id: i64, status: DocumentStatus) -> Document {
        Document {
            id,
            doc_type: DocumentType::Quote,
            status,
            template_id: 1,
            client_id,
            current_data: DocumentData::new(),
            current_totals: DocumentData::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn archived_clients_leave_the_picker_but_not_documents() {
        let clients = vec![client(1, "Acme", false), client(2, "Globex", true)];
        let picker: Vec<i64> = pickable_clients(&clients).iter().map(|c| c.id).collect();
        assert_eq!(picker, vec![1]);

        let existing = document(5, 2, DocumentStatus::Draft);
        assert_eq!(existing.client_id, 2);
        assert_eq!(client_label(&clients, existing.client_id), "Globex");
    }

    #[test]
    fn unknown_client_falls_back_to_id() {
        assert_eq!(client_label(&[], 9), "Client #9");
    }

    #[rstest]
    #[case("Invoice", Some("model.docx"), Ok(()))]
    #[case("Invoice", Some("MODEL.DOCX"), Ok(()))]
    #[case("Invoice", None, Err(ApiError::Validation("Please select a file".into())))]
    #[case("Invoice", Some("model.pdf"), Err(ApiError::Validation("Only .docx files are allowed".into())))]
    #[case(" ", Some("model.docx"), Err(ApiError::Validation("Please enter a template name".into())))]
    fn validates_uploads(#[case] name: &str, #[case] file: Option<&str>, #[case] expected: Result<(), ApiError>) {
        assert_eq!(validate_template_upload(name, file), expected);
    }

    #[test]
    fn dashboard_counts_live_rows() {
        let documents = vec![
            document(1, 1, DocumentStatus::Draft),
            document(2, 1, DocumentStatus::Generated),
            document(3, 1, DocumentStatus::Paid),
        ];
        let clients = vec![client(1, "Acme", false), client(2, "Old", true)];
        let stats = DashboardStats::from_lists(&documents, &clients, &[]);
        assert_eq!(
            stats,
            DashboardStats {
                generated: 2,
                drafts: 1,
                clients: 1,
                templates: 0
            }
        );
    }

    #[test]
    fn stale_search_answers_are_dropped() {
        let mut search = LiveSearch::new();
        search.set_query("a".into());
        search.set_query("ab".into());

        assert!(search.apply("ab", vec![client(2, "Abc", false)]));
        assert!(!search.apply("a", vec![client(1, "Acme", false), client(2, "Abc", false)]));

        let ids: Vec<i64> = search.results().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(!search.is_loading());
    }

    #[test]
    fn search_stays_loading_until_current_answer() {
        let mut search: LiveSearch<Client> = LiveSearch::new();
        search.set_query("glo".into());
        assert!(!search.apply("", Vec::new()));
        assert!(search.is_loading());
    }
}
