//! State machine behind the document editor page.
//!
//! ```text
//! DRAFT --save-----> DRAFT
//! DRAFT --generate-> GENERATED (terminal)
//! ```
//!
//! The editor owns the loaded document, its versions, and (once the second
//! round of requests resolves) its template and client. User input is kept
//! as raw text per field and overlaid on the stored `current_data` whenever
//! a payload is built, so keys the template no longer declares survive a
//! save untouched even though no input is rendered for them.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::model::client::Client;
use crate::model::document::{Document, DocumentData, DocumentVersion};
use crate::model::schema::{FieldKind, display_value};
use crate::model::template::Template;
use crate::requests::DocumentDataUpdate;

/// Progress of the template and client fetch that follows the document load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedState {
    Loading,
    Failed,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    Saving,
    Generating,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("This document has already been generated.")]
    NotDraft,
    #[error("Please wait for the current operation to finish.")]
    Busy,
}

/// A rendered input: schema metadata plus the text currently in the box.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: Document,
    versions: Vec<DocumentVersion>,
    template: Option<Template>,
    client: Option<Client>,
    related_failed: bool,
    edits: BTreeMap<String, String>,
    phase: EditorPhase,
    in_flight: Option<DocumentData>,
    saved_fingerprint: String,
}

impl DocumentEditor {
    pub fn new(document: Document, versions: Vec<DocumentVersion>) -> Self {
        let saved_fingerprint = fingerprint(&document.current_data);
        Self {
            document,
            versions,
            template: None,
            client: None,
            related_failed: false,
            edits: BTreeMap::new(),
            phase: EditorPhase::Idle,
            in_flight: None,
            saved_fingerprint,
        }
    }

    pub fn set_template(&mut self, template: Template) {
        self.template = Some(template);
        self.related_failed = false;
    }

    /// Records that the template or client could not be fetched. The form
    /// cannot be built without the template's schema.
    pub fn mark_related_failed(&mut self) {
        if self.template.is_none() {
            self.related_failed = true;
        }
    }

    pub fn related_state(&self) -> RelatedState {
        match (&self.template, self.related_failed) {
            (Some(_), _) => RelatedState::Ready,
            (None, true) => RelatedState::Failed,
            (None, false) => RelatedState::Loading,
        }
    }

    pub fn set_client(&mut self, client: Client) {
        self.client = Some(client);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn versions(&self) -> &[DocumentVersion] {
        &self.versions
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// One field per schema property, in schema order, pre-filled from the
    /// pending edit or else the stored value. Empty until the template is
    /// known.
    pub fn fields(&self) -> Vec<FieldView> {
        let Some(template) = &self.template else {
            return Vec::new();
        };
        template
            .schema_json
            .fields()
            .into_iter()
            .map(|field| {
                let value = match self.edits.get(&field.key) {
                    Some(raw) => raw.clone(),
                    None => self
                        .document
                        .current_data
                        .get(&field.key)
                        .map(display_value)
                        .unwrap_or_default(),
                };
                FieldView {
                    key: field.key,
                    label: field.label,
                    kind: field.kind,
                    required: field.required,
                    value,
                }
            })
            .collect()
    }

    pub fn set_field(&mut self, key: &str, raw: String) {
        self.edits.insert(key.to_string(), raw);
    }

    /// Stored data overlaid with every pending edit, coerced by field kind.
    pub fn current_data(&self) -> DocumentData {
        let mut data = self.document.current_data.clone();
        for (key, raw) in &self.edits {
            let kind = self
                .template
                .as_ref()
                .and_then(|t| t.schema_json.kind_of(key))
                .unwrap_or(FieldKind::Text);
            data.insert(key.clone(), kind.coerce(raw));
        }
        data
    }

    pub fn can_save(&self) -> bool {
        self.document.status.is_draft() && self.phase == EditorPhase::Idle
    }

    pub fn can_generate(&self) -> bool {
        self.document.status.is_draft() && self.phase == EditorPhase::Idle
    }

    /// True while the form differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        fingerprint(&self.current_data()) != self.saved_fingerprint
    }

    fn ensure_ready(&self) -> Result<(), EditorError> {
        if !self.document.status.is_draft() {
            return Err(EditorError::NotDraft);
        }
        if self.phase != EditorPhase::Idle {
            return Err(EditorError::Busy);
        }
        Ok(())
    }

    /// Starts a save and returns the partial update to send: `current_data`
    /// only.
    pub fn begin_save(&mut self) -> Result<DocumentDataUpdate, EditorError> {
        self.ensure_ready()?;
        let current_data = self.current_data();
        self.in_flight = Some(current_data.clone());
        self.phase = EditorPhase::Saving;
        Ok(DocumentDataUpdate { current_data })
    }

    /// Completes a save. `saved` is the document echoed by the API, if it
    /// decoded; otherwise the data that was sent is taken as persisted.
    pub fn save_succeeded(&mut self, saved: Option<Document>) {
        let sent = self.in_flight.take().unwrap_or_else(|| self.current_data());
        match saved {
            Some(document) => self.document = document,
            None => self.document.current_data = sent.clone(),
        }
        self.saved_fingerprint = fingerprint(&sent);
        self.phase = EditorPhase::Idle;
    }

    pub fn save_failed(&mut self) {
        self.in_flight = None;
        self.phase = EditorPhase::Idle;
    }

    pub fn begin_generate(&mut self) -> Result<(), EditorError> {
        self.ensure_ready()?;
        self.phase = EditorPhase::Generating;
        Ok(())
    }

    /// Applies a fresh read taken while generating. Returns `true` once the
    /// document has left `DRAFT`, which ends the generating phase.
    pub fn observe_generation(&mut self, document: Document, versions: Vec<DocumentVersion>) -> bool {
        self.document.status = document.status;
        self.document.updated_at = document.updated_at;
        self.versions = versions;
        let done = !self.document.status.is_draft();
        if done {
            self.phase = EditorPhase::Idle;
        }
        done
    }

    /// Leaves the generating phase without a confirmed result (request
    /// rejected, or polling gave up).
    pub fn generation_stopped(&mut self) {
        if self.phase == EditorPhase::Generating {
            self.phase = EditorPhase::Idle;
        }
    }
}

/// Order-independent MD5 digest of a data map, used for dirty tracking.
fn fingerprint(data: &DocumentData) -> String {
    let canonical: BTreeMap<&String, &Value> = data.iter().collect();
    let serialized = serde_json::to_string(&canonical).unwrap_or_default();
    format!("{:x}", md5::compute(serialized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::{DocumentStatus, DocumentType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document(status: DocumentStatus, data: Value) -> Document {
        Document {
            id: 10,
            doc_type: DocumentType::Invoice,
            status,
            template_id: 2,
            client_id: 3,
            current_data: serde_json::from_value(data).unwrap(),
            current_totals: DocumentData::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn template(properties: Value) -> Template {
        serde_json::from_value(json!({
            "id": 2,
            "name": "Invoice Modern",
            "type": "INVOICE",
            "version": 1,
            "schema_json": {"type": "object", "properties": properties}
        }))
        .unwrap()
    }

    fn editor(data: Value) -> DocumentEditor {
        let mut editor = DocumentEditor::new(document(DocumentStatus::Draft, data), Vec::new());
        editor.set_template(template(json!({
            "A": {"type": "string", "title": "Field A"},
            "B": {"type": "number", "title": "Field B"}
        })));
        editor
    }

    #[test]
    fn renders_one_field_per_property_prefilled_from_stored_data() {
        let editor = editor(json!({"A": "hello", "legacy": "kept"}));
        let fields = editor.fields();

        assert_eq!(fields.len(), 2);
        assert_eq!((fields[0].key.as_str(), fields[0].value.as_str()), ("A", "hello"));
        assert_eq!((fields[1].key.as_str(), fields[1].value.as_str()), ("B", ""));
        assert_eq!(fields[1].kind, FieldKind::Number);
    }

    #[test]
    fn no_fields_until_template_is_known() {
        let editor = DocumentEditor::new(document(DocumentStatus::Draft, json!({"A": "x"})), Vec::new());
        assert!(editor.fields().is_empty());
    }

    #[test]
    fn failed_template_fetch_is_reported_instead_of_loading() {
        let mut editor = DocumentEditor::new(document(DocumentStatus::Draft, json!({})), Vec::new());
        assert_eq!(editor.related_state(), RelatedState::Loading);

        editor.mark_related_failed();
        assert_eq!(editor.related_state(), RelatedState::Failed);
        assert!(editor.fields().is_empty());

        editor.set_template(template(json!({"A": {"type": "string"}})));
        assert_eq!(editor.related_state(), RelatedState::Ready);
    }

    #[test]
    fn save_sends_only_current_data_and_preserves_unknown_keys() {
        let mut editor = editor(json!({"A": "old", "legacy": "kept"}));
        editor.set_field("A", "new".into());
        editor.set_field("B", "42".into());

        let update = editor.begin_save().unwrap();
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            json!({"current_data": {"A": "new", "legacy": "kept", "B": 42}})
        );
        assert!(body.get("template_id").is_none());
        assert!(body.get("client_id").is_none());
        assert_eq!(editor.phase(), EditorPhase::Saving);
        assert!(!editor.can_generate());
    }

    #[test]
    fn dirty_tracking_follows_saves() {
        let mut editor = editor(json!({"A": "old"}));
        assert!(!editor.is_dirty());

        editor.set_field("A", "new".into());
        assert!(editor.is_dirty());

        editor.begin_save().unwrap();
        editor.save_succeeded(None);
        assert!(!editor.is_dirty());
        assert_eq!(editor.document().current_data.get("A"), Some(&json!("new")));
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn retyping_the_stored_value_is_not_dirty() {
        let mut editor = editor(json!({"B": 7}));
        editor.set_field("B", "7".into());
        assert!(!editor.is_dirty());
    }

    #[test]
    fn failed_save_returns_to_idle_and_stays_dirty() {
        let mut editor = editor(json!({}));
        editor.set_field("A", "x".into());
        editor.begin_save().unwrap();
        editor.save_failed();

        assert_eq!(editor.phase(), EditorPhase::Idle);
        assert!(editor.is_dirty());
    }

    #[test]
    fn generated_document_cannot_generate_or_save() {
        let mut editor = DocumentEditor::new(document(DocumentStatus::Generated, json!({})), Vec::new());
        assert!(!editor.can_generate());
        assert!(!editor.can_save());
        assert_eq!(editor.begin_generate(), Err(EditorError::NotDraft));
        assert_eq!(editor.begin_save().unwrap_err(), EditorError::NotDraft);
    }

    #[test]
    fn generate_is_exclusive_with_save() {
        let mut editor = editor(json!({}));
        editor.begin_generate().unwrap();
        assert_eq!(editor.begin_save().unwrap_err(), EditorError::Busy);
    }

    #[test]
    fn observing_generated_status_ends_generation() {
        let mut editor = editor(json!({"A": "x"}));
        editor.begin_generate().unwrap();

        let still_draft = document(DocumentStatus::Draft, json!({"A": "x"}));
        assert!(!editor.observe_generation(still_draft, Vec::new()));
        assert_eq!(editor.phase(), EditorPhase::Generating);

        let version = DocumentVersion {
            id: 1,
            doc_number: "FAC-2026-0001".into(),
            version_number: 1,
            generated_at: None,
        };
        let generated = document(DocumentStatus::Generated, json!({"A": "x"}));
        assert!(editor.observe_generation(generated, vec![version]));
        assert_eq!(editor.phase(), EditorPhase::Idle);
        assert_eq!(editor.versions().len(), 1);
        assert!(!editor.can_generate());
    }

    #[test]
    fn stopped_generation_returns_to_idle() {
        let mut editor = editor(json!({}));
        editor.begin_generate().unwrap();
        editor.generation_stopped();
        assert!(editor.can_generate());
    }
}
