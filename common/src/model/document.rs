use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Free-form variable values of a document, keyed by schema property.
pub type DocumentData = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Quote,
    Invoice,
    Contract,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [Self::Quote, Self::Invoice, Self::Contract];

    /// Wire value, as sent in JSON bodies and multipart forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quote => "QUOTE",
            Self::Invoice => "INVOICE",
            Self::Contract => "CONTRACT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quote => "Quote",
            Self::Invoice => "Invoice",
            Self::Contract => "Contract",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a document. Only `Draft` accepts edits and generation; the
/// API may report the downstream states after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentStatus {
    Draft,
    Generated,
    Sent,
    Paid,
    Cancelled,
}

impl DocumentStatus {
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Generated => "GENERATED",
            Self::Sent => "SENT",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub status: DocumentStatus,
    pub template_id: i64,
    pub client_id: i64,
    #[serde(default)]
    pub current_data: DocumentData,
    #[serde(default)]
    pub current_totals: DocumentData,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Immutable snapshot produced by a generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVersion {
    pub id: i64,
    /// Final number such as `FAC-2026-0001`.
    pub doc_number: String,
    pub version_number: u32,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// The two fixed output formats of a generated version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Pdf,
    Docx,
}

impl DownloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }
}

impl DocumentVersion {
    /// File name offered when downloading this version, e.g. `FAC-2026-0001_v2.pdf`.
    pub fn file_name(&self, format: DownloadFormat) -> String {
        format!("{}_v{}.{}", self.doc_number, self.version_number, format.as_str())
    }
}

/// File name offered for an editor preview: `preview_<type>_<id>.docx`.
pub fn preview_file_name(document: &Document) -> String {
    format!("preview_{}_{}.docx", document.doc_type, document.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_api_document_and_ignores_unknown_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id": 7,
            "company_id": 1,
            "type": "INVOICE",
            "status": "DRAFT",
            "template_id": 3,
            "client_id": 4,
            "current_data": {"client_name": "Acme", "qty": 2},
            "current_totals": {},
            "created_at": "2026-01-02T10:00:00",
            "updated_at": "2026-01-03T10:00:00"
        }))
        .unwrap();

        assert_eq!(doc.doc_type, DocumentType::Invoice);
        assert!(doc.status.is_draft());
        assert_eq!(doc.current_data.get("qty"), Some(&json!(2)));
        assert_eq!(preview_file_name(&doc), "preview_INVOICE_7.docx");
    }

    #[test]
    fn missing_data_maps_default_to_empty() {
        let doc: Document = serde_json::from_value(json!({
            "id": 1, "type": "QUOTE", "status": "GENERATED",
            "template_id": 1, "client_id": 1
        }))
        .unwrap();
        assert!(doc.current_data.is_empty());
        assert!(!doc.status.is_draft());
    }

    #[test]
    fn parses_document_type_case_insensitively() {
        assert_eq!(DocumentType::parse("contract"), Some(DocumentType::Contract));
        assert_eq!(DocumentType::parse("RECEIPT"), None);
    }

    #[test]
    fn version_downloads_are_named_after_the_document_number() {
        let version = DocumentVersion {
            id: 9,
            doc_number: "FAC-2026-0001".into(),
            version_number: 2,
            generated_at: None,
        };
        assert_eq!(version.file_name(DownloadFormat::Pdf), "FAC-2026-0001_v2.pdf");
        assert_eq!(version.file_name(DownloadFormat::Docx), "FAC-2026-0001_v2.docx");
        assert_eq!(DownloadFormat::Pdf.mime_type(), "application/pdf");
    }
}
