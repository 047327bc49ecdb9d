use serde::{Deserialize, Serialize};

use crate::model::document::DocumentType;
use crate::model::schema::TemplateSchema;

/// An uploaded DOCX template. Re-uploading under the same name creates a new
/// row with the next `version`; the previous one is deactivated server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default = "first_version")]
    pub version: u32,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    /// Presigned link to the original upload.
    #[serde(default)]
    pub docx_source_url: Option<String>,
    #[serde(default)]
    pub schema_json: TemplateSchema,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn first_version() -> u32 {
    1
}

fn active_by_default() -> bool {
    true
}

impl Template {
    /// File name offered for a test render: `preview_<name>_v<version>.docx`.
    pub fn preview_file_name(&self) -> String {
        format!("preview_{}_v{}.docx", self.name, self.version)
    }

    /// Label used in pickers, e.g. `Invoice Modern (INVOICE)`.
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.name, self.doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::FieldKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_template_with_schema() {
        let template: Template = serde_json::from_value(json!({
            "id": 5,
            "company_id": 1,
            "name": "Invoice Modern",
            "type": "INVOICE",
            "is_active": true,
            "version": 2,
            "docx_source_url": "https://storage/templates/1/x.docx",
            "schema_json": {
                "type": "object",
                "properties": {"amount": {"type": "number", "title": "Amount"}},
                "required": ["amount"]
            },
            "created_at": "2026-01-01T00:00:00"
        }))
        .unwrap();

        assert_eq!(template.preview_file_name(), "preview_Invoice Modern_v2.docx");
        assert_eq!(template.picker_label(), "Invoice Modern (INVOICE)");
        assert_eq!(template.schema_json.kind_of("amount"), Some(FieldKind::Number));
        assert_eq!(template.schema_json.kind_of("missing"), None);
    }
}
