//! Typed view over a template's variable schema.
//!
//! The server extracts the placeholders of an uploaded DOCX and stores them
//! as a JSON-Schema-like object:
//!
//! ```json
//! { "type": "object",
//!   "properties": { "unit_price": { "type": "number", "title": "Unit price" } },
//!   "required": ["unit_price"] }
//! ```
//!
//! Properties are kept as raw JSON so that a malformed entry never prevents
//! the rest of the schema from decoding; [`TemplateSchema::fields`] maps each
//! one onto the closed set of [`FieldKind`]s the forms know how to render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input strategy for a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Number,
}

impl FieldKind {
    /// `"number"` and `"integer"` are numeric; every other declared type,
    /// or none at all, falls back to free text.
    pub fn from_schema_type(raw: Option<&str>) -> Self {
        match raw {
            Some("number") | Some("integer") => Self::Number,
            _ => Self::Text,
        }
    }

    /// Value of the HTML `type` attribute used to render the field.
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
        }
    }

    /// Converts raw input text into the JSON value sent to the API.
    ///
    /// Number fields become JSON numbers when the text parses (integers stay
    /// integers); otherwise the text is kept as a string so nothing the user
    /// typed is lost.
    pub fn coerce(&self, raw: &str) -> Value {
        match self {
            Self::Text => Value::String(raw.to_string()),
            Self::Number => {
                let trimmed = raw.trim();
                if let Ok(int) = trimmed.parse::<i64>() {
                    Value::from(int)
                } else if let Some(number) = trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                {
                    Value::Number(number)
                } else {
                    Value::String(raw.to_string())
                }
            }
        }
    }
}

/// One renderable field derived from a schema property.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSchema {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl TemplateSchema {
    /// Fields in the order the server declared them.
    pub fn fields(&self) -> Vec<SchemaField> {
        self.properties
            .iter()
            .map(|(key, property)| {
                let title = property
                    .get("title")
                    .and_then(Value::as_str)
                    .filter(|t| !t.trim().is_empty());
                SchemaField {
                    key: key.clone(),
                    label: title.unwrap_or(key).to_string(),
                    kind: FieldKind::from_schema_type(property.get("type").and_then(Value::as_str)),
                    required: self.required.iter().any(|r| r == key),
                }
            })
            .collect()
    }

    pub fn kind_of(&self, key: &str) -> Option<FieldKind> {
        self.properties
            .get(key)
            .map(|p| FieldKind::from_schema_type(p.get("type").and_then(Value::as_str)))
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Builds a data map from raw form text, one entry per declared field.
    /// Fields left blank are sent as empty strings.
    pub fn collect(&self, values: &BTreeMap<String, String>) -> Map<String, Value> {
        self.fields()
            .into_iter()
            .map(|field| {
                let raw = values.get(&field.key).map(String::as_str).unwrap_or_default();
                let value = field.kind.coerce(raw);
                (field.key, value)
            })
            .collect()
    }
}

/// Text shown in an input for a stored value. Strings are shown verbatim,
/// `null` as empty, anything else as its JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn schema(value: Value) -> TemplateSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn fields_keep_declaration_order_and_fall_back_to_key_labels() {
        let schema = schema(json!({
            "type": "object",
            "properties": {
                "client_name": {"type": "string", "title": "Client name"},
                "unit_price": {"type": "number", "title": ""},
                "notes": {}
            },
            "required": ["client_name"]
        }));

        let fields = schema.fields();
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["client_name", "unit_price", "notes"]);
        assert_eq!(fields[0].label, "Client name");
        assert!(fields[0].required);
        assert_eq!(fields[1].label, "unit_price");
        assert_eq!(fields[1].kind, FieldKind::Number);
        assert_eq!(fields[2].kind, FieldKind::Text);
        assert!(!fields[2].required);
    }

    #[test]
    fn missing_schema_has_no_fields() {
        let schema = schema(json!({}));
        assert!(schema.is_empty());
        assert!(schema.fields().is_empty());
    }

    #[rstest]
    #[case(Some("number"), FieldKind::Number)]
    #[case(Some("integer"), FieldKind::Number)]
    #[case(Some("string"), FieldKind::Text)]
    #[case(Some("date"), FieldKind::Text)]
    #[case(None, FieldKind::Text)]
    fn maps_declared_types(#[case] raw: Option<&str>, #[case] expected: FieldKind) {
        assert_eq!(FieldKind::from_schema_type(raw), expected);
    }

    #[rstest]
    #[case(FieldKind::Number, "12", json!(12))]
    #[case(FieldKind::Number, " 12.5 ", json!(12.5))]
    #[case(FieldKind::Number, "12,5", json!("12,5"))]
    #[case(FieldKind::Number, "", json!(""))]
    #[case(FieldKind::Text, "42", json!("42"))]
    fn coerces_input(#[case] kind: FieldKind, #[case] raw: &str, #[case] expected: Value) {
        assert_eq!(kind.coerce(raw), expected);
    }

    #[test]
    fn displays_non_string_values_as_json_text() {
        assert_eq!(display_value(&json!("Acme")), "Acme");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn collects_form_text_into_typed_values() {
        let schema = schema(json!({
            "properties": {
                "client_name": {"type": "string"},
                "qty": {"type": "integer"},
                "notes": {}
            }
        }));
        let values = BTreeMap::from([
            ("client_name".to_string(), "Acme".to_string()),
            ("qty".to_string(), "3".to_string()),
            ("stale".to_string(), "ignored".to_string()),
        ]);

        let data = schema.collect(&values);
        assert_eq!(
            Value::Object(data),
            json!({"client_name": "Acme", "qty": 3, "notes": ""})
        );
    }
}
