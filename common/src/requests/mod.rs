//! Request payloads sent to the REST API.
//!
//! The client create body omits blank optionals. PATCH bodies send them as
//! `null`, since the API only updates the keys present in the body and a
//! cleared field has to reach it.

use serde::Serialize;

use crate::model::company::Company;
use crate::model::document::{DocumentData, DocumentType};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body of `POST /documents/`: a new draft bound to a template and a client.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDocumentRequest {
    pub client_id: i64,
    pub template_id: i64,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub current_data: DocumentData,
    pub current_totals: DocumentData,
}

impl CreateDocumentRequest {
    pub fn draft(template_id: i64, client_id: i64, doc_type: DocumentType) -> Self {
        Self {
            client_id,
            template_id,
            doc_type,
            current_data: DocumentData::new(),
            current_totals: DocumentData::new(),
        }
    }
}

/// Body of the editor's save: the variable values and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDataUpdate {
    pub current_data: DocumentData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
}

impl ClientPayload {
    /// Builds a payload from raw form input; blank optional fields are
    /// omitted rather than sent as empty strings (the API validates `email`).
    pub fn from_form(name: &str, email: &str, address: &str, vat: &str, registration: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: non_blank(email),
            address: non_blank(address),
            vat_number: non_blank(vat),
            registration_number: non_blank(registration),
        }
    }
}

/// Body of `PATCH /clients/{id}`: every field is sent, blanks as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientUpdate {
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub registration_number: Option<String>,
}

impl ClientUpdate {
    pub fn from_form(name: &str, email: &str, address: &str, vat: &str, registration: &str) -> Self {
        let ClientPayload { name, email, address, vat_number, registration_number } =
            ClientPayload::from_form(name, email, address, vat, registration);
        Self { name, email, address, vat_number, registration_number }
    }
}

/// Body of `PATCH /companies/me`; `None` serializes as `null` and clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyUpdate {
    pub name: String,
    pub legal_form: Option<String>,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub registration_number: Option<String>,
}

impl From<&Company> for CompanyUpdate {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            legal_form: company.legal_form.clone(),
            address: company.address.clone(),
            vat_number: company.vat_number.clone(),
            registration_number: company.registration_number.clone(),
        }
    }
}

pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn draft_request_matches_api_shape() {
        let body = serde_json::to_value(CreateDocumentRequest::draft(3, 9, DocumentType::Quote)).unwrap();
        assert_eq!(
            body,
            json!({
                "client_id": 9,
                "template_id": 3,
                "type": "QUOTE",
                "current_data": {},
                "current_totals": {}
            })
        );
    }

    #[test]
    fn client_payload_omits_blank_fields() {
        let payload = ClientPayload::from_form(" Acme ", "", "1 rue de Paris", "  ", "");
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({"name": "Acme", "address": "1 rue de Paris"})
        );
    }

    #[test]
    fn company_update_carries_edited_profile() {
        let company = Company {
            id: 1,
            name: "FactureZen SAS".into(),
            legal_form: Some("SAS".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(CompanyUpdate::from(&company)).unwrap(),
            json!({
                "name": "FactureZen SAS",
                "legal_form": "SAS",
                "address": null,
                "vat_number": null,
                "registration_number": null
            })
        );
    }

    #[test]
    fn cleared_address_is_sent_as_null_in_updates() {
        let client = ClientUpdate::from_form("Acme", "billing@acme.fr", "   ", "", "");
        let client = serde_json::to_value(client).unwrap();
        assert_eq!(client["address"], Value::Null);
        assert!(client.as_object().unwrap().contains_key("address"));
        assert_eq!(client["email"], json!("billing@acme.fr"));

        let company = Company {
            id: 1,
            name: "FactureZen SAS".into(),
            address: None,
            ..Default::default()
        };
        let company = serde_json::to_value(CompanyUpdate::from(&company)).unwrap();
        assert_eq!(company["address"], Value::Null);
        assert!(company.as_object().unwrap().contains_key("address"));
    }
}
