use serde::{Deserialize, Serialize};

/// Legal profile of a tenant. One row per tenant, edited in place from the
/// settings page; the accountant space lists several of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub legal_form: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    /// SIRET.
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub period_locked_until: Option<String>,
}
