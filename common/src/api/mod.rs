//! Transport-independent half of the API client.
//!
//! The browser client in `frontend::api` performs the actual fetches; this
//! module decides what a response *means*: which statuses are failures, what
//! message the user sees, and when the session must be torn down.

pub mod endpoints;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use endpoints::Endpoint;

/// Message shown when a failed response carries no usable detail.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Every failure an API call can end in. `Display` is the text shown to the
/// user in a toast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Extracts the human-readable message of an error body.
///
/// Understands `{"detail": "..."}` and the validation shape
/// `{"detail": [{"msg": "..."}, ...]}`, whose messages are joined.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Classifies a response status.
///
/// `authenticated` tells whether the request carried the session credential.
/// A 401 on such a request always becomes [`ApiError::Unauthorized`], the
/// caller's cue to end the session; a 401 on a public endpoint (login) is an
/// ordinary failure carrying the server's message.
pub fn check_status(status: u16, body: &str, authenticated: bool) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    if status == 401 && authenticated {
        return Err(ApiError::Unauthorized);
    }
    Err(ApiError::Status {
        status,
        message: error_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
    })
}

/// Decodes a success body. An empty body decodes as JSON `null`, so callers
/// that do not care about the payload can ask for `serde_json::Value`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::Document;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"detail": "Document not found"}"#, Some("Document not found"))]
    #[case(
        r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}, {"msg": "field required"}]}"#,
        Some("value is not a valid email address; field required")
    )]
    #[case(r#"{"detail": ""}"#, None)]
    #[case(r#"{"message": "nope"}"#, None)]
    #[case("<html>Bad gateway</html>", None)]
    fn extracts_detail(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(error_message(body).as_deref(), expected);
    }

    #[test]
    fn success_statuses_pass() {
        assert_eq!(check_status(200, "", true), Ok(()));
        assert_eq!(check_status(204, "", false), Ok(()));
    }

    #[test]
    fn failure_carries_server_message_or_fallback() {
        assert_eq!(
            check_status(400, r#"{"detail": "Document already generated"}"#, true),
            Err(ApiError::Status {
                status: 400,
                message: "Document already generated".into()
            })
        );
        let err = check_status(500, "Internal Server Error", true).unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn authenticated_401_is_always_unauthorized() {
        let err = check_status(401, r#"{"detail": "Could not validate credentials"}"#, true).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn public_401_keeps_login_feedback() {
        let err = check_status(401, r#"{"detail": "Incorrect email or password"}"#, false).unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Incorrect email or password");
    }

    #[test]
    fn empty_body_decodes_as_null() {
        assert_eq!(decode::<Value>("").unwrap(), Value::Null);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(decode::<Document>(r#"{"id": "x"}"#), Err(ApiError::Decode(_))));
    }
}
