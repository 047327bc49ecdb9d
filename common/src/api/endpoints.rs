//! Paths of the REST endpoints the front-end consumes.
//!
//! Collection paths keep the trailing slash the API routes are declared
//! with, which avoids a redirect that would drop the `Authorization` header.

use crate::model::document::DownloadFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    /// Whether the session credential is attached. Only login and register
    /// are public.
    pub authenticated: bool,
}

impl Endpoint {
    fn private(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            authenticated: true,
        }
    }

    fn public(path: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            ..Self::private(path)
        }
    }

    fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Absolute URL under `base`, with the query string percent-encoded.
    pub fn url(&self, base: &str) -> String {
        let mut url = format!("{}{}", base.trim_end_matches('/'), self.path);
        for (i, (key, value)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

pub fn login() -> Endpoint {
    Endpoint::public("/auth/login")
}

pub fn register() -> Endpoint {
    Endpoint::public("/auth/register")
}

/// Client collection. A blank search is omitted so the API returns every
/// non-archived client.
pub fn clients(search: &str) -> Endpoint {
    let endpoint = Endpoint::private("/clients/");
    if search.trim().is_empty() {
        endpoint
    } else {
        endpoint.with_query("search", search)
    }
}

pub fn client(id: i64) -> Endpoint {
    Endpoint::private(format!("/clients/{id}"))
}

pub fn archive_client(id: i64) -> Endpoint {
    Endpoint::private(format!("/clients/{id}/archive"))
}

pub fn documents() -> Endpoint {
    Endpoint::private("/documents/")
}

pub fn document(id: i64) -> Endpoint {
    Endpoint::private(format!("/documents/{id}"))
}

pub fn document_versions(id: i64) -> Endpoint {
    Endpoint::private(format!("/documents/{id}/versions"))
}

pub fn generate_document(id: i64) -> Endpoint {
    Endpoint::private(format!("/documents/{id}/generate"))
}

pub fn download_version(document_id: i64, version_id: i64, format: DownloadFormat) -> Endpoint {
    Endpoint::private(format!("/documents/{document_id}/download/{version_id}"))
        .with_query("file_type", format.as_str())
}

pub fn export_documents_csv() -> Endpoint {
    Endpoint::private("/documents/export/csv")
}

pub fn templates() -> Endpoint {
    Endpoint::private("/templates/")
}

pub fn template(id: i64) -> Endpoint {
    Endpoint::private(format!("/templates/{id}"))
}

pub fn test_render(template_id: i64) -> Endpoint {
    Endpoint::private(format!("/templates/{template_id}/test-render"))
}

pub fn my_company() -> Endpoint {
    Endpoint::private("/companies/me")
}

pub fn accountant_companies() -> Endpoint {
    Endpoint::private("/accountant/companies")
}

/// `until_date` is `YYYY-MM-DD`, as produced by an `<input type="date">`.
pub fn lock_period(company_id: i64, until_date: &str) -> Endpoint {
    Endpoint::private(format!("/accountant/companies/{company_id}/lock"))
        .with_query("until_date", until_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:8000/api";

    #[test]
    fn only_auth_endpoints_are_public() {
        assert!(!login().authenticated);
        assert!(!register().authenticated);
        assert!(documents().authenticated);
        assert!(test_render(1).authenticated);
    }

    #[test]
    fn search_is_encoded_and_omitted_when_blank() {
        assert_eq!(clients("").url(BASE), "http://localhost:8000/api/clients/");
        assert_eq!(
            clients("Dupont & Fils").url(BASE),
            "http://localhost:8000/api/clients/?search=Dupont%20%26%20Fils"
        );
    }

    #[test]
    fn download_urls_select_the_format() {
        assert_eq!(
            download_version(4, 11, DownloadFormat::Docx).url(BASE),
            "http://localhost:8000/api/documents/4/download/11?file_type=docx"
        );
        assert_eq!(
            download_version(4, 11, DownloadFormat::Pdf).url(&format!("{BASE}/")),
            "http://localhost:8000/api/documents/4/download/11?file_type=pdf"
        );
    }

    #[test]
    fn lock_period_passes_date_as_query() {
        assert_eq!(
            lock_period(2, "2025-12-31").url(BASE),
            "http://localhost:8000/api/accountant/companies/2/lock?until_date=2025-12-31"
        );
    }
}
