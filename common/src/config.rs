//! Build-time configuration of the front-end.
//!
//! The bundle is static, so configuration is baked in at compile time:
//! `FACTUREZEN_API_URL=https://api.example.com/api trunk build --release`.

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base of every REST path, without a trailing slash.
    pub api_base_url: String,
}

impl AppConfig {
    pub fn new(api_base_url: &str) -> Self {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        let api_base_url = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        Self {
            api_base_url: api_base_url.to_string(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::new(option_env!("FACTUREZEN_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(AppConfig::new("https://api.example.com/api//").api_base_url, "https://api.example.com/api");
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        assert_eq!(AppConfig::new("  ").api_base_url, DEFAULT_API_URL);
    }
}
