//! Server connection settings from the environment.

use crate::error::{GerritError, Result};

/// Connection settings for the Gerrit server.
///
/// Loaded from `GERRIT_URL`, `GERRIT_USERNAME`, and `GERRIT_PASSWORD` (or
/// `GERRIT_TOKEN` as a fallback), optionally seeded from a `.env` file in the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GerritConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl GerritConfig {
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; the variables may be set directly.
        let _ = dotenvy::dotenv();

        Self::from_parts(
            std::env::var("GERRIT_URL").ok(),
            std::env::var("GERRIT_USERNAME").ok(),
            std::env::var("GERRIT_PASSWORD")
                .or_else(|_| std::env::var("GERRIT_TOKEN"))
                .ok(),
        )
    }

    fn from_parts(
        url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        let mut missing = Vec::new();
        if url.as_deref().is_none_or(str::is_empty) {
            missing.push("GERRIT_URL");
        }
        if username.as_deref().is_none_or(str::is_empty) {
            missing.push("GERRIT_USERNAME");
        }
        if password.as_deref().is_none_or(str::is_empty) {
            missing.push("GERRIT_PASSWORD or GERRIT_TOKEN");
        }
        if !missing.is_empty() {
            return Err(GerritError::Config(format!(
                "Missing required environment variables: {}\nPlease set environment variables or create a .env file",
                missing.join(", ")
            )));
        }

        let url = url.unwrap_or_default();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(GerritError::Config(format!(
                "GERRIT_URL must be a valid HTTP(S) URL, current value: {url}"
            )));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn complete_parts_produce_a_config() {
        let config = GerritConfig::from_parts(
            some("https://gerrit.example.com"),
            some("user"),
            some("secret"),
        )
        .unwrap();
        assert_eq!(config.url, "https://gerrit.example.com");
        assert_eq!(config.username, "user");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = GerritConfig::from_parts(
            some("https://gerrit.example.com/"),
            some("user"),
            some("secret"),
        )
        .unwrap();
        assert_eq!(config.url, "https://gerrit.example.com");
    }

    #[test]
    fn missing_variables_are_all_named() {
        let err = GerritConfig::from_parts(None, None, None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("GERRIT_URL"));
        assert!(message.contains("GERRIT_USERNAME"));
        assert!(message.contains("GERRIT_PASSWORD or GERRIT_TOKEN"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = GerritConfig::from_parts(some(""), some("user"), some("secret")).unwrap_err();
        assert!(err.to_string().contains("GERRIT_URL"));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let err = GerritConfig::from_parts(
            some("ssh://gerrit.example.com"),
            some("user"),
            some("secret"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be a valid HTTP(S) URL"));
    }
}
