//! Client configuration and validation.

use thiserror::Error;
use url::Url;

/// Language tag sent when the caller has not chosen one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Connection settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin (optionally with a path prefix) the `/api/v1` routes hang off.
    pub base_url: Url,
    /// Initial `Accept-Language` value.
    pub language: String,
}

/// Errors raised while building a client.
#[derive(Debug, Error)]
pub enum ClientConfigError {
    /// The base URL did not parse.
    #[error("invalid base URL")]
    InvalidBaseUrl {
        /// Raw value supplied by the caller.
        value: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// The base URL used something other than http(s).
    #[error("unsupported base URL scheme")]
    UnsupportedScheme {
        /// Scheme found in the URL.
        scheme: String,
    },
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Builder error.
        source: reqwest::Error,
    },
}

impl ClientConfig {
    /// Parse and normalise a base URL.
    ///
    /// A trailing slash is enforced so relative endpoint paths keep any prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidBaseUrl`] when the value does not
    /// parse, or [`ClientConfigError::UnsupportedScheme`] for non-http(s) URLs.
    pub fn parse(base_url: &str, language: impl Into<String>) -> Result<Self, ClientConfigError> {
        let mut url =
            Url::parse(base_url.trim()).map_err(|source| ClientConfigError::InvalidBaseUrl {
                value: base_url.to_string(),
                source,
            })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientConfigError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        let language = language.into();
        let language = if language.trim().is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            language
        };
        Ok(Self {
            base_url: url,
            language,
        })
    }
}
