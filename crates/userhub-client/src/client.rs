//! Request plumbing shared by every endpoint.
//!
//! # Design
//! - One client per app boot; clones share the connection pool and language.
//! - Language changes go through interior mutability so views never rebuild clients.
//! - Non-2xx bodies are decoded leniently; a bad body never panics.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;
use userhub_api_models::ErrorBody;

use crate::config::{ClientConfig, ClientConfigError};
use crate::error::ApiError;

/// Header carrying the current UI language.
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";

/// Shared HTTP client for the Userhub API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    language: Arc<RwLock<String>>,
}

impl ApiClient {
    /// Build a client with a fresh connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::HttpClient`] when the HTTP stack cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ClientConfigError> {
        let http = Client::builder()
            .build()
            .map_err(|source| ClientConfigError::HttpClient { source })?;
        Ok(Self::with_http(http, config))
    }

    /// Build a client around an existing `reqwest` client.
    #[must_use]
    pub fn with_http(http: Client, config: ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
            language: Arc::new(RwLock::new(config.language)),
        }
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Language currently attached to outgoing requests.
    #[must_use]
    pub fn language(&self) -> String {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change the language for all subsequent requests (shared across clones).
    pub fn set_language(&self, tag: impl Into<String>) {
        let mut guard = self.language.write().unwrap_or_else(PoisonError::into_inner);
        *guard = tag.into();
    }

    /// Resolve `segments` below `api/v1`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| ApiError::Endpoint {
                path: segments.join("/"),
            })?;
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "sending api request");
        self.http
            .request(method, url)
            .header(ACCEPT_LANGUAGE, self.language())
    }

    /// Send and decode a JSON success body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { source })
    }

    /// Send and discard the success body.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.dispatch(builder).await.map(drop)
    }

    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|source| {
            tracing::warn!(error = %source, "api request failed before a response arrived");
            ApiError::Transport { source }
        })?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(classify(response).await)
    }
}

async fn classify(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.unwrap_or_default();
    let body = serde_json::from_slice::<ErrorBody>(&bytes).unwrap_or_default();
    let error = ApiError::from_status(status, body);
    tracing::debug!(status, error = %error, "api request rejected");
    error
}
