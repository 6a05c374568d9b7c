//! Request lifecycle shared by every data-fetching view.
//!
//! # Design
//! - `Loading` carries neither data nor error, so a stale error can never show under a spinner.
//! - Failures keep the server text verbatim; only the fallback is localized, at render time.

use userhub_client::ApiError;

use crate::i18n::TranslationBundle;

/// Translation key of the localized fallback failure text.
pub const GENERIC_ERROR_KEY: &str = "genericError";

/// English text of [`GENERIC_ERROR_KEY`].
pub const GENERIC_ERROR_DEFAULT: &str = "Unexpected error occurred, please try again";

/// Failure text shown in a banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorMessage {
    /// Message supplied by the server, shown as-is.
    Server(String),
    /// No usable message; rendered as the localized fallback.
    Unexpected,
}

impl ErrorMessage {
    /// Pick the server message when the failure carried one.
    #[must_use]
    pub fn from_error(error: &ApiError) -> Self {
        error
            .server_message()
            .map_or(Self::Unexpected, |message| Self::Server(message.to_string()))
    }

    /// Text to display in the current locale.
    #[must_use]
    pub fn resolve(&self, bundle: &TranslationBundle) -> String {
        match self {
            Self::Server(message) => message.clone(),
            Self::Unexpected => bundle.text(GENERIC_ERROR_KEY, GENERIC_ERROR_DEFAULT),
        }
    }
}

/// State of one asynchronous request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for the response.
    Loading,
    /// Last request succeeded.
    Success(T),
    /// Last request failed.
    Fail(ErrorMessage),
}

impl<T> RequestState<T> {
    /// Fold a finished call into a terminal state.
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => {
                tracing::debug!(status = ?err.status(), error = %err, "request failed");
                Self::Fail(ErrorMessage::from_error(&err))
            }
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Payload of the last successful request.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable payload, for local edits after a successful fetch.
    pub const fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Failure of the last request.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorMessage> {
        match self {
            Self::Fail(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one issued request; only the most recent ticket may settle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket<P> {
    seq: u64,
    param: P,
}

impl<P> Ticket<P> {
    pub(crate) const fn new(seq: u64, param: P) -> Self {
        Self { seq, param }
    }

    /// Sequence number, increasing per controller.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Parameter the request was issued for.
    #[must_use]
    pub const fn param(&self) -> &P {
        &self.param
    }
}
