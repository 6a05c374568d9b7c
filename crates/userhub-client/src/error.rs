//! Failure taxonomy for API calls.

use std::collections::BTreeMap;

use thiserror::Error;
use userhub_api_models::ErrorBody;

/// Every way an API call can fail, as seen by a view.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response arrived (connection refused, DNS, aborted fetch, bad header).
    #[error("request did not reach the server")]
    Transport {
        /// Transport error reported by the HTTP stack.
        source: reqwest::Error,
    },
    /// HTTP 400 carrying a per-field `validationErrors` map.
    #[error("request failed validation")]
    Validation {
        /// HTTP status code.
        status: u16,
        /// Field name to message map as sent by the server.
        errors: BTreeMap<String, String>,
        /// Domain message sent alongside the field map, if any.
        message: Option<String>,
    },
    /// Non-2xx response with a plain `message`.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server supplied message.
        message: String,
    },
    /// Non-2xx response without a usable error body.
    #[error("unexpected response status {status}")]
    Unexpected {
        /// HTTP status code.
        status: u16,
    },
    /// 2xx response whose body did not match the expected shape.
    #[error("response body could not be decoded")]
    Decode {
        /// Decoder error.
        source: reqwest::Error,
    },
    /// The endpoint path could not be appended to the base URL.
    #[error("invalid endpoint {path}")]
    Endpoint {
        /// Path that failed to resolve.
        path: String,
    },
}

impl ApiError {
    /// Fold a non-2xx status and its (possibly empty) body into an error.
    #[must_use]
    pub fn from_status(status: u16, body: ErrorBody) -> Self {
        let message = body.message.filter(|message| !message.trim().is_empty());
        match (body.validation_errors, message) {
            (Some(errors), message) if status == 400 && !errors.is_empty() => Self::Validation {
                status,
                errors,
                message,
            },
            (_, Some(message)) => Self::Rejected { status, message },
            _ => Self::Unexpected { status },
        }
    }

    /// Server supplied message, when the failure carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::Validation { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Per-field validation messages, when the failure carried them.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// HTTP status code, when a response arrived.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. }
            | Self::Rejected { status, .. }
            | Self::Unexpected { status } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } | Self::Endpoint { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(field: &str, message: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(field.to_string(), message.to_string())])
    }

    #[test]
    fn validation_requires_bad_request_and_entries() {
        let body = ErrorBody {
            message: None,
            validation_errors: Some(errors("email", "E-mail cannot be null")),
        };
        let err = ApiError::from_status(400, body.clone());
        assert_eq!(
            err.validation_errors()
                .and_then(|map| map.get("email"))
                .map(String::as_str),
            Some("E-mail cannot be null")
        );
        assert_eq!(err.server_message(), None);

        assert!(matches!(
            ApiError::from_status(500, body),
            ApiError::Unexpected { status: 500 }
        ));
    }

    #[test]
    fn message_becomes_rejection() {
        let err = ApiError::from_status(
            401,
            ErrorBody {
                message: Some("Incorrect credentials".to_string()),
                validation_errors: None,
            },
        );
        assert_eq!(err.server_message(), Some("Incorrect credentials"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn validation_keeps_accompanying_message() {
        let err = ApiError::from_status(
            400,
            ErrorBody {
                message: Some("Invalid token".to_string()),
                validation_errors: Some(errors("token", "expired")),
            },
        );
        assert!(err.validation_errors().is_some_and(|map| map.contains_key("token")));
        assert_eq!(err.server_message(), Some("Invalid token"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn empty_bodies_are_unexpected() {
        assert!(matches!(
            ApiError::from_status(400, ErrorBody::default()),
            ApiError::Unexpected { status: 400 }
        ));
        let blank = ErrorBody {
            message: Some("  ".to_string()),
            validation_errors: Some(BTreeMap::new()),
        };
        assert!(matches!(
            ApiError::from_status(400, blank),
            ApiError::Unexpected { .. }
        ));
    }
}
