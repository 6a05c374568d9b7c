#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Userhub public API.
//!
//! The client and the UI both encode/decode through these types so the wire
//! contract (camelCase keys, optional image fields, page metadata) lives in one
//! place.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Plain `{ "message": ... }` body returned by sign-up, activation and password flows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Localised, human-readable message produced by the server.
    pub message: String,
}

/// Error body surfaced on non-2xx responses.
///
/// Either field may be missing; a body carrying neither is treated as an
/// unexpected failure by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Domain failure message (wrong credentials, unknown token, ...).
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Field name to message map for validation failures.
    pub validation_errors: Option<BTreeMap<String, String>>,
}

/// Account creation payload for `POST /api/v1/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Requested username.
    pub username: String,
    /// Account e-mail address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Credentials for `POST /api/v1/auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account e-mail address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Body for `POST /api/v1/users/password-reset`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordResetRequest {
    /// Address the reset link is sent to.
    pub email: String,
}

/// Body for `PATCH /api/v1/users/:token/password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordSetRequest {
    /// New password.
    pub password: String,
}

/// Public user projection returned by login, profile and list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Server-assigned identifier.
    pub id: u64,
    /// Display name.
    pub username: String,
    /// Account e-mail address.
    pub email: String,
    #[serde(default)]
    /// Stored profile image file name, if any.
    pub image: Option<String>,
}

/// Body for `PUT /api/v1/users/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    /// New username.
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Base64 payload of a newly selected image (no data-URL prefix).
    pub image: Option<String>,
}

/// Response of `PUT /api/v1/users/:id`; the server may omit either field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdateResponse {
    #[serde(default)]
    /// Username as stored after the update.
    pub username: Option<String>,
    #[serde(default)]
    /// Stored image file name after the update.
    pub image: Option<String>,
}

/// Query string for `GET /api/v1/users`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    /// Zero-based page index.
    pub page: u32,
    /// Items per page.
    pub size: u32,
}

/// One page of a server-side paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Number of pages available for the requested size.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    /// Whether a page before this one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 0
    }
}

impl<T: Clone> Page<T> {
    /// Slice `items` into the requested page the way the server does.
    ///
    /// `total_pages` is `ceil(items / size)`; a zero size yields an empty page
    /// with zero pages.
    #[must_use]
    pub fn paginate(items: &[T], query: PageQuery) -> Self {
        if query.size == 0 {
            return Self {
                content: Vec::new(),
                page: query.page,
                size: 0,
                total_pages: 0,
            };
        }
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let total_pages = total.div_ceil(query.size);
        let start = usize::try_from(u64::from(query.page) * u64::from(query.size))
            .unwrap_or(usize::MAX);
        let content = items
            .iter()
            .skip(start)
            .take(query.size as usize)
            .cloned()
            .collect();
        Self {
            content,
            page: query.page,
            size: query.size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn page_decodes_camel_case_metadata() -> Result<()> {
        let page: Page<User> = serde_json::from_str(
            r#"{"content":[{"id":1,"username":"user1","email":"user1@mail.com"}],
                "page":0,"size":3,"totalPages":9}"#,
        )?;
        assert_eq!(page.total_pages, 9);
        assert_eq!(page.content[0].image, None);
        assert!(page.has_next());
        assert!(!page.has_previous());
        Ok(())
    }

    #[test]
    fn paginate_rounds_total_pages_up() {
        let items: Vec<u32> = (0..10).collect();
        let first = Page::paginate(&items, PageQuery { page: 0, size: 3 });
        assert_eq!(first.total_pages, 4);
        assert_eq!(first.content, vec![0, 1, 2]);

        let last = Page::paginate(&items, PageQuery { page: 3, size: 3 });
        assert_eq!(last.content, vec![9]);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn paginate_handles_exact_multiple_and_empty() {
        let items: Vec<u32> = (0..9).collect();
        assert_eq!(Page::paginate(&items, PageQuery { page: 0, size: 3 }).total_pages, 3);
        let empty: Vec<u32> = Vec::new();
        let page = Page::paginate(&empty, PageQuery { page: 0, size: 3 });
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert_eq!(Page::paginate(&items, PageQuery { page: 0, size: 0 }).total_pages, 0);
    }

    #[test]
    fn error_body_tolerates_missing_fields() -> Result<()> {
        let body: ErrorBody = serde_json::from_str(r#"{"path":"/api/v1/auth"}"#)?;
        assert_eq!(body, ErrorBody::default());

        let body: ErrorBody =
            serde_json::from_str(r#"{"validationErrors":{"email":"E-mail cannot be null"}}"#)?;
        let errors = body.validation_errors.unwrap_or_default();
        assert_eq!(errors.get("email").map(String::as_str), Some("E-mail cannot be null"));
        Ok(())
    }

    #[test]
    fn user_update_omits_image_when_unset() -> Result<()> {
        let body = serde_json::to_value(UserUpdate {
            username: "user3-updated".to_string(),
            image: None,
        })?;
        assert_eq!(body, serde_json::json!({ "username": "user3-updated" }));
        Ok(())
    }
}
