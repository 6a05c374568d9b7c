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
//! HTTP client wrapper for the Userhub API.
//!
//! Every request carries the current UI language as `Accept-Language` and every
//! failure is folded into [`ApiError`], so views only ever distinguish
//! transport, validation and domain failures.

pub mod client;
pub mod config;
pub mod error;
mod users;

pub use client::{ACCEPT_LANGUAGE, ApiClient};
pub use config::{ClientConfig, ClientConfigError, DEFAULT_LANGUAGE};
pub use error::ApiError;
pub use userhub_api_models as models;
