//! Feature slices, one per view.
//!
//! # Design
//! - Each slice owns its form fields, its API call and its post-success effects.
//! - Slices stay DOM-free; the wasm shell only renders their state.

pub mod activation;
pub mod login;
pub mod password_reset;
pub mod sign_up;
pub mod user;
pub mod user_list;

/// Navigation requested by a completed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Go to the home page (user list).
    Home,
}
