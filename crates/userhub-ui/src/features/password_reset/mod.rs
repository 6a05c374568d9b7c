//! Password reset: request a reset e-mail, then set a new password by token.

pub mod request;
pub mod set;
