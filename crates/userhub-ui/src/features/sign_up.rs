//! Sign-up form.

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::{MessageResponse, SignUpRequest};

use crate::core::form::{FormController, FormFields};

/// Editable sign-up inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignUpField {
    /// Username input.
    Username,
    /// E-mail input.
    Email,
    /// Password input.
    Password,
    /// Password confirmation input (never sent).
    PasswordRepeat,
}

/// Current sign-up inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    /// Requested username.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password_repeat: String,
}

impl SignUpForm {
    /// Whether the confirmation differs from the password.
    #[must_use]
    pub fn password_mismatch(&self) -> bool {
        self.password != self.password_repeat
    }
}

impl FormFields for SignUpForm {
    type Field = SignUpField;
    type Payload = SignUpRequest;

    fn set(&mut self, field: SignUpField, value: String) {
        match field {
            SignUpField::Username => self.username = value,
            SignUpField::Email => self.email = value,
            SignUpField::Password => self.password = value,
            SignUpField::PasswordRepeat => self.password_repeat = value,
        }
    }

    fn is_submittable(&self) -> bool {
        !self.password.is_empty() && !self.password_mismatch()
    }

    fn payload(&self) -> SignUpRequest {
        SignUpRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    fn field_for_key(key: &str) -> Option<SignUpField> {
        match key {
            "username" => Some(SignUpField::Username),
            "email" => Some(SignUpField::Email),
            "password" => Some(SignUpField::Password),
            _ => None,
        }
    }
}

/// Sign-up form controller.
pub type SignUpController = FormController<SignUpForm, MessageResponse>;

/// Submit the account once.
pub async fn submit(
    controller: &RefCell<SignUpController>,
    client: &ApiClient,
    notify: impl Fn(),
) -> bool {
    FormController::submit_with(
        controller,
        |body| async move { client.sign_up(&body).await },
        notify,
    )
    .await
}

/// The form is replaced by the server message once the account exists.
#[must_use]
pub fn success_message(controller: &SignUpController) -> Option<&str> {
    controller
        .success()
        .map(|response| response.message.as_str())
}
