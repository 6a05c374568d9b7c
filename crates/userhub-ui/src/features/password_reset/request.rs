//! Reset e-mail request form.

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::{MessageResponse, PasswordResetRequest};

use crate::core::form::{FormController, FormFields};

/// Editable reset request inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResetRequestField {
    /// E-mail input.
    Email,
}

/// Current reset request inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetRequestForm {
    /// Address to send the reset link to.
    pub email: String,
}

impl FormFields for ResetRequestForm {
    type Field = ResetRequestField;
    type Payload = PasswordResetRequest;

    fn set(&mut self, field: ResetRequestField, value: String) {
        match field {
            ResetRequestField::Email => self.email = value,
        }
    }

    fn is_submittable(&self) -> bool {
        !self.email.is_empty()
    }

    fn payload(&self) -> PasswordResetRequest {
        PasswordResetRequest {
            email: self.email.clone(),
        }
    }

    fn field_for_key(key: &str) -> Option<ResetRequestField> {
        (key == "email").then_some(ResetRequestField::Email)
    }
}

/// Reset request controller.
pub type ResetRequestController = FormController<ResetRequestForm, MessageResponse>;

/// Ask the server to send a reset e-mail.
pub async fn submit(
    controller: &RefCell<ResetRequestController>,
    client: &ApiClient,
    notify: impl Fn(),
) -> bool {
    FormController::submit_with(
        controller,
        |body| async move { client.request_password_reset(&body).await },
        notify,
    )
    .await
}
