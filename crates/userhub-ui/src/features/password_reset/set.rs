//! New password form reached through the e-mailed token.

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::{MessageResponse, PasswordSetRequest};

use crate::core::form::{FormController, FormFields};

/// Editable password inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordSetField {
    /// New password.
    Password,
    /// Confirmation (never sent).
    PasswordRepeat,
}

/// Current password inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordSetForm {
    /// New password.
    pub password: String,
    /// Confirmation.
    pub password_repeat: String,
}

impl PasswordSetForm {
    /// Whether the confirmation differs from the password.
    #[must_use]
    pub fn password_mismatch(&self) -> bool {
        self.password != self.password_repeat
    }
}

impl FormFields for PasswordSetForm {
    type Field = PasswordSetField;
    type Payload = PasswordSetRequest;

    fn set(&mut self, field: PasswordSetField, value: String) {
        match field {
            PasswordSetField::Password => self.password = value,
            PasswordSetField::PasswordRepeat => self.password_repeat = value,
        }
    }

    fn is_submittable(&self) -> bool {
        !self.password.is_empty() && !self.password_mismatch()
    }

    fn payload(&self) -> PasswordSetRequest {
        PasswordSetRequest {
            password: self.password.clone(),
        }
    }

    fn field_for_key(key: &str) -> Option<PasswordSetField> {
        (key == "password").then_some(PasswordSetField::Password)
    }
}

/// Password set controller.
pub type PasswordSetController = FormController<PasswordSetForm, MessageResponse>;

/// Send the new password for the reset `token`.
pub async fn submit(
    controller: &RefCell<PasswordSetController>,
    client: &ApiClient,
    token: &str,
    notify: impl Fn(),
) -> bool {
    FormController::submit_with(
        controller,
        |body| async move { client.set_password(token, &body).await },
        notify,
    )
    .await
}

#[cfg(test)]
mod tests {
    use userhub_client::ApiError;
    use userhub_client::models::ErrorBody;

    use super::*;
    use crate::core::request::ErrorMessage;

    fn filled() -> PasswordSetController {
        let mut form = PasswordSetController::default();
        form.edit(PasswordSetField::Password, "N3wP4ss".to_string());
        form.edit(PasswordSetField::PasswordRepeat, "N3wP4ss".to_string());
        form
    }

    #[test]
    fn mismatch_blocks_submission() {
        let mut form = PasswordSetController::default();
        form.edit(PasswordSetField::Password, "N3wP4ss".to_string());
        form.edit(PasswordSetField::PasswordRepeat, "N3wP4s".to_string());
        assert!(form.fields().password_mismatch());
        assert!(form.begin_submit().is_none());
        form.edit(PasswordSetField::PasswordRepeat, "N3wP4ss".to_string());
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn unmapped_validation_shows_server_message() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        form.settle(Err(ApiError::from_status(
            400,
            ErrorBody {
                message: Some("Invalid token".to_string()),
                validation_errors: Some([("token".to_string(), "expired".to_string())].into()),
            },
        )));
        assert_eq!(
            form.generic_error(),
            Some(&ErrorMessage::Server("Invalid token".to_string()))
        );
        assert_eq!(form.field_error(PasswordSetField::Password), None);
    }

    #[test]
    fn mapped_validation_stays_on_fields() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        form.settle(Err(ApiError::from_status(
            400,
            ErrorBody {
                message: Some("Validation failure".to_string()),
                validation_errors: Some(
                    [("password".to_string(), "Password is too weak".to_string())].into(),
                ),
            },
        )));
        assert_eq!(
            form.field_error(PasswordSetField::Password),
            Some("Password is too weak")
        );
        assert_eq!(form.generic_error(), None);
    }
}
