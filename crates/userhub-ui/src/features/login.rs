//! Login form.

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::{LoginRequest, User};

use crate::core::auth::{AuthIdentity, AuthStore, IdentityPersistence};
use crate::core::form::{FormController, FormFields};
use crate::features::Redirect;

/// Editable login inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    /// E-mail input.
    Email,
    /// Password input.
    Password,
}

/// Current login inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// E-mail address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl FormFields for LoginForm {
    type Field = LoginField;
    type Payload = LoginRequest;

    fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    fn is_submittable(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    fn payload(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    fn field_for_key(key: &str) -> Option<LoginField> {
        match key {
            "email" => Some(LoginField::Email),
            "password" => Some(LoginField::Password),
            _ => None,
        }
    }
}

/// Login form controller.
pub type LoginController = FormController<LoginForm, User>;

/// Submit the credentials once.
pub async fn submit(
    controller: &RefCell<LoginController>,
    client: &ApiClient,
    notify: impl Fn(),
) -> bool {
    FormController::submit_with(
        controller,
        |body| async move { client.login(&body).await },
        notify,
    )
    .await
}

/// Store the identity after a successful login.
pub fn complete<P: IdentityPersistence>(
    controller: &LoginController,
    auth: &mut AuthStore<P>,
) -> Option<Redirect> {
    let user = controller.success()?;
    auth.set_logged_in(AuthIdentity::from(user));
    Some(Redirect::Home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        let mut form = LoginController::default();
        form.edit(LoginField::Email, "user1@mail.com".to_string());
        assert!(!form.can_submit());
        form.edit(LoginField::Password, "P4ssword".to_string());
        assert!(form.can_submit());
    }
}
