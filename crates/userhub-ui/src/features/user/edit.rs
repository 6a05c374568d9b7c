//! Profile edit form (owner only).

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::{User, UserUpdate, UserUpdateResponse};

use crate::core::auth::{AuthStore, IdentityPersistence};
use crate::core::form::{FormController, FormFields};
use crate::features::user::image::data_url_payload;

/// Editable profile inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EditField {
    /// Username input.
    Username,
    /// Image file input; the value is a `data:` URL.
    Image,
}

/// Current edit inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditForm {
    /// Id of the edited user.
    pub id: u64,
    /// Username being edited.
    pub username: String,
    /// Newly selected image as a `data:` URL.
    pub temp_image: Option<String>,
}

impl EditForm {
    /// Start editing `user` with its current username.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            temp_image: None,
        }
    }
}

impl FormFields for EditForm {
    type Field = EditField;
    type Payload = UserUpdate;

    fn set(&mut self, field: EditField, value: String) {
        match field {
            EditField::Username => self.username = value,
            EditField::Image => self.temp_image = Some(value).filter(|url| !url.is_empty()),
        }
    }

    fn is_submittable(&self) -> bool {
        true
    }

    fn payload(&self) -> UserUpdate {
        UserUpdate {
            username: self.username.clone(),
            image: self
                .temp_image
                .as_deref()
                .and_then(data_url_payload)
                .map(ToString::to_string),
        }
    }

    fn field_for_key(key: &str) -> Option<EditField> {
        match key {
            "username" => Some(EditField::Username),
            "image" => Some(EditField::Image),
            _ => None,
        }
    }
}

/// Profile edit controller.
pub type EditController = FormController<EditForm, UserUpdateResponse>;

/// Send the update once.
pub async fn submit(
    controller: &RefCell<EditController>,
    client: &ApiClient,
    notify: impl Fn(),
) -> bool {
    let id = controller.borrow().fields().id;
    FormController::submit_with(
        controller,
        |body| async move { client.update_user(id, &body).await },
        notify,
    )
    .await
}

/// Apply an accepted update to the displayed profile and, for the owner, the auth store.
///
/// Fields missing from the response keep the submitted username and the previous image.
/// Returns `false` while the update has not succeeded.
pub fn complete<P: IdentityPersistence>(
    controller: &EditController,
    user: &mut User,
    auth: &mut AuthStore<P>,
) -> bool {
    let Some(response) = controller.success() else {
        return false;
    };
    user.username = response
        .username
        .clone()
        .unwrap_or_else(|| controller.fields().username.clone());
    if let Some(image) = &response.image {
        user.image = Some(image.clone());
    }
    if auth.is_owner(&user.id.to_string()) {
        auth.update_profile(user.username.clone(), user.image.clone());
    }
    true
}
