//! User profile page: view, owner-only edit and delete.

pub mod delete;
pub mod edit;
pub mod image;

use std::cell::RefCell;
use std::rc::Rc;

use futures_util::stream::Stream;
use userhub_client::ApiClient;
use userhub_client::models::User;

use crate::core::auth::{AuthStore, IdentityPersistence};
use crate::core::request::RequestState;
use crate::core::route_param::{RouteParamRequest, follow};
use crate::features::user::edit::{EditController, EditForm};
use crate::features::user::image::profile_image_src;

/// Profile request keyed by the raw id route segment.
pub type ProfileRequest = RouteParamRequest<String, User>;

/// Load the profile for each id the page is routed to.
///
/// A new id drops the request still running for the previous one. Resolves
/// once `ids` ends and the last request has settled.
pub async fn follow_profiles<S>(
    ids: S,
    client: &ApiClient,
    on_change: impl FnMut(&RequestState<User>),
) -> ProfileRequest
where
    S: Stream<Item = String> + Unpin,
{
    follow(ids, |id| async move { client.get_user(&id).await }, on_change).await
}

/// Whether edit and delete are offered for the profile at `route_id`.
#[must_use]
pub fn owner_actions_visible<P: IdentityPersistence>(auth: &AuthStore<P>, route_id: &str) -> bool {
    auth.is_owner(route_id)
}

/// Whether the profile card is read-only or being edited.
#[derive(Clone, Debug, Default)]
pub enum ProfileMode {
    /// Read-only card with owner actions.
    #[default]
    Viewing,
    /// Edit form replacing the username and actions.
    Editing(Rc<RefCell<EditController>>),
}

impl ProfileMode {
    /// Switch to editing `user`.
    pub fn start_edit(&mut self, user: &User) {
        *self = Self::Editing(Rc::new(RefCell::new(EditController::new(
            EditForm::for_user(user),
        ))));
    }

    /// Leave edit mode; unsaved username and selected image are discarded.
    pub fn stop_editing(&mut self) {
        *self = Self::Viewing;
    }

    /// Active edit controller.
    #[must_use]
    pub fn editor(&self) -> Option<Rc<RefCell<EditController>>> {
        match self {
            Self::Viewing => None,
            Self::Editing(editor) => Some(Rc::clone(editor)),
        }
    }

    /// Image shown for `user`, preferring the file selected while editing.
    #[must_use]
    pub fn image_src(&self, user: &User) -> String {
        let temp = self
            .editor()
            .and_then(|editor| editor.borrow().fields().temp_image.clone());
        profile_image_src(temp.as_deref(), user.image.as_deref())
    }
}
