//! Account deletion (owner only).

use std::cell::RefCell;
use std::rc::Rc;

use userhub_client::ApiClient;

use crate::core::auth::{AuthStore, IdentityPersistence};
use crate::core::form::{FormController, FormFields};
use crate::features::Redirect;

/// Deletion has no inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeleteField {}

/// Target of the deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteForm {
    /// Id of the account to delete.
    pub id: u64,
}

impl FormFields for DeleteForm {
    type Field = DeleteField;
    type Payload = u64;

    fn set(&mut self, field: DeleteField, _value: String) {
        match field {}
    }

    fn is_submittable(&self) -> bool {
        true
    }

    fn payload(&self) -> u64 {
        self.id
    }

    fn field_for_key(_key: &str) -> Option<DeleteField> {
        None
    }
}

/// Deletion controller.
pub type DeleteController = FormController<DeleteForm, ()>;

/// Delete action of one profile view.
///
/// Holds a single controller so its submit guard spans every click.
#[derive(Debug, Default)]
pub struct DeleteAction {
    controller: Option<Rc<RefCell<DeleteController>>>,
}

impl DeleteAction {
    /// Controller of the last attempt, if any.
    #[must_use]
    pub fn controller(&self) -> Option<Rc<RefCell<DeleteController>>> {
        self.controller.clone()
    }

    /// Whether a deletion request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.controller
            .as_ref()
            .is_some_and(|controller| controller.borrow().is_loading())
    }

    /// Controller to submit through for account `id`.
    ///
    /// `None` while a deletion is in flight. A controller for another account
    /// is replaced; otherwise the existing one is reused.
    pub fn prepare(&mut self, id: u64) -> Option<Rc<RefCell<DeleteController>>> {
        if self.is_busy() {
            return None;
        }
        let reusable = self
            .controller
            .as_ref()
            .filter(|controller| controller.borrow().fields().id == id);
        if let Some(controller) = reusable {
            return Some(Rc::clone(controller));
        }
        let controller = Rc::new(RefCell::new(DeleteController::new(DeleteForm { id })));
        self.controller = Some(Rc::clone(&controller));
        Some(controller)
    }

    /// Forget the previous attempt (route changed).
    pub fn reset(&mut self) {
        self.controller = None;
    }
}

/// Delete the account once the user confirmed the prompt.
pub async fn submit(
    controller: &RefCell<DeleteController>,
    client: &ApiClient,
    confirmed: bool,
    notify: impl Fn(),
) -> bool {
    if !confirmed {
        return false;
    }
    FormController::submit_with(
        controller,
        |id| async move { client.delete_user(id).await },
        notify,
    )
    .await
}

/// Log out after the account is gone.
pub fn complete<P: IdentityPersistence>(
    controller: &DeleteController,
    auth: &mut AuthStore<P>,
) -> Option<Redirect> {
    controller.success()?;
    auth.logout();
    Some(Redirect::Home)
}
