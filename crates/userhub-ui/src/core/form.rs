//! Form submission lifecycle.
//!
//! # Design
//! - One tagged state; "submitting with an error banner" is unrepresentable.
//! - Field errors are keyed by a closed per-form enum, never raw strings.
//! - A submission in flight blocks further submissions of the same form instance.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;

use userhub_client::ApiError;

use crate::core::request::ErrorMessage;

/// Field values and rules of one concrete form.
pub trait FormFields {
    /// Closed set of editable fields.
    type Field: Copy + Ord + Debug;
    /// Body sent on submit.
    type Payload;

    /// Replace the value of `field`.
    fn set(&mut self, field: Self::Field, value: String);

    /// Whether the current values allow submitting.
    fn is_submittable(&self) -> bool;

    /// Build the request body from the current values.
    fn payload(&self) -> Self::Payload;

    /// Map a server `validationErrors` key onto a field.
    fn field_for_key(key: &str) -> Option<Self::Field>;
}

/// Per-field validation messages.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// Why the last submission failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitFailure<F> {
    /// Field-attributable rejection.
    Validation(FieldErrors<F>),
    /// Rejection shown as a banner.
    Generic(ErrorMessage),
}

/// Submission state of a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitState<F, T> {
    /// Editable; may still show field errors left from a failed attempt.
    Idle {
        /// Remaining field errors.
        field_errors: FieldErrors<F>,
    },
    /// Request in flight.
    Submitting,
    /// Server accepted the submission.
    Succeeded(T),
    /// Server or network refused the submission.
    Failed(SubmitFailure<F>),
}

impl<F, T> Default for SubmitState<F, T> {
    fn default() -> Self {
        Self::Idle {
            field_errors: BTreeMap::new(),
        }
    }
}

/// Form values plus their submission state.
#[derive(Debug)]
pub struct FormController<Form: FormFields, T> {
    fields: Form,
    state: SubmitState<Form::Field, T>,
}

impl<Form: FormFields + Default, T> Default for FormController<Form, T> {
    fn default() -> Self {
        Self::new(Form::default())
    }
}

impl<Form: FormFields, T> FormController<Form, T> {
    /// Controller over the given initial values.
    #[must_use]
    pub fn new(fields: Form) -> Self {
        Self {
            fields,
            state: SubmitState::default(),
        }
    }

    /// Current values.
    #[must_use]
    pub const fn fields(&self) -> &Form {
        &self.fields
    }

    /// Current submission state.
    #[must_use]
    pub const fn state(&self) -> &SubmitState<Form::Field, T> {
        &self.state
    }

    /// Update a field; drops that field's error and any banner.
    pub fn edit(&mut self, field: Form::Field, value: String) {
        self.fields.set(field, value);
        let next = match std::mem::take(&mut self.state) {
            SubmitState::Submitting => SubmitState::Submitting,
            SubmitState::Idle { mut field_errors }
            | SubmitState::Failed(SubmitFailure::Validation(mut field_errors)) => {
                field_errors.remove(&field);
                SubmitState::Idle { field_errors }
            }
            SubmitState::Failed(SubmitFailure::Generic(_)) | SubmitState::Succeeded(_) => {
                SubmitState::default()
            }
        };
        self.state = next;
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.fields.is_submittable()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, SubmitState::Submitting)
    }

    /// Enter `Submitting` and hand out the body for exactly one call.
    pub fn begin_submit(&mut self) -> Option<Form::Payload> {
        if !self.can_submit() {
            return None;
        }
        self.state = SubmitState::Submitting;
        Some(self.fields.payload())
    }

    /// Apply the outcome of the call issued by [`Self::begin_submit`].
    ///
    /// Returns `false` when no submission was in flight.
    pub fn settle(&mut self, result: Result<T, ApiError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.state = match result {
            Ok(value) => SubmitState::Succeeded(value),
            Err(err) => SubmitState::Failed(failure_for::<Form>(&err)),
        };
        true
    }

    /// Validation message for `field`.
    #[must_use]
    pub fn field_error(&self, field: Form::Field) -> Option<&str> {
        match &self.state {
            SubmitState::Idle { field_errors }
            | SubmitState::Failed(SubmitFailure::Validation(field_errors)) => {
                field_errors.get(&field).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Banner failure of the last submission.
    #[must_use]
    pub const fn generic_error(&self) -> Option<&ErrorMessage> {
        match &self.state {
            SubmitState::Failed(SubmitFailure::Generic(message)) => Some(message),
            _ => None,
        }
    }

    /// Response of the accepted submission.
    #[must_use]
    pub const fn success(&self) -> Option<&T> {
        match &self.state {
            SubmitState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Run one guarded submission against a shared controller.
    ///
    /// `notify` runs after every transition so a view can re-render. Returns
    /// `false` without calling `call` when submitting is not allowed.
    pub async fn submit_with<C, Fut, N>(cell: &RefCell<Self>, call: C, notify: N) -> bool
    where
        C: FnOnce(Form::Payload) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        N: Fn(),
    {
        let Some(payload) = cell.borrow_mut().begin_submit() else {
            return false;
        };
        notify();
        let result = call(payload).await;
        cell.borrow_mut().settle(result);
        notify();
        true
    }
}

fn failure_for<Form: FormFields>(err: &ApiError) -> SubmitFailure<Form::Field> {
    if let Some(errors) = err.validation_errors() {
        let mapped: FieldErrors<Form::Field> = errors
            .iter()
            .filter_map(|(key, message)| {
                Form::field_for_key(key).map(|field| (field, message.clone()))
            })
            .collect();
        if !mapped.is_empty() {
            return SubmitFailure::Validation(mapped);
        }
        tracing::debug!(keys = ?errors.keys().collect::<Vec<_>>(), "no validation key maps to a field");
    }
    SubmitFailure::Generic(ErrorMessage::from_error(err))
}

#[cfg(test)]
mod tests {
    use userhub_client::models::ErrorBody;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum NoteField {
        Title,
        Body,
    }

    #[derive(Default)]
    struct NoteForm {
        title: String,
        body: String,
    }

    impl FormFields for NoteForm {
        type Field = NoteField;
        type Payload = (String, String);

        fn set(&mut self, field: NoteField, value: String) {
            match field {
                NoteField::Title => self.title = value,
                NoteField::Body => self.body = value,
            }
        }

        fn is_submittable(&self) -> bool {
            !self.title.is_empty()
        }

        fn payload(&self) -> (String, String) {
            (self.title.clone(), self.body.clone())
        }

        fn field_for_key(key: &str) -> Option<NoteField> {
            match key {
                "title" => Some(NoteField::Title),
                "body" => Some(NoteField::Body),
                _ => None,
            }
        }
    }

    fn validation(pairs: &[(&str, &str)]) -> ApiError {
        ApiError::from_status(
            400,
            ErrorBody {
                message: None,
                validation_errors: Some(
                    pairs
                        .iter()
                        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                        .collect(),
                ),
            },
        )
    }

    fn submitted() -> FormController<NoteForm, ()> {
        let mut form = FormController::default();
        form.edit(NoteField::Title, "hello".to_string());
        assert!(form.begin_submit().is_some());
        form
    }

    #[test]
    fn precondition_gates_submission() {
        let mut form: FormController<NoteForm, ()> = FormController::default();
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
        form.edit(NoteField::Title, "hello".to_string());
        assert!(form.can_submit());
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut form = submitted();
        assert!(form.is_loading());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn edit_clears_only_that_field_error() {
        let mut form = submitted();
        form.settle(Err(validation(&[("title", "too short"), ("body", "missing")])));
        assert_eq!(form.field_error(NoteField::Title), Some("too short"));
        assert_eq!(form.generic_error(), None);

        form.edit(NoteField::Title, "hello world".to_string());
        assert_eq!(form.field_error(NoteField::Title), None);
        assert_eq!(form.field_error(NoteField::Body), Some("missing"));

        assert!(form.begin_submit().is_some());
        assert_eq!(form.field_error(NoteField::Body), None);
    }

    #[test]
    fn unknown_validation_keys_degrade_to_generic() {
        let mut form = submitted();
        form.settle(Err(validation(&[("color", "bad")])));
        assert_eq!(form.generic_error(), Some(&ErrorMessage::Unexpected));
        assert_eq!(form.field_error(NoteField::Title), None);
    }

    #[test]
    fn server_message_becomes_banner_and_edit_clears_it() {
        let mut form = submitted();
        form.settle(Err(ApiError::from_status(
            401,
            ErrorBody {
                message: Some("Incorrect credentials".to_string()),
                validation_errors: None,
            },
        )));
        assert_eq!(
            form.generic_error(),
            Some(&ErrorMessage::Server("Incorrect credentials".to_string()))
        );
        form.edit(NoteField::Body, "x".to_string());
        assert_eq!(form.generic_error(), None);
    }

    #[test]
    fn settle_without_submission_is_ignored() {
        let mut form: FormController<NoteForm, ()> = FormController::default();
        assert!(!form.settle(Ok(())));
        assert_eq!(form.success(), None);
    }

    #[tokio::test]
    async fn submit_with_runs_one_call_for_concurrent_submits() {
        let cell = RefCell::new(FormController::<NoteForm, ()>::default());
        cell.borrow_mut().edit(NoteField::Title, "hello".to_string());

        let calls = RefCell::new(0_u32);
        let call = |_payload: (String, String)| {
            *calls.borrow_mut() += 1;
            async {
                tokio::task::yield_now().await;
                Ok::<(), ApiError>(())
            }
        };
        let (first, second) = futures_util::future::join(
            FormController::submit_with(&cell, call, || ()),
            FormController::submit_with(&cell, call, || ()),
        )
        .await;

        assert!(first);
        assert!(!second);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(cell.borrow().success(), Some(&()));
    }
}
