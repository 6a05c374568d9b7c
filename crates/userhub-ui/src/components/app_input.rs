//! Labelled input bound to one form field.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::core::form::{FormController, FormFields};

#[derive(Properties, PartialEq)]
pub(crate) struct AppInputProps {
    pub(crate) id: AttrValue,
    pub(crate) label: String,
    pub(crate) value: String,
    #[prop_or_else(|| AttrValue::from("text"))]
    pub(crate) input_type: AttrValue,
    #[prop_or_default]
    pub(crate) error: Option<String>,
    pub(crate) oninput: Callback<String>,
}

#[function_component(AppInput)]
pub(crate) fn app_input(props: &AppInputProps) -> Html {
    let oninput = {
        let callback = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            callback.emit(input.value());
        })
    };
    let class = classes!("form-control", props.error.as_ref().map(|_| "is-invalid"));
    html! {
        <div class="mb-3">
            <label for={props.id.clone()} class="form-label">{ props.label.clone() }</label>
            <input
                id={props.id.clone()}
                class={class}
                type={props.input_type.clone()}
                value={props.value.clone()}
                oninput={oninput}
            />
            if let Some(error) = props.error.clone() {
                <div class="invalid-feedback">{ error }</div>
            }
        </div>
    }
}

/// Callback that edits `field` on a shared form and re-renders.
pub(crate) fn edit_callback<F, T>(
    controller: &Rc<RefCell<FormController<F, T>>>,
    update: &UseForceUpdateHandle,
    field: F::Field,
) -> Callback<String>
where
    F: FormFields + 'static,
    F::Field: 'static,
    T: 'static,
{
    let controller = Rc::clone(controller);
    let update = update.clone();
    Callback::from(move |value: String| {
        controller.borrow_mut().edit(field, value);
        update.force_update();
    })
}

/// Re-render trigger handed to the async controllers.
pub(crate) fn notifier(update: &UseForceUpdateHandle) -> impl Fn() + 'static {
    let update = update.clone();
    move || update.force_update()
}
