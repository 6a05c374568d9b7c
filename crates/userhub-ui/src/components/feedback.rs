//! Spinner and alert atoms.
use yew::prelude::*;

#[function_component(Spinner)]
pub(crate) fn spinner() -> Html {
    html! { <span class="spinner-border spinner-border-sm" role="status"></span> }
}

#[derive(Properties, PartialEq)]
pub(crate) struct AlertProps {
    pub(crate) message: String,
    #[prop_or_else(|| "danger".to_string())]
    pub(crate) variant: String,
}

#[function_component(Alert)]
pub(crate) fn alert(props: &AlertProps) -> Html {
    html! {
        <div class={classes!("alert", format!("alert-{}", props.variant))} role="alert">
            { props.message.clone() }
        </div>
    }
}
