//! Account activation page.
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::AppCtx;
use crate::components::app_input::notifier;
use crate::components::feedback::{Alert, Spinner};
use crate::core::request::RequestState;
use crate::features::activation::{self, ActivationRequest};

#[derive(Properties, PartialEq)]
pub(crate) struct TokenProps {
    pub(crate) token: String,
}

#[function_component(ActivationPage)]
pub(crate) fn activation_page(props: &TokenProps) -> Html {
    let request = use_mut_ref(ActivationRequest::new);
    let update = use_force_update();
    let ctx = use_context::<AppCtx>();
    {
        let request = request.clone();
        let notify = notifier(&update);
        let client = ctx.as_ref().map(|ctx| ctx.client.clone());
        use_effect_with_deps(
            move |token: &String| {
                if let Some(client) = client {
                    let token = token.clone();
                    spawn_local(async move {
                        activation::activate(&request, &client, token, notify).await;
                    });
                }
                || ()
            },
            props.token.clone(),
        );
    }
    let Some(ctx) = ctx else {
        return html! {};
    };

    let request = request.borrow();
    html! {
        <div data-testid="activation-page">
            { match request.state() {
                RequestState::Idle => html! {},
                RequestState::Loading => html! { <Spinner /> },
                RequestState::Success(response) => html! {
                    <Alert variant="success" message={response.message.clone()} />
                },
                RequestState::Fail(error) => html! { <Alert message={error.resolve(&ctx.bundle)} /> },
            } }
        </div>
    }
}
