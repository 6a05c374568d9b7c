//! Password reset pages.
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::AppCtx;
use crate::components::activation::TokenProps;
use crate::components::app_input::{AppInput, edit_callback, notifier};
use crate::components::feedback::{Alert, Spinner};
use crate::features::password_reset::request::{self, ResetRequestController, ResetRequestField};
use crate::features::password_reset::set::{self, PasswordSetController, PasswordSetField};

#[function_component(PasswordResetRequestPage)]
pub(crate) fn password_reset_request_page() -> Html {
    let controller = use_mut_ref(ResetRequestController::default);
    let update = use_force_update();
    let Some(ctx) = use_context::<AppCtx>() else {
        return html! {};
    };

    let on_submit = {
        let controller = controller.clone();
        let update = update.clone();
        let ctx = ctx.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            let controller = controller.clone();
            let notify = notifier(&update);
            let ctx = ctx.clone();
            spawn_local(async move {
                request::submit(&controller, &ctx.client, notify).await;
            });
        })
    };

    let form = controller.borrow();
    html! {
        <div class="col-lg-6 offset-lg-3 col-md-8 offset-md-2">
            <form class="card">
                <div class="card-header text-center">
                    <h1>{ ctx.t("resetPassword", "Reset password") }</h1>
                </div>
                <div class="card-body">
                    <AppInput
                        id="email"
                        label={ctx.t("email", "E-mail")}
                        value={form.fields().email.clone()}
                        error={form.field_error(ResetRequestField::Email).map(ToString::to_string)}
                        oninput={edit_callback(&controller, &update, ResetRequestField::Email)}
                    />
                    if let Some(response) = form.success() {
                        <Alert variant="success" message={response.message.clone()} />
                    }
                    if let Some(error) = form.generic_error() {
                        <Alert message={error.resolve(&ctx.bundle)} />
                    }
                    <div class="text-center">
                        <button class="btn btn-primary" disabled={!form.can_submit()} onclick={on_submit}>
                            if form.is_loading() {
                                <Spinner />
                            }
                            { ctx.t("resetPassword", "Reset password") }
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}

#[function_component(PasswordResetSetPage)]
pub(crate) fn password_reset_set_page(props: &TokenProps) -> Html {
    let controller = use_mut_ref(PasswordSetController::default);
    let update = use_force_update();
    let Some(ctx) = use_context::<AppCtx>() else {
        return html! {};
    };

    let on_submit = {
        let controller = controller.clone();
        let update = update.clone();
        let ctx = ctx.clone();
        let token = props.token.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            let controller = controller.clone();
            let notify = notifier(&update);
            let ctx = ctx.clone();
            let token = token.clone();
            spawn_local(async move {
                set::submit(&controller, &ctx.client, &token, notify).await;
            });
        })
    };

    let form = controller.borrow();
    let fields = form.fields();
    html! {
        <div class="col-lg-6 offset-lg-3 col-md-8 offset-md-2">
            <form class="card">
                <div class="card-header text-center">
                    <h1>{ ctx.t("setPassword", "Set password") }</h1>
                </div>
                <div class="card-body">
                    <AppInput
                        id="password"
                        label={ctx.t("password", "Password")}
                        input_type="password"
                        value={fields.password.clone()}
                        error={form.field_error(PasswordSetField::Password).map(ToString::to_string)}
                        oninput={edit_callback(&controller, &update, PasswordSetField::Password)}
                    />
                    <AppInput
                        id="passwordRepeat"
                        label={ctx.t("passwordRepeat", "Password Repeat")}
                        input_type="password"
                        value={fields.password_repeat.clone()}
                        oninput={edit_callback(&controller, &update, PasswordSetField::PasswordRepeat)}
                    />
                    if fields.password_mismatch() {
                        <div class="text-danger mb-3">{ ctx.t("passwordMismatch", "Password mismatch") }</div>
                    }
                    if let Some(response) = form.success() {
                        <Alert variant="success" message={response.message.clone()} />
                    }
                    if let Some(error) = form.generic_error() {
                        <Alert message={error.resolve(&ctx.bundle)} />
                    }
                    <div class="text-center">
                        <button class="btn btn-primary" disabled={!form.can_submit()} onclick={on_submit}>
                            if form.is_loading() {
                                <Spinner />
                            }
                            { ctx.t("setPassword", "Set password") }
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
