//! Sign-up page.
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::AppCtx;
use crate::components::app_input::{AppInput, edit_callback, notifier};
use crate::components::feedback::{Alert, Spinner};
use crate::features::sign_up::{self, SignUpController, SignUpField};

#[function_component(SignUpPage)]
pub(crate) fn sign_up_page() -> Html {
    let controller = use_mut_ref(SignUpController::default);
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
                sign_up::submit(&controller, &ctx.client, notify).await;
            });
        })
    };

    let form = controller.borrow();
    if let Some(message) = sign_up::success_message(&form) {
        return html! { <Alert variant="success" message={message.to_string()} /> };
    }

    let fields = form.fields();
    let input = |id: &'static str, key: &str, default: &str, value: &str, field: SignUpField, secret: bool| {
        html! {
            <AppInput
                id={id}
                label={ctx.t(key, default)}
                input_type={if secret { "password" } else { "text" }}
                value={value.to_string()}
                error={form.field_error(field).map(ToString::to_string)}
                oninput={edit_callback(&controller, &update, field)}
            />
        }
    };

    html! {
        <div class="col-lg-6 offset-lg-3 col-md-8 offset-md-2">
            <form class="card" data-testid="form-sign-up">
                <div class="card-header text-center">
                    <h1>{ ctx.t("signUp", "Sign Up") }</h1>
                </div>
                <div class="card-body">
                    { input("username", "username", "Username", &fields.username, SignUpField::Username, false) }
                    { input("email", "email", "E-mail", &fields.email, SignUpField::Email, false) }
                    { input("password", "password", "Password", &fields.password, SignUpField::Password, true) }
                    { input("passwordRepeat", "passwordRepeat", "Password Repeat", &fields.password_repeat, SignUpField::PasswordRepeat, true) }
                    if fields.password_mismatch() {
                        <div class="text-danger mb-3">{ ctx.t("passwordMismatch", "Password mismatch") }</div>
                    }
                    if let Some(error) = form.generic_error() {
                        <Alert message={error.resolve(&ctx.bundle)} />
                    }
                    <div class="text-center">
                        <button class="btn btn-primary" disabled={!form.can_submit()} onclick={on_submit}>
                            if form.is_loading() {
                                <Spinner />
                            }
                            { ctx.t("signUp", "Sign Up") }
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}
