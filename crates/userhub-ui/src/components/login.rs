//! Login page.
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route, follow_redirect};
use crate::components::app_input::{AppInput, edit_callback, notifier};
use crate::components::feedback::{Alert, Spinner};
use crate::features::login::{self, LoginController, LoginField};

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let controller = use_mut_ref(LoginController::default);
    let update = use_force_update();
    let navigator = use_navigator();
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
            let navigator = navigator.clone();
            spawn_local(async move {
                login::submit(&controller, &ctx.client, notify).await;
                let redirect = login::complete(&controller.borrow(), &mut ctx.auth.borrow_mut());
                if redirect.is_some() {
                    ctx.on_auth_change.emit(());
                }
                follow_redirect(navigator.as_ref(), redirect);
            });
        })
    };

    let form = controller.borrow();
    let fields = form.fields();
    html! {
        <div class="col-lg-6 offset-lg-3 col-md-8 offset-md-2">
            <form class="card">
                <div class="card-header text-center">
                    <h1>{ ctx.t("login", "Login") }</h1>
                </div>
                <div class="card-body">
                    <AppInput
                        id="email"
                        label={ctx.t("email", "E-mail")}
                        value={fields.email.clone()}
                        error={form.field_error(LoginField::Email).map(ToString::to_string)}
                        oninput={edit_callback(&controller, &update, LoginField::Email)}
                    />
                    <AppInput
                        id="password"
                        label={ctx.t("password", "Password")}
                        input_type="password"
                        value={fields.password.clone()}
                        error={form.field_error(LoginField::Password).map(ToString::to_string)}
                        oninput={edit_callback(&controller, &update, LoginField::Password)}
                    />
                    if let Some(error) = form.generic_error() {
                        <Alert message={error.resolve(&ctx.bundle)} />
                    }
                    <div class="text-center">
                        <button class="btn btn-primary" disabled={!form.can_submit()} onclick={on_submit}>
                            if form.is_loading() {
                                <Spinner />
                            }
                            { ctx.t("login", "Login") }
                        </button>
                    </div>
                </div>
                <div class="card-footer text-center">
                    <Link<Route> to={Route::PasswordResetRequest}>
                        { ctx.t("forgotPassword", "Forgot password?") }
                    </Link<Route>>
                </div>
            </form>
        </div>
    }
}
