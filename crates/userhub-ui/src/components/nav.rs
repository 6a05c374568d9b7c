//! Navigation bar with language selection and logout.
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppCtx, Route};
use crate::i18n::LocaleCode;

#[function_component(NavBar)]
pub(crate) fn nav_bar() -> Html {
    let ctx = use_context::<AppCtx>();
    let navigator = use_navigator();
    let Some(ctx) = ctx else {
        return html! {};
    };

    let identity = ctx.auth.borrow().identity().clone();
    let on_logout = {
        let ctx = ctx.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            ctx.auth.borrow_mut().logout();
            ctx.on_auth_change.emit(());
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Home);
            }
        })
    };

    html! {
        <nav class="navbar navbar-expand bg-body-tertiary shadow-sm mb-3">
            <div class="container">
                <Link<Route> classes="navbar-brand" to={Route::Home}>{ ctx.t("home", "Home") }</Link<Route>>
                <ul class="navbar-nav">
                    if identity.is_logged_in() {
                        <li class="nav-item">
                            <Link<Route> classes="nav-link" to={Route::User { id: identity.id.to_string() }}>
                                { ctx.t("myProfile", "My Profile") }
                            </Link<Route>>
                        </li>
                        <li class="nav-item">
                            <a class="nav-link" href="#" onclick={on_logout}>{ ctx.t("logout", "Logout") }</a>
                        </li>
                    } else {
                        <li class="nav-item">
                            <Link<Route> classes="nav-link" to={Route::SignUp}>{ ctx.t("signUp", "Sign Up") }</Link<Route>>
                        </li>
                        <li class="nav-item">
                            <Link<Route> classes="nav-link" to={Route::Login}>{ ctx.t("login", "Login") }</Link<Route>>
                        </li>
                    }
                </ul>
                <LanguageSelector />
            </div>
        </nav>
    }
}

#[function_component(LanguageSelector)]
fn language_selector() -> Html {
    let Some(ctx) = use_context::<AppCtx>() else {
        return html! {};
    };
    html! {
        <div class="btn-group btn-group-sm">
            { for LocaleCode::all().into_iter().map(|locale| {
                let on_locale = ctx.on_locale.clone();
                let active = ctx.bundle.locale == locale;
                html! {
                    <button
                        type="button"
                        class={classes!("btn", if active { "btn-primary" } else { "btn-outline-primary" })}
                        onclick={Callback::from(move |_: MouseEvent| on_locale.emit(locale))}
                    >
                        { locale.label() }
                    </button>
                }
            }) }
        </div>
    }
}
