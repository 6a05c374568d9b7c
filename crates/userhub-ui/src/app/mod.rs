//! Application root: context wiring, navigation shell and routes.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use userhub_client::{ApiClient, ClientConfig};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::activation::ActivationPage;
use crate::components::feedback::Alert;
use crate::components::login::LoginPage;
use crate::components::nav::NavBar;
use crate::components::password_reset::{PasswordResetRequestPage, PasswordResetSetPage};
use crate::components::sign_up::SignUpPage;
use crate::components::user::UserPage;
use crate::components::user_list::UserList;
use crate::i18n::{LocaleCode, TranslationBundle, load_locale, persist_locale};
use preferences::{
    BrowserAuthStore, BrowserStorage, api_base_url, load_auth_store, navigator_language,
};
pub(crate) use routes::{Route, follow_redirect};

mod preferences;
mod routes;

/// Shared state handed to every view.
#[derive(Clone)]
pub(crate) struct AppCtx {
    /// Singleton API client.
    pub(crate) client: Rc<ApiClient>,
    /// Logged-in identity.
    pub(crate) auth: Rc<RefCell<BrowserAuthStore>>,
    /// Bumped after every auth mutation so consumers re-render.
    pub(crate) auth_version: u32,
    /// Active translations.
    pub(crate) bundle: TranslationBundle,
    /// Switch the UI language.
    pub(crate) on_locale: Callback<LocaleCode>,
    /// Report an auth store mutation.
    pub(crate) on_auth_change: Callback<()>,
}

impl AppCtx {
    pub(crate) fn t(&self, key: &str, default: &str) -> String {
        self.bundle.text(key, default)
    }
}

impl PartialEq for AppCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
            && Rc::ptr_eq(&self.auth, &other.auth)
            && self.auth_version == other.auth_version
            && self.bundle == other.bundle
    }
}

fn build_client(locale: LocaleCode) -> Option<Rc<ApiClient>> {
    let base = api_base_url();
    let client = ClientConfig::parse(&base, locale.code())
        .and_then(ApiClient::new)
        .map_err(|err| {
            console::error!("failed to configure api client", &base, err.to_string());
        })
        .ok()?;
    Some(Rc::new(client))
}

#[function_component(UserhubApp)]
fn userhub_app() -> Html {
    let locale = use_state(|| load_locale(&BrowserStorage, navigator_language().as_deref()));
    let auth_version = use_state(|| 0_u32);
    let auth = use_memo(|_| Rc::new(RefCell::new(load_auth_store())), ());
    let client = {
        let initial = *locale;
        use_memo(move |_| build_client(initial), ())
    };
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    let Some(client) = (*client).clone() else {
        return html! { <Alert message={"API client unavailable".to_string()} /> };
    };

    let on_locale = {
        let locale = locale.clone();
        let client = client.clone();
        Callback::from(move |next: LocaleCode| {
            persist_locale(&BrowserStorage, next);
            client.set_language(next.code());
            locale.set(next);
        })
    };
    let on_auth_change = {
        let auth_version = auth_version.clone();
        Callback::from(move |()| auth_version.set(auth_version.wrapping_add(1)))
    };

    let ctx = AppCtx {
        client,
        auth: (*auth).clone(),
        auth_version: *auth_version,
        bundle: (*bundle).clone(),
        on_locale,
        on_auth_change,
    };

    html! {
        <ContextProvider<AppCtx> context={ctx}>
            <BrowserRouter>
                <NavBar />
                <main class="container">
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </ContextProvider<AppCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <UserList /> },
        Route::SignUp => html! { <SignUpPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Activation { token } => html! { <ActivationPage token={token} /> },
        Route::PasswordResetRequest => html! { <PasswordResetRequestPage /> },
        Route::PasswordResetSet { token } => html! { <PasswordResetSetPage token={token} /> },
        Route::User { id } => html! { <UserPage id={id} /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let ctx = use_context::<AppCtx>();
    let text = ctx.map_or_else(
        || "Page not found".to_string(),
        |ctx| ctx.t("notFound", "Page not found"),
    );
    html! { <Alert message={text} /> }
}

/// Mount the app on `#root`, or on the body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<UserhubApp>::with_root(root).render();
    } else {
        yew::Renderer::<UserhubApp>::new().render();
    }
}
