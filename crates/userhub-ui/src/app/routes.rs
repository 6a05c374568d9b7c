//! Routing table for the Userhub UI.
use yew_router::prelude::*;

use crate::features::Redirect;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/signup")]
    SignUp,
    #[at("/login")]
    Login,
    #[at("/activation/:token")]
    Activation { token: String },
    #[at("/password-reset/request")]
    PasswordResetRequest,
    #[at("/password-reset/set/:token")]
    PasswordResetSet { token: String },
    #[at("/user/:id")]
    User { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Redirect> for Route {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Home => Self::Home,
        }
    }
}

/// Follow a redirect requested by a completed action.
pub(crate) fn follow_redirect(navigator: Option<&Navigator>, redirect: Option<Redirect>) {
    if let (Some(navigator), Some(redirect)) = (navigator, redirect) {
        navigator.push(&Route::from(redirect));
    }
}
