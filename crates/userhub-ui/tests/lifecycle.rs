//! Request lifecycle behaviour against a stub API server.

use std::cell::RefCell;
use std::time::Duration;

use anyhow::Result;
use futures_util::future::join;
use futures_util::stream::{self, StreamExt};
use httpmock::Method::DELETE;
use httpmock::prelude::*;
use serde_json::json;
use userhub_client::models::{Page, PageQuery, User};
use userhub_client::{ACCEPT_LANGUAGE, ApiClient, ClientConfig};
use userhub_ui::core::auth::{AUTH_KEY, AuthIdentity, AuthStore, StoredIdentity};
use userhub_ui::core::form::SubmitState;
use userhub_ui::core::request::{ErrorMessage, GENERIC_ERROR_DEFAULT, RequestState};
use userhub_ui::core::route_param::follow;
use userhub_ui::core::storage::{KeyValueStorage, MemoryStorage};
use userhub_ui::features::Redirect;
use userhub_ui::features::login::{self, LoginController, LoginField};
use userhub_ui::features::sign_up::{self, SignUpController, SignUpField};
use userhub_ui::features::user::delete::{self, DeleteController, DeleteForm};
use userhub_ui::features::user::follow_profiles;
use userhub_ui::features::user_list::{self, PageNav, UserPager};
use userhub_ui::i18n::{LocaleCode, TranslationBundle};

fn client_for(base: &str) -> Result<ApiClient> {
    Ok(ApiClient::new(ClientConfig::parse(base, "en")?)?)
}

fn unreachable_base() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

fn user_json(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "username": format!("user{id}"),
        "email": format!("user{id}@mail.com"),
        "image": null
    })
}

fn filled_login() -> RefCell<LoginController> {
    let mut controller = LoginController::default();
    controller.edit(LoginField::Email, "user1@mail.com".to_string());
    controller.edit(LoginField::Password, "P4ssword".to_string());
    RefCell::new(controller)
}

fn filled_sign_up() -> RefCell<SignUpController> {
    let mut controller = SignUpController::default();
    controller.edit(SignUpField::Username, "user1".to_string());
    controller.edit(SignUpField::Email, "user1@mail.com".to_string());
    controller.edit(SignUpField::Password, "P4ssword".to_string());
    controller.edit(SignUpField::PasswordRepeat, "P4ssword".to_string());
    RefCell::new(controller)
}

#[test]
fn sign_up_button_waits_for_matching_passwords() {
    let mut controller = SignUpController::default();
    assert!(!controller.can_submit());
    controller.edit(SignUpField::Password, "P4ssword".to_string());
    assert!(!controller.can_submit());
    controller.edit(SignUpField::PasswordRepeat, "P4ssword".to_string());
    assert!(controller.can_submit());
}

#[tokio::test]
async fn rapid_double_submit_sends_one_request() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/users");
        then.status(200)
            .json_body(json!({ "message": "User create success" }));
    });
    let client = client_for(&server.base_url())?;
    let controller = filled_sign_up();

    let (first, second) = join(
        sign_up::submit(&controller, &client, || ()),
        sign_up::submit(&controller, &client, || ()),
    )
    .await;

    assert!(first);
    assert!(!second);
    mock.assert();
    assert_eq!(
        sign_up::success_message(&controller.borrow()),
        Some("User create success")
    );
    Ok(())
}

#[tokio::test]
async fn validation_errors_attach_to_fields_without_banner() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/users");
        then.status(400).json_body(json!({
            "validationErrors": {
                "username": "Username cannot be null",
                "email": "E-mail cannot be null"
            }
        }));
    });
    let client = client_for(&server.base_url())?;
    let controller = filled_sign_up();

    assert!(sign_up::submit(&controller, &client, || ()).await);
    {
        let form = controller.borrow();
        assert_eq!(
            form.field_error(SignUpField::Username),
            Some("Username cannot be null")
        );
        assert_eq!(form.field_error(SignUpField::Email), Some("E-mail cannot be null"));
        assert_eq!(form.generic_error(), None);
        assert!(!form.is_loading());
    }

    controller
        .borrow_mut()
        .edit(SignUpField::Username, "user1-updated".to_string());
    let form = controller.borrow();
    assert_eq!(form.field_error(SignUpField::Username), None);
    assert_eq!(form.field_error(SignUpField::Email), Some("E-mail cannot be null"));
    Ok(())
}

#[tokio::test]
async fn transport_failure_shows_localized_fallback() -> Result<()> {
    let client = client_for(&unreachable_base()?)?;
    let controller = filled_login();

    assert!(login::submit(&controller, &client, || ()).await);
    let form = controller.borrow();
    assert_eq!(form.generic_error(), Some(&ErrorMessage::Unexpected));
    assert_eq!(form.field_error(LoginField::Email), None);
    let bundle = TranslationBundle::new(LocaleCode::En);
    assert_eq!(
        form.generic_error().map(|error| error.resolve(&bundle)),
        Some(GENERIC_ERROR_DEFAULT.to_string())
    );
    Ok(())
}

#[tokio::test]
async fn resubmitting_hides_previous_banner() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/auth");
        then.status(401)
            .json_body(json!({ "message": "Incorrect credentials" }));
    });
    let client = client_for(&server.base_url())?;
    let controller = filled_login();

    login::submit(&controller, &client, || ()).await;
    assert_eq!(
        controller.borrow().generic_error(),
        Some(&ErrorMessage::Server("Incorrect credentials".to_string()))
    );

    let observed = RefCell::new(Vec::new());
    login::submit(&controller, &client, || {
        observed
            .borrow_mut()
            .push(controller.borrow().generic_error().cloned());
    })
    .await;
    assert_eq!(observed.borrow().first(), Some(&None));
    Ok(())
}

#[tokio::test]
async fn route_change_reissues_profile_request() -> Result<()> {
    let server = MockServer::start_async().await;
    let first = server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/123");
        then.status(200).json_body(user_json(123));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/345");
        then.status(200).json_body(user_json(345));
    });
    let client = client_for(&server.base_url())?;
    let ids = stream::iter(["123", "123", "345"]).then(|id| async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        id.to_string()
    });
    let seen = RefCell::new(Vec::new());

    let request = follow_profiles(Box::pin(ids), &client, |state| {
        seen.borrow_mut()
            .push(state.data().map(|user| user.id));
    })
    .await;

    first.assert();
    second.assert();
    assert_eq!(*seen.borrow(), vec![None, Some(123), None, Some(345)]);
    assert!(!request.state().is_loading());
    assert_eq!(request.state().data().map(|user| user.id), Some(345));
    Ok(())
}

#[tokio::test]
async fn followed_route_settles_on_latest_value() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/123");
        then.status(200).json_body(user_json(123));
    });
    let latest = server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/345");
        then.status(200).json_body(user_json(345));
    });
    let client = client_for(&server.base_url())?;

    let controller = follow(
        stream::iter(vec!["123".to_string(), "345".to_string()]),
        |id: String| {
            let client = client.clone();
            async move { client.get_user(&id).await }
        },
        |_state: &RequestState<User>| {},
    )
    .await;

    latest.assert();
    assert_eq!(controller.state().data().map(|user| user.id), Some(345));
    Ok(())
}

#[tokio::test]
async fn missing_profile_shows_server_message() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/9");
        then.status(404).json_body(json!({ "message": "User not found" }));
    });
    let client = client_for(&server.base_url())?;

    let request = follow_profiles(stream::iter(["9".to_string()]), &client, |_| {}).await;
    assert_eq!(
        request.state().error(),
        Some(&ErrorMessage::Server("User not found".to_string()))
    );
    Ok(())
}

#[tokio::test]
async fn pagination_controls_follow_page_bounds() -> Result<()> {
    let users: Vec<serde_json::Value> = (1..=7).map(user_json).collect();
    let server = MockServer::start_async().await;
    for page in 0..3_u32 {
        let body = serde_json::to_value(Page::paginate(&users, PageQuery { page, size: 3 }))?;
        server.mock(move |when, then| {
            when.method(GET)
                .path("/api/v1/users")
                .query_param("page", page.to_string())
                .query_param("size", "3");
            then.status(200).json_body(body);
        });
    }
    let client = client_for(&server.base_url())?;
    let pager = RefCell::new(UserPager::default());

    assert!(user_list::load(&pager, &client, PageNav::First, || ()).await);
    assert!(!pager.borrow().has_previous());
    assert!(pager.borrow().has_next());
    assert_eq!(
        pager.borrow().state().data().map(|page| page.total_pages),
        Some(3)
    );
    assert!(!user_list::load(&pager, &client, PageNav::Previous, || ()).await);

    assert!(user_list::load(&pager, &client, PageNav::Next, || ()).await);
    assert!(user_list::load(&pager, &client, PageNav::Next, || ()).await);
    let last = pager.borrow();
    assert!(last.has_previous());
    assert!(!last.has_next());
    assert_eq!(
        last.state().data().map(|page| page.content.len()),
        Some(1)
    );
    Ok(())
}

#[tokio::test]
async fn login_stores_identity_and_redirects_home() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/auth")
            .header(ACCEPT_LANGUAGE, "tr")
            .json_body(json!({ "email": "user1@mail.com", "password": "P4ssword" }));
        then.status(200).json_body(user_json(1));
    });
    let client = client_for(&server.base_url())?;
    client.set_language(LocaleCode::Tr.code());
    let storage = MemoryStorage::new();
    let mut auth = AuthStore::new(StoredIdentity::new(storage.clone()));
    let controller = filled_login();

    login::submit(&controller, &client, || ()).await;
    let redirect = login::complete(&controller.borrow(), &mut auth);

    mock.assert();
    assert_eq!(redirect, Some(Redirect::Home));
    assert_eq!(auth.identity().id, 1);
    assert_eq!(auth.identity().username.as_deref(), Some("user1"));
    let restored = AuthStore::new(StoredIdentity::new(storage));
    assert_eq!(restored.identity().id, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_own_profile_logs_out() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/users/3");
        then.status(200).json_body(json!({}));
    });
    let client = client_for(&server.base_url())?;
    let storage = MemoryStorage::with_entry(AUTH_KEY, r#"{"id":3,"username":"user3"}"#);
    let mut auth = AuthStore::new(StoredIdentity::new(storage.clone()));
    let controller = RefCell::new(DeleteController::new(DeleteForm { id: 3 }));

    assert!(!delete::submit(&controller, &client, false, || ()).await);
    assert!(delete::submit(&controller, &client, true, || ()).await);
    let redirect = delete::complete(&controller.borrow(), &mut auth);

    mock.assert();
    assert!(matches!(controller.borrow().state(), SubmitState::Succeeded(())));
    assert_eq!(redirect, Some(Redirect::Home));
    assert_eq!(auth.identity(), &AuthIdentity::anonymous());
    assert_eq!(storage.get(AUTH_KEY).as_deref(), Some(r#"{"id":0}"#));
    Ok(())
}
