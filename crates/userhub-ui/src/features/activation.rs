//! Account activation by token.

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::MessageResponse;

use crate::core::route_param::RouteParamRequest;

/// Activation request keyed by the token route segment.
pub type ActivationRequest = RouteParamRequest<String, MessageResponse>;

/// Activate the account for `token` unless it is already being handled.
pub async fn activate(
    request: &RefCell<ActivationRequest>,
    client: &ApiClient,
    token: String,
    notify: impl Fn(),
) -> bool {
    RouteParamRequest::load_with(
        request,
        token,
        |token| async move { client.activate(&token).await },
        notify,
    )
    .await
}
