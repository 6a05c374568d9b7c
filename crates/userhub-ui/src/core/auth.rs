//! Client-side auth store.
//!
//! # Design
//! - The store is an explicit object injected into views, never a global.
//! - Every mutation persists the whole identity through [`IdentityPersistence`].
//! - A missing or corrupt persisted value silently yields the anonymous identity.

use serde::{Deserialize, Serialize};
use userhub_api_models::User;

use crate::core::storage::KeyValueStorage;

/// Storage key holding the serialized identity.
pub const AUTH_KEY: &str = "auth";

/// Logged-in identity; `id == 0` means anonymous.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// User id, zero when nobody is logged in.
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name.
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Account e-mail address.
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Stored profile image file name.
    pub image: Option<String>,
}

impl AuthIdentity {
    /// The anonymous identity (`{ "id": 0 }`).
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether this identity belongs to a logged-in user.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.id != 0
    }
}

impl From<&User> for AuthIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: Some(user.username.clone()),
            email: Some(user.email.clone()),
            image: user.image.clone(),
        }
    }
}

/// Persistence adapter for the auth identity.
pub trait IdentityPersistence {
    /// Previously saved identity, or `None` when absent or unreadable.
    fn load(&self) -> Option<AuthIdentity>;

    /// Persist the full identity.
    fn save(&self, identity: &AuthIdentity);
}

/// JSON adapter storing the identity under [`AUTH_KEY`].
#[derive(Clone, Debug, Default)]
pub struct StoredIdentity<S> {
    storage: S,
}

impl<S> StoredIdentity<S> {
    /// Wrap a key/value backend.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: KeyValueStorage> IdentityPersistence for StoredIdentity<S> {
    fn load(&self) -> Option<AuthIdentity> {
        let raw = self.storage.get(AUTH_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(identity) => Some(identity),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unreadable persisted identity");
                None
            }
        }
    }

    fn save(&self, identity: &AuthIdentity) {
        let encoded = match serde_json::to_string(identity) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode identity");
                return;
            }
        };
        if let Err(err) = self.storage.set(AUTH_KEY, &encoded) {
            tracing::warn!(error = %err, detail = %err.detail, "failed to persist identity");
        }
    }
}

/// Holder of the current identity.
#[derive(Debug)]
pub struct AuthStore<P> {
    identity: AuthIdentity,
    persistence: P,
}

impl<P: IdentityPersistence> AuthStore<P> {
    /// Create the store from whatever the adapter holds.
    #[must_use]
    pub fn new(persistence: P) -> Self {
        let identity = persistence.load().unwrap_or_default();
        Self {
            identity,
            persistence,
        }
    }

    /// Current identity.
    #[must_use]
    pub const fn identity(&self) -> &AuthIdentity {
        &self.identity
    }

    /// Whether someone is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.identity.is_logged_in()
    }

    /// Whether the profile identified by the raw route id belongs to the current user.
    #[must_use]
    pub fn is_owner(&self, route_id: &str) -> bool {
        self.is_logged_in()
            && route_id
                .trim()
                .parse::<u64>()
                .is_ok_and(|id| id == self.identity.id)
    }

    /// Replace the identity after a successful login.
    pub fn set_logged_in(&mut self, identity: AuthIdentity) {
        self.identity = identity;
        self.persist();
    }

    /// Refresh username/image after the owner edited their profile.
    pub fn update_profile(&mut self, username: String, image: Option<String>) {
        self.identity.username = Some(username);
        self.identity.image = image;
        self.persist();
    }

    /// Forget the current user.
    pub fn logout(&mut self) {
        self.identity = AuthIdentity::anonymous();
        self.persist();
    }

    fn persist(&self) {
        self.persistence.save(&self.identity);
    }
}
