//! Browser persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;

use crate::core::auth::{AuthStore, StoredIdentity};
use crate::core::storage::{KeyValueStorage, StorageError};

/// Auth store persisted in browser local storage.
pub(crate) type BrowserAuthStore = AuthStore<StoredIdentity<BrowserStorage>>;

/// `window.localStorage` behind the storage seam.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(|err| {
            let detail = format!("{err:?}");
            console::error!("storage operation failed", "set", key, &detail);
            StorageError {
                key: key.to_string(),
                detail,
            }
        })
    }
}

pub(crate) fn load_auth_store() -> BrowserAuthStore {
    AuthStore::new(StoredIdentity::new(BrowserStorage))
}

pub(crate) fn navigator_language() -> Option<String> {
    window().navigator().language()
}

/// API calls go to the origin that served the page.
pub(crate) fn api_base_url() -> String {
    window()
        .location()
        .origin()
        .unwrap_or_else(|_| "http://localhost:8080".to_string())
}
