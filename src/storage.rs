use crate::config::{StorageArea, StorageKeys};
use crate::session::{SessionToken, UserProfile};
use codee::string::JsonSerdeCodec;
use codee::{Decoder, Encoder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Persistent key-value storage holding the session token, user profile and referral code.
///
/// Writes are last-write-wins. Implementations report their own failures (through tracing) and
/// behave like an empty store when the underlying storage is unavailable.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage` or `window.sessionStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage {
    area: StorageArea,
}

impl WebStorage {
    pub fn new(area: StorageArea) -> Self {
        Self { area }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let Some(window) = web_sys::window() else {
            tracing::error!("No window available. Storage cannot be accessed.");
            return None;
        };
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        match storage {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                tracing::error!(area = ?self.area, "Storage not available.");
                None
            }
            Err(err) => {
                tracing::error!(?err, area = ?self.area, "Storage not available.");
                None
            }
        }
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage()?.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(?err, "Error reading '{key}' from storage.");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if let Err(err) = storage.set_item(key, value) {
                tracing::error!(?err, "Error writing '{key}' to storage.");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            if let Err(err) = storage.remove_item(key) {
                tracing::error!(?err, "Error removing '{key}' from storage.");
            }
        }
    }
}

/// Storage living only as long as the process. Clones share their data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        // A poisoned lock only means another holder panicked mid-access. The map itself is
        // always in a consistent state.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut entries)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        self.with_entries(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove(&self, key: &str) {
        self.with_entries(|entries| {
            entries.remove(key);
        });
    }
}

/// Typed access to the values this crate keeps in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn session_token(&self) -> Option<SessionToken> {
        self.store
            .get(&self.keys.session_token)
            .map(SessionToken::from_stored)
    }

    /// Replaces any previously stored session.
    pub fn set_session_token(&self, token: &SessionToken) {
        self.store.set(&self.keys.session_token, token.as_str());
    }

    /// `Ok(None)` when no profile was stored yet.
    pub fn user_profile(&self) -> Result<Option<UserProfile>, serde_json::Error> {
        self.store
            .get(&self.keys.user_profile)
            .map(|raw| <JsonSerdeCodec as Decoder<UserProfile>>::decode(raw.as_str()))
            .transpose()
    }

    pub fn set_user_profile(&self, profile: &UserProfile) {
        match <JsonSerdeCodec as Encoder<UserProfile>>::encode(profile) {
            Ok(encoded) => self.store.set(&self.keys.user_profile, &encoded),
            Err(err) => tracing::error!(?err, "Could not encode user profile. Not persisting it."),
        }
    }

    pub fn referral_code(&self) -> Option<String> {
        self.store.get(&self.keys.referral_code)
    }

    /// Overwrites any previously captured code.
    pub fn set_referral_code(&self, code: &str) {
        self.store.set(&self.keys.referral_code, code);
    }

    /// Called once the code was consumed by a successful login.
    pub fn clear_referral_code(&self) {
        self.store.remove(&self.keys.referral_code);
    }
}
