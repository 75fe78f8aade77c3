//! Secure store backed by the OS keyring
//!
//! Values are kept in the operating system's native credential store
//! (Keychain on macOS, Secret Service on Linux, Windows Credential Manager on
//! Windows). Each key becomes one keyring entry under a shared service name.

use crate::error::{ClientResult, FittrackError};
use crate::store::SecureStore;

/// Stateless accessor for the OS native keyring.
///
/// # Examples
///
/// ```no_run
/// use fittrack::store::{KeyringStore, SecureStore};
///
/// let store = KeyringStore::new("fittrack");
/// store.set("userData", "{}").unwrap();
/// assert!(store.get("userData").unwrap().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Creates an accessor for entries under `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// The keyring service name entries are stored under
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> ClientResult<::keyring::Entry> {
        ::keyring::Entry::new(&self.service, key).map_err(storage_error)
    }
}

fn storage_error(e: ::keyring::Error) -> FittrackError {
    FittrackError::Storage(format!("Secure store unavailable: {}", e))
}

impl SecureStore for KeyringStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(::keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(storage_error(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entry(key)?.set_password(value).map_err(storage_error)
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(::keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}
