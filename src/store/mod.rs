//! Secure session persistence
//!
//! The signed-in member's [`Session`] lives in an opaque secure key-value
//! store. This module defines that capability ([`SecureStore`]) and the
//! [`SessionStore`] wrapper that every view model receives, so no screen
//! reaches for ambient global state.
//!
//! # Module Layout
//!
//! - [`keyring`] -- OS credential store backend
//! - [`memory`]  -- in-process backend for tests and ephemeral runs

pub mod keyring;
pub mod memory;

use std::sync::Arc;

use crate::error::{ClientResult, FittrackError};
use crate::models::{AdminSession, Session};

pub use self::keyring::KeyringStore;
pub use memory::MemoryStore;

/// Key holding the serialized member session
pub const SESSION_KEY: &str = "userData";

/// Key holding the serialized admin record
pub const ADMIN_KEY: &str = "adminData";

/// An opaque secure key-value store.
///
/// Implementations provide confidentiality at rest; callers only store and
/// fetch strings. A missing key is `Ok(None)`, never an error.
#[cfg_attr(test, mockall::automock)]
pub trait SecureStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> ClientResult<()>;
}

/// Holder of the single persisted [`Session`].
///
/// Cloning is cheap; all clones share the same backing store, which is how
/// the session value is shared between screens.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fittrack::models::Session;
/// use fittrack::store::{MemoryStore, SessionStore};
///
/// let store = SessionStore::new(Arc::new(MemoryStore::new()));
/// assert!(store.load().unwrap().is_none());
///
/// store.save(&Session::from_phone("5550001")).unwrap();
/// assert_eq!(store.load().unwrap().unwrap().phone, "5550001");
///
/// store.clear().unwrap();
/// store.clear().unwrap();
/// assert!(store.load().unwrap().is_none());
/// ```
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SecureStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SecureStore>) -> Self {
        Self { backend }
    }

    /// Serializes and stores `session`, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`FittrackError::Storage`] when the backend is unavailable.
    pub fn save(&self, session: &Session) -> ClientResult<()> {
        let blob = serde_json::to_string(session)?;
        self.backend.set(SESSION_KEY, &blob)?;
        tracing::debug!(phone = %session.phone, "Session saved");
        Ok(())
    }

    /// Loads the stored session.
    ///
    /// Returns `Ok(None)` when logged out. Besides the canonical session
    /// object, a bare JSON string is accepted and read as the phone number,
    /// which is what the legacy login flow stored. An undecodable blob is
    /// logged and treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`FittrackError::Storage`] when the backend is unavailable.
    pub fn load(&self) -> ClientResult<Option<Session>> {
        let Some(blob) = self.backend.get(SESSION_KEY)? else {
            return Ok(None);
        };
        if let Ok(session) = serde_json::from_str::<Session>(&blob) {
            return Ok(Some(session));
        }
        match serde_json::from_str::<String>(&blob) {
            Ok(phone) => Ok(Some(Session::from_phone(phone))),
            Err(e) => {
                tracing::warn!("Ignoring undecodable stored session: {}", e);
                Ok(None)
            }
        }
    }

    /// Removes the stored session. Idempotent.
    pub fn clear(&self) -> ClientResult<()> {
        self.backend.delete(SESSION_KEY)?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    /// Stores the admin record returned by the admin login.
    pub fn save_admin(&self, admin: &AdminSession) -> ClientResult<()> {
        let blob = serde_json::to_string(admin)?;
        self.backend.set(ADMIN_KEY, &blob)
    }

    /// Loads the admin record, if an admin is signed in.
    pub fn load_admin(&self) -> ClientResult<Option<AdminSession>> {
        match self.backend.get(ADMIN_KEY)? {
            Some(blob) => serde_json::from_str(&blob)
                .map(Some)
                .map_err(FittrackError::from),
            None => Ok(None),
        }
    }

    /// Removes the admin record. Idempotent.
    pub fn clear_admin(&self) -> ClientResult<()> {
        self.backend.delete(ADMIN_KEY)
    }
}
