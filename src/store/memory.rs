//! In-process secure store
//!
//! Used by tests and by `session.backend: memory`, where nothing outlives the
//! process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{ClientResult, FittrackError};
use crate::store::SecureStore;

/// HashMap-backed [`SecureStore`].
///
/// The store can be marked unavailable to simulate a locked or missing
/// platform keystore; every operation then fails with
/// [`FittrackError::Storage`].
#[derive(Debug)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggles simulated availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> ClientResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(FittrackError::Storage(
                "Secure store unavailable".to_string(),
            ))
        }
    }

    fn poisoned() -> FittrackError {
        FittrackError::Storage("Secure store lock poisoned".to_string())
    }
}

impl SecureStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        self.check_available()?;
        let values = self.values.read().map_err(|_| Self::poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.check_available()?;
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        self.check_available()?;
        let mut values = self.values.write().map_err(|_| Self::poisoned())?;
        values.remove(key);
        Ok(())
    }
}
