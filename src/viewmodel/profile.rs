//! Profile screen: show, edit and log out
//!
//! The profile is read from the secure session store rather than the
//! backend, so loading never touches the network.

use crate::error::{ClientResult, FittrackError};
use crate::models::Session;
use crate::store::SessionStore;

use super::state::{ActionGuard, LoadOutcome, Loadable, Screen, Submission};

/// Changes to apply to the stored profile; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<String>,
    pub fitness_goal: Option<String>,
    pub membership_type: Option<String>,
}

impl ProfileEdit {
    /// Returns `current` with this edit applied.
    pub fn apply(&self, current: &Session) -> Session {
        let mut next = current.clone();
        if let Some(name) = &self.name {
            next.name = name.trim().to_string();
        }
        if let Some(phone) = &self.phone {
            next.phone = phone.trim().to_string();
        }
        if self.height.is_some() {
            next.height = self.height;
        }
        if self.weight.is_some() {
            next.weight = self.weight;
        }
        if self.gender.is_some() {
            next.gender = self.gender.clone();
        }
        if self.fitness_goal.is_some() {
            next.fitness_goal = self.fitness_goal.clone();
        }
        if self.membership_type.is_some() {
            next.membership_type = self.membership_type.clone();
        }
        next
    }
}

pub struct ProfileViewModel {
    session: SessionStore,
    screen: Screen<Option<Session>>,
    save_guard: ActionGuard,
}

impl ProfileViewModel {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            screen: Screen::new("profile"),
            save_guard: ActionGuard::new("save_profile"),
        }
    }

    /// Reads the stored session. `Ready(None)` means logged out.
    pub async fn load(&self) -> LoadOutcome {
        let session = self.session.clone();
        self.screen.load_with(|| async move { session.load() }).await
    }

    pub fn state(&self) -> Loadable<Option<Session>> {
        self.screen.snapshot()
    }

    /// The loaded profile, if loaded and logged in
    pub fn profile(&self) -> Option<Session> {
        self.screen.data().flatten()
    }

    /// Applies `edit` to the stored session and persists the result.
    ///
    /// # Errors
    ///
    /// [`FittrackError::LoginRequired`] when nobody is logged in,
    /// [`FittrackError::Validation`] when the edit blanks the name or phone,
    /// [`FittrackError::Storage`] when the store rejects the write.
    pub async fn save(&self, edit: &ProfileEdit) -> ClientResult<Submission<Session>> {
        let Some(_in_flight) = self.save_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let current = self
            .session
            .load()?
            .ok_or_else(|| FittrackError::LoginRequired("Please log in first".to_string()))?;
        let updated = edit.apply(&current);
        if updated.name.is_empty() || updated.phone.is_empty() {
            return Err(FittrackError::Validation(
                "Name and phone are required".to_string(),
            ));
        }

        self.session.save(&updated)?;
        if self.screen.is_mounted() {
            self.show(Some(updated.clone()));
        }
        tracing::info!("Profile updated");
        Ok(Submission::Completed(updated))
    }

    /// Clears the stored session. Logging out twice is fine.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        if self.screen.is_mounted() {
            self.show(None);
        }
        tracing::info!("Logged out");
        Ok(())
    }

    /// Shows `profile`, also over the result of a running load.
    fn show(&self, profile: Option<Session>) {
        let shown = profile.clone();
        if !self.screen.local_update(move |p| *p = shown.clone()) {
            self.screen.set(profile);
        }
    }

    pub fn unmount(&self) {
        self.screen.unmount();
    }
}
