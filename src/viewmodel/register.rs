//! Member registration screen

use std::sync::Arc;

use crate::api::{GymApi, RegistrationForm};
use crate::error::ClientResult;
use crate::models::Session;
use crate::store::SessionStore;

use super::state::{ActionGuard, Mount, Submission};

pub struct RegisterViewModel {
    api: Arc<dyn GymApi>,
    session: SessionStore,
    submit_guard: ActionGuard,
    mount: Mount,
}

impl RegisterViewModel {
    pub fn new(api: Arc<dyn GymApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            submit_guard: ActionGuard::new("register"),
            mount: Mount::default(),
        }
    }

    /// Validates `form`, creates the account and signs the new member in.
    ///
    /// Validation failures are returned before any request is made.
    pub async fn submit(&self, form: &RegistrationForm) -> ClientResult<Submission<Session>> {
        let registration = form.validate()?;
        let Some(_in_flight) = self.submit_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let session = self.api.register(&registration).await?;
        if !self.mount.is_active() {
            return Ok(Submission::Discarded);
        }

        self.session.save(&session)?;
        tracing::info!("Registered {}", session.display_name());
        Ok(Submission::Completed(session))
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }
}
