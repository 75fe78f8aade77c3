//! Member and admin sign-in screens

use std::sync::Arc;

use crate::api::GymApi;
use crate::error::{ClientResult, FittrackError};
use crate::models::{AdminSession, Session};
use crate::store::SessionStore;

use super::state::{ActionGuard, Mount, Submission};

fn require_credentials(phone: &str, password: &str) -> ClientResult<()> {
    if phone.trim().is_empty() || password.is_empty() {
        return Err(FittrackError::Validation(
            "Please fill in all fields".to_string(),
        ));
    }
    Ok(())
}

/// Member login screen.
///
/// A successful login overwrites the persisted [`Session`]; a failed one
/// leaves it exactly as it was.
pub struct LoginViewModel {
    api: Arc<dyn GymApi>,
    session: SessionStore,
    submit_guard: ActionGuard,
    mount: Mount,
}

impl LoginViewModel {
    pub fn new(api: Arc<dyn GymApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            submit_guard: ActionGuard::new("login"),
            mount: Mount::default(),
        }
    }

    /// Signs in with `phone` and `password`.
    ///
    /// # Errors
    ///
    /// [`FittrackError::Validation`] for blank input (no request is made),
    /// otherwise whatever the API or the session store reported.
    pub async fn submit(&self, phone: &str, password: &str) -> ClientResult<Submission<Session>> {
        require_credentials(phone, password)?;
        let Some(_in_flight) = self.submit_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let session = self.api.login(phone.trim(), password).await?;
        if !self.mount.is_active() {
            tracing::debug!("Login screen gone; dropping login result");
            return Ok(Submission::Discarded);
        }

        self.session.save(&session)?;
        tracing::info!("Logged in as {}", session.display_name());
        Ok(Submission::Completed(session))
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_guard.is_in_flight()
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }
}

/// Admin login screen.
pub struct AdminLoginViewModel {
    api: Arc<dyn GymApi>,
    session: SessionStore,
    submit_guard: ActionGuard,
    mount: Mount,
}

impl AdminLoginViewModel {
    pub fn new(api: Arc<dyn GymApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            submit_guard: ActionGuard::new("admin_login"),
            mount: Mount::default(),
        }
    }

    /// Signs an admin in and stores the returned record.
    pub async fn submit(
        &self,
        mobile: &str,
        password: &str,
    ) -> ClientResult<Submission<AdminSession>> {
        require_credentials(mobile, password)?;
        let Some(_in_flight) = self.submit_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let admin = self.api.admin_login(mobile.trim(), password).await?;
        if !self.mount.is_active() {
            return Ok(Submission::Discarded);
        }

        self.session.save_admin(&admin)?;
        tracing::info!("Admin signed in");
        Ok(Submission::Completed(admin))
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{memory_session_store, session, FakeGymApi};

    #[tokio::test]
    async fn test_login_with_bad_password_leaves_session_absent() {
        let api = Arc::new(FakeGymApi::new().with_user("good", session("Ann", "9999999999")));
        let (store, _) = memory_session_store();
        let vm = LoginViewModel::new(api.clone(), store.clone());

        let err = vm.submit("9999999999", "bad").await.unwrap_err();
        assert!(matches!(err, FittrackError::Authentication(_)));
        assert!(store.load().unwrap().is_none());
        assert_eq!(api.calls("login"), 1);
    }

    #[tokio::test]
    async fn test_login_success_persists_session() {
        let api = Arc::new(FakeGymApi::new().with_user("good", session("Ann", "5550001")));
        let (store, _) = memory_session_store();
        let vm = LoginViewModel::new(api, store.clone());

        let outcome = vm.submit("5550001", "good").await.unwrap();
        assert_eq!(outcome.completed().map(|s| s.name), Some("Ann".to_string()));
        assert_eq!(store.load().unwrap().unwrap().name, "Ann");
        assert!(!vm.is_submitting());
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_api() {
        let api = Arc::new(FakeGymApi::new());
        let (store, _) = memory_session_store();
        let vm = LoginViewModel::new(api.clone(), store);

        let err = vm.submit("  ", "pw").await.unwrap_err();
        assert!(matches!(err, FittrackError::Validation(_)));
        assert_eq!(api.calls("login"), 0);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let api = Arc::new(FakeGymApi::new());
        let (store, _) = memory_session_store();
        store.save(&session("Bob", "5550002")).unwrap();
        let vm = LoginViewModel::new(api, store.clone());

        assert!(vm.submit("5550002", "wrong").await.is_err());
        assert_eq!(store.load().unwrap().unwrap().name, "Bob");
    }

    #[tokio::test]
    async fn test_unmounted_login_discards_result() {
        let api = Arc::new(FakeGymApi::new().with_user("good", session("Ann", "5550001")));
        let (store, _) = memory_session_store();
        let vm = LoginViewModel::new(api, store.clone());
        vm.unmount();

        let outcome = vm.submit("5550001", "good").await.unwrap();
        assert_eq!(outcome, Submission::Discarded);
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_double_submit_makes_one_call() {
        let api = Arc::new(
            FakeGymApi::gated().with_user("good", session("Ann", "5550001")),
        );
        let (store, _) = memory_session_store();
        let vm = Arc::new(LoginViewModel::new(api.clone(), store));

        let first = tokio::spawn({
            let vm = vm.clone();
            async move { vm.submit("5550001", "good").await }
        });
        while api.calls("login") == 0 {
            tokio::task::yield_now().await;
        }

        let second = vm.submit("5550001", "good").await.unwrap();
        assert_eq!(second, Submission::Suppressed);

        api.release();
        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, Submission::Completed(_)));
        assert_eq!(api.calls("login"), 1);
    }

    #[tokio::test]
    async fn test_admin_login_stores_admin_record_only() {
        let api = Arc::new(FakeGymApi::new());
        let (store, _) = memory_session_store();
        let vm = AdminLoginViewModel::new(api, store.clone());

        let admin = vm.submit("8888888888", "admin").await.unwrap().completed().unwrap();
        assert_eq!(admin.mobile(), Some("8888888888"));
        assert_eq!(store.load_admin().unwrap(), Some(admin));
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_admin_login_failure_message() {
        let api = Arc::new(FakeGymApi::new());
        let (store, _) = memory_session_store();
        let vm = AdminLoginViewModel::new(api, store.clone());

        let err = vm.submit("8888888888", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials.");
        assert!(store.load_admin().unwrap().is_none());
    }
}
