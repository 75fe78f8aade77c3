//! Test utilities for FitTrack
//!
//! Provides an in-process [`GymApi`] with call counters, scripted failures and
//! an optional gate that holds calls until the test releases it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Semaphore;

use crate::api::{Ack, GymApi, NewMember, Registration};
use crate::error::{ClientResult, FittrackError};
use crate::models::{AdminSession, Member, Session, Workout};
use crate::store::{MemoryStore, SessionStore};
use crate::viewmodel::FixedClock;

type Failure = fn() -> FittrackError;

/// Scriptable in-memory backend
#[derive(Default)]
pub struct FakeGymApi {
    /// Users accepted by `login`, keyed by phone, with their password
    pub users: Mutex<HashMap<String, (String, Session)>>,
    pub members: Mutex<Vec<Member>>,
    pub workouts: Mutex<Vec<Workout>>,
    failures: Mutex<HashMap<&'static str, Failure>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    gate: Option<Arc<Semaphore>>,
    /// Operations held at the gate; empty holds all of them
    gated_ops: Vec<&'static str>,
}

impl FakeGymApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake whose calls block until [`FakeGymApi::release`].
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    /// A fake that holds only the listed operations at the gate.
    pub fn gated_on(ops: &[&'static str]) -> Self {
        Self {
            gated_ops: ops.to_vec(),
            ..Self::gated()
        }
    }

    /// Lets every pending and future call through the gate.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1024);
        }
    }

    pub fn with_user(self, password: &str, session: Session) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(session.phone.clone(), (password.to_string(), session));
        self
    }

    pub fn with_members(self, members: Vec<Member>) -> Self {
        *self.members.lock().unwrap() = members;
        self
    }

    pub fn with_workouts(self, workouts: Vec<Workout>) -> Self {
        *self.workouts.lock().unwrap() = workouts;
        self
    }

    /// Makes every later call to `op` fail with `failure()`.
    pub fn fail(&self, op: &'static str, failure: Failure) {
        self.failures.lock().unwrap().insert(op, failure);
    }

    /// Stops failing `op`.
    pub fn recover(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Number of calls made to `op` so far, including ones held at the gate
    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    async fn enter(&self, op: &'static str) -> ClientResult<()> {
        *self.calls.lock().unwrap().entry(op).or_insert(0) += 1;
        let held = self.gated_ops.is_empty() || self.gated_ops.contains(&op);
        if let Some(gate) = self.gate.as_ref().filter(|_| held) {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| FittrackError::Network(e.to_string()))?;
        }
        match self.failures.lock().unwrap().get(op) {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GymApi for FakeGymApi {
    async fn login(&self, phone: &str, password: &str) -> ClientResult<Session> {
        self.enter("login").await?;
        match self.users.lock().unwrap().get(phone) {
            Some((expected, session)) if expected == password => Ok(session.clone()),
            _ => Err(FittrackError::Authentication("Invalid credentials".to_string())),
        }
    }

    async fn admin_login(&self, mobile: &str, password: &str) -> ClientResult<AdminSession> {
        self.enter("admin_login").await?;
        if password == "admin" {
            Ok(AdminSession(serde_json::json!({ "mobile": mobile })))
        } else {
            Err(FittrackError::Authentication("Invalid credentials.".to_string()))
        }
    }

    async fn register(&self, registration: &Registration) -> ClientResult<Session> {
        self.enter("register").await?;
        Ok(Session {
            subject_id: Some(format!("id-{}", registration.phone)),
            name: registration.name.clone(),
            phone: registration.phone.clone(),
            height: Some(registration.height),
            weight: Some(registration.weight),
            fitness_goal: Some(registration.goal.clone()),
            ..Session::default()
        })
    }

    async fn add_member(&self, new_member: &NewMember) -> ClientResult<Member> {
        self.enter("add_member").await?;
        let member = Member {
            name: new_member.name.clone(),
            phone: new_member.phone.clone(),
            membership_type: new_member.membership_type.clone(),
            created_at: Some(new_member.join_date.clone()),
            ..Member::default()
        };
        self.members.lock().unwrap().push(member.clone());
        Ok(member)
    }

    // List calls answer with the data as it was when the request was made.
    async fn list_members(&self) -> ClientResult<Vec<Member>> {
        let snapshot = self.members.lock().unwrap().clone();
        self.enter("list_members").await?;
        Ok(snapshot)
    }

    async fn delete_member(&self, id: &str) -> ClientResult<Ack> {
        self.enter("delete_member").await?;
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.id != id);
        if members.len() == before {
            return Err(FittrackError::NotFound("User not found".to_string()));
        }
        Ok(Ack {
            message: Some("User deleted".to_string()),
        })
    }

    async fn add_workout(&self, member_phone: &str, workout: &Workout) -> ClientResult<Ack> {
        self.enter("add_workout").await?;
        if member_phone.is_empty() {
            return Err(FittrackError::Validation("Phone is required".to_string()));
        }
        self.workouts.lock().unwrap().push(workout.clone());
        Ok(Ack {
            message: Some("Workout added".to_string()),
        })
    }

    async fn list_workouts(&self, _member_phone: &str) -> ClientResult<Vec<Workout>> {
        let snapshot = self.workouts.lock().unwrap().clone();
        self.enter("list_workouts").await?;
        Ok(snapshot)
    }
}

/// Session store over a fresh [`MemoryStore`], plus the backend for pokes
pub fn memory_session_store() -> (SessionStore, Arc<MemoryStore>) {
    let backend = Arc::new(MemoryStore::new());
    (SessionStore::new(backend.clone()), backend)
}

/// Clock fixed on 2024-06-15
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date"),
    ))
}

pub fn member(id: &str, name: &str, phone: &str, membership: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        membership_type: membership.to_string(),
        ..Member::default()
    }
}

pub fn session(name: &str, phone: &str) -> Session {
    Session {
        name: name.to_string(),
        phone: phone.to_string(),
        ..Session::default()
    }
}

/// Assert that an error's user-facing message contains `expected`
pub fn assert_error_contains<T: std::fmt::Debug>(result: ClientResult<T>, expected: &str) {
    match result {
        Ok(v) => panic!("Expected error containing '{}' but got Ok({:?})", expected, v),
        Err(e) => {
            let message = e.user_message();
            assert!(
                message.contains(expected),
                "Error message '{}' does not contain '{}'",
                message,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_counts_calls_and_scripts_failures() {
        let api = FakeGymApi::new().with_members(vec![member("1", "Ann", "555", "Basic")]);
        assert_eq!(api.list_members().await.unwrap().len(), 1);
        api.fail("list_members", || FittrackError::Network("offline".into()));
        assert!(api.list_members().await.is_err());
        api.recover("list_members");
        assert!(api.list_members().await.is_ok());
        assert_eq!(api.calls("list_members"), 3);
    }

    #[tokio::test]
    async fn test_gated_on_holds_only_listed_ops() {
        let api = Arc::new(FakeGymApi::gated_on(&["list_workouts"]));
        let held = tokio::spawn({
            let api = api.clone();
            async move { api.list_workouts("555").await }
        });
        while api.calls("list_workouts") == 0 {
            tokio::task::yield_now().await;
        }

        let workout = Workout::new("Cardio", "Run", 30, "2024-06-15");
        api.add_workout("555", &workout).await.unwrap();
        assert!(!held.is_finished());

        api.release();
        assert!(held.await.unwrap().unwrap().is_empty());
        assert_eq!(api.list_workouts("555").await.unwrap(), vec![workout]);
    }

    #[tokio::test]
    async fn test_fake_delete_unknown_member_is_not_found() {
        let api = FakeGymApi::new();
        assert_error_contains(api.delete_member("nope").await, "not found");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: ClientResult<()> = Err(FittrackError::Network("offline".to_string()));
        assert_error_contains(result, "not present");
    }
}
