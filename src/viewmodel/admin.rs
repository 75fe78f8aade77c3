//! Admin dashboard: member list, search, add and delete, workout logging,
//! fitness classes and stats
//!
//! The member list is always populated by a full reload. Adds, deletes and
//! workout additions patch the list locally, only after the backend
//! confirmed the change. Fitness classes are kept on the client.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::{Ack, GymApi, MemberForm};
use crate::catalog::{default_classes, ClassForm, FitnessClass};
use crate::error::{ClientResult, FittrackError};
use crate::models::{filter_members, remove_member, Member, MemberStats, Workout};

use super::clock::{Clock, SystemClock};
use super::state::{ActionGuard, LoadOutcome, Loadable, Screen, Submission};

pub struct AdminDashboardViewModel {
    api: Arc<dyn GymApi>,
    clock: Arc<dyn Clock>,
    screen: Screen<Vec<Member>>,
    search: Mutex<String>,
    classes: Mutex<Vec<FitnessClass>>,
    add_member_guard: ActionGuard,
    delete_guard: ActionGuard,
    add_workout_guard: ActionGuard,
}

impl AdminDashboardViewModel {
    pub fn new(api: Arc<dyn GymApi>) -> Self {
        Self {
            api,
            clock: Arc::new(SystemClock),
            screen: Screen::new("admin_dashboard"),
            search: Mutex::new(String::new()),
            classes: Mutex::new(default_classes()),
            add_member_guard: ActionGuard::new("add_member"),
            delete_guard: ActionGuard::new("delete_member"),
            add_workout_guard: ActionGuard::new("add_member_workout"),
        }
    }

    /// Uses `clock` for join dates instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn classes_lock(&self) -> MutexGuard<'_, Vec<FitnessClass>> {
        self.classes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the full member list.
    pub async fn load(&self) -> LoadOutcome {
        self.screen.load_with(|| self.api.list_members()).await
    }

    pub fn state(&self) -> Loadable<Vec<Member>> {
        self.screen.snapshot()
    }

    /// The fetched list, unfiltered
    pub fn members(&self) -> Vec<Member> {
        self.screen.data().unwrap_or_default()
    }

    pub fn set_search(&self, query: impl Into<String>) {
        *self.search.lock().unwrap_or_else(PoisonError::into_inner) = query.into();
    }

    pub fn search(&self) -> String {
        self.search
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Members matching the current search, recomputed on every call
    pub fn filtered_members(&self) -> Vec<Member> {
        filter_members(&self.members(), &self.search())
    }

    pub fn stats(&self) -> MemberStats {
        MemberStats::from_members(&self.members())
    }

    /// Deletes member `id` on the backend, then drops it from the list.
    ///
    /// On failure the list is left untouched.
    pub async fn delete_member(&self, id: &str) -> ClientResult<Submission<Ack>> {
        let Some(_in_flight) = self.delete_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let ack = self.api.delete_member(id).await?;
        if !self.screen.is_mounted() {
            return Ok(Submission::Discarded);
        }

        let deleted = id.to_string();
        self.screen.local_update(move |members| {
            if remove_member(members, &deleted).is_none() {
                tracing::debug!("Deleted member {} was not in the list", deleted);
            }
        });
        tracing::info!("Deleted member {}", id);
        Ok(Submission::Completed(ack))
    }

    /// Logs `workout` for member `id`, then appends it to that member.
    ///
    /// # Errors
    ///
    /// [`FittrackError::Validation`] for an incomplete workout and
    /// [`FittrackError::NotFound`] when `id` is not in the loaded list; in
    /// both cases no request is made.
    pub async fn add_workout(&self, id: &str, workout: Workout) -> ClientResult<Submission<Ack>> {
        workout.validate()?;
        let phone = self
            .members()
            .into_iter()
            .find(|m| m.id == id)
            .map(|m| m.phone)
            .ok_or_else(|| FittrackError::NotFound(format!("Member {} not found", id)))?;

        let Some(_in_flight) = self.add_workout_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let ack = self.api.add_workout(&phone, &workout).await?;
        if !self.screen.is_mounted() {
            return Ok(Submission::Discarded);
        }

        let member_id = id.to_string();
        self.screen.local_update(move |members| {
            if let Some(member) = members.iter_mut().find(|m| m.id == member_id) {
                if !member.workouts.contains(&workout) {
                    member.workouts.push(workout.clone());
                }
            }
        });
        Ok(Submission::Completed(ack))
    }

    /// Creates a member on the backend and appends it to the list.
    ///
    /// The join date is today's date. When the backend does not return an
    /// id, the next free number is used.
    ///
    /// # Errors
    ///
    /// [`FittrackError::Validation`] for a blank name or contact, with no
    /// request made; otherwise whatever the backend reported.
    pub async fn add_member(&self, form: &MemberForm) -> ClientResult<Submission<Member>> {
        let new_member = form.validate(&self.clock.today_string())?;
        let Some(_in_flight) = self.add_member_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let mut member = self.api.add_member(&new_member).await?;
        if !self.screen.is_mounted() {
            return Ok(Submission::Discarded);
        }

        if member.id.trim().is_empty() {
            member.id = next_free_id(&self.members());
        }
        tracing::info!("Added member {} ({})", member.name, member.id);

        let added = member.clone();
        let merged = self.screen.local_update(move |members| {
            if !members.iter().any(|m| m.id == added.id) {
                members.push(added.clone());
            }
        });
        if !merged {
            self.screen.set(vec![member.clone()]);
        }
        Ok(Submission::Completed(member))
    }

    /// The gym's fitness classes, in the order they were added
    pub fn classes(&self) -> Vec<FitnessClass> {
        self.classes_lock().clone()
    }

    /// Validates `form` and schedules a new class with nobody enrolled.
    pub fn add_class(&self, form: &ClassForm) -> ClientResult<FitnessClass> {
        let mut classes = self.classes_lock();
        let id = classes.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let class = form.validate(id)?;
        tracing::info!("Added class {} ({})", class.name, class.schedule);
        classes.push(class.clone());
        Ok(class)
    }

    pub fn unmount(&self) {
        self.screen.unmount();
    }
}

/// Smallest numeric id above the list length that nobody uses yet
fn next_free_id(members: &[Member]) -> String {
    let mut candidate = members.len() + 1;
    while members.iter().any(|m| m.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}
