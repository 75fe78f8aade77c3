//! Member workout screen: today/history buckets, history filter and sort,
//! and workout logging

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::{Ack, GymApi};
use crate::error::{ClientResult, FittrackError};
use crate::models::{
    distinct_types, filter_by_type, partition_by_day, sort_by_date, Session, SortOrder, Workout,
    WorkoutFilter, WorkoutSplit,
};
use crate::store::SessionStore;

use super::clock::Clock;
use super::state::{ActionGuard, LoadOutcome, Loadable, Screen, Submission};

/// Filter and sort criteria of the history list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryCriteria {
    pub filter: WorkoutFilter,
    pub order: SortOrder,
}

pub struct WorkoutViewModel {
    api: Arc<dyn GymApi>,
    session: SessionStore,
    clock: Arc<dyn Clock>,
    screen: Screen<Vec<Workout>>,
    criteria: Mutex<HistoryCriteria>,
    add_guard: ActionGuard,
}

impl WorkoutViewModel {
    pub fn new(api: Arc<dyn GymApi>, session: SessionStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            session,
            clock,
            screen: Screen::new("workouts"),
            criteria: Mutex::new(HistoryCriteria::default()),
            add_guard: ActionGuard::new("add_workout"),
        }
    }

    fn signed_in(&self) -> ClientResult<Session> {
        self.session
            .load()?
            .ok_or_else(|| FittrackError::LoginRequired("Please log in first".to_string()))
    }

    fn criteria_lock(&self) -> MutexGuard<'_, HistoryCriteria> {
        self.criteria.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the signed-in member's workouts.
    pub async fn load(&self) -> LoadOutcome {
        self.screen
            .load_with(|| async {
                let session = self.signed_in()?;
                self.api.list_workouts(&session.phone).await
            })
            .await
    }

    pub fn state(&self) -> Loadable<Vec<Workout>> {
        self.screen.snapshot()
    }

    /// Loaded workouts split against the clock's current day
    pub fn split(&self) -> WorkoutSplit {
        let workouts = self.screen.data().unwrap_or_default();
        partition_by_day(&workouts, &self.clock.today_string())
    }

    /// History bucket after the current filter and sort
    pub fn history(&self) -> Vec<Workout> {
        let criteria = self.criteria();
        let filtered = filter_by_type(&self.split().history, &criteria.filter);
        sort_by_date(&filtered, criteria.order)
    }

    /// Filter chip labels for the history bucket
    pub fn history_types(&self) -> Vec<String> {
        distinct_types(&self.split().history)
    }

    pub fn criteria(&self) -> HistoryCriteria {
        self.criteria_lock().clone()
    }

    pub fn set_filter(&self, filter: WorkoutFilter) {
        self.criteria_lock().filter = filter;
    }

    pub fn set_order(&self, order: SortOrder) {
        self.criteria_lock().order = order;
    }

    /// Flips the history sort direction and returns the new one.
    pub fn toggle_order(&self) -> SortOrder {
        let mut criteria = self.criteria_lock();
        criteria.order = criteria.order.toggled();
        criteria.order
    }

    /// Logs `workout` for the signed-in member and appends it locally.
    ///
    /// When a load is running the workout is also merged into its result.
    /// An identical entry already in the list is not appended twice.
    ///
    /// A second call while one is outstanding returns
    /// [`Submission::Suppressed`] without contacting the backend.
    pub async fn add_workout(&self, workout: Workout) -> ClientResult<Submission<Ack>> {
        workout.validate()?;
        let session = self.signed_in()?;
        let Some(_in_flight) = self.add_guard.try_begin() else {
            return Ok(Submission::Suppressed);
        };

        let ack = self.api.add_workout(&session.phone, &workout).await?;
        if !self.screen.is_mounted() {
            return Ok(Submission::Discarded);
        }

        tracing::info!(
            "Logged {} ({} min) on {}",
            workout.workout_type,
            workout.duration_minutes,
            workout.calendar_day()
        );
        let logged = workout.clone();
        let merged = self.screen.local_update(move |list| {
            if !list.contains(&logged) {
                list.push(logged.clone());
            }
        });
        if !merged {
            self.screen.set(vec![workout]);
        }
        Ok(Submission::Completed(ack))
    }

    pub fn unmount(&self) {
        self.screen.unmount();
    }
}
