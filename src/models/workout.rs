//! Logged workouts and the derived views over them
//!
//! Workouts are immutable once created. Screens derive "today" and "history"
//! buckets, type filters and date ordering from a fetched list without
//! touching the list itself.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::error::{ClientResult, FittrackError};

/// A single logged exercise session.
///
/// The serde representation is the backend's wire shape:
/// `{"type": ..., "duration": ..., "workout": ..., "date": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Calendar day (`YYYY-MM-DD`) or ISO timestamp, exactly as sent
    pub date: String,

    /// Free-text description, e.g. "Bench press 5x5"
    #[serde(rename = "workout", default)]
    pub workout_name: String,

    /// Category, e.g. "Strength" or "Cardio"
    #[serde(rename = "type", default)]
    pub workout_type: String,

    #[serde(rename = "duration", default, deserialize_with = "lenient::minutes")]
    pub duration_minutes: u32,
}

impl Workout {
    /// Creates a workout logged on `date`.
    pub fn new(
        workout_type: impl Into<String>,
        workout_name: impl Into<String>,
        duration_minutes: u32,
        date: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            workout_name: workout_name.into(),
            workout_type: workout_type.into(),
            duration_minutes,
        }
    }

    /// The date portion of [`Workout::date`], i.e. everything before `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fittrack::models::Workout;
    ///
    /// let w = Workout::new("Cardio", "Run", 30, "2024-05-01T18:30:00.000Z");
    /// assert_eq!(w.calendar_day(), "2024-05-01");
    /// ```
    pub fn calendar_day(&self) -> &str {
        self.date.split('T').next().unwrap_or_default()
    }

    /// Point in time used for ordering; `None` when the date does not parse.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(self.calendar_day(), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Checks the fields the add-workout form requires.
    ///
    /// # Errors
    ///
    /// Returns [`FittrackError::Validation`] when the type is blank, the
    /// duration is zero or the date is blank.
    pub fn validate(&self) -> ClientResult<()> {
        if self.workout_type.trim().is_empty() || self.duration_minutes == 0 {
            return Err(FittrackError::Validation(
                "Please fill in all workout details".to_string(),
            ));
        }
        if self.date.trim().is_empty() {
            return Err(FittrackError::Validation(
                "Workout date is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Direction of the history date sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortOrder {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = FittrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(FittrackError::Validation(format!(
                "Invalid sort order: {}. Must be one of: asc, desc",
                other
            ))),
        }
    }
}

/// Workout-type filter for the history view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkoutFilter {
    #[default]
    All,
    /// Exact match on [`Workout::workout_type`]
    Type(String),
}

impl WorkoutFilter {
    /// Parses the filter chip label; `"all"` (any case) selects everything.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("all") {
            WorkoutFilter::All
        } else {
            WorkoutFilter::Type(label.to_string())
        }
    }

    fn matches(&self, workout: &Workout) -> bool {
        match self {
            WorkoutFilter::All => true,
            WorkoutFilter::Type(t) => &workout.workout_type == t,
        }
    }
}

/// Workouts split into the "today" and "history" buckets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutSplit {
    pub today: Vec<Workout>,
    pub history: Vec<Workout>,
}

impl WorkoutSplit {
    /// Total minutes logged today
    pub fn today_minutes(&self) -> u32 {
        self.today.iter().map(|w| w.duration_minutes).sum()
    }
}

/// Splits workouts by exact calendar-day string equality with `today`.
///
/// `today` is the client's local date as `YYYY-MM-DD`; no timezone
/// conversion is applied to the workout dates. Relative order is kept in
/// both buckets.
pub fn partition_by_day(workouts: &[Workout], today: &str) -> WorkoutSplit {
    let (today_bucket, history): (Vec<Workout>, Vec<Workout>) = workouts
        .iter()
        .cloned()
        .partition(|w| w.calendar_day() == today);
    WorkoutSplit {
        today: today_bucket,
        history,
    }
}

/// Returns the workouts matching `filter`, in their original order.
pub fn filter_by_type(workouts: &[Workout], filter: &WorkoutFilter) -> Vec<Workout> {
    workouts
        .iter()
        .filter(|w| filter.matches(w))
        .cloned()
        .collect()
}

/// Returns a copy sorted by date.
///
/// Descending order is the exact reverse of the ascending comparator. The
/// sort is stable, so workouts with equal dates keep their relative order
/// in both directions. Unparseable dates sort before every valid date.
pub fn sort_by_date(workouts: &[Workout], order: SortOrder) -> Vec<Workout> {
    let mut sorted = workouts.to_vec();
    sorted.sort_by(|a, b| {
        let ascending = compare_dates(a, b);
        match order {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    });
    sorted
}

fn compare_dates(a: &Workout, b: &Workout) -> Ordering {
    a.timestamp().cmp(&b.timestamp())
}

/// Filter chip labels: `"all"` followed by each distinct type in first-seen
/// order.
pub fn distinct_types(workouts: &[Workout]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut labels = vec!["all".to_string()];
    for w in workouts {
        if seen.insert(w.workout_type.clone()) {
            labels.push(w.workout_type.clone());
        }
    }
    labels
}
