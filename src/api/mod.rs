//! REST client for the gym backend
//!
//! [`GymApi`] is the seam between view models and the network. Every
//! operation is a single request/response pair: no retries, no backoff and
//! no idempotency keys. Failures carry the server's message verbatim when
//! the backend sent one.
//!
//! - [`http`] -- the reqwest-based implementation
//! - [`wire`] -- request and response bodies as the backend spells them

pub mod http;
pub mod wire;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ClientResult, FittrackError};
use crate::models::{AdminSession, Member, Session, Workout};

pub use http::HttpApiClient;

/// Fitness goals offered on the registration form
pub const FITNESS_GOALS: [&str; 5] = [
    "Weight Loss",
    "Muscle Gain",
    "Endurance",
    "Flexibility",
    "Overall Fitness",
];

/// Acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Registration payload, serialized exactly as the backend expects it.
#[derive(Clone, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub phone: String,
    pub height: f64,
    pub weight: f64,
    pub password: String,
    pub goal: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("height", &self.height)
            .field("weight", &self.weight)
            .field("password", &"<redacted>")
            .field("goal", &self.goal)
            .finish()
    }
}

/// Raw registration form input, before numeric parsing.
#[derive(Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub height: String,
    pub weight: String,
    pub goal: String,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("height", &self.height)
            .field("weight", &self.weight)
            .field("goal", &self.goal)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Checks the form and converts it into a [`Registration`].
    ///
    /// # Errors
    ///
    /// Returns [`FittrackError::Validation`] when any field is blank or when
    /// height or weight is not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use fittrack::api::RegistrationForm;
    ///
    /// let form = RegistrationForm {
    ///     name: "Ann".into(),
    ///     phone: "5550001".into(),
    ///     password: "pw".into(),
    ///     height: "170".into(),
    ///     weight: "tall".into(),
    ///     goal: "Endurance".into(),
    /// };
    /// assert!(form.validate().is_err());
    /// ```
    pub fn validate(&self) -> ClientResult<Registration> {
        let fields = [
            &self.name,
            &self.phone,
            &self.password,
            &self.height,
            &self.weight,
            &self.goal,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(FittrackError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        let numeric = |s: &str| s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        let (Some(height), Some(weight)) = (numeric(&self.height), numeric(&self.weight)) else {
            return Err(FittrackError::Validation(
                "Height and Weight must be numeric values".to_string(),
            ));
        };

        Ok(Registration {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            height,
            weight,
            password: self.password.clone(),
            goal: self.goal.trim().to_string(),
        })
    }
}

/// Member created from the admin dashboard, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub phone: String,
    pub membership_type: String,
    pub join_date: String,
}

/// Admin "add member" form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberForm {
    pub name: String,
    pub contact: String,
    /// Tier name; blank means "Basic"
    pub membership_type: String,
}

impl MemberForm {
    /// Checks the form and stamps it with `join_date`.
    ///
    /// # Errors
    ///
    /// Returns [`FittrackError::Validation`] when the name or contact is blank.
    pub fn validate(&self, join_date: &str) -> ClientResult<NewMember> {
        if self.name.trim().is_empty() || self.contact.trim().is_empty() {
            return Err(FittrackError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        let membership_type = match self.membership_type.trim() {
            "" => "Basic",
            tier => tier,
        };
        Ok(NewMember {
            name: self.name.trim().to_string(),
            phone: self.contact.trim().to_string(),
            membership_type: membership_type.to_string(),
            join_date: join_date.to_string(),
        })
    }
}

/// Operations the screens need from the gym backend.
///
/// Implementations must not retry. A failed call must leave no trace in
/// caller state; view models rely on that to keep collections unchanged.
#[async_trait]
pub trait GymApi: Send + Sync {
    /// Signs a member in.
    ///
    /// Fails with [`FittrackError::Authentication`] on bad credentials or
    /// [`FittrackError::Network`] when the backend cannot be reached.
    async fn login(&self, phone: &str, password: &str) -> ClientResult<Session>;

    /// Signs an admin in and returns the opaque admin record.
    async fn admin_login(&self, mobile: &str, password: &str) -> ClientResult<AdminSession>;

    /// Creates a member account and returns its session.
    async fn register(&self, registration: &Registration) -> ClientResult<Session>;

    /// Creates a member from the admin dashboard.
    ///
    /// The returned record's `id` is empty when the backend did not send one.
    async fn add_member(&self, member: &NewMember) -> ClientResult<Member>;

    /// Fetches every member, in backend order.
    async fn list_members(&self) -> ClientResult<Vec<Member>>;

    /// Deletes the member with `id`.
    ///
    /// Fails with [`FittrackError::NotFound`] when the member is gone.
    async fn delete_member(&self, id: &str) -> ClientResult<Ack>;

    /// Logs `workout` against the member identified by `member_phone`.
    async fn add_workout(&self, member_phone: &str, workout: &Workout) -> ClientResult<Ack>;

    /// Fetches the workouts logged by `member_phone`, in backend order.
    async fn list_workouts(&self, member_phone: &str) -> ClientResult<Vec<Workout>>;
}
