//! The signed-in user's profile
//!
//! A [`Session`] is created from a login or registration response, overwritten
//! by a profile edit and deleted on logout. Only the secure session store
//! persists it.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Locally persisted identity and profile of the signed-in member.
///
/// Deserialization accepts the backend's field names (`_id`, `goal`,
/// `mobile`) as aliases; serialization always writes the canonical
/// camelCase names.
///
/// # Examples
///
/// ```
/// use fittrack::models::Session;
///
/// let json = r#"{"_id":"u1","name":"Ann","phone":"5550001","goal":"Endurance","height":"170"}"#;
/// let session: Session = serde_json::from_str(json).unwrap();
/// assert_eq!(session.subject_id.as_deref(), Some("u1"));
/// assert_eq!(session.fitness_goal.as_deref(), Some("Endurance"));
/// assert_eq!(session.height, Some(170.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Backend identifier of the member, when the backend returned one
    #[serde(
        default,
        alias = "_id",
        alias = "id",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject_id: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Phone number; also the key for workout endpoints
    #[serde(default, alias = "mobile")]
    pub phone: String,

    /// Height in centimetres
    #[serde(
        default,
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[serde(
        default,
        deserialize_with = "lenient::optional_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, alias = "goal", skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,

    #[serde(
        default,
        alias = "membership",
        skip_serializing_if = "Option::is_none"
    )]
    pub membership_type: Option<String>,
}

impl Session {
    /// Session carrying only a phone number.
    ///
    /// The legacy login endpoint answers `{success, message}` without a user
    /// record, in which case the phone used to log in is all that is known.
    pub fn from_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Name to greet the user with; falls back to the phone number.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.phone
        } else {
            &self.name
        }
    }

    /// Body mass index from height (cm) and weight (kg), when both are known.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(h), Some(w)) if h > 0.0 => {
                let metres = h / 100.0;
                Some(w / (metres * metres))
            }
            _ => None,
        }
    }
}

/// Opaque admin record returned by `/api/adminlogin`.
///
/// The admin dashboard only needs to know that an admin is signed in, so the
/// payload is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminSession(pub serde_json::Value);

impl AdminSession {
    /// Admin mobile number, if present in the payload
    pub fn mobile(&self) -> Option<&str> {
        self.0
            .get("mobile")
            .or_else(|| self.0.get("phone"))
            .and_then(|v| v.as_str())
    }
}
