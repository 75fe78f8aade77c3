//! Request and response bodies for the gym backend
//!
//! The backend grew several response conventions over time. The decoders
//! here accept every shape that has been observed rather than picking one:
//! `success` arrives as either a boolean or the string `"true"`, and login
//! answers either `{user}` or `{success, message}`.

use serde::{Deserialize, Serialize};

use crate::models::{Member, Session, Workout};

/// `POST /api/loginuser`
#[derive(Serialize)]
pub struct UserLoginRequest<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

/// `POST /api/login` and `POST /api/adminlogin`
#[derive(Serialize)]
pub struct MobileLoginRequest<'a> {
    pub mobile: &'a str,
    pub password: &'a str,
}

/// `POST /api/addworkout`
#[derive(Serialize)]
pub struct AddWorkoutRequest<'a> {
    pub phone: &'a str,
    pub workout: &'a Workout,
}

/// A success flag sent as `true` or as `"true"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    Bool(bool),
    Text(String),
}

impl SuccessFlag {
    pub fn is_true(&self) -> bool {
        match self {
            SuccessFlag::Bool(b) => *b,
            SuccessFlag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Any login response body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    /// `{user: {...}}`, optionally with other fields
    User { user: Session },
    /// `{success, message}` with no user record
    Flag {
        success: SuccessFlag,
        #[serde(default)]
        message: Option<String>,
    },
    /// Any other object, such as a bare `{message}`; never a success
    Message {
        #[serde(default)]
        message: Option<String>,
    },
}

/// `POST /api/adminlogin` response. A missing `success` is a failure.
#[derive(Debug, Deserialize)]
pub struct AdminLoginResponse {
    #[serde(default)]
    pub success: Option<SuccessFlag>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/createmember` response, also used when an admin adds a member
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub user: Option<Session>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/getAllUsers` response: a bare array or a wrapped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MemberListResponse {
    Bare(Vec<Member>),
    Wrapped {
        #[serde(alias = "members", alias = "data")]
        users: Vec<Member>,
    },
}

impl MemberListResponse {
    pub fn into_members(self) -> Vec<Member> {
        match self {
            MemberListResponse::Bare(members) => members,
            MemberListResponse::Wrapped { users } => users,
        }
    }
}

/// `GET /api/getworkouts/{phone}` response; a missing list means none.
#[derive(Debug, Deserialize)]
pub struct WorkoutListResponse {
    #[serde(default)]
    pub workouts: Option<Vec<Workout>>,
}

/// Error body. The backend uses `message`; some middleware uses `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extracts a non-blank message from a raw response body.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}
