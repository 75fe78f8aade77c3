//! reqwest implementation of [`GymApi`]
//!
//! Every call is one HTTP request. Transport failures and undecodable bodies
//! become [`FittrackError::Network`]; non-success statuses are classified by
//! [`classify_status`] and carry the server's `message` when it sent one.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::api::wire::{
    AddWorkoutRequest, AdminLoginResponse, ErrorBody, LoginResponse, MemberListResponse,
    MobileLoginRequest, RegisterResponse, SuccessFlag, UserLoginRequest, WorkoutListResponse,
};
use crate::api::{Ack, GymApi, NewMember, Registration};
use crate::config::{ApiConfig, LoginRoute, RegisterRoute};
use crate::error::{ClientResult, FittrackError};
use crate::models::{AdminSession, Member, Session, Workout};

/// Message shown when the backend cannot be reached
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// HTTP client for the gym backend.
///
/// # Examples
///
/// ```
/// use fittrack::api::HttpApiClient;
/// use fittrack::config::ApiConfig;
///
/// let config = ApiConfig {
///     base_url: "http://localhost:5000".to_string(),
///     ..ApiConfig::default()
/// };
/// let client = HttpApiClient::new(&config);
/// assert!(client.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    login_route: LoginRoute,
    register_route: RegisterRoute,
}

/// Response status and raw body of one request
struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    fn server_message(&self) -> Option<String> {
        ErrorBody::message_from(&self.body)
    }

    fn decode<T: DeserializeOwned>(&self, what: &str) -> ClientResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            tracing::warn!("Failed to decode {} response: {}", what, e);
            FittrackError::Network(format!("Unexpected response from server ({})", what))
        })
    }
}

impl HttpApiClient {
    /// Builds a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FittrackError::Config`] if the base URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            FittrackError::Config(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        let mut builder = Client::builder().user_agent(concat!("fittrack/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FittrackError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized API client: base_url={}", base_url);

        Ok(Self {
            client,
            base_url,
            login_route: config.login_route,
            register_route: config.register_route,
        })
    }

    /// The configured backend base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FittrackError::Config(format!("Base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn route(&self, path: &str) -> ClientResult<Url> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.endpoint(&segments)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ClientResult<RawResponse> {
        tracing::debug!("{} {}", method, url.path());

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url.path(), e);
            FittrackError::Network(NETWORK_ERROR_MESSAGE.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read response body from {}: {}", url.path(), e);
            FittrackError::Network(NETWORK_ERROR_MESSAGE.to_string())
        })?;

        if !status.is_success() {
            tracing::warn!("{} {} returned {}", method, url.path(), status);
        }

        Ok(RawResponse { status, body })
    }
}

/// Maps a non-success status to the error taxonomy.
///
/// `message` is the server-provided text, used verbatim when present;
/// `fallback` is used otherwise.
pub fn classify_status(status: StatusCode, message: Option<String>, fallback: &str) -> FittrackError {
    let message = message.unwrap_or_else(|| fallback.to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FittrackError::Authentication(message),
        StatusCode::NOT_FOUND => FittrackError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            FittrackError::Validation(message)
        }
        other => FittrackError::Server {
            status: other.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl GymApi for HttpApiClient {
    async fn login(&self, phone: &str, password: &str) -> ClientResult<Session> {
        let url = self.route(self.login_route.path())?;
        let raw = match self.login_route {
            LoginRoute::User => {
                self.send(Method::POST, url, Some(&UserLoginRequest { phone, password }))
                    .await?
            }
            LoginRoute::Legacy => {
                let body = MobileLoginRequest {
                    mobile: phone,
                    password,
                };
                self.send(Method::POST, url, Some(&body)).await?
            }
        };

        if !raw.status.is_success() {
            let message = raw.server_message();
            // Backends answer unknown phones and wrong passwords with 400/404.
            return Err(match raw.status {
                StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => FittrackError::Authentication(
                    message.unwrap_or_else(|| "Login failed".to_string()),
                ),
                status => classify_status(status, message, "Login failed"),
            });
        }

        match raw.decode::<LoginResponse>("login")? {
            LoginResponse::User { user } => {
                tracing::info!("Login succeeded for {}", user.phone);
                Ok(user)
            }
            LoginResponse::Flag { success, .. } if success.is_true() => {
                tracing::info!("Login succeeded for {} (no user record returned)", phone);
                Ok(Session::from_phone(phone))
            }
            LoginResponse::Flag { message, .. } | LoginResponse::Message { message } => {
                Err(FittrackError::Authentication(
                    message.unwrap_or_else(|| "Login failed".to_string()),
                ))
            }
        }
    }

    async fn admin_login(&self, mobile: &str, password: &str) -> ClientResult<AdminSession> {
        let url = self.route("/api/adminlogin")?;
        let raw = self
            .send(Method::POST, url, Some(&MobileLoginRequest { mobile, password }))
            .await?;

        if !raw.status.is_success() {
            let message = raw.server_message();
            return Err(match raw.status {
                StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => FittrackError::Authentication(
                    message.unwrap_or_else(|| "Invalid credentials.".to_string()),
                ),
                status => classify_status(status, message, "Invalid credentials."),
            });
        }

        let response: AdminLoginResponse = raw.decode("admin login")?;
        if !response.success.as_ref().is_some_and(SuccessFlag::is_true) {
            return Err(FittrackError::Authentication(
                response
                    .message
                    .unwrap_or_else(|| "Invalid credentials.".to_string()),
            ));
        }
        Ok(AdminSession(response.data.unwrap_or(serde_json::Value::Null)))
    }

    async fn register(&self, registration: &Registration) -> ClientResult<Session> {
        let url = self.route(self.register_route.path())?;
        let raw = self.send(Method::POST, url, Some(registration)).await?;

        if !raw.status.is_success() {
            return Err(classify_status(
                raw.status,
                raw.server_message(),
                "Registration failed",
            ));
        }

        let response: RegisterResponse = raw.decode("registration")?;
        response.user.ok_or_else(|| FittrackError::Server {
            status: raw.status.as_u16(),
            message: response
                .message
                .unwrap_or_else(|| "Registration response did not include a user".to_string()),
        })
    }

    async fn add_member(&self, member: &NewMember) -> ClientResult<Member> {
        let url = self.route(self.register_route.path())?;
        let raw = self.send(Method::POST, url, Some(member)).await?;

        if !raw.status.is_success() {
            return Err(classify_status(
                raw.status,
                raw.server_message(),
                "Failed to add member",
            ));
        }

        let created = if raw.body.trim().is_empty() {
            None
        } else {
            raw.decode::<RegisterResponse>("add member")?.user
        };
        let created = created.unwrap_or_default();
        let pick = |returned: String, sent: &str| {
            if returned.trim().is_empty() {
                sent.to_string()
            } else {
                returned
            }
        };

        Ok(Member {
            id: created.subject_id.unwrap_or_default(),
            name: pick(created.name, &member.name),
            phone: pick(created.phone, &member.phone),
            membership_type: pick(
                created.membership_type.unwrap_or_default(),
                &member.membership_type,
            ),
            created_at: Some(member.join_date.clone()),
            ..Member::default()
        })
    }

    async fn list_members(&self) -> ClientResult<Vec<Member>> {
        let url = self.route("/api/getAllUsers")?;
        let raw = self.send::<()>(Method::GET, url, None).await?;
        if !raw.status.is_success() {
            return Err(classify_status(
                raw.status,
                raw.server_message(),
                "Failed to load members",
            ));
        }
        Ok(raw.decode::<MemberListResponse>("member list")?.into_members())
    }

    async fn delete_member(&self, id: &str) -> ClientResult<Ack> {
        let url = self.endpoint(&["api", "deluser", id])?;
        let raw = self.send::<()>(Method::DELETE, url, None).await?;
        if !raw.status.is_success() {
            return Err(classify_status(
                raw.status,
                raw.server_message(),
                "Failed to delete member",
            ));
        }
        // Some deployments answer 204 with no body.
        if raw.body.trim().is_empty() {
            return Ok(Ack::default());
        }
        raw.decode("delete member")
    }

    async fn add_workout(&self, member_phone: &str, workout: &Workout) -> ClientResult<Ack> {
        let url = self.route("/api/addworkout")?;
        let body = AddWorkoutRequest {
            phone: member_phone,
            workout,
        };
        let raw = self.send(Method::POST, url, Some(&body)).await?;
        if !raw.status.is_success() {
            return Err(classify_status(
                raw.status,
                raw.server_message(),
                "Failed to add workout",
            ));
        }
        if raw.body.trim().is_empty() {
            return Ok(Ack::default());
        }
        raw.decode("add workout")
    }

    async fn list_workouts(&self, member_phone: &str) -> ClientResult<Vec<Workout>> {
        let url = self.endpoint(&["api", "getworkouts", member_phone])?;
        let raw = self.send::<()>(Method::GET, url, None).await?;
        if !raw.status.is_success() {
            return Err(classify_status(
                raw.status,
                raw.server_message(),
                "Failed to load workouts",
            ));
        }
        Ok(raw
            .decode::<WorkoutListResponse>("workout list")?
            .workouts
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(&ApiConfig {
            base_url: base.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let c = client("http://localhost:5000");
        let url = c.endpoint(&["api", "getworkouts", "+91 999"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/getworkouts/+91%20999");
    }

    #[test]
    fn test_endpoint_respects_base_path() {
        let c = client("http://example.com/gym/");
        let url = c.route("/api/getAllUsers").unwrap();
        assert_eq!(url.as_str(), "http://example.com/gym/api/getAllUsers");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = HttpApiClient::new(&ApiConfig {
            base_url: "::nope".to_string(),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(FittrackError::Config(_))));
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, None, "x"),
            FittrackError::Authentication(ref m) if m == "x"
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, Some("gone".into()), "x"),
            FittrackError::NotFound(ref m) if m == "gone"
        ));
        assert!(matches!(
            classify_status(StatusCode::UNPROCESSABLE_ENTITY, None, "x"),
            FittrackError::Validation(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, None, "x"),
            FittrackError::Server { status: 500, .. }
        ));
    }
}
