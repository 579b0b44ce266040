//! Auth HTTP transport.
//!
//! DESIGN
//! ======
//! `AuthApi` is the seam between the gateway and the network: one method per
//! backend endpoint, one request per call, no retries. `HttpAuthApi` is the
//! `reqwest` implementation. It keeps a cookie store so the session cookie
//! set by login/register rides along on later calls.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses, and undecodable bodies each map to a
//! distinct `AuthError` variant. Whether an error is surfaced or absorbed is
//! the gateway's decision, not this module's.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::StatusCode;

use super::types::{Identity, LoginRequest, RegisterRequest};
use crate::config::ClientConfig;

pub const ME_PATH: &str = "/auth/me";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGOUT_PATH: &str = "/auth/logout";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by auth transport operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("auth request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("auth request rejected: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not a valid identity.
    #[error("auth response parse failed: {0}")]
    Decode(String),
}

impl AuthError {
    /// True for 401/403 responses: the backend understood and refused.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Backend session endpoints.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `GET /auth/me`. `Ok(None)` means the backend explicitly reported no session.
    async fn me(&self) -> Result<Option<Identity>, AuthError>;

    /// `POST /auth/login`.
    async fn login(&self, request: LoginRequest) -> Result<Identity, AuthError>;

    /// `POST /auth/register`.
    async fn register(&self, request: RegisterRequest) -> Result<Identity, AuthError>;

    /// `POST /auth/logout`.
    async fn logout(&self) -> Result<(), AuthError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a cookie-aware client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest` client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    /// Read the body of a response, failing on non-2xx statuses.
    async fn success_body(response: reqwest::Response) -> Result<(StatusCode, String), AuthError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(AuthError::Status { status: status.as_u16(), body: text });
        }
        Ok((status, text))
    }

    async fn post_for_identity<B>(&self, path: &str, body: &B) -> Result<Identity, AuthError>
    where
        B: serde::Serialize + Sync,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        let (_, text) = Self::success_body(response).await?;
        parse_identity(&text)
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn me(&self) -> Result<Option<Identity>, AuthError> {
        let response = self
            .http
            .get(self.endpoint(ME_PATH))
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        let (status, text) = Self::success_body(response).await?;
        parse_optional_identity(status, &text)
    }

    async fn login(&self, request: LoginRequest) -> Result<Identity, AuthError> {
        self.post_for_identity(LOGIN_PATH, &request).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<Identity, AuthError> {
        self.post_for_identity(REGISTER_PATH, &request).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint(LOGOUT_PATH))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        Self::success_body(response).await?;
        Ok(())
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn parse_identity(body: &str) -> Result<Identity, AuthError> {
    serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))
}

/// 204 and blank bodies mean "no session"; anything else must be an identity.
fn parse_optional_identity(status: StatusCode, body: &str) -> Result<Option<Identity>, AuthError> {
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() || body.trim() == "null" {
        return Ok(None);
    }
    parse_identity(body).map(Some)
}
