//! HTTP client for `/api/login` and `/api/signout`.
//!
//! Thin reqwest wrapper. Response parsing is a pure function so it can be
//! tested without a server.

use super::{AuthApi, AuthError};
use crate::core::Token;
use crate::credentials::Credentials;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::time::{Duration, Instant};

const LOGIN_PATH: &str = "/api/login";
const SIGNOUT_PATH: &str = "/api/signout";
const CONNECT_TIMEOUT_SECS: u64 = 10;
const JSON: &str = "application/json";

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl HttpAuthClient {
    /// Build a client for `base_url` (scheme, host and port, no trailing path).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(request_timeout))
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body; returns the response text on a success status.
    async fn post_json<B>(&self, path: &str, body: &B) -> Result<String, AuthError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        let started = Instant::now();
        tracing::debug!(%url, "auth request");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.request_error(e))?;
        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "auth response"
        );

        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    fn request_error(&self, err: reqwest::Error) -> AuthError {
        if err.is_timeout() {
            AuthError::Timeout(self.request_timeout)
        } else {
            AuthError::Request(err.to_string())
        }
    }
}

impl AuthApi for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<Token, AuthError> {
        let text = self.post_json(LOGIN_PATH, credentials).await?;
        parse_login_response(&text)
    }

    async fn signout(&self, username: &str) -> Result<(), AuthError> {
        self.post_json(SIGNOUT_PATH, &SignoutRequest { username })
            .await
            .map(|_| ())
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct SignoutRequest<'a> {
    username: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the token from a login response body.
///
/// The token is the top-level `id` field. Strings are taken verbatim and
/// numbers are rendered in decimal; anything else is malformed.
pub fn parse_login_response(json: &str) -> Result<Token, AuthError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    match value.get("id") {
        Some(serde_json::Value::String(id)) if !id.is_empty() => Ok(Token::new(id.clone())),
        Some(serde_json::Value::Number(id)) => Ok(Token::new(id.to_string())),
        Some(serde_json::Value::String(_)) => {
            Err(AuthError::MalformedResponse("empty `id` field".to_string()))
        }
        Some(other) => Err(AuthError::MalformedResponse(format!(
            "unexpected `id` value: {other}"
        ))),
        None => Err(AuthError::MalformedResponse("missing `id` field".to_string())),
    }
}
