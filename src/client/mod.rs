//! Remote authentication endpoint.
//!
//! `AuthApi` is the capability the session needs from the server. The HTTP
//! implementation lives in [`http`]; tests substitute their own.

pub mod http;

pub use http::HttpAuthClient;

use crate::core::Token;
use crate::credentials::Credentials;
use std::future::Future;
use thiserror::Error;

/// Errors from a remote authentication call.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request never produced a response (connect, TLS, body read).
    #[error("auth request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("auth server returned status {status}")]
    Status { status: u16, body: String },

    /// The response body lacked a usable `id`.
    #[error("malformed auth response: {0}")]
    MalformedResponse(String),

    /// The call did not finish within the configured request timeout.
    #[error("auth request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Server-side authentication operations.
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token.
    fn login(&self, credentials: &Credentials)
        -> impl Future<Output = Result<Token, AuthError>> + Send;

    /// End the server-side session for `username`. The response body is ignored.
    fn signout(&self, username: &str) -> impl Future<Output = Result<(), AuthError>> + Send;
}
