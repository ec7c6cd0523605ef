//! Sign-in credentials and their validation.
//!
//! Validation uses Stillwater's `Validation` so a form with both fields
//! blank reports both problems at once instead of one per attempt.

use serde::Serialize;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem with submitted credentials
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("password must not be empty")]
    EmptyPassword,
}

/// Every problem found in one submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid credentials: {}", join(.0))]
pub struct InvalidCredentials(pub Vec<CredentialError>);

fn join(errors: &[CredentialError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Username and password as typed on the sign-in screen.
///
/// Serializes to the `{username, password}` login body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check every rule, accumulating all violations.
    pub fn check(&self) -> Validation<(), NonEmptyVec<CredentialError>> {
        let checks = vec![
            require(!self.username.trim().is_empty(), CredentialError::EmptyUsername),
            require(!self.password.trim().is_empty(), CredentialError::EmptyPassword),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// `check` flattened into a `Result` for `?` call sites.
    pub fn validate(&self) -> Result<(), InvalidCredentials> {
        match self.check() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => {
                Err(InvalidCredentials(errors.iter().cloned().collect()))
            }
        }
    }
}

fn require(ok: bool, error: CredentialError) -> Validation<(), NonEmptyVec<CredentialError>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
