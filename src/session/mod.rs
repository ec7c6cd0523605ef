//! The imperative shell around [`SessionMachine`].
//!
//! `AuthSession` owns the machine and performs the side effects the pure
//! reducer leaves out: reading the store at bootstrap, calling the auth
//! server, and writing or clearing the persisted token. Each method
//! suspends at most once on I/O and then dispatches at most one event.
//! A failed call dispatches nothing.

pub mod bootstrap;

pub use bootstrap::{Restored, StoreEnv};

use crate::client::{AuthApi, AuthError, HttpAuthClient};
use crate::config::AuthConfig;
use crate::core::{EventKind, Presentation, SessionEvent, SessionState, Token};
use crate::credentials::{Credentials, InvalidCredentials};
use crate::machine::{Applied, SessionMachine, TransitionError};
use crate::storage::{FileStore, TokenStore};
use std::future::Future;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::with_timeout;
use stillwater::TimeoutError;
use thiserror::Error;

/// Errors surfaced to the presentation layer. None of them change state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Credentials(#[from] InvalidCredentials),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("no username known for sign-out; set a fallback username")]
    UnknownUser,
}

/// Session context handed to the screens.
pub struct AuthSession<A, S> {
    machine: SessionMachine,
    api: A,
    env: StoreEnv<S>,
    config: AuthConfig,
    username: Option<String>,
}

impl AuthSession<HttpAuthClient, FileStore> {
    /// HTTP client and file store as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: AuthConfig) -> Result<Self, SessionError> {
        let api = HttpAuthClient::new(config.base_url.clone(), config.request_timeout)?;
        let store = Arc::new(FileStore::new(config.store_path.clone()));
        tracing::debug!(
            base_url = api.base_url(),
            store = %store.path().display(),
            "session configured"
        );
        Ok(Self::new(api, store, config))
    }
}

impl<A, S> AuthSession<A, S>
where
    A: AuthApi,
    S: TokenStore + 'static,
{
    pub fn new(api: A, store: Arc<S>, config: AuthConfig) -> Self {
        let env = StoreEnv {
            store,
            token_key: config.token_key.clone(),
            username_key: config.username_key.clone(),
        };
        Self {
            machine: SessionMachine::new(),
            api,
            env,
            config,
            username: None,
        }
    }

    pub fn machine(&self) -> &SessionMachine {
        &self.machine
    }

    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    /// Screen, animation hint and session id for the current state.
    pub fn presentation(&self) -> Presentation {
        self.machine.presentation()
    }

    /// Username recorded at sign-in or restored at bootstrap.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Restore the persisted token and leave the Splash screen.
    ///
    /// Never fails on storage problems or a storage timeout: both restore
    /// nothing. Fails only if the session has already bootstrapped.
    pub async fn bootstrap(&mut self) -> Result<Applied, SessionError> {
        self.machine.ensure_accepts(EventKind::RestoreToken)?;

        let restored = self.read_persisted().await;
        self.username = restored.token.as_ref().and(restored.username);
        tracing::info!(
            token_found = restored.token.is_some(),
            "bootstrap finished"
        );

        Ok(self
            .machine
            .dispatch(SessionEvent::RestoreToken(restored.token))?)
    }

    /// Run the restore effect under `storage_timeout`. A read still blocked
    /// at expiry keeps its thread but is no longer awaited.
    async fn read_persisted(&self) -> Restored {
        let read = with_timeout(bootstrap::restore::<S>(), self.config.storage_timeout);

        match read.run(&self.env).await {
            Ok(restored) => restored,
            Err(TimeoutError::Inner(never)) => match never {},
            Err(TimeoutError::Timeout { duration }) => {
                tracing::warn!(
                    timeout_ms = duration.as_millis() as u64,
                    "restore timed out, treating as absent"
                );
                Restored::default()
            }
        }
    }

    /// Authenticate against the server and move to Home.
    pub async fn sign_in(&mut self, credentials: Credentials) -> Result<Applied, SessionError> {
        self.machine.ensure_accepts(EventKind::SignIn)?;
        credentials.validate()?;

        let token = self
            .remote(self.api.login(&credentials))
            .await
            .inspect_err(|err| {
                tracing::warn!(username = %credentials.username, %err, "sign-in failed");
            })?;

        tracing::info!(username = %credentials.username, "signed in");
        self.remember(&token, credentials.username);
        Ok(self.machine.dispatch(SessionEvent::SignIn(token))?)
    }

    /// Create a local account token without contacting the server.
    pub fn sign_up(&mut self, credentials: Credentials) -> Result<Applied, SessionError> {
        self.machine.ensure_accepts(EventKind::SignIn)?;
        credentials.validate()?;

        let token = Token::new(format!("local-{}", uuid::Uuid::new_v4()));
        tracing::info!(username = %credentials.username, "signed up with local token");
        self.remember(&token, credentials.username);
        Ok(self.machine.dispatch(SessionEvent::SignIn(token))?)
    }

    /// End the server-side session and return to the SignIn screen.
    ///
    /// The username sent is the one remembered at sign-in, else
    /// `fallback_username`. A token restored without a stored username and
    /// no fallback configured fails with [`SessionError::UnknownUser`] and
    /// stays on Home until a fallback is set or the store is cleared.
    pub async fn sign_out(&mut self) -> Result<Applied, SessionError> {
        self.machine.ensure_accepts(EventKind::SignOut)?;

        let username = self
            .username
            .clone()
            .or_else(|| self.config.fallback_username.clone())
            .ok_or(SessionError::UnknownUser)?;

        self.remote(self.api.signout(&username))
            .await
            .inspect_err(|err| tracing::warn!(%username, %err, "sign-out failed"))?;

        tracing::info!(%username, "signed out");
        self.forget();
        Ok(self.machine.dispatch(SessionEvent::SignOut)?)
    }

    async fn remote<T>(
        &self,
        call: impl Future<Output = Result<T, AuthError>>,
    ) -> Result<T, AuthError> {
        let timeout = self.config.request_timeout;
        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| AuthError::Timeout(timeout))?
    }

    /// Persist after a successful sign-in. Write failures are logged only:
    /// the server already accepted the user.
    fn remember(&mut self, token: &Token, username: String) {
        let store = &self.env.store;
        if let Err(err) = store.set(&self.env.token_key, token.expose()) {
            tracing::warn!(%err, "persisting token failed");
        }
        if let Err(err) = store.set(&self.env.username_key, &username) {
            tracing::warn!(%err, "persisting username failed");
        }
        self.username = Some(username);
    }

    fn forget(&mut self) {
        let store = &self.env.store;
        for key in [&self.env.token_key, &self.env.username_key] {
            if let Err(err) = store.delete(key) {
                tracing::warn!(key = %key, %err, "clearing persisted value failed");
            }
        }
        self.username = None;
    }
}
