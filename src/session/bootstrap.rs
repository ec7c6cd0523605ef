//! Bootstrap read of persisted session data.
//!
//! The read is expressed as a Stillwater effect over a [`StoreEnv`]. The
//! store is synchronous, so the reads run on a blocking thread. Any storage
//! failure is recovered here: the effect cannot fail, it only degrades to
//! "nothing persisted".

use crate::core::Token;
use crate::storage::TokenStore;
use std::convert::Infallible;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// What bootstrap found in the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Restored {
    pub token: Option<Token>,
    pub username: Option<String>,
}

/// Environment for storage effects: the store plus the keys in use.
pub struct StoreEnv<S> {
    pub store: Arc<S>,
    pub token_key: String,
    pub username_key: String,
}

impl<S> Clone for StoreEnv<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            token_key: self.token_key.clone(),
            username_key: self.username_key.clone(),
        }
    }
}

/// Read the token and username, treating unreadable keys as absent.
pub fn restore<S>() -> impl Effect<Output = Restored, Error = Infallible, Env = StoreEnv<S>>
where
    S: TokenStore + 'static,
{
    from_async(|env: &StoreEnv<S>| {
        let env = env.clone();
        async move {
            let restored = tokio::task::spawn_blocking(move || read_all(&env))
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!(%err, "restore task failed, treating as absent");
                    Restored::default()
                });
            Ok::<_, Infallible>(restored)
        }
    })
}

fn read_all<S: TokenStore>(env: &StoreEnv<S>) -> Restored {
    Restored {
        token: read_or_none(env.store.as_ref(), &env.token_key).map(Token::new),
        username: read_or_none(env.store.as_ref(), &env.username_key),
    }
}

fn read_or_none<S: TokenStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(err) => {
            tracing::warn!(key, %err, "restoring persisted value failed, treating as absent");
            None
        }
    }
}
