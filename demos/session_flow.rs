//! Session Flow
//!
//! This example walks a session through boot, sign-in, a rejected repeat
//! sign-in, and sign-out, without a server or a file on disk.
//!
//! Key concepts:
//! - `AuthApi` as the seam for the remote side
//! - `MemoryStore` standing in for persistent storage
//! - One event per successful call, nothing on failure
//!
//! Run with: cargo run --example session_flow

use authflow::core::State;
use authflow::{
    AuthApi, AuthConfig, AuthError, AuthSession, Credentials, MemoryStore, Presentation, Token,
    TokenStore,
};
use std::sync::Arc;

// Accepts one password and hands out a fixed session id
struct InMemoryServer {
    password: &'static str,
}

impl AuthApi for InMemoryServer {
    async fn login(&self, credentials: &Credentials) -> Result<Token, AuthError> {
        if credentials.password == self.password {
            Ok(Token::new(format!("sess-{}", credentials.username)))
        } else {
            Err(AuthError::Status {
                status: 401,
                body: "bad credentials".to_string(),
            })
        }
    }

    async fn signout(&self, username: &str) -> Result<(), AuthError> {
        println!("  server: signed out {username}");
        Ok(())
    }
}

fn show(step: &str, presentation: &Presentation) {
    println!(
        "{step:<24} screen={:<8} animation={:<5} session={}",
        presentation.screen.name(),
        presentation.animation.name(),
        presentation.session_id.as_deref().unwrap_or("-")
    );
}

#[tokio::main]
async fn main() {
    println!("=== Session Flow Example ===\n");

    let store = Arc::new(MemoryStore::new());
    let server = InMemoryServer { password: "hunter2" };
    let mut session = AuthSession::new(server, Arc::clone(&store), AuthConfig::default());
    show("start", &session.presentation());

    if let Err(e) = session.bootstrap().await {
        println!("bootstrap failed: {e}");
        return;
    }
    show("after bootstrap", &session.presentation());

    match session.sign_in(Credentials::new("ada", "wrong")).await {
        Ok(_) => println!("unexpected sign-in"),
        Err(e) => println!("wrong password rejected: {e}"),
    }
    show("after failed sign-in", &session.presentation());

    if let Err(e) = session.sign_in(Credentials::new("ada", "hunter2")).await {
        println!("sign-in failed: {e}");
        return;
    }
    show("after sign-in", &session.presentation());
    println!(
        "  stored token present: {}",
        matches!(store.get("userToken"), Ok(Some(_)))
    );

    if let Err(e) = session.sign_in(Credentials::new("ada", "hunter2")).await {
        println!("repeat sign-in rejected: {e}");
    }

    if let Err(e) = session.sign_out().await {
        println!("sign-out failed: {e}");
        return;
    }
    show("after sign-out", &session.presentation());

    let path: Vec<&str> = session
        .machine()
        .history()
        .path()
        .into_iter()
        .map(|phase| phase.name())
        .collect();
    println!("\nPhases visited: {}", path.join(" -> "));

    println!("\n=== Example Complete ===");
}
