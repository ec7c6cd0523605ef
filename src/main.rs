//! `authflow`: drive a session from the terminal.
//!
//! Each invocation bootstraps from the store, runs one action, and prints
//! the screen the presentation layer would show next.

use anyhow::{Context, Result};
use authflow::{AuthConfig, AuthSession, Credentials, Presentation, State};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// How long shutdown waits for a store read still blocked after bootstrap
/// gave up on it.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "authflow")]
#[command(version)]
#[command(about = "Sign in, sign out and inspect the persisted session")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Auth server base URL (overrides AUTHFLOW_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Session store file (overrides AUTHFLOW_STORE_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Restore the session and show the active screen
    Status,
    /// Sign in against the auth server
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out of the current session
    Logout,
    /// Create a local session without contacting the server
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = start(Cli::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn start(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(run(cli));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AuthConfig::from_env().context("Failed to read configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let mut session =
        AuthSession::from_config(config).context("Failed to initialize session")?;
    session.bootstrap().await.context("Bootstrap failed")?;

    match cli.command {
        Command::Status => {}
        Command::Login { username, password } => {
            session
                .sign_in(Credentials::new(username, password))
                .await
                .context("Sign-in failed")?;
        }
        Command::Logout => {
            session.sign_out().await.context("Sign-out failed")?;
        }
        Command::Signup { username, password } => {
            session
                .sign_up(Credentials::new(username, password))
                .context("Sign-up failed")?;
        }
    }

    print_presentation(
        &session.presentation(),
        session.state().is_authenticated(),
        session.username(),
    );
    Ok(())
}

fn print_presentation(presentation: &Presentation, signed_in: bool, username: Option<&str>) {
    println!("screen: {}", presentation.screen.name());
    println!("signed in: {signed_in}");
    println!("animation: {}", presentation.animation.name());
    if let Some(id) = &presentation.session_id {
        println!("session id: {id}");
    }
    if let Some(username) = username {
        println!("user: {username}");
    }
}
