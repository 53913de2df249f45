//! mailgen - disposable mail account generator and inbox watcher.
//!
//! Generates a batch of accounts (size from the first argument, default 1)
//! and writes them to a dated `accounts_*.txt` file. When
//! `MAILGEN_LOGIN_ADDRESS` and `MAILGEN_LOGIN_PASSWORD` are set, it then
//! logs in to that account and polls the inbox until a message arrives,
//! reporting the verification code from its subject. Ctrl+C stops the
//! active job cooperatively.

use std::env;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mailgen::{Config, HttpMailApi, Session, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    tracing::info!("mailgen_starting");

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        base_url = %config.base_url,
        poll_interval_secs = config.poll_interval_secs,
        account_pacing_secs = config.account_pacing_secs,
        "config_loaded"
    );

    let count: u32 = env::args()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    let api = Arc::new(HttpMailApi::new(&config)?);
    let sink = Arc::new(TracingSink);
    let session = Arc::new(Session::new(api, config, sink));

    // Ctrl+C requests a cooperative stop of whatever job is active
    {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                tracing::info!("sigint_received");
                session.stop_batch().await;
            }
        });
    }

    session.start_batch(count).await;
    session.join().await;

    if let (Ok(address), Ok(password)) = (
        env::var("MAILGEN_LOGIN_ADDRESS"),
        env::var("MAILGEN_LOGIN_PASSWORD"),
    ) {
        session.start_login(address, password).await;
        session.join().await;

        if let Some(code) = session.last_code() {
            tracing::info!(code = %code, "verification_code");
        }
    }

    tracing::info!("mailgen_done");
    Ok(())
}
