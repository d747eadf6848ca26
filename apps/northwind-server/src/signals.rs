//! Process signals that stop the HTTP server.

use std::fmt;

use anyhow::{Context, Result};
use tokio::signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        })
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where the platform has it.
pub async fn next_stop_signal() -> Result<StopReason> {
    tokio::select! {
        res = signal::ctrl_c() => {
            res.context("cannot listen for Ctrl+C")?;
            Ok(StopReason::Interrupt)
        }
        res = terminate() => res,
    }
}

#[cfg(unix)]
async fn terminate() -> Result<StopReason> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("cannot install SIGTERM handler")?
        .recv()
        .await;
    Ok(StopReason::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<StopReason> {
    std::future::pending().await
}

/// Future for `axum::serve(..).with_graceful_shutdown`.
///
/// If the signal listeners cannot be installed the server keeps running; it is
/// never stopped because of a listener failure.
pub async fn shutdown_signal() {
    match next_stop_signal().await {
        Ok(reason) => tracing::info!(%reason, "Stop signal received, draining connections"),
        Err(e) => {
            tracing::error!(error = %e, "Signal listener failed; the server must be killed to stop");
            std::future::pending::<()>().await;
        }
    }
}
