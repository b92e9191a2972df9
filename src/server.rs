//! Process lifecycle: startup, serving, signal-triggered drain and shutdown.
//!
//! ```text
//! Starting ──> Serving ──(SIGINT/SIGTERM)──> Draining ──> Stopped
//! ```
//!
//! - **Starting** opens storage, builds the router and binds the listener.
//! - **Serving** runs the accept loop on a dedicated runtime ("http-worker"
//!   threads) while the main control flow blocks on the shutdown signal only.
//! - **Draining** stops accepting connections and gives in-flight requests up
//!   to the drain timeout. When it elapses the worker runtime is torn down,
//!   which drops every remaining connection.
//! - **Stopped** closes storage. Drain timeouts and close failures are logged
//!   and reported, never fatal.

use std::fmt;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::services::{AuthService, RandomAliasGenerator};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::idle_timeout::IdleTimeoutListener;
use crate::infrastructure::persistence::SqliteUrlRepository;
use crate::routes::{App, app_router};
use crate::shutdown::ShutdownSignal;
use crate::state::AppState;

/// Lifecycle states, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Serving,
    Draining,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Serving => "serving",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        })
    }
}

/// Non-fatal failures while draining.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("in-flight requests did not finish within {0:?}, remaining connections aborted")]
    Timeout(Duration),

    #[error("HTTP worker failed: {0}")]
    Worker(String),
}

/// Outcome of a completed lifecycle.
#[derive(Debug)]
pub struct ShutdownReport {
    pub drain: Result<(), ShutdownError>,
    pub storage: Result<(), AppError>,
}

impl ShutdownReport {
    /// True when draining finished in time and storage closed cleanly.
    pub fn is_clean(&self) -> bool {
        self.drain.is_ok() && self.storage.is_ok()
    }
}

/// Runs the service with the given configuration until a termination signal.
///
/// # Errors
///
/// Returns an error if startup fails: storage cannot be opened or migrated,
/// the credential key cannot be generated, or the listener cannot bind.
/// Failures after startup are reported in [`ShutdownReport`].
pub async fn run(config: Config) -> Result<ShutdownReport> {
    tracing::info!(state = %LifecycleState::Starting, "starting url-alias");

    // Handlers must be registered before the listener starts accepting.
    let signal = ShutdownSignal::new();

    let repository: Arc<dyn UrlRepository> = Arc::new(
        SqliteUrlRepository::open(&config.storage_path, config.db_max_connections)
            .await
            .context("failed to init storage")?,
    );
    tracing::info!("Connected to storage");

    let auth_service = AuthService::new(&config.http_user, &config.http_password)
        .context("failed to init credential check")?;

    let state = AppState::new(
        repository.clone(),
        Arc::new(RandomAliasGenerator::new(config.alias_length)),
        config.alias_max_attempts,
        auth_service,
    );

    let app = app_router(state, config.request_timeout());

    let listener = TcpListener::bind(&config.listen_addr)
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    serve(
        listener,
        app,
        repository,
        signal,
        config.idle_timeout(),
        config.shutdown_timeout(),
    )
    .await
    .context("failed to start HTTP worker")
}

/// Serves `app` on `listener` until `signal` fires, then drains and closes
/// `repository`.
///
/// Connections with no traffic for `idle_timeout` are closed while serving.
///
/// # Errors
///
/// Returns an error only if the worker runtime cannot be created.
pub async fn serve(
    listener: TcpListener,
    app: App,
    repository: Arc<dyn UrlRepository>,
    mut signal: ShutdownSignal,
    idle_timeout: Duration,
    drain_timeout: Duration,
) -> std::io::Result<ShutdownReport> {
    let addr = listener.local_addr()?;
    let worker = HttpWorker::spawn(listener, app, idle_timeout, signal.subscribe())?;
    tracing::info!(state = %LifecycleState::Serving, %addr, "Listening on http://{addr}");

    let reason = signal.wait().await;
    tracing::info!(
        state = %LifecycleState::Draining,
        %reason,
        timeout_secs = drain_timeout.as_secs_f64(),
        "stopping server"
    );

    let drain = worker.drain(drain_timeout).await;
    if let Err(e) = &drain {
        tracing::error!(error = %e, "failed to stop server gracefully");
    }

    let storage = repository.close().await;
    if let Err(e) = &storage {
        tracing::error!(error = %e, "failed to close storage");
    }

    tracing::info!(state = %LifecycleState::Stopped, "server stopped");

    Ok(ShutdownReport { drain, storage })
}

/// The HTTP accept loop on its own runtime.
///
/// Dropping the worker shuts its runtime down in the background, cancelling
/// every task still on it, including open connections.
struct HttpWorker {
    runtime: Option<Runtime>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl HttpWorker {
    fn spawn(
        listener: TcpListener,
        app: App,
        idle_timeout: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> std::io::Result<Self> {
        listener.set_nonblocking(true)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("http-worker")
            .build()?;

        let handle = runtime.spawn(async move {
            let listener = IdleTimeoutListener::new(
                tokio::net::TcpListener::from_std(listener)?,
                idle_timeout,
            );

            axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
                .with_graceful_shutdown(async move {
                    let _ = shutdown.wait_for(|stop| *stop).await;
                })
                .await
        });

        Ok(Self {
            runtime: Some(runtime),
            handle,
        })
    }

    /// Waits for the accept loop and in-flight requests to finish, at most
    /// `timeout`.
    async fn drain(mut self, timeout: Duration) -> Result<(), ShutdownError> {
        match tokio::time::timeout(timeout, &mut self.handle).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(e))) => Err(ShutdownError::Worker(e.to_string())),
            Ok(Err(e)) => Err(ShutdownError::Worker(e.to_string())),
            Err(_) => Err(ShutdownError::Timeout(timeout)),
        }
    }
}

impl Drop for HttpWorker {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
