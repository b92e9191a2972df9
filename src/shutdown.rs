//! Termination signal handling.
//!
//! [`ShutdownSignal`] is owned by the main control flow, which blocks on
//! [`ShutdownSignal::wait`] until SIGINT/SIGTERM arrives (or a
//! [`ShutdownTrigger`] fires). Completion is broadcast over a `watch` channel to
//! every subscriber, such as the HTTP listener.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Why shutdown started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// An OS signal was received.
    Signal(&'static str),
    /// [`ShutdownTrigger::trigger`] was called.
    Triggered,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Signal(name) => write!(f, "{name}"),
            ShutdownReason::Triggered => write!(f, "manual trigger"),
        }
    }
}

/// Cancellation signal for the process lifecycle.
///
/// OS handlers are installed when the signal is created, so a SIGTERM that
/// arrives before [`ShutdownSignal::wait`] is polled is still delivered to it
/// instead of terminating the process.
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
    os: std::io::Result<OsSignals>,
}

/// Handle that starts shutdown programmatically.
#[derive(Clone)]
pub struct ShutdownTrigger {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl ShutdownSignal {
    /// Creates the signal and registers SIGINT/SIGTERM handlers.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            os: OsSignals::register(),
        }
    }

    /// Returns a receiver that flips to `true` once shutdown begins.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Returns a handle that can start shutdown without an OS signal.
    pub fn trigger_handle(&self) -> ShutdownTrigger {
        ShutdownTrigger {
            tx: self.tx.clone(),
        }
    }

    /// Check if shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Blocks until a termination signal or a manual trigger, then notifies all
    /// subscribers.
    ///
    /// If the OS handlers could not be registered the failure is logged and
    /// shutdown proceeds immediately.
    pub async fn wait(&mut self) -> ShutdownReason {
        let mut rx = self.tx.subscribe();

        let reason = match &mut self.os {
            Ok(os) => tokio::select! {
                name = os.recv() => ShutdownReason::Signal(name),
                _ = rx.wait_for(|stop| *stop) => ShutdownReason::Triggered,
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for shutdown signals, proceeding with shutdown");
                ShutdownReason::Signal("unavailable")
            }
        };

        self.tx.send_replace(true);
        reason
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Registered SIGTERM and SIGINT streams.
#[cfg(unix)]
struct OsSignals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    /// Waits for the next signal and returns its name.
    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.sigterm.recv() => "SIGTERM",
            _ = self.sigint.recv() => "SIGINT",
        }
    }
}

#[cfg(not(unix))]
struct OsSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(not(unix))]
impl OsSignals {
    fn register() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        self.ctrl_c.recv().await;
        "Ctrl+C"
    }
}
