//! Tracing subscriber setup.
//!
//! | `APP_ENV` | Format          | Default level |
//! |-----------|-----------------|---------------|
//! | `local`   | human-readable  | `debug`       |
//! | `dev`     | JSON            | `debug`       |
//! | `prod`    | JSON            | `info`        |
//!
//! `RUST_LOG`, when set, replaces the default filter.

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Default filter directive for an environment.
pub fn default_directive(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    }
}

/// Installs the global tracing subscriber for `env`.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init(env: Environment) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(env)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match env {
        Environment::Local => builder.with_target(false).try_init(),
        Environment::Dev | Environment::Prod => builder.json().with_current_span(true).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(Environment::Local), "debug");
        assert_eq!(default_directive(Environment::Dev), "debug");
        assert_eq!(default_directive(Environment::Prod), "info");
    }
}
