//! # URL Alias
//!
//! Maps short aliases to long target URLs and redirects visitors, built with
//! Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The mapping entity and the persistence contract
//! - **Application Layer** ([`application`]) - Alias allocation, registration, resolution, auth
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//! - **Lifecycle** ([`server`], [`shutdown`]) - Startup, serving, graceful drain
//!
//! ## Quick Start
//!
//! ```bash
//! export HTTP_USER=admin HTTP_PASSWORD=secret
//! cargo run
//!
//! curl -u admin:secret -d '{"url":"https://example.com"}' localhost:8082/url
//! # {"alias":"a1B2c3"}
//! curl -i localhost:8082/a1B2c3
//! # HTTP/1.1 302 Found
//! # location: https://example.com
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod idle_timeout;
pub mod logging;
pub mod server;
pub mod shutdown;

pub mod routes;

pub use error::AppError;
pub use state::AppState;
