//! Helper functions used across the application.
//!
//! - [`alias`] - Alias generation and validation
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Storage error classification

pub mod alias;
pub mod db_error;
pub mod url_validator;
