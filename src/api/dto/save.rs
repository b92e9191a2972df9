//! DTOs for the URL registration endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for caller-supplied aliases.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Request to register a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// Target URL (absolute).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional alias; generated when absent.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = *ALIAS_REGEX))]
    pub alias: Option<String>,
}

/// Response carrying the final alias.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub alias: String,
}
