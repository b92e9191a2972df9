//! Core domain entities.
//!
//! - [`UrlMapping`] - An alias pointing at a target URL

pub mod url_mapping;

pub use url_mapping::UrlMapping;
