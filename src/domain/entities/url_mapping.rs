//! URL mapping entity.

/// A short alias bound to a target URL.
///
/// Mappings are created once and never updated: a different target means a
/// new mapping under a different alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub alias: String,
    pub target: String,
}

impl UrlMapping {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}
