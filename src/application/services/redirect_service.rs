//! Alias resolution for redirects.

use std::sync::Arc;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Looks up the target URL behind an alias.
///
/// Aliases are not validated here: malformed input simply never matches and
/// resolves to [`AppError::NotFound`].
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Resolves `alias` to its target with a single storage lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown aliases and
    /// [`AppError::Storage`] on database errors.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        let target = self.repository.get_url(alias).await?;
        tracing::debug!(alias, target = %target, "alias resolved");
        Ok(target)
    }
}
