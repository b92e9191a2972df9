//! URL registration service.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::alias_allocator::AliasAllocator;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::alias::validate_custom_alias;
use crate::utils::url_validator::validate_target_url;

/// Validates registration requests and persists new mappings.
///
/// Exactly one row is written on success and none on any failure path.
pub struct RegistrationService {
    repository: Arc<dyn UrlRepository>,
    allocator: AliasAllocator,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn UrlRepository>, allocator: AliasAllocator) -> Self {
        Self {
            repository,
            allocator,
        }
    }

    /// Registers `target` under `alias`, or under a generated alias if none is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute
    /// `http`/`https` URL or the alias is malformed or reserved.
    ///
    /// Returns [`AppError::Conflict`] if a caller-supplied alias is taken. This
    /// is reported as-is and never retried.
    ///
    /// Returns [`AppError::AllocationExhausted`] if every generated candidate
    /// collided.
    pub async fn register(
        &self,
        target: String,
        alias: Option<String>,
    ) -> Result<UrlMapping, AppError> {
        validate_target_url(&target).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let alias = match alias {
            Some(custom) => {
                validate_custom_alias(&custom)?;
                self.repository.save(&custom, &target).await?
            }
            None => self.allocator.allocate(&target).await?,
        };

        tracing::info!(alias = %alias, target = %target, "url saved");

        Ok(UrlMapping::new(alias, target))
    }
}
