//! Alias allocation with bounded retry on collision.
//!
//! Random aliases are short, so collisions are unlikely but possible. The
//! allocator never checks for existence up front: it generates a candidate,
//! attempts the insert, and on [`AppError::Conflict`] tries a fresh candidate,
//! up to a fixed number of attempts. Running out of attempts means the alphabet
//! or length is too small for the keyspace, not a transient fault.

use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::alias::{generate_alias, is_reserved};

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Source of candidate aliases.
pub trait AliasGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random aliases over `[A-Za-z0-9]` of a fixed length.
///
/// The generator owns its randomness source. [`RandomAliasGenerator::new`]
/// seeds it from the OS; [`RandomAliasGenerator::with_rng`] takes any
/// pre-seeded [`StdRng`] for reproducible sequences.
#[derive(Debug)]
pub struct RandomAliasGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomAliasGenerator {
    pub fn new(length: usize) -> Self {
        Self::with_rng(length, StdRng::from_os_rng())
    }

    pub fn with_rng(length: usize, rng: StdRng) -> Self {
        Self {
            length,
            rng: Mutex::new(rng),
        }
    }
}

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_alias(&mut *rng, self.length)
    }
}

/// Produces and persists an alias when the caller does not supply one.
pub struct AliasAllocator {
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn AliasGenerator>,
    max_attempts: usize,
}

impl AliasAllocator {
    /// Creates an allocator.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn AliasGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Saves `target` under a freshly generated alias and returns the alias.
    ///
    /// A candidate that collides with an existing alias or with a reserved
    /// route name consumes one attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] after `max_attempts`
    /// collisions; no mapping is created in that case.
    ///
    /// Storage faults are returned immediately without retry.
    pub async fn allocate(&self, target: &str) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            if is_reserved(&candidate) {
                tracing::debug!(alias = %candidate, attempt, "generated alias is reserved");
                continue;
            }

            match self.repository.save(&candidate, target).await {
                Ok(alias) => {
                    tracing::debug!(alias = %alias, attempt, "alias allocated");
                    return Ok(alias);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(alias = %candidate, attempt, "alias collision");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            attempts = self.max_attempts,
            "alias allocation exhausted, keyspace may be saturated"
        );

        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}
