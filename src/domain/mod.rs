//! Domain layer: the URL mapping entity and the persistence contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Persistence trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete storage lives in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
