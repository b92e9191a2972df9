//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::alias_allocator::AliasAllocator`] - Generated aliases with bounded collision retry
//! - [`services::registration_service::RegistrationService`] - Validating and persisting new mappings
//! - [`services::redirect_service::RedirectService`] - Alias lookup for redirects
//! - [`services::auth_service::AuthService`] - Write-path credential check

pub mod services;
