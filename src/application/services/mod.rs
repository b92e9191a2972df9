//! Business logic services for the application layer.

pub mod alias_allocator;
pub mod auth_service;
pub mod redirect_service;
pub mod registration_service;

pub use alias_allocator::{AliasAllocator, AliasGenerator, RandomAliasGenerator};
pub use auth_service::AuthService;
pub use redirect_service::RedirectService;
pub use registration_service::RegistrationService;
