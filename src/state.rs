//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{
    AliasAllocator, AliasGenerator, AuthService, RedirectService, RegistrationService,
};
use crate::domain::repositories::UrlRepository;

#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<RegistrationService>,
    pub redirect_service: Arc<RedirectService>,
    pub auth_service: Arc<AuthService>,
    pub repository: Arc<dyn UrlRepository>,
}

impl AppState {
    /// Wires services around a repository.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn AliasGenerator>,
        max_attempts: usize,
        auth_service: AuthService,
    ) -> Self {
        let allocator = AliasAllocator::new(repository.clone(), generator, max_attempts);

        Self {
            registration_service: Arc::new(RegistrationService::new(
                repository.clone(),
                allocator,
            )),
            redirect_service: Arc::new(RedirectService::new(repository.clone())),
            auth_service: Arc::new(auth_service),
            repository,
        }
    }
}
