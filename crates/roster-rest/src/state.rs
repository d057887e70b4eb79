//! Application state for Axum handlers.

use roster_core::HealthCheck;
use roster_service::UserService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Dependencies checked by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Base URL for hypermedia links; the request `Host` is used when unset.
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self {
            user_service,
            health_checks: Vec::new(),
            public_base_url: None,
        }
    }

    /// Registers a dependency for the readiness check.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    /// Fixes the base URL used for hypermedia links.
    #[must_use]
    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.public_base_url = base;
        self
    }
}
