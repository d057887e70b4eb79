//! Application wiring.
//!
//! Dependencies are constructed explicitly and handed down as
//! `Arc<dyn Trait>`:
//!
//! ```text
//! DatabasePool ─► MySqlUserRepository ─► UserServiceImpl ─► AppState ─► Router
//! ```

use crate::startup::print_startup_info;
use axum::Router;
use roster_config::AppConfig;
use roster_core::{HealthCheck, RosterError, RosterResult};
use roster_repository::{create_pool, DatabasePool, MySqlUserRepository, UserRepository};
use roster_rest::{create_router, AppState};
use roster_service::{UserService, UserServiceImpl};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

/// A fully wired server, ready to run.
pub struct Application {
    config: AppConfig,
    router: Router,
    pool: Arc<DatabasePool>,
}

impl Application {
    /// Connects to the database, applies migrations when enabled, and wires
    /// the router.
    pub async fn build(config: AppConfig) -> RosterResult<Self> {
        let pool = create_pool(&config.database).await?;

        if config.database.run_migrations {
            pool.run_migrations().await?;
        } else {
            info!("Skipping database migrations");
        }

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(MySqlUserRepository::new(pool.clone()));
        let router = build_router(
            &config,
            user_repository,
            vec![pool.clone() as Arc<dyn HealthCheck>],
        );

        Ok(Self {
            config,
            router,
            pool,
        })
    }

    /// Serves HTTP until a shutdown signal arrives, then closes the pool.
    pub async fn run(self) -> RosterResult<()> {
        let addr = self.config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RosterError::Internal(format!("REST server error: {}", e)))?;

        self.pool.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

/// Builds the service layer and router over any repository.
pub fn build_router(
    config: &AppConfig,
    user_repository: Arc<dyn UserRepository>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
) -> Router {
    let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(user_repository));

    let state = health_checks.into_iter().fold(
        AppState::new(user_service).with_public_base_url(config.server.public_base_url.clone()),
        AppState::with_health_check,
    );

    create_router(state, &config.server)
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
