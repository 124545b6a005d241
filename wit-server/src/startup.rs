//! Server startup and shutdown logic

use anyhow::Result;
use axum::Router;
use tracing::{error, info};
use wit_config::WitConfig;
use wit_rest_api::{create_rest_app, AppConfig, AppContext, AppsContext, CacheControlPolicy, WorkItemTypesContext};

use crate::services::ServiceContainer;

pub struct Server {
    config: WitConfig,
    services: ServiceContainer,
}

impl Server {
    /// Create the services; logging must already be initialised
    pub async fn new(config: WitConfig) -> Result<Self> {
        let services = ServiceContainer::new(&config).await?;
        Ok(Self { config, services })
    }

    pub fn build_app(&self) -> Router {
        let context = AppContext {
            work_item_types: WorkItemTypesContext::new(
                self.services.database.clone(),
                CacheControlPolicy::from(&self.config.cache_control),
                self.config.server.api_prefix.clone(),
            ),
            apps: AppsContext::new(self.services.deployments.clone()),
        };

        let app_config = AppConfig {
            api_prefix: self.config.server.api_prefix.clone(),
            cors: self.config.server.cors.clone(),
            request_timeout: Some(self.config.server.request_timeout),
            ..AppConfig::default()
        };

        create_rest_app(context, self.services.jwt.clone(), app_config)
    }

    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let app = self.build_app();
        self.log_config_summary();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        info!("=== Work Item Type Server Configuration ===");
        info!("API prefix: {}", self.config.server.api_prefix);
        info!(
            "Database: {:?} ({})",
            self.config.database.backend, self.config.database.url
        );
        info!(
            "Authentication: {}",
            if self.config.auth.enabled { "Enabled" } else { "Disabled" }
        );
        info!("Request timeout: {:?}", self.config.server.request_timeout);
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use wit_config::DatabaseBackend;

    fn memory_config() -> WitConfig {
        let mut config = WitConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.auth.jwt_secret = "server-test-secret-value".to_string();
        config
    }

    #[tokio::test]
    async fn test_server_serves_seeded_types() {
        let server = Server::new(memory_config()).await.unwrap();
        let app = server.build_app();

        let health = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let listed = app
            .oneshot(
                Request::builder()
                    .uri("/api/spaces/2e0698d8-753e-4cef-bb7c-f027634824a2/workitemtypes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(listed.status(), StatusCode::OK);
    }
}
