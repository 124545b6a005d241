//! Router assembly

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use wit_config::CorsConfig;
use wit_web::{auth_middleware, cors_layer, handle_not_found, request_id_middleware, JwtManager};

use crate::context::{AppsContext, WorkItemTypesContext};
use crate::handlers;
use crate::schema::{apps_router, APPS_BASE_PATH};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path prefix of the API routes; health probes are not prefixed
    pub api_prefix: String,
    pub enable_cors: bool,
    pub cors: CorsConfig,
    pub enable_request_id: bool,
    pub enable_tracing: bool,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            enable_cors: true,
            cors: CorsConfig::default(),
            enable_request_id: true,
            enable_tracing: true,
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Dependencies of every endpoint family
#[derive(Clone)]
pub struct AppContext {
    pub work_item_types: WorkItemTypesContext,
    pub apps: AppsContext,
}

/// Build the complete application router
pub fn create_rest_app(context: AppContext, jwt: Arc<JwtManager>, config: AppConfig) -> Router {
    let health = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(context.work_item_types.clone());

    let api = work_item_types_router(context.work_item_types).nest(APPS_BASE_PATH, apps_router(context.apps));

    let prefix = config.api_prefix.trim_end_matches('/');
    let routes = if prefix.is_empty() {
        health.merge(api)
    } else {
        health.nest(prefix, api)
    };

    let mut app = routes
        .fallback(handle_not_found)
        .layer(middleware::from_fn_with_state(jwt, auth_middleware));

    if let Some(timeout) = config.request_timeout {
        app = app.layer(TimeoutLayer::new(timeout));
    }
    if config.enable_cors {
        app = app.layer(cors_layer(&config.cors));
    }
    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    app
}

fn work_item_types_router(ctx: WorkItemTypesContext) -> Router {
    Router::new()
        .route(
            "/spaces/{spaceID}/workitemtypes",
            get(handlers::list_work_item_types).post(handlers::create_work_item_type),
        )
        .route("/spaces/{spaceID}/workitemtypes/{witID}", get(handlers::show_work_item_type))
        .with_state(ctx)
}
