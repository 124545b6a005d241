use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;

use crate::context::WorkItemTypesContext;
use crate::errors::{RestError, RestResult};

/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe; fails while the store cannot be reached
pub async fn readiness_check(State(ctx): State<WorkItemTypesContext>) -> RestResult<impl IntoResponse> {
    ctx.db.health_check().await.map_err(|e| {
        warn!(error = %e, "Readiness check failed");
        RestError::Web(wit_web::WebError::service_unavailable("storage is not reachable"))
    })?;
    Ok(Json(json!({ "status": "ready" })))
}
