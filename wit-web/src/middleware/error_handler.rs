use axum::http::Uri;

use crate::errors::WebError;

/// Router fallback for unknown paths
pub async fn handle_not_found(uri: Uri) -> WebError {
    WebError::not_found(format!("No route for {}", uri.path()))
}
