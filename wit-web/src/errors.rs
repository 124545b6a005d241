//! Web-specific error types
//!
//! Every failure leaving the API is rendered as a JSON:API error document
//! (`{"errors": [{id, code, status, title, detail}]}`).

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use wit_api_types::ApiError;

use crate::utils::JSONAPI_CONTENT_TYPE;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad parameter: {message}")]
    BadParameter { message: String },

    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadParameter { .. } | WebError::Conversion { .. } => StatusCode::BAD_REQUEST,
            WebError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            WebError::Forbidden { .. } => StatusCode::FORBIDDEN,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Conflict { .. } => StatusCode::CONFLICT,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.to_api_error().code
    }

    /// Map onto the transport independent error. Internal details are not exposed.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            WebError::BadParameter { message } => ApiError::bad_parameter(message.clone()),
            WebError::Conversion { message } => ApiError::conversion(message.clone()),
            WebError::Unauthorized { message } => ApiError::unauthorized(message.clone()),
            WebError::Forbidden { message } => ApiError::forbidden(message.clone()),
            WebError::NotFound { message } => ApiError::new("not_found", 404, "Not Found", message.clone()),
            WebError::Conflict { message } => ApiError::conflict(message.clone()),
            WebError::ServiceUnavailable { message } => ApiError::service_unavailable(message.clone()),
            WebError::Internal { .. } => ApiError::internal("An internal error occurred"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if let WebError::Internal { message } = &self {
            error!(error = %message, "Request failed with internal error");
        }

        let status = self.status_code();
        let document = self.to_api_error().into_document();

        let mut response = (status, Json(document)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSONAPI_CONTENT_TYPE));
        response
    }
}

impl WebError {
    pub fn bad_parameter(message: impl Into<String>) -> Self {
        WebError::BadParameter {
            message: message.into(),
        }
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        WebError::Conversion {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        WebError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        WebError::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        WebError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }
}
