//! REST API error type and its JSON:API rendering

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use wit_core::ConversionError;
use wit_interfaces::{DatabaseError, DeploymentsError};
use wit_web::WebError;

#[derive(Error, Debug)]
pub enum RestError {
    #[error("Bad parameter: {0}")]
    BadParameter(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Conversion error in field '{field}': {source}")]
    FieldConversion { field: String, source: ConversionError },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Deployments error: {0}")]
    Deployments(#[from] DeploymentsError),

    #[error("Web error: {0}")]
    Web(#[from] WebError),
}

pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    pub fn bad_parameter(message: impl Into<String>) -> Self {
        RestError::BadParameter(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        RestError::Forbidden(message.into())
    }

    pub fn to_web_error(self) -> WebError {
        match self {
            RestError::BadParameter(msg) => WebError::bad_parameter(msg),
            RestError::Forbidden(msg) => WebError::forbidden(msg),
            RestError::InternalError(msg) => WebError::internal(msg),
            RestError::Conversion(err) => WebError::conversion(err.to_string()),
            RestError::FieldConversion { field, source } => {
                WebError::conversion(format!("field '{}': {}", field, source))
            }
            RestError::Database(err) => match err {
                DatabaseError::NotFound { entity, id } => {
                    WebError::not_found(format!("{} with id '{}' not found", entity, id))
                }
                DatabaseError::Validation { message } => WebError::bad_parameter(message),
                DatabaseError::Constraint { message } => WebError::conflict(message),
                other => WebError::internal(other.to_string()),
            },
            RestError::Deployments(err) => match err {
                DeploymentsError::NotFound { .. } => WebError::not_found(err.to_string()),
                DeploymentsError::Unauthorized(_) => WebError::unauthorized(err.to_string()),
                DeploymentsError::Unavailable(_) => WebError::service_unavailable(err.to_string()),
                DeploymentsError::Backend(_) => WebError::internal(err.to_string()),
            },
            RestError::Web(err) => err,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.to_web_error().into_response()
    }
}
