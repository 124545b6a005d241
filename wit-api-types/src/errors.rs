//! JSON:API error envelope

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry of the `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub id: String,
    pub code: String,
    /// HTTP status rendered as a string, as JSON:API requires
    pub status: String,
    pub title: String,
    pub detail: String,
}

/// The error document returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonApiErrors {
    pub errors: Vec<ErrorObject>,
}

/// Transport independent error carrying everything needed to render an error document
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: &'static str,
    pub status: u16,
    pub title: &'static str,
    pub detail: String,
}

impl ApiError {
    pub fn new(code: &'static str, status: u16, title: &'static str, detail: impl Into<String>) -> Self {
        Self {
            code,
            status,
            title,
            detail: detail.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::new(
            "not_found",
            404,
            "Not Found",
            format!("{} with id '{}' not found", resource, id),
        )
    }

    pub fn bad_parameter(detail: impl Into<String>) -> Self {
        Self::new("bad_parameter", 400, "Bad Parameter", detail)
    }

    pub fn conversion(detail: impl Into<String>) -> Self {
        Self::new("conversion_error", 400, "Conversion Error", detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new("unauthorized_error", 401, "Unauthorized", detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new("forbidden_error", 403, "Forbidden", detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new("data_conflict", 409, "Conflict", detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new("internal_error", 500, "Internal Server Error", detail)
    }

    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new("service_unavailable", 503, "Service Unavailable", detail)
    }

    pub fn http_status_code(&self) -> u16 {
        self.status
    }

    /// Wrap this error in a single-entry error document with a fresh id
    pub fn into_document(self) -> JsonApiErrors {
        JsonApiErrors {
            errors: vec![ErrorObject {
                id: Uuid::new_v4().to_string(),
                code: self.code.to_string(),
                status: self.status.to_string(),
                title: self.title.to_string(),
                detail: self.detail,
            }],
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.code, self.detail)
    }
}
