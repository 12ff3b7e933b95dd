use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::admin::AdminError;
use crate::types::dto::common::ErrorResponse;

/// HTTP-facing error type for the admin endpoints
///
/// This is the only conversion point from service errors to wire errors.
/// Internal failure detail is logged here and never exposed to clients.
#[derive(ApiResponse, Debug)]
pub enum AdminApiError {
    /// Referenced record does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Uniqueness violation on create
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Attempted mutation of a protected record
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AdminApiError {
    /// Create a NotFound error
    pub fn not_found(message: String) -> Self {
        AdminApiError::NotFound(Json(ErrorResponse {
            error: "not_found".to_string(),
            message,
            status_code: 404,
        }))
    }

    /// Create a Conflict error
    pub fn conflict(message: String) -> Self {
        AdminApiError::Conflict(Json(ErrorResponse {
            error: "conflict".to_string(),
            message,
            status_code: 409,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden(message: String) -> Self {
        AdminApiError::Forbidden(Json(ErrorResponse {
            error: "forbidden".to_string(),
            message,
            status_code: 403,
        }))
    }

    /// Create a generic internal server error
    ///
    /// Always returns a generic message without exposing internal details.
    pub fn internal_server_error() -> Self {
        AdminApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminApiError::NotFound(json) => json.0.message.clone(),
            AdminApiError::Conflict(json) => json.0.message.clone(),
            AdminApiError::Forbidden(json) => json.0.message.clone(),
            AdminApiError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            AdminApiError::NotFound(json) => json.0.status_code,
            AdminApiError::Conflict(json) => json.0.status_code,
            AdminApiError::Forbidden(json) => json.0.status_code,
            AdminApiError::InternalError(json) => json.0.status_code,
        }
    }
}

impl From<AdminError> for AdminApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::NotFound { .. } => Self::not_found(err.to_string()),
            AdminError::DuplicateUsername { .. } => Self::conflict(err.to_string()),
            AdminError::Protected(message) => Self::forbidden(message.to_string()),
            AdminError::SettingsNotConfigured => Self::not_found(err.to_string()),
            AdminError::Internal(internal) => {
                tracing::error!("Internal error in admin operation: {}", internal);
                Self::internal_server_error()
            }
        }
    }
}

impl fmt::Display for AdminApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
