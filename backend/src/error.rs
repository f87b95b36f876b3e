//! Error handling for the Manufacturing ERP Platform
//!
//! Provides consistent, field-addressable JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Validation errors
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Mail delivery failed: {0}")]
    MailError(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message: "Invalid username or password".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message: "Invalid token".to_string(),
                    field: None,
                },
            ),
            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "INSUFFICIENT_PERMISSIONS".to_string(),
                    message: "You do not have permission to perform this action".to_string(),
                    field: None,
                },
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message: message.clone(),
                    field: None,
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message: format!("A record with this {} already exists", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::MailError(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "MAIL_ERROR".to_string(),
                    message: format!("Mail delivery failed: {}", msg),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Map a sqlx error to DuplicateEntry when it is a unique-constraint violation
/// on the given field, otherwise pass it through as a database error.
pub fn map_unique_violation(err: sqlx::Error, field: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::DuplicateEntry(field.to_string());
        }
    }
    AppError::DatabaseError(err)
}

/// Variant of [`map_unique_violation`] for payloads holding more than one
/// unique key: the violated constraint's name decides which field conflicted.
pub fn map_unique_violation_for(err: sqlx::Error, fields: &[(&str, &str)]) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            let field = field_for_constraint(db_err.constraint(), fields);
            return AppError::DuplicateEntry(field.to_string());
        }
    }
    AppError::DatabaseError(err)
}

/// Pick the conflicting field from a violated constraint's name; falls back
/// to the first listed field when the name gives no hint.
fn field_for_constraint<'a>(constraint: Option<&str>, fields: &[(&str, &'a str)]) -> &'a str {
    if let Some(name) = constraint {
        for (needle, field) in fields {
            if name.contains(needle) {
                return field;
            }
        }
    }
    fields.first().map(|(_, field)| *field).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRATION_KEYS: &[(&str, &str)] = &[("username", "username"), ("email", "email")];

    #[test]
    fn test_constraint_name_selects_conflicting_field() {
        assert_eq!(
            field_for_constraint(Some("users_username_key"), REGISTRATION_KEYS),
            "username"
        );
        assert_eq!(
            field_for_constraint(Some("users_email_key"), REGISTRATION_KEYS),
            "email"
        );
    }

    #[test]
    fn test_unnamed_constraint_falls_back_to_first_field() {
        assert_eq!(field_for_constraint(None, REGISTRATION_KEYS), "username");
        assert_eq!(
            field_for_constraint(Some("pk_users"), REGISTRATION_KEYS),
            "username"
        );
    }
}
