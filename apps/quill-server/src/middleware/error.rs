//! Error handling - maps every failure to its HTTP representation.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use quill_core::error::{DomainError, RepoError};
use quill_shared::{ActionResponse, ErrorResponse};
use std::fmt;

pub const LOGIN_PATH: &str = "/login";

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// No valid session; the client is sent to the login page.
    Unauthenticated,
    /// Missing row, or a row owned by someone else.
    NotFound(String),
    /// A required field is blank.
    Validation(String),
    /// The body is not the JSON shape the endpoint expects.
    MalformedBody(String),
    /// Register/login rejected on a specific form field.
    FormRejected { field: &'static str, error: String },
    MethodNotAllowed,
    Internal(String),
}

impl AppError {
    pub fn form(field: &'static str, error: impl Into<String>) -> Self {
        AppError::FormRejected {
            field,
            error: error.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated => write!(f, "Authentication required"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::MalformedBody(msg) => write!(f, "Malformed body: {}", msg),
            AppError::FormRejected { field, error } => write!(f, "{}: {}", field, error),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::FormRejected { .. } => StatusCode::OK,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        match self {
            AppError::Unauthenticated => builder
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish(),
            AppError::NotFound(detail) => builder.json(ErrorResponse::not_found(detail)),
            AppError::Validation(msg) => builder.json(ActionResponse::failure(msg)),
            AppError::MalformedBody(detail) => {
                tracing::debug!(%detail, "Rejected malformed body");
                builder.json(ActionResponse::failure("Invalid JSON"))
            }
            AppError::FormRejected { field, error } => {
                builder.json(ActionResponse::field_failure(*field, error))
            }
            AppError::MethodNotAllowed => {
                builder.json(serde_json::json!({ "error": "Method not allowed" }))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                builder.json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Duplicate { field, message } => AppError::form(field, message),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(constraint) => {
                tracing::warn!(%constraint, "Unique constraint violation");
                AppError::Validation("Conflicts with an existing record".to_string())
            }
            RepoError::ForeignKey(constraint) => {
                tracing::warn!(%constraint, "Referenced row is missing");
                AppError::NotFound("Referenced resource not found".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
