//! Application error type rendered through the response envelope.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use uuid::Uuid;

use guestbook_core::RepoError;
use guestbook_infra::StorageError;
use guestbook_shared::{ErrorCode, ErrorEnvelope};

/// Error carried out of handlers and services. The trace id is stitched
/// in by the handler so the failure envelope matches the request.
#[derive(Debug)]
pub struct AppError {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: None,
        }
    }

    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound, "Resource not found")
    }

    pub fn missing_fields(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredFields, detail)
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, detail)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, detail)
    }

    pub fn with_trace(mut self, trace_id: &str) -> Self {
        self.trace_id = Some(trace_id.to_owned());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = self
            .trace_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        HttpResponse::build(self.status_code()).json(ErrorEnvelope::new(
            trace_id,
            self.code,
            self.message.clone(),
        ))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::not_found(),
            RepoError::InvalidFilter(msg) => AppError::validation(msg),
            RepoError::Constraint(msg) => AppError::bad_request(msg),
            RepoError::Timeout => {
                tracing::error!("database query timed out");
                AppError::new(ErrorCode::UnknownError, "Request timed out")
            }
            RepoError::Connection(msg) | RepoError::Query(msg) => {
                tracing::error!("database error: {msg}");
                AppError::new(ErrorCode::UnknownError, "Database error")
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!("storage error: {err}");
        AppError::new(ErrorCode::UnknownError, "Storage error")
    }
}

/// Result type alias for handlers and services.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_not_found_becomes_a_404() {
        let err = AppError::from(RepoError::NotFound);
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn driver_details_never_reach_the_client() {
        let err = AppError::from(RepoError::Query("syntax error near SELECT".into()));
        assert_eq!(err.code(), ErrorCode::UnknownError);
        assert_eq!(err.message, "Database error");
    }

    #[test]
    fn invalid_filter_is_a_validation_error() {
        let err = AppError::from(RepoError::InvalidFilter("cannot sort by `x`".into()));
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
