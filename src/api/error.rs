//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.
//! Server-side failures render a generic message; the detail stays in the log so
//! connection strings, provider errors, and other internals never reach a client.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use uuid::Uuid;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
/// The payload of the 5xx variants is log-only detail; their `Display` form is generic.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Report not found (404)
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error")]
    #[allow(dead_code)] // Reserved for failures with no more specific variant
    Internal(String),

    /// Database error (500)
    #[error("Database error")]
    Database(String),

    /// External service error (502)
    #[error("External service error")]
    ExternalService(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ReportNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error_type, detail) = match self {
            ApiError::ReportNotFound(id) => ("report_not_found", id.as_str()),
            ApiError::BadRequest(msg) => ("bad_request", msg.as_str()),
            ApiError::Internal(detail) => ("internal_error", detail.as_str()),
            ApiError::Database(detail) => ("database_error", detail.as_str()),
            ApiError::ExternalService(detail) => ("external_service_error", detail.as_str()),
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            detail = detail,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<crate::service::triage::TriageServiceError> for ApiError {
    fn from(err: crate::service::triage::TriageServiceError) -> Self {
        match err {
            crate::service::triage::TriageServiceError::EmptyTranscript => {
                ApiError::BadRequest("transcript must not be empty".to_string())
            }
            crate::service::triage::TriageServiceError::Report(
                crate::service::report::ReportError::MalformedRecord(msg),
            ) => ApiError::BadRequest(format!("malformed triage record: {}", msg)),
            crate::service::triage::TriageServiceError::Report(
                crate::service::report::ReportError::Storage(e),
            ) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<crate::service::translation::TranslationError> for ApiError {
    fn from(err: crate::service::translation::TranslationError) -> Self {
        match err {
            crate::service::translation::TranslationError::TranslationFailed(msg) => {
                ApiError::ExternalService(msg)
            }
        }
    }
}

impl From<crate::db::DbError> for ApiError {
    fn from(err: crate::db::DbError) -> Self {
        match err {
            crate::db::DbError::NotFound(id) => ApiError::ReportNotFound(id),
            _ => ApiError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_side_variants_display_no_detail() {
        let err = ApiError::Database("postgres://user:secret@db/triage failed".to_string());
        assert_eq!(err.to_string(), "Database error");

        let err = ApiError::Internal("stack trace goes here".to_string());
        assert_eq!(err.to_string(), "Internal server error");

        let err = ApiError::ExternalService("provider key rejected".to_string());
        assert_eq!(err.to_string(), "External service error");
    }

    #[test]
    fn client_side_variants_keep_their_message() {
        let err = ApiError::BadRequest("transcript must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid request: transcript must not be empty");
    }

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(
            ApiError::ReportNotFound("RPT-1".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ExternalService("x".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Database("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn empty_transcript_maps_to_bad_request() {
        let err: ApiError = crate::service::triage::TriageServiceError::EmptyTranscript.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn db_not_found_maps_to_report_not_found() {
        let err: ApiError = crate::db::DbError::NotFound("RPT-404".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("RPT-404"));
    }
}
