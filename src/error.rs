//! HTTP error envelope.
//!
//! Every failing endpoint responds with:
//!
//! ```json
//! { "error": { "code": "conflict", "message": "slug 'abc' already exists", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::domain::errors::ShortenError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn parts(&self) -> (&str, &Value) {
        match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Conflict { message, details }
            | Self::Internal { message, details } => (message, details),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = self.parts();
        ErrorInfo {
            code: self.code(),
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (message, _) = self.parts();
        write!(f, "{}: {}", self.code(), message)
    }
}

impl std::error::Error for AppError {}

impl From<ShortenError> for AppError {
    fn from(err: ShortenError) -> Self {
        let details = json!({ "kind": err.kind() });

        match &err {
            ShortenError::InvalidUrl(_) | ShortenError::InvalidSlugFormat(_) => {
                Self::bad_request(err.to_string(), details)
            }
            ShortenError::SlugTaken(_) => Self::conflict(err.to_string(), details),
            ShortenError::NotFound(_) => Self::not_found(err.to_string(), details),
            ShortenError::SlugExhausted { .. } => {
                tracing::error!(error = %err, "Slug allocation exhausted");
                Self::internal(err.to_string(), details)
            }
            ShortenError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Store unavailable");
                Self::internal("Store unavailable", details)
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<Value> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| Value::String(m.to_string()))
                            .unwrap_or_else(|| Value::String(e.code.to_string()))
                    })
                    .collect();
                (field.to_string(), Value::Array(messages))
            })
            .collect();

        Self::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::StoreError;

    #[test]
    fn test_shorten_error_status_mapping() {
        let cases = [
            (
                ShortenError::InvalidUrl("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShortenError::InvalidSlugFormat("ab".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ShortenError::SlugTaken("abc".into()), StatusCode::CONFLICT),
            (ShortenError::NotFound("abc".into()), StatusCode::NOT_FOUND),
            (
                ShortenError::SlugExhausted { attempts: 10 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ShortenError::StoreUnavailable(StoreError::Connection("refused".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let kind = err.kind();
            let app_err = AppError::from(err);
            assert_eq!(app_err.status_code(), expected, "kind {}", kind);
            assert_eq!(app_err.to_error_info().details["kind"], kind);
        }
    }

    #[test]
    fn test_store_details_are_not_leaked() {
        let err = AppError::from(ShortenError::StoreUnavailable(StoreError::Command(
            "WRONGPASS invalid password".into(),
        )));

        let info = err.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert!(!info.message.contains("WRONGPASS"));
    }

    #[test]
    fn test_display() {
        let err = AppError::conflict("slug 'abc' already exists", json!({}));
        assert_eq!(err.to_string(), "conflict: slug 'abc' already exists");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("missing", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
