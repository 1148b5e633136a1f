use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::services::{assessment_engine::OutOfRangeError, quiz_validator::QuizValidationError};

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid quiz: {0}")]
    InvalidQuiz(#[from] QuizValidationError),

    #[error("Rejected submission: {0}")]
    OutOfRange(#[from] OutOfRangeError),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidQuiz(_) => "INVALID_QUIZ",
            AppError::OutOfRange(_) => "ANSWER_OUT_OF_RANGE",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Structured payload for errors the client is expected to act on.
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::InvalidQuiz(err) => serde_json::to_value(err).ok(),
            AppError::OutOfRange(err) => serde_json::to_value(err).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidQuiz(_) => StatusCode::BAD_REQUEST,
            AppError::OutOfRange(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
            details: self.details(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
