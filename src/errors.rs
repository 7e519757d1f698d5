use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::{Enum, ErrorExtensions};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

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
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub const TIMEOUT_MESSAGE: &str =
    "The AI response timed out. Reduce the number of prompts to generate or try again.";
pub const PROVIDER_FALLBACK_MESSAGE: &str = "An error occurred while generating prompts.";
pub const UNPARSEABLE_MESSAGE: &str =
    "The AI response could not be read as prompt data. Please try again.";
pub const WRONG_SHAPE_MESSAGE: &str = "The AI returned a result that is not a list of prompts.";

/// User-facing failure classes of a generation call. None are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCategory {
    Config,
    Input,
    Timeout,
    Provider,
    Unparseable,
    WrongShape,
}

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("No API key configured for provider {0}")]
    MissingCredential(String),

    #[error("Malformed image data: {0}")]
    MalformedImage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider timed out: {0}")]
    Timeout(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Response is not valid JSON: {0}")]
    Unparseable(String),

    #[error("Response JSON is not an array")]
    WrongShape,
}

impl GenerationError {
    pub fn category(&self) -> FailureCategory {
        match self {
            GenerationError::UnsupportedProvider(_) | GenerationError::MissingCredential(_) => {
                FailureCategory::Config
            }
            GenerationError::MalformedImage(_) | GenerationError::InvalidInput(_) => {
                FailureCategory::Input
            }
            GenerationError::Timeout(_) => FailureCategory::Timeout,
            GenerationError::Provider(_) => FailureCategory::Provider,
            GenerationError::Unparseable(_) => FailureCategory::Unparseable,
            GenerationError::WrongShape => FailureCategory::WrongShape,
        }
    }

    /// Message safe to show to the end user. Raw provider output never appears here.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
            GenerationError::Provider(message) if message.trim().is_empty() => {
                PROVIDER_FALLBACK_MESSAGE.to_string()
            }
            GenerationError::Provider(message) => message.clone(),
            GenerationError::Unparseable(_) => UNPARSEABLE_MESSAGE.to_string(),
            GenerationError::WrongShape => WRONG_SHAPE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
