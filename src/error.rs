use crate::db::models::api::{ErrorDetail, ErrorResponse};
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Validation failed with {} errors", .errors.len())]
    Validation { errors: Vec<ErrorDetail> },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let response = match self {
            AppError::Unauthorized { ref message } => ErrorResponse::unauthorized(message),
            AppError::Jwt(ref e) => {
                tracing::debug!("Rejected token: {}", e);
                ErrorResponse::unauthorized("Unauthorized")
            }
            AppError::Validation { errors } => ErrorResponse::validation_failed(errors),
            AppError::NotFound { ref resource } => {
                ErrorResponse::not_found(&format!("{} not found", resource))
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ErrorResponse::internal_error()
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                ErrorResponse::internal_error()
            }
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                ErrorResponse::internal_error()
            }
            AppError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {}", e);
                ErrorResponse::internal_error()
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ErrorResponse::internal_error()
            }
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Single field-level validation failure.
    pub fn invalid_field(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            errors: vec![ErrorDetail {
                field: Some(field.into()),
                code: code.into(),
                message: message.into(),
            }],
        }
    }

    pub fn validation(errors: Vec<ErrorDetail>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
