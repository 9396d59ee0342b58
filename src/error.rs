use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Catalog API returned status {status}: {message}")]
    ExternalApi { status: u16, message: String },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str) -> Self {
        AppError::NotFound { entity }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ExternalApi { .. } | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("Token signing error: {}", e))
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::Internal(format!("Password hashing error: {}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::ExternalApi { status: upstream, message } => {
                tracing::warn!(upstream_status = upstream, error = %message, "Catalog request failed");
                json!({ "error": "Catalog service request failed", "status": upstream })
            }
            AppError::HttpClient(e) => {
                tracing::warn!(error = %e, "Catalog transport failure");
                json!({ "error": "Catalog service unavailable" })
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                json!({ "error": "Internal server error" })
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                json!({ "error": "Internal server error" })
            }
            AppError::NotFound { .. }
            | AppError::InvalidInput(_)
            | AppError::Unauthorized(_)
            | AppError::Conflict(_) => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
