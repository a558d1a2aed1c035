/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fave_core::FaveError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<FaveError> for ServerError {
    fn from(err: FaveError) -> Self {
        match err {
            FaveError::NotFound { entity, .. } => ServerError::NotFound(format!("{} not found", entity)),
            FaveError::Duplicate(msg) => ServerError::Validation(msg),
            other => ServerError::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation(rejection.body_text())
    }
}

impl ServerError {
    /// Status code and client-facing message
    ///
    /// Every request-level failure is a client fault (422) except token
    /// failures, which are 401. Internal detail is logged, not returned.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Validation(msg)
            | ServerError::Authentication(msg)
            | ServerError::NotFound(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ServerError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Unable to complete request".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Unable to complete request".to_string(),
                )
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Unable to complete request".to_string(),
                )
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Error wrapper for the register and login routes, which report
/// failures under a `message` key instead of `error`
#[derive(Debug)]
pub struct MessageError(pub ServerError);

impl From<ServerError> for MessageError {
    fn from(err: ServerError) -> Self {
        MessageError(err)
    }
}

impl From<JsonRejection> for MessageError {
    fn from(rejection: JsonRejection) -> Self {
        MessageError(rejection.into())
    }
}

impl IntoResponse for MessageError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
