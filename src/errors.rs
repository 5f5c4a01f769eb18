#[cfg(feature = "server")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(feature = "server")]
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Invalid UTF-8 in input")]
    InvalidUtf8,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for WhoisError {
    fn from(e: tokio::task::JoinError) -> Self {
        WhoisError::Internal(format!("Parse task failed: {}", e))
    }
}

impl WhoisError {
    /// Short label used for error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WhoisError::InvalidInput(_) => "invalid_input",
            WhoisError::InputTooLarge { .. } | WhoisError::BodyTooLarge { .. } => "input_too_large",
            WhoisError::InvalidUtf8 => "invalid_utf8",
            WhoisError::Serialization(_) => "serialization",
            WhoisError::ConfigError(_) => "config",
            WhoisError::Internal(_) => "internal",
        }
    }
}

#[cfg(feature = "server")]
impl IntoResponse for WhoisError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            WhoisError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            WhoisError::InvalidUtf8 => (StatusCode::BAD_REQUEST, self.to_string()),
            WhoisError::InputTooLarge { .. } | WhoisError::BodyTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
