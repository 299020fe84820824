use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// BGG answered with something other than 200 or 202
    #[error("Error fetching data: {status}")]
    UpstreamUnavailable { status: u16 },

    /// A 200 response whose body is not well-formed XML
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Connection failure or per-attempt timeout
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request still queued after {attempts} attempts")]
    QueuedTooLong { attempts: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UpstreamUnavailable { .. } | AppError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MalformedResponse(_)
            | AppError::Transport(_)
            | AppError::QueuedTooLong { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
