//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeline::PipelineError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Errors returned to upload clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No data received")]
    EmptyBody,

    #[error("Upload is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("No {0} column found")]
    MissingChannel(String),

    #[error("Invalid {channel} value {value:?} on line {line}")]
    InvalidValue {
        channel: String,
        line: usize,
        value: String,
    },

    #[error("{0} signal flat")]
    FlatSignal(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(e) if !e.is_input_error() => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Upload rejected ({}): {}", status.as_u16(), self);
        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::SignalError;

    #[test]
    fn test_input_errors_are_bad_request() {
        assert_eq!(ApiError::EmptyBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MissingChannel("IR".to_string()).to_string(),
            "No IR column found"
        );
        let short = ApiError::from(PipelineError::Signal(SignalError::TooShort { len: 3, min: 28 }));
        assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_error_is_server_error() {
        let err = ApiError::from(PipelineError::InvalidConfig("bad".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
