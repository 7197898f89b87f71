use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlycoraError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Rendering failure: {0}")]
    RenderingFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GlycoraError>;

/// Errors surfaced to HTTP clients, each carrying the message placed in the
/// `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) | ApiError::ServiceUnavailable(m) | ApiError::Internal(m) => m,
        }
    }
}

impl From<GlycoraError> for ApiError {
    fn from(e: GlycoraError) -> Self {
        match e {
            GlycoraError::InvalidInput(msg) => ApiError::BadRequest(msg),
            GlycoraError::ModelUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.message());
        }
        (status, Json(ErrorResponse { error: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api: ApiError = GlycoraError::InvalidInput("missing field `bmi`".into()).into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "missing field `bmi`");
    }

    #[test]
    fn test_model_unavailable_maps_to_503() {
        let api: ApiError = GlycoraError::ModelUnavailable("no weights".into()).into();
        assert_eq!(api.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_inference_maps_to_internal() {
        let api: ApiError = GlycoraError::Inference("probability 1.7 out of range".into()).into();
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.message().contains("1.7"));
    }
}
