use serde_json::{json, Value};
use thiserror::Error;

/// Failures surfaced to HTTP clients as `{"error": ..., "status": "failed"}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required field is missing; the caller can fix the request.
    #[error("{0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    /// Anything else: bad JSON, bad base64, undecodable image, model failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_)   => 400,
            ApiError::NotFound        => 404,
            ApiError::PayloadTooLarge => 413,
            ApiError::Internal(_)     => 500,
        }
    }

    pub fn body(&self) -> Value {
        json!({
            "error": self.to_string(),
            "status": "failed"
        })
    }
}

impl From<crop_disease::Error> for ApiError {
    fn from(err: crop_disease::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(ApiError::NotFound.status_code(), 404);
        assert_eq!(ApiError::PayloadTooLarge.status_code(), 413);
        assert_eq!(ApiError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_body_shape() {
        let body = ApiError::BadRequest("No image provided".into()).body();
        assert_eq!(body, json!({"error": "No image provided", "status": "failed"}));
    }

    #[test]
    fn test_library_error_is_internal() {
        let err: ApiError = crop_disease::Error::Decode("bad header".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert!(err.to_string().contains("bad header"));
    }
}
