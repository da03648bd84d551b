use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tiny_http::Request;

use crate::error::ApiError;

/// Reads the whole request body, refusing anything over `limit` bytes.
pub fn read_body(request: &mut Request, limit: usize) -> Result<Vec<u8>, ApiError> {
    if request.body_length().map_or(false, |len| len > limit) {
        return Err(ApiError::PayloadTooLarge);
    }

    let mut body = Vec::new();
    request
        .as_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| ApiError::Internal(format!("failed to read request body: {}", e)))?;

    if body.len() > limit {
        return Err(ApiError::PayloadTooLarge);
    }
    Ok(body)
}

/// Parses `body` as a JSON object and deserializes it into `T`.
pub fn parse_json_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Internal(format!("invalid JSON body: {}", e)))?;
    if !value.is_object() {
        return Err(ApiError::Internal("request body must be a JSON object".into()));
    }
    Ok(serde_json::from_value(value)?)
}
