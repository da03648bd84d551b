use serde_json::{json, Value};

/// `GET /crop-disease/health`
pub fn handle() -> Value {
    json!({
        "status": "healthy",
        "service": "crop-disease-detection"
    })
}
