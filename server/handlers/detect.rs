use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crop_disease::{CropType, Detection, Remediation, SeverityLevel};

use crate::error::ApiError;
use crate::state::AppState;
use crate::util::body::parse_json_object;
use crate::util::payload::decode_image_payload;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub image: Option<String>,
    pub crop_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub status: &'static str,
    pub disease_detected: String,
    pub confidence: f64,
    pub crop_type: CropType,
    pub severity: SeverityLevel,
    pub recommendations: Remediation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<Detection> for DetectResponse {
    fn from(d: Detection) -> Self {
        DetectResponse {
            status: "success",
            disease_detected: d.disease,
            confidence: d.confidence,
            crop_type: d.crop,
            severity: d.severity,
            recommendations: d.recommendations,
            note: d.note,
        }
    }
}

/// `POST /crop-disease/detect`
pub fn handle(body: &[u8], state: &AppState) -> Result<Value, ApiError> {
    let request: DetectRequest = parse_json_object(body)?;
    let image = request
        .image
        .ok_or_else(|| ApiError::BadRequest("No image provided".into()))?;

    let bytes = decode_image_payload(&image)?;
    debug!(bytes = bytes.len(), "decoded image payload");

    let crop = request.crop_type.as_deref().map(CropType::from);
    let detection = state.detector.detect(&bytes, crop)?;
    Ok(serde_json::to_value(DetectResponse::from(detection))?)
}
