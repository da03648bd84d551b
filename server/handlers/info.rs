use serde::{Deserialize, Serialize};
use serde_json::Value;

use crop_disease::{CropType, DiseaseInfo};

use crate::error::ApiError;
use crate::state::AppState;
use crate::util::body::parse_json_object;

#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    pub disease_name: Option<String>,
    pub crop_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub status: &'static str,
    pub disease_info: DiseaseInfo,
}

/// `POST /crop-disease/info`
pub fn handle(body: &[u8], state: &AppState) -> Result<Value, ApiError> {
    let request: InfoRequest = parse_json_object(body)?;
    let name = request
        .disease_name
        .ok_or_else(|| ApiError::BadRequest("Disease name not provided".into()))?;

    let crop = request.crop_type.as_deref().map(CropType::from);
    let disease_info = state.detector.disease_info(&name, crop);
    Ok(serde_json::to_value(InfoResponse { status: "success", disease_info })?)
}
