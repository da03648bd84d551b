use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crop_disease::CropType;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CropsResponse<'a> {
    pub status: &'static str,
    pub crops: &'a [CropType],
    pub default_crop: &'a CropType,
    /// Only crops with a dedicated sequence; the rest use `default_crop`'s.
    pub labels: &'a BTreeMap<CropType, Vec<String>>,
}

/// `GET /crop-disease/crops`
pub fn handle(state: &AppState) -> Result<Value, ApiError> {
    let catalog = state.detector.catalog();
    Ok(serde_json::to_value(CropsResponse {
        status: "success",
        crops: catalog.crops(),
        default_crop: catalog.default_crop(),
        labels: catalog.label_sequences(),
    })?)
}
