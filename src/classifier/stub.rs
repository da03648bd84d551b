use crate::catalog::CropType;

use super::Prediction;

/// Confidence reported by every stub prediction.
pub const STUB_CONFIDENCE: f64 = 0.85;

/// Advisory attached to stub predictions so callers can tell them apart.
pub const STUB_NOTE: &str = "This is a stub prediction. Model not loaded.";

/// Fixed label served for a crop when no model is available.
pub fn stub_label(crop: &CropType) -> &'static str {
    match crop {
        CropType::Tomato => "Early_blight",
        CropType::Potato => "Late_blight",
        CropType::Corn   => "Common_rust",
        CropType::Rice   => "Brown_spot",
        _                => "Early_blight",
    }
}

pub fn stub_prediction(crop: &CropType) -> Prediction {
    Prediction::Stub {
        label: stub_label(crop),
        confidence: STUB_CONFIDENCE,
        note: STUB_NOTE,
    }
}
