use std::path::PathBuf;

/// Side length, in pixels, of the square image fed to the classifier.
pub const IMAGE_SIZE: u32 = 224;

/// Colour channels of the classifier input (RGB).
pub const IMAGE_CHANNELS: usize = 3;

/// Flat length of one normalized image: 224 × 224 × 3.
pub const INPUT_LEN: usize = (IMAGE_SIZE as usize) * (IMAGE_SIZE as usize) * IMAGE_CHANNELS;

/// Lowest confidence that still counts as a detection (the `low` severity cutoff).
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Where the server looks for the trained network unless told otherwise.
pub const DEFAULT_MODEL_PATH: &str = "./models/crop_disease_model.json";

/// Settings the detector needs at construction time.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Path to the JSON network artifact. A missing file is not an error.
    pub model_path: PathBuf,
    /// Lower bound of the `low` severity tier.
    pub confidence_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            confidence_threshold: CONFIDENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_len_matches_tensor_shape() {
        assert_eq!(INPUT_LEN, 150_528);
    }

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.model_path, PathBuf::from("./models/crop_disease_model.json"));
        assert_eq!(config.confidence_threshold, 0.6);
    }
}
