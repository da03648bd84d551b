pub mod error;
pub mod config;
pub mod catalog;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod preprocess;
pub mod classifier;
pub mod severity;
pub mod pipeline;

// Convenience re-exports
pub use error::{Error, Result};
pub use config::DetectorConfig;
pub use catalog::{Catalog, CropType, Remediation};
pub use network::Network;
pub use preprocess::{normalize, ImageTensor};
pub use classifier::{Classifier, ModelHandle, ModelState, Prediction};
pub use severity::{severity_for, SeverityLevel, SeverityThresholds};
pub use pipeline::{Detection, Detector, DiseaseInfo, PredictionSource};
