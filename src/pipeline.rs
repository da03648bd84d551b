//! Classification pipeline: image bytes in, graded and annotated detection out.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, CropType, Remediation};
use crate::classifier::{ModelHandle, Prediction};
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::preprocess::{self, ImageTensor};
use crate::severity::{SeverityLevel, SeverityThresholds};

/// Which path produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Model,
    Stub,
}

/// Result of classifying one image. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub disease: String,
    pub confidence: f64,
    pub crop: CropType,
    pub severity: SeverityLevel,
    pub recommendations: Remediation,
    /// Present only on stub predictions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub source: PredictionSource,
}

/// Reference text for a named disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseInfo {
    pub disease_name: String,
    pub crop_type: Option<CropType>,
    pub description: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub severity_info: BTreeMap<String, String>,
}

/// Rounds to 4 decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Owns the catalog, the model handle and the severity tiers. Shared by
/// reference across request threads; nothing in it changes after
/// construction except the one-time model load.
#[derive(Debug)]
pub struct Detector {
    catalog: Catalog,
    model: ModelHandle,
    thresholds: SeverityThresholds,
}

impl Detector {
    /// Detector whose model is loaded lazily from `config.model_path`.
    pub fn new(config: &DetectorConfig, catalog: Catalog) -> Detector {
        Detector::with_model(
            catalog,
            ModelHandle::from_path(&config.model_path),
            SeverityThresholds::with_low(config.confidence_threshold),
        )
    }

    pub fn with_model(catalog: Catalog, model: ModelHandle, thresholds: SeverityThresholds) -> Detector {
        let borrowing: Vec<&str> = catalog
            .crops()
            .iter()
            .filter(|c| !catalog.label_sequences().contains_key(*c))
            .map(CropType::as_str)
            .collect();
        if !borrowing.is_empty() {
            info!(
                crops = ?borrowing,
                default = %catalog.default_crop(),
                "crops without their own label sequence will use the default crop's labels"
            );
        }
        Detector { catalog, model, thresholds }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Forces the one-time model load. Returns whether a model is in use.
    pub fn warm_up(&self) -> bool {
        self.model.state().is_loaded()
    }

    /// Decodes and classifies `image`. `crop` defaults to the catalog's
    /// default crop. Decode failures are errors even when no model is loaded.
    pub fn detect(&self, image: &[u8], crop: Option<CropType>) -> Result<Detection> {
        let tensor = preprocess::normalize(image)?;
        self.detect_tensor(&tensor, crop)
    }

    pub fn detect_tensor(&self, tensor: &ImageTensor, crop: Option<CropType>) -> Result<Detection> {
        let crop = crop.unwrap_or_else(|| self.catalog.default_crop().clone());

        let (disease, confidence, note, source) = match self.model.classify(tensor, &crop)? {
            Prediction::Model { index, confidence } => {
                let sequence = self.catalog.labels_for(&crop);
                if sequence.fallback {
                    debug!(crop = %crop, using = %sequence.crop, "no label sequence for crop");
                }
                let label = sequence.label_at(index).to_owned();
                (label, confidence, None, PredictionSource::Model)
            }
            Prediction::Stub { label, confidence, note } => {
                (label.to_owned(), confidence, Some(note.to_owned()), PredictionSource::Stub)
            }
        };

        // Tiers are graded on the raw confidence; only the reported value is rounded.
        let severity = self.thresholds.severity_for(&disease, confidence);
        let confidence = match source {
            PredictionSource::Model => round4(confidence),
            PredictionSource::Stub => confidence,
        };
        let recommendations = self.catalog.remediation_for(&disease).clone();

        debug!(
            crop = %crop,
            disease = %disease,
            confidence,
            severity = %severity,
            source = ?source,
            "classified image"
        );

        Ok(Detection { disease, confidence, crop, severity, recommendations, note, source })
    }

    /// Looks up the remediation text for `name` (exact match) together with
    /// the severity description table.
    pub fn disease_info(&self, name: &str, crop: Option<CropType>) -> DiseaseInfo {
        let entry = self.catalog.remediation_for(name);
        DiseaseInfo {
            disease_name: name.to_owned(),
            crop_type: crop,
            description: entry.description.clone(),
            treatment: entry.treatment.clone(),
            prevention: entry.prevention.clone(),
            severity_info: self.catalog.severity_info().clone(),
        }
    }
}
