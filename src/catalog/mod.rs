//! Configuration store: crops, label sequences, remediation text and
//! severity descriptions.
//!
//! A `Catalog` is immutable once built. `Catalog::builtin()` carries the
//! shipped tables; `Catalog::load_json()` replaces them from a file. Both
//! paths run `validate()` before handing the catalog out.

pub mod crop;
mod tables;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub use crop::CropType;

/// Label reported when a predicted index has no entry in the label sequence.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Static guidance attached to a disease label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remediation {
    pub description: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

impl Remediation {
    /// Entry returned for labels the catalog has no text for.
    pub fn unknown() -> Self {
        Remediation {
            description: tables::UNKNOWN_DESCRIPTION.to_owned(),
            treatment: vec![tables::UNKNOWN_TREATMENT.to_owned()],
            prevention: vec![tables::UNKNOWN_PREVENTION.to_owned()],
        }
    }
}

/// The label sequence chosen for a crop, and whether it was borrowed from
/// the default crop because the requested one has none of its own.
#[derive(Debug, Clone, Copy)]
pub struct LabelSequence<'a> {
    pub crop: &'a CropType,
    pub labels: &'a [String],
    pub fallback: bool,
}

impl<'a> LabelSequence<'a> {
    /// Positional lookup; out-of-range indices resolve to `"Unknown"`.
    pub fn label_at(&self, index: usize) -> &'a str {
        self.labels.get(index).map(String::as_str).unwrap_or(UNKNOWN_LABEL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    crops: Vec<CropType>,
    default_crop: CropType,
    labels: BTreeMap<CropType, Vec<String>>,
    remediation: HashMap<String, Remediation>,
    severity_info: BTreeMap<String, String>,
    #[serde(skip, default = "Remediation::unknown")]
    unknown: Remediation,
}

impl Catalog {
    /// The tables shipped with the service.
    pub fn builtin() -> Catalog {
        let labels = tables::DISEASE_LABELS
            .iter()
            .map(|(crop, seq)| {
                (CropType::from(*crop), seq.iter().map(|s| (*s).to_owned()).collect())
            })
            .collect();

        let remediation = tables::REMEDIATION
            .iter()
            .map(|(label, description, treatment, prevention)| {
                let entry = Remediation {
                    description: (*description).to_owned(),
                    treatment: treatment.iter().map(|s| (*s).to_owned()).collect(),
                    prevention: prevention.iter().map(|s| (*s).to_owned()).collect(),
                };
                ((*label).to_owned(), entry)
            })
            .collect();

        let severity_info = tables::SEVERITY_INFO
            .iter()
            .map(|(level, text)| ((*level).to_owned(), (*text).to_owned()))
            .collect();

        Catalog {
            crops: tables::SUPPORTED_CROPS.iter().map(|c| CropType::from(*c)).collect(),
            default_crop: CropType::from(tables::DEFAULT_CROP),
            labels,
            remediation,
            severity_info,
            unknown: Remediation::unknown(),
        }
    }

    /// Parses and validates a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Catalog> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and validates a catalog file previously written by `save_json`
    /// (or authored by hand in the same shape).
    pub fn load_json(path: &Path) -> Result<Catalog> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serializes the catalog to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Checks the tables for structural problems.
    ///
    /// Hard errors: no crops, a label sequence that is empty or repeats a
    /// label, a sequence for a crop outside the supported list, or a default
    /// crop without its own sequence. Labels lacking remediation text are
    /// only logged; they resolve to the default entry at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.crops.is_empty() {
            return Err(Error::Catalog("no supported crops configured".into()));
        }

        for (crop, seq) in &self.labels {
            if !self.crops.contains(crop) {
                return Err(Error::Catalog(format!(
                    "label sequence given for unsupported crop '{}'", crop
                )));
            }
            if seq.is_empty() {
                return Err(Error::Catalog(format!("crop '{}' has an empty label sequence", crop)));
            }
            let mut seen = HashSet::new();
            for label in seq {
                if !seen.insert(label.as_str()) {
                    return Err(Error::Catalog(format!(
                        "crop '{}' lists label '{}' more than once", crop, label
                    )));
                }
            }
        }

        if !self.labels.contains_key(&self.default_crop) {
            return Err(Error::Catalog(format!(
                "default crop '{}' has no label sequence", self.default_crop
            )));
        }

        for label in self.labels.values().flatten() {
            if !self.remediation.contains_key(label) {
                warn!(label = %label, "no remediation text configured; default guidance will be served");
            }
        }

        Ok(())
    }

    pub fn crops(&self) -> &[CropType] {
        &self.crops
    }

    pub fn default_crop(&self) -> &CropType {
        &self.default_crop
    }

    /// Crops with a dedicated label sequence, in key order.
    pub fn label_sequences(&self) -> &BTreeMap<CropType, Vec<String>> {
        &self.labels
    }

    /// Label sequence for `crop`, falling back to the default crop's
    /// sequence when `crop` has none.
    pub fn labels_for<'a>(&'a self, crop: &'a CropType) -> LabelSequence<'a> {
        match self.labels.get(crop) {
            Some(labels) => LabelSequence { crop, labels, fallback: false },
            None => LabelSequence {
                crop: &self.default_crop,
                labels: self.labels.get(&self.default_crop).map(Vec::as_slice).unwrap_or(&[]),
                fallback: true,
            },
        }
    }

    /// Exact, case-sensitive lookup of remediation text.
    pub fn remediation_for(&self, label: &str) -> &Remediation {
        self.remediation.get(label).unwrap_or(&self.unknown)
    }

    /// Display text per severity level (low, medium, high, critical).
    pub fn severity_info(&self) -> &BTreeMap<String, String> {
        &self.severity_info
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.crops().len(), 10);
        assert_eq!(catalog.default_crop(), &CropType::Tomato);
    }

    #[test]
    fn test_labels_for_dedicated_crop() {
        let catalog = Catalog::builtin();
        let crop = CropType::Potato;
        let seq = catalog.labels_for(&crop);
        assert!(!seq.fallback);
        assert_eq!(seq.labels, ["Early_blight", "Late_blight", "Healthy"]);
        assert_eq!(seq.label_at(1), "Late_blight");
    }

    #[test]
    fn test_labels_for_falls_back_to_default_crop() {
        let catalog = Catalog::builtin();
        for name in ["wheat", "cotton", "banana"] {
            let crop = CropType::from(name);
            let seq = catalog.labels_for(&crop);
            assert!(seq.fallback);
            assert_eq!(seq.crop, &CropType::Tomato);
            assert_eq!(seq.labels.len(), 10);
        }
    }

    #[test]
    fn test_label_at_out_of_range_is_unknown() {
        let catalog = Catalog::builtin();
        let crop = CropType::Corn;
        let seq = catalog.labels_for(&crop);
        assert_eq!(seq.label_at(3), "Healthy");
        assert_eq!(seq.label_at(4), UNKNOWN_LABEL);
        assert_eq!(seq.label_at(usize::MAX), UNKNOWN_LABEL);
    }

    #[test]
    fn test_label_resolution_is_stable() {
        let catalog = Catalog::builtin();
        let crop = CropType::Rice;
        for index in 0..4 {
            let a = catalog.labels_for(&crop).label_at(index);
            let b = catalog.labels_for(&crop).label_at(index);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_remediation_for_known_label() {
        let catalog = Catalog::builtin();
        let healthy = catalog.remediation_for("Healthy");
        assert_eq!(healthy.description, "Plant appears healthy with no visible disease symptoms");
        assert_eq!(healthy.treatment, ["Continue regular monitoring", "Maintain good cultural practices"]);
        assert_eq!(
            healthy.prevention,
            ["Regular inspection", "Proper nutrition and watering", "Good sanitation practices"]
        );
    }

    #[test]
    fn test_remediation_for_unknown_label() {
        let catalog = Catalog::builtin();
        let entry = catalog.remediation_for("Leaf_smut");
        assert_eq!(entry, &Remediation::unknown());
        assert_eq!(entry.description, "Disease information not available");
        assert_eq!(entry.treatment, ["Consult agricultural expert"]);
        assert_eq!(entry.prevention, ["Follow general crop management practices"]);
    }

    #[test]
    fn test_remediation_lookup_is_case_sensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.remediation_for("healthy"), &Remediation::unknown());
        assert_eq!(catalog.remediation_for("late_blight"), &Remediation::unknown());
    }

    #[test]
    fn test_severity_info_table() {
        let catalog = Catalog::builtin();
        let info = catalog.severity_info();
        assert_eq!(info.len(), 4);
        assert_eq!(info["critical"], "Critical infection, consider removing affected plants");
        assert!(!info.contains_key("none"));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        Catalog::builtin().save_json(&path).unwrap();

        let loaded = Catalog::load_json(&path).unwrap();
        assert_eq!(loaded.crops(), Catalog::builtin().crops());
        assert_eq!(loaded.remediation_for("Late_blight"), Catalog::builtin().remediation_for("Late_blight"));
        assert_eq!(loaded.remediation_for("nope"), &Remediation::unknown());
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let json = r#"{
            "crops": ["tomato"],
            "default_crop": "tomato",
            "labels": {"tomato": ["Healthy", "Healthy"]},
            "remediation": {},
            "severity_info": {}
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_empty_sequence() {
        let json = r#"{
            "crops": ["tomato"],
            "default_crop": "tomato",
            "labels": {"tomato": []},
            "remediation": {},
            "severity_info": {}
        }"#;
        assert!(matches!(Catalog::from_json_str(json), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_rejects_default_crop_without_sequence() {
        let json = r#"{
            "crops": ["tomato", "potato"],
            "default_crop": "tomato",
            "labels": {"potato": ["Healthy"]},
            "remediation": {},
            "severity_info": {}
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("default crop"));
    }

    #[test]
    fn test_rejects_sequence_for_unsupported_crop() {
        let json = r#"{
            "crops": ["tomato"],
            "default_crop": "tomato",
            "labels": {"tomato": ["Healthy"], "okra": ["Healthy"]},
            "remediation": {},
            "severity_info": {}
        }"#;
        assert!(matches!(Catalog::from_json_str(json), Err(Error::Catalog(_))));
    }
}
