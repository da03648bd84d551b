//! Severity tiers derived from a label and its confidence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CONFIDENCE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
    Uncertain,
}

impl SeverityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::None      => "none",
            SeverityLevel::Low       => "low",
            SeverityLevel::Medium    => "medium",
            SeverityLevel::High      => "high",
            SeverityLevel::Critical  => "critical",
            SeverityLevel::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds (inclusive) of each confidence tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        SeverityThresholds { high: 0.90, medium: 0.75, low: CONFIDENCE_THRESHOLD }
    }
}

impl SeverityThresholds {
    /// Default tiers with the `low` cutoff moved to `confidence_threshold`.
    pub fn with_low(confidence_threshold: f64) -> Self {
        SeverityThresholds { low: confidence_threshold, ..SeverityThresholds::default() }
    }

    /// `healthy` (any ASCII case) is always `None`; otherwise the first tier
    /// whose lower bound the confidence reaches, or `Uncertain`.
    pub fn severity_for(&self, label: &str, confidence: f64) -> SeverityLevel {
        if label.eq_ignore_ascii_case("healthy") {
            SeverityLevel::None
        } else if confidence >= self.high {
            SeverityLevel::High
        } else if confidence >= self.medium {
            SeverityLevel::Medium
        } else if confidence >= self.low {
            SeverityLevel::Low
        } else {
            SeverityLevel::Uncertain
        }
    }
}

/// `SeverityThresholds::default().severity_for(label, confidence)`.
pub fn severity_for(label: &str, confidence: f64) -> SeverityLevel {
    SeverityThresholds::default().severity_for(label, confidence)
}
