//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::IdOcrError;

use crate::ocr::DEFAULT_MIN_CONFIDENCE;

/// Main configuration for the idocr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdOcrConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Image quality gate configuration.
    pub quality: QualityConfig,

    /// Accepted input files.
    pub input: InputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fragments below this confidence are dropped from the filtered text view.
    pub min_confidence: f32,

    /// Repair OCR character confusions in document numbers before classifying.
    pub auto_correct: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            auto_correct: true,
        }
    }
}

/// Blur and contrast gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Run the gate at all.
    pub enabled: bool,

    /// Blur threshold for an image with no text area.
    pub blur_base_threshold: f64,

    /// Lower clamp for the dynamic blur threshold.
    pub blur_min_threshold: f64,

    /// Upper clamp for the dynamic blur threshold.
    pub blur_max_threshold: f64,

    /// How strongly text coverage relaxes the blur threshold.
    pub text_area_weight: f64,

    /// Minimum grey-level range (max - min).
    pub min_contrast: u8,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blur_base_threshold: 40.0,
            blur_min_threshold: 20.0,
            blur_max_threshold: 60.0,
            text_area_weight: 65.0,
            min_contrast: 40,
        }
    }
}

/// Input file policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum image file size in bytes.
    pub max_file_size: u64,

    /// Accepted image file extensions (lowercase).
    pub allowed_extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5 * 1024 * 1024,
            allowed_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

impl IdOcrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..=1.0).contains(&self.extraction.min_confidence) {
            return Err(IdOcrError::Config(format!(
                "extraction.min_confidence must be within 0..=1, got {}",
                self.extraction.min_confidence
            )));
        }
        if self.quality.blur_min_threshold > self.quality.blur_max_threshold {
            return Err(IdOcrError::Config(format!(
                "quality.blur_min_threshold ({}) exceeds quality.blur_max_threshold ({})",
                self.quality.blur_min_threshold, self.quality.blur_max_threshold
            )));
        }
        if self.input.allowed_extensions.is_empty() {
            return Err(IdOcrError::Config(
                "input.allowed_extensions is empty".to_string(),
            ));
        }
        Ok(())
    }
}
