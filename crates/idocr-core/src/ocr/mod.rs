//! OCR fragments and the boundary to the external recognition engine.

mod assemble;
pub mod input;
pub mod quality;

pub use assemble::{assemble_all, assemble_confident, TextViews, DEFAULT_MIN_CONFIDENCE};
pub use input::{check_upload, load_image};
pub use quality::{QualityGate, QualityReport};

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Quadrilateral corners: top-left, top-right, bottom-right, bottom-left.
pub type Quad = [[f32; 2]; 4];

/// One recognized text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Corner points of the span in image coordinates.
    #[serde(default)]
    pub bbox: Quad,

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl Fragment {
    /// Create a fragment with the given text and confidence and an empty box.
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox: Quad::default(),
            text: text.into(),
            confidence,
        }
    }

    /// Attach a bounding box.
    pub fn with_bbox(mut self, bbox: Quad) -> Self {
        self.bbox = bbox;
        self
    }

    /// Horizontal extent measured along the top edge.
    pub fn width(&self) -> f32 {
        self.bbox[1][0] - self.bbox[0][0]
    }

    /// Vertical extent measured along the right edge.
    pub fn height(&self) -> f32 {
        self.bbox[2][1] - self.bbox[1][1]
    }
}

/// External OCR collaborator turning an image into ordered fragments.
pub trait OcrEngine {
    /// Recognize text in the image, in approximate reading order.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<Fragment>>;
}

/// Replays fragments captured earlier from an external engine.
#[derive(Debug, Clone, Default)]
pub struct RecordedOcr {
    fragments: Vec<Fragment>,
}

impl RecordedOcr {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Parse a JSON array of fragments.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a JSON fragment dump from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

impl OcrEngine for RecordedOcr {
    fn recognize(&self, _image: &DynamicImage) -> Result<Vec<Fragment>> {
        Ok(self.fragments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_dimensions() {
        let fragment = Fragment::new("RAM", 0.9)
            .with_bbox([[10.0, 5.0], [60.0, 5.0], [60.0, 25.0], [10.0, 25.0]]);
        assert_eq!(fragment.width(), 50.0);
        assert_eq!(fragment.height(), 20.0);
    }

    #[test]
    fn test_recorded_ocr_from_json() {
        let json = r#"[
            {"bbox": [[0,0],[10,0],[10,5],[0,5]], "text": "Government of India", "confidence": 0.98},
            {"text": "RAM KUMAR", "confidence": 0.35}
        ]"#;
        let ocr = RecordedOcr::from_json(json).unwrap();
        assert_eq!(ocr.fragments().len(), 2);
        assert_eq!(ocr.fragments()[1].bbox, Quad::default());
        assert_eq!(ocr.fragments()[1].text, "RAM KUMAR");

        let image = DynamicImage::new_luma8(1, 1);
        let recognized = ocr.recognize(&image).unwrap();
        assert_eq!(recognized, ocr.fragments());
    }

    #[test]
    fn test_recorded_ocr_rejects_malformed_json() {
        assert!(RecordedOcr::from_json("{\"text\": 1}").is_err());
    }
}
