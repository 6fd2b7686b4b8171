//! End-to-end document processing: quality gate, classification, extraction.

use image::DynamicImage;
use tracing::{info, warn};

use super::classifier::DocumentClassifier;
use super::rules::{AadhaarExtractor, PanExtractor};
use super::DocumentExtractor;
use crate::error::Result;
use crate::models::config::{IdOcrConfig, QualityConfig};
use crate::models::document::{DocumentType, ProcessOutcome, Rejection};
use crate::ocr::{Fragment, OcrEngine, QualityGate};

/// Runs one document through the whole pipeline.
///
/// Holds configuration only; every call owns its fragments.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    classifier: DocumentClassifier,
    aadhaar: AadhaarExtractor,
    pan: PanExtractor,
    quality: QualityGate,
}

impl DocumentProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self {
            classifier: DocumentClassifier::new(),
            aadhaar: AadhaarExtractor::new(),
            pan: PanExtractor::new(),
            quality: QualityGate::default(),
        }
    }

    /// Create a processor from loaded configuration.
    pub fn from_config(config: &IdOcrConfig) -> Self {
        Self::new()
            .with_min_confidence(config.extraction.min_confidence)
            .with_auto_correct(config.extraction.auto_correct)
            .with_quality(config.quality.clone())
    }

    /// Set the confidence threshold of the filtered text view.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.aadhaar = self.aadhaar.with_min_confidence(confidence);
        self.pan = self.pan.with_min_confidence(confidence);
        self
    }

    /// Set whether document numbers are corrected before classification.
    pub fn with_auto_correct(mut self, auto_correct: bool) -> Self {
        self.classifier = self.classifier.with_auto_correct(auto_correct);
        self
    }

    /// Set the image quality gate.
    pub fn with_quality(mut self, config: QualityConfig) -> Self {
        self.quality = QualityGate::new(config);
        self
    }

    /// Classify fragments, correcting document numbers in place.
    pub fn classify(&self, fragments: &mut [Fragment]) -> DocumentType {
        self.classifier.classify(fragments)
    }

    /// Blur and contrast check for an image and its fragments.
    pub fn check_quality(&self, image: &DynamicImage, fragments: &[Fragment]) -> Option<Rejection> {
        self.quality.check(image, fragments)
    }

    /// Classify and extract. Unknown documents are rejected without extraction.
    pub fn process(&self, fragments: &mut [Fragment]) -> ProcessOutcome {
        let outcome = match self.classify(fragments) {
            DocumentType::Aadhaar => ProcessOutcome::Aadhaar(self.aadhaar.extract(fragments)),
            DocumentType::Pan => ProcessOutcome::Pan(self.pan.extract(fragments)),
            DocumentType::Unknown => ProcessOutcome::Rejected(Rejection::Unrecognized),
        };

        info!("Processed {} fragments as {}", fragments.len(), outcome.document_type());
        outcome
    }

    /// Recognize the image, gate on quality, then process the fragments.
    pub fn scan(&self, engine: &dyn OcrEngine, image: &DynamicImage) -> Result<ProcessOutcome> {
        let mut fragments = engine.recognize(image)?;

        if let Some(rejection) = self.check_quality(image, &fragments) {
            warn!("Rejected image: {}", rejection);
            return Ok(ProcessOutcome::Rejected(rejection));
        }

        Ok(self.process(&mut fragments))
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
