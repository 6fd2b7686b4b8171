//! Core library for identity card OCR processing.
//!
//! This crate provides:
//! - OCR fragment model and text assembly views
//! - Image quality gating (blur and contrast)
//! - Document number correction for common OCR confusions
//! - Aadhaar and PAN classification and field extraction

pub mod error;
pub mod models;
pub mod ocr;
pub mod document;

pub use error::{IdOcrError, Result};
pub use models::config::IdOcrConfig;
pub use models::document::{AadhaarRecord, DocumentType, PanRecord, ProcessOutcome, Rejection};
pub use ocr::{Fragment, OcrEngine, QualityGate, RecordedOcr, TextViews};
pub use document::{classify_document, DocumentClassifier, DocumentExtractor, DocumentProcessor};
