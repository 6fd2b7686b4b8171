//! Data models and configuration.

pub mod config;
pub mod document;

pub use config::{ExtractionConfig, IdOcrConfig, InputConfig, QualityConfig};
pub use document::{
    AadhaarRecord, DocumentType, PanRecord, ProcessOutcome, Rejection, PAN_DOCUMENT_TAG,
};
