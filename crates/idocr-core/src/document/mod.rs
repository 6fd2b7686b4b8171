//! Identity document classification and field extraction.

mod classifier;
mod processor;
pub mod rules;

pub use classifier::{classify_document, DocumentClassifier};
pub use processor::DocumentProcessor;

use regex::Regex;

use crate::models::document::DocumentType;
use crate::ocr::{assemble_all, Fragment};
use rules::NumberCorrector;

/// Per-document-type extraction rules.
pub trait DocumentExtractor {
    /// Structured record this extractor produces.
    type Record;

    /// Document type handled by this extractor.
    fn document_type(&self) -> DocumentType;

    /// Corrector for this document's number format.
    fn corrector(&self) -> &dyn NumberCorrector;

    /// Pattern whose presence identifies the document.
    fn number_pattern(&self) -> &Regex;

    /// Correct numbers (when enabled) and test the unfiltered text for the number shape.
    fn detect(&self, fragments: &mut [Fragment], auto_correct: bool) -> bool {
        if auto_correct {
            self.corrector().correct(fragments);
        }
        self.number_pattern().is_match(&assemble_all(fragments))
    }

    /// Run every field cascade. Absent fields are `None`.
    fn extract(&self, fragments: &[Fragment]) -> Self::Record;
}
