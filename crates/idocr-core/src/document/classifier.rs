//! Document type detection from the document-number shape.

use tracing::debug;

use super::rules::{AadhaarExtractor, PanExtractor};
use super::DocumentExtractor;
use crate::models::document::DocumentType;
use crate::ocr::Fragment;

/// Decides between Aadhaar, PAN and unknown.
///
/// Aadhaar is always tried first. Each attempt runs that document's number
/// corrector over the fragments before testing the unfiltered text, so the
/// fragments handed back may have been rewritten.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    auto_correct: bool,
}

impl DocumentClassifier {
    /// Create a classifier with number correction enabled.
    pub fn new() -> Self {
        Self { auto_correct: true }
    }

    /// Set whether to correct document numbers before testing.
    pub fn with_auto_correct(mut self, auto_correct: bool) -> Self {
        self.auto_correct = auto_correct;
        self
    }

    pub fn classify(&self, fragments: &mut [Fragment]) -> DocumentType {
        let document_type = if AadhaarExtractor::new().detect(fragments, self.auto_correct) {
            DocumentType::Aadhaar
        } else if PanExtractor::new().detect(fragments, self.auto_correct) {
            DocumentType::Pan
        } else {
            DocumentType::Unknown
        };

        debug!("Classified {} fragments as {}", fragments.len(), document_type);
        document_type
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify fragments with number correction enabled.
pub fn classify_document(fragments: &mut [Fragment]) -> DocumentType {
    DocumentClassifier::new().classify(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(texts: &[&str]) -> Vec<Fragment> {
        texts.iter().map(|t| Fragment::new(*t, 0.9)).collect()
    }

    #[test]
    fn test_classify_aadhaar() {
        let mut fragments = fragments(&["Government of India", "1234 5678 9012"]);
        assert_eq!(classify_document(&mut fragments), DocumentType::Aadhaar);
    }

    #[test]
    fn test_classify_split_aadhaar_blocks() {
        let mut fragments = fragments(&["1234", "5678", "9O12"]);
        assert_eq!(classify_document(&mut fragments), DocumentType::Aadhaar);
        assert_eq!(fragments[2].text, "9012");
    }

    #[test]
    fn test_classify_pan_after_correction() {
        let mut fragments = fragments(&["INCOME TAX DEPARTMENT", "ABCDE12O4F"]);
        assert_eq!(classify_document(&mut fragments), DocumentType::Pan);
        assert_eq!(fragments[1].text, "ABCDE1204F");
    }

    #[test]
    fn test_aadhaar_takes_priority() {
        let mut fragments = fragments(&["ABCDE1234F", "1234 5678 9012"]);
        assert_eq!(classify_document(&mut fragments), DocumentType::Aadhaar);
    }

    #[test]
    fn test_classify_unknown() {
        let mut fragments = fragments(&["Random receipt text", "Total: 500"]);
        assert_eq!(classify_document(&mut fragments), DocumentType::Unknown);
        assert_eq!(fragments[0].text, "Random receipt text");
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify_document(&mut []), DocumentType::Unknown);
    }

    #[test]
    fn test_without_correction() {
        let mut fragments = fragments(&["ABCDE12O4F"]);
        let classifier = DocumentClassifier::new().with_auto_correct(false);
        assert_eq!(classifier.classify(&mut fragments), DocumentType::Unknown);
        assert_eq!(fragments[0].text, "ABCDE12O4F");
    }

    #[test]
    fn test_classify_twice_is_stable() {
        let mut fragments = fragments(&["1234 5678 9O12", "abcde1234f"]);
        let first = classify_document(&mut fragments);
        let snapshot = fragments.clone();
        assert_eq!(classify_document(&mut fragments), first);
        assert_eq!(fragments, snapshot);
    }
}
