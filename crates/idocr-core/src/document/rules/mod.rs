//! Rule-based field extractors for identity cards.

pub mod aadhaar;
pub mod pan;
pub mod patterns;
pub mod spans;

pub use aadhaar::{AadhaarExtractor, AadhaarNumberCorrector};
pub use pan::{PanExtractor, PanNumberCorrector};
pub use patterns::*;
pub use spans::{bare_name_run, last_occurrence_end, span_before, NameCase};

use tracing::debug;

use crate::ocr::Fragment;

/// One step of a field cascade.
pub type Strategy<C> = fn(&C) -> Option<String>;

/// Run `strategies` in order and return the first value found.
pub fn first_success<C>(
    field: &str,
    context: &C,
    strategies: &[(&str, Strategy<C>)],
) -> Option<String> {
    let found = strategies.iter().find_map(|(stage, strategy)| {
        let value = strategy(context)?;
        debug!("{}: '{}' via {}", field, value, stage);
        Some(value)
    });
    if found.is_none() {
        debug!("{}: not found", field);
    }
    found
}

/// Repairs OCR character confusions in document-number fragments.
pub trait NumberCorrector {
    /// Substitute confusable characters in upper-cased, trimmed text.
    fn rectify(&self, text: &str) -> String;

    /// Whether the text is exactly a document number shape.
    fn is_canonical(&self, text: &str) -> bool;

    /// Stop scanning after the first corrected fragment.
    fn stop_after_first(&self) -> bool {
        false
    }

    /// Rewrite qualifying fragments in place and return how many matched.
    ///
    /// Only `text` is touched; confidence and location stay as recognized.
    fn correct(&self, fragments: &mut [Fragment]) -> usize {
        let mut matched = 0;
        for fragment in fragments.iter_mut() {
            let repaired = self.rectify(&fragment.text.trim().to_uppercase());
            if !self.is_canonical(&repaired) {
                continue;
            }
            if fragment.text != repaired {
                debug!("Corrected fragment '{}' -> '{}'", fragment.text, repaired);
            }
            fragment.text = repaired;
            matched += 1;
            if self.stop_after_first() {
                break;
            }
        }
        matched
    }
}
