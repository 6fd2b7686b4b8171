//! Joining fragments into searchable text.

use super::Fragment;

/// Fragments below this confidence are left out of the filtered view.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.40;

/// Join every fragment's text with single spaces, in fragment order.
pub fn assemble_all(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join the text of fragments with `confidence >= min_confidence`.
pub fn assemble_confident(fragments: &[Fragment], min_confidence: f32) -> String {
    fragments
        .iter()
        .filter(|f| f.confidence >= min_confidence)
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Both text views of one request, built after correction.
#[derive(Debug, Clone)]
pub struct TextViews<'a> {
    /// The fragments the views were built from.
    pub fragments: &'a [Fragment],
    /// Unfiltered assembled text.
    pub all: String,
    /// Confidence-filtered assembled text.
    pub confident: String,
}

impl<'a> TextViews<'a> {
    pub fn new(fragments: &'a [Fragment], min_confidence: f32) -> Self {
        Self {
            fragments,
            all: assemble_all(fragments),
            confident: assemble_confident(fragments, min_confidence),
        }
    }
}
