//! PAN (alphanumeric tax ID) correction and field extraction.

use regex::Regex;
use tracing::info;

use super::patterns::{
    BARE_DATE, FATHERS_NAME_BOUNDARY, FATHERS_NAME_LABEL, NAME_LABEL, PAN_DOB_BOUNDARY,
    PAN_ISSUER, PAN_LABELED_DOB, PAN_NUMBER, PAN_NUMBER_EXACT, PAN_TITLE,
};
use super::spans::{bare_name_run, span_before, NameCase};
use super::{first_success, NumberCorrector, Strategy};
use crate::document::DocumentExtractor;
use crate::models::document::{DocumentType, PanRecord};
use crate::ocr::{Fragment, TextViews, DEFAULT_MIN_CONFIDENCE};

/// Fixes letters read in place of digits in the four-digit segment.
///
/// Only characters 6 to 9 are touched (`O`/`o` to `0`, `I`/`l` to `1`), and
/// scanning stops at the first fragment that becomes a valid PAN.
///
/// `correct` upper-cases text before `rectify`, so a lower-case `l` arrives
/// as `L` and is left alone; the lower-case arms only apply to direct calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanNumberCorrector;

impl NumberCorrector for PanNumberCorrector {
    fn rectify(&self, text: &str) -> String {
        text.chars()
            .enumerate()
            .map(|(i, c)| match c {
                'O' | 'o' if (5..9).contains(&i) => '0',
                'I' | 'l' if (5..9).contains(&i) => '1',
                c => c,
            })
            .collect()
    }

    fn is_canonical(&self, text: &str) -> bool {
        PAN_NUMBER_EXACT.is_match(text)
    }

    fn stop_after_first(&self) -> bool {
        true
    }
}

/// PAN field extractor.
#[derive(Debug, Clone)]
pub struct PanExtractor {
    min_confidence: f32,
}

impl PanExtractor {
    /// Create a new PAN extractor.
    pub fn new() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    /// Set the confidence threshold of the filtered text view.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }
}

impl Default for PanExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for PanExtractor {
    type Record = PanRecord;

    fn document_type(&self) -> DocumentType {
        DocumentType::Pan
    }

    fn corrector(&self) -> &dyn NumberCorrector {
        &PanNumberCorrector
    }

    fn number_pattern(&self) -> &Regex {
        &PAN_NUMBER
    }

    fn extract(&self, fragments: &[Fragment]) -> PanRecord {
        let views = TextViews::new(fragments, self.min_confidence);

        let name = extract_name(&views);
        let fathers_name = extract_fathers_name(&views, name.as_deref());
        let record = PanRecord {
            pan_number: extract_pan_number(&views.all),
            dob: extract_dob(&views),
            name,
            fathers_name,
            ..PanRecord::default()
        };

        info!(
            "PAN extraction: number={} name={} fathers_name={} dob={}",
            record.pan_number.is_some(),
            record.name.is_some(),
            record.fathers_name.is_some(),
            record.dob.is_some()
        );

        record
    }
}

/// Inputs of the father's-name cascade.
struct FatherContext<'a> {
    views: &'a TextViews<'a>,
    name: Option<&'a str>,
}

/// Extract the PAN from text.
pub fn extract_pan_number(text: &str) -> Option<String> {
    PAN_NUMBER.find(text).map(|m| m.as_str().to_string())
}

/// Extract the card holder's name.
pub fn extract_name(views: &TextViews) -> Option<String> {
    let cascade: [(&str, Strategy<TextViews>); 2] = [
        ("after title or issuer", anchored_name),
        ("labeled", labeled_name),
    ];
    first_success("name", views, &cascade)
}

/// Extract the father's name, anchored on the already extracted `name`.
pub fn extract_fathers_name(views: &TextViews, name: Option<&str>) -> Option<String> {
    let context = FatherContext { views, name };
    let cascade: [(&str, Strategy<FatherContext>); 2] = [
        ("after name", anchored_fathers_name),
        ("labeled", labeled_fathers_name),
    ];
    first_success("fathers_name", &context, &cascade)
}

/// Extract the date of birth.
pub fn extract_dob(views: &TextViews) -> Option<String> {
    let cascade: [(&str, Strategy<TextViews>); 3] = [
        ("labeled", |v| {
            PAN_LABELED_DOB
                .captures(&v.all)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        }),
        ("bare date", |v| BARE_DATE.find(&v.all).map(|m| m.as_str().to_string())),
        ("bare date (confident)", |v| {
            BARE_DATE.find(&v.confident).map(|m| m.as_str().to_string())
        }),
    ];
    first_success("dob", views, &cascade)
}

/// Index of the card title fragment, else of the issuer fragment.
fn anchor_index(fragments: &[Fragment]) -> Option<usize> {
    fragments
        .iter()
        .position(|f| PAN_TITLE.is_match(&f.text))
        .or_else(|| fragments.iter().position(|f| PAN_ISSUER.is_match(&f.text)))
}

/// First upper-case name run in a fragment strictly after `anchor`.
fn name_after(fragments: &[Fragment], anchor: usize) -> Option<String> {
    fragments[anchor + 1..]
        .iter()
        .find_map(|f| bare_name_run(&f.text, NameCase::Upper))
}

fn anchored_name(views: &TextViews) -> Option<String> {
    name_after(views.fragments, anchor_index(views.fragments)?)
}

fn labeled_name(views: &TextViews) -> Option<String> {
    let label = NAME_LABEL.find(&views.all)?;
    let span = span_before(&views.all[label.end()..], &FATHERS_NAME_BOUNDARY)?;
    bare_name_run(span, NameCase::Upper)
}

fn anchored_fathers_name(context: &FatherContext) -> Option<String> {
    let name = context.name?;
    let fragments = context.views.fragments;
    let anchor = fragments.iter().position(|f| f.text.contains(name))?;
    name_after(fragments, anchor)
}

fn labeled_fathers_name(context: &FatherContext) -> Option<String> {
    let all = &context.views.all;
    let label = FATHERS_NAME_LABEL.find(all)?;
    let span = span_before(&all[label.end()..], &PAN_DOB_BOUNDARY)?;
    bare_name_run(span, NameCase::Upper)
}
