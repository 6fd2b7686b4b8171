//! Aadhaar (12-digit national ID) correction and field extraction.

use regex::Regex;
use tracing::info;

use super::patterns::{
    AADHAAR_BLOCK_EXACT, AADHAAR_ISSUER_BLOCK, AADHAAR_LABELED_DOB, AADHAAR_NAME_BOUNDARY,
    AADHAAR_NUMBER, AADHAAR_NUMBER_EXACT, BARE_DATE, GENDER, LABELED_GENDER, LABELED_NAME,
    YEAR_OF_BIRTH,
};
use super::spans::{bare_name_run, last_occurrence_end, span_before, NameCase};
use super::{first_success, NumberCorrector, Strategy};
use crate::document::DocumentExtractor;
use crate::models::document::{AadhaarRecord, DocumentType};
use crate::ocr::{Fragment, TextViews, DEFAULT_MIN_CONFIDENCE};

/// Fixes the letter `O` read in place of the digit zero.
///
/// Accepts a full number (`dddd dddd dddd`) or a single four-digit block and
/// rewrites every fragment that qualifies.
#[derive(Debug, Clone, Copy, Default)]
pub struct AadhaarNumberCorrector;

impl NumberCorrector for AadhaarNumberCorrector {
    fn rectify(&self, text: &str) -> String {
        text.replace('O', "0")
    }

    fn is_canonical(&self, text: &str) -> bool {
        AADHAAR_NUMBER_EXACT.is_match(text) || AADHAAR_BLOCK_EXACT.is_match(text)
    }
}

/// Aadhaar field extractor.
#[derive(Debug, Clone)]
pub struct AadhaarExtractor {
    min_confidence: f32,
}

impl AadhaarExtractor {
    /// Create a new Aadhaar extractor.
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

impl Default for AadhaarExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for AadhaarExtractor {
    type Record = AadhaarRecord;

    fn document_type(&self) -> DocumentType {
        DocumentType::Aadhaar
    }

    fn corrector(&self) -> &dyn NumberCorrector {
        &AadhaarNumberCorrector
    }

    fn number_pattern(&self) -> &Regex {
        &AADHAAR_NUMBER
    }

    fn extract(&self, fragments: &[Fragment]) -> AadhaarRecord {
        let views = TextViews::new(fragments, self.min_confidence);

        let record = AadhaarRecord {
            aadhaar_number: extract_aadhaar_number(&views.all),
            name: extract_name(&views),
            dob: extract_dob(&views),
            gender: extract_gender(&views),
        };

        info!(
            "Aadhaar extraction: number={} name={} dob={} gender={}",
            record.aadhaar_number.is_some(),
            record.name.is_some(),
            record.dob.is_some(),
            record.gender.is_some()
        );

        record
    }
}

/// Extract the Aadhaar number from text.
pub fn extract_aadhaar_number(text: &str) -> Option<String> {
    AADHAAR_NUMBER.find(text).map(|m| m.as_str().to_string())
}

/// Extract the card holder's name.
pub fn extract_name(views: &TextViews) -> Option<String> {
    let cascade: [(&str, Strategy<TextViews>); 3] = [
        ("labeled", labeled_name),
        ("after issuer", positional_name),
        ("after issuer (confident)", positional_name_confident),
    ];
    first_success("name", views, &cascade)
}

/// Extract the date of birth, or the year of birth when only that is printed.
pub fn extract_dob(views: &TextViews) -> Option<String> {
    let cascade: [(&str, Strategy<TextViews>); 4] = [
        ("labeled", |v| capture(&AADHAAR_LABELED_DOB, &v.all)),
        ("year of birth", |v| capture(&YEAR_OF_BIRTH, &v.all)),
        ("bare date", |v| found(&BARE_DATE, &v.all)),
        ("bare date (confident)", |v| found(&BARE_DATE, &v.confident)),
    ];
    first_success("dob", views, &cascade)
}

/// Extract the gender, including its label when one precedes it.
pub fn extract_gender(views: &TextViews) -> Option<String> {
    let cascade: [(&str, Strategy<TextViews>); 3] = [
        ("labeled", |v| found(&LABELED_GENDER, &v.all)),
        ("keyword", |v| found(&GENDER, &v.all)),
        ("keyword (confident)", |v| found(&GENDER, &v.confident)),
    ];
    first_success("gender", views, &cascade)
}

/// Text between the last issuer block and the first field after the name.
fn name_span(text: &str) -> Option<&str> {
    let start = last_occurrence_end(text, &AADHAAR_ISSUER_BLOCK);
    span_before(&text[start..], &AADHAAR_NAME_BOUNDARY)
}

fn labeled_name(views: &TextViews) -> Option<String> {
    let caps = LABELED_NAME.captures(name_span(&views.all)?)?;
    let name = caps[1].trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn positional_name(views: &TextViews) -> Option<String> {
    bare_name_run(name_span(&views.all)?, NameCase::Any)
}

fn positional_name_confident(views: &TextViews) -> Option<String> {
    bare_name_run(name_span(&views.confident)?, NameCase::Any)
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn found(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| m.as_str().to_string())
}
