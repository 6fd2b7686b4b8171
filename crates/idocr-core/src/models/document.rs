//! Identity document records and processing outcomes.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Tag carried by every PAN record.
pub const PAN_DOCUMENT_TAG: &str = "PAN";

/// Document kind decided by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// 12-digit national ID card.
    Aadhaar,
    /// Alphanumeric tax-ID card.
    Pan,
    /// Neither number shape was found.
    Unknown,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Pan => "pan",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from a national ID card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadhaarRecord {
    pub aadhaar_number: Option<String>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
}

/// Fields extracted from a tax-ID card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanRecord {
    /// Always [`PAN_DOCUMENT_TAG`].
    pub document_type: String,
    pub pan_number: Option<String>,
    pub name: Option<String>,
    pub fathers_name: Option<String>,
    pub dob: Option<String>,
}

impl Default for PanRecord {
    fn default() -> Self {
        Self {
            document_type: PAN_DOCUMENT_TAG.to_string(),
            pan_number: None,
            name: None,
            fathers_name: None,
            dob: None,
        }
    }
}

/// Why a document was not extracted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Image is too blurry for OCR processing.")]
    Blurry,

    #[error("Image contrast is too low for OCR processing.")]
    LowContrast,

    #[error("No Aadhaar or PAN detected")]
    Unrecognized,
}

impl Serialize for Rejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("Rejection", 1)?;
        body.serialize_field("error", &self.to_string())?;
        body.end()
    }
}

/// Result of running one document through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProcessOutcome {
    Aadhaar(AadhaarRecord),
    Pan(PanRecord),
    Rejected(Rejection),
}

impl ProcessOutcome {
    /// Document type the outcome was produced for.
    pub fn document_type(&self) -> DocumentType {
        match self {
            Self::Aadhaar(_) => DocumentType::Aadhaar,
            Self::Pan(_) => DocumentType::Pan,
            Self::Rejected(_) => DocumentType::Unknown,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}
