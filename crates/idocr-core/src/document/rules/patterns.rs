//! Common regex patterns for identity card extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Aadhaar number (12 digits in three blocks of four)
    pub static ref AADHAAR_NUMBER: Regex = Regex::new(
        r"\b\d{4} \d{4} \d{4}\b"
    ).unwrap();

    pub static ref AADHAAR_NUMBER_EXACT: Regex = Regex::new(
        r"^\d{4} \d{4} \d{4}$"
    ).unwrap();

    // A single block, as OCR often splits the number per block
    pub static ref AADHAAR_BLOCK_EXACT: Regex = Regex::new(
        r"^\d{4}$"
    ).unwrap();

    // PAN number (five letters, four digits, one letter)
    pub static ref PAN_NUMBER: Regex = Regex::new(
        r"\b[A-Z]{5}[0-9]{4}[A-Z]\b"
    ).unwrap();

    pub static ref PAN_NUMBER_EXACT: Regex = Regex::new(
        r"^[A-Z]{5}[0-9]{4}[A-Z]$"
    ).unwrap();

    // Aadhaar issuer block, optionally followed by a second issuer phrase
    pub static ref AADHAAR_ISSUER_BLOCK: Regex = Regex::new(
        r"(?i)(?:Government of India|Govt. of India|GovernmentofIndia|Governmentof India|Government ofIndia|Unique Identification Authority of India)\s+(?:Government of India|Govt. of India|GovernmentofIndia|Governmentof India|Government ofIndia|Unique Identification Authority of India)?\s*"
    ).unwrap();

    // Everything before the first field that follows the name on an Aadhaar card
    pub static ref AADHAAR_NAME_BOUNDARY: Regex = Regex::new(
        r"(?s)^(.*?)\b(?:Address|DOB|Date of Birth|Year of Birth)\b"
    ).unwrap();

    pub static ref LABELED_NAME: Regex = Regex::new(
        r"(?i)name[\s:-]+([A-Za-z ]+)"
    ).unwrap();

    // Dates of birth
    pub static ref AADHAAR_LABELED_DOB: Regex = Regex::new(
        r"(?i)(?:DOB|Date of Birth)[\s:-]+(\d{2}[-/]\d{2}[-/]\d{4})"
    ).unwrap();

    pub static ref YEAR_OF_BIRTH: Regex = Regex::new(
        r"(?i)(?:Year of Birth|YearofBirth)[\s:-]+(\d{4})"
    ).unwrap();

    pub static ref PAN_LABELED_DOB: Regex = Regex::new(
        r"(?i)(?:DOB|Date of Birth|D\.O\.B|D\.O\.B\.)[\s:-]+(\d{2}[-/]\d{2}[-/]\d{4})"
    ).unwrap();

    pub static ref BARE_DATE: Regex = Regex::new(
        r"\b\d{2}[-/]\d{2}[-/]\d{4}\b"
    ).unwrap();

    // Gender
    pub static ref LABELED_GENDER: Regex = Regex::new(
        r"(?i)(?:Gender|Sex)[\s:-]+(?:Male|Female|Transgender)"
    ).unwrap();

    pub static ref GENDER: Regex = Regex::new(
        r"(?i)(?:Male|Female|Transgender)"
    ).unwrap();

    // PAN card anchors
    pub static ref PAN_TITLE: Regex = Regex::new(
        r"(?i)Permanent Account Number Card"
    ).unwrap();

    pub static ref PAN_ISSUER: Regex = Regex::new(
        r"(?i)(?:Government of India|Govt. of India|Govt of India|GovtofIndia|Govtof India|Govt ofIndia)\s*"
    ).unwrap();

    pub static ref NAME_LABEL: Regex = Regex::new(
        r"(?i)Name"
    ).unwrap();

    pub static ref FATHERS_NAME_LABEL: Regex = Regex::new(
        r"(?i)(?:Father's Name|Father'sName|Fathers Name|FathersName|Father Name)"
    ).unwrap();

    pub static ref FATHERS_NAME_BOUNDARY: Regex = Regex::new(
        r"(?s)^(.*?)\b(?:Father's Name|Father'sName|Fathers Name|FathersName|Father Name)\b"
    ).unwrap();

    pub static ref PAN_DOB_BOUNDARY: Regex = Regex::new(
        r"(?s)^(.*?)\b(?:DOB|Date of Birth|D\.O\.B|D\.O\.B\.)\b"
    ).unwrap();
}
