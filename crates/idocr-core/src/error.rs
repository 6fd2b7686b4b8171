//! Error types for the idocr-core library.
//!
//! Field extraction itself never fails: a missing field is `None`. These
//! errors cover the layers around it (files, decoding, configuration).

use thiserror::Error;

/// Main error type for the idocr library.
#[derive(Error, Debug)]
pub enum IdOcrError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fragment dump or configuration could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// OCR collaborator failed to produce fragments.
    ///
    /// Returned by live `OcrEngine` implementations; `RecordedOcr` never fails.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Input file type is not accepted.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Input file exceeds the configured size limit.
    #[error("file is {size} bytes, limit is {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the idocr library.
pub type Result<T> = std::result::Result<T, IdOcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let err = IdOcrError::FileTooLarge { size: 10, max: 5 };
        assert_eq!(err.to_string(), "file is 10 bytes, limit is 5 bytes");
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(IdOcrError::Io(_))));
    }
}
