//! Upload policy for card images, applied before decoding.

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::error::{IdOcrError, Result};
use crate::models::config::InputConfig;

/// Check extension and size against the policy without decoding.
pub fn check_upload(path: &Path, policy: &InputConfig) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !policy.allowed_extensions.iter().any(|allowed| *allowed == extension) {
        return Err(IdOcrError::UnsupportedFormat(if extension.is_empty() {
            path.display().to_string()
        } else {
            extension
        }));
    }

    let size = std::fs::metadata(path)?.len();
    if size > policy.max_file_size {
        return Err(IdOcrError::FileTooLarge {
            size,
            max: policy.max_file_size,
        });
    }

    Ok(())
}

/// Check the policy, then decode the image.
pub fn load_image(path: &Path, policy: &InputConfig) -> Result<DynamicImage> {
    check_upload(path, policy)?;
    let image = image::open(path)?;
    debug!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}
