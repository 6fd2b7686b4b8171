//! Image quality gating run before extraction.
//!
//! Two checks, in order: sharpness (variance of the Laplacian against a
//! threshold that relaxes as text covers more of the image) and grey-level
//! contrast.

use image::{DynamicImage, GrayImage};
use tracing::debug;

use super::Fragment;
use crate::models::config::QualityConfig;
use crate::models::document::Rejection;

/// Measurements taken from one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// Variance of the Laplacian of the grey image.
    pub blur_score: f64,
    /// Threshold the blur score was compared against.
    pub blur_threshold: f64,
    /// Fraction of the image area covered by fragment boxes.
    pub text_ratio: f64,
    /// Difference between the brightest and darkest grey level.
    pub contrast: u8,
    /// Minimum acceptable contrast.
    pub min_contrast: u8,
}

impl QualityReport {
    pub fn is_blurry(&self) -> bool {
        self.blur_score < self.blur_threshold
    }

    pub fn is_low_contrast(&self) -> bool {
        self.contrast < self.min_contrast
    }

    /// First failed check, blur before contrast.
    pub fn rejection(&self) -> Option<Rejection> {
        if self.is_blurry() {
            Some(Rejection::Blurry)
        } else if self.is_low_contrast() {
            Some(Rejection::LowContrast)
        } else {
            None
        }
    }
}

/// Blur and contrast gate.
#[derive(Debug, Clone)]
pub struct QualityGate {
    config: QualityConfig,
}

impl QualityGate {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Measure the image; `fragments` supply the text-area estimate.
    pub fn assess(&self, image: &DynamicImage, fragments: &[Fragment]) -> QualityReport {
        let gray = image.to_luma8();

        let blur_score = laplacian_variance(&gray);
        let text_ratio = text_area_ratio(&gray, fragments);
        let blur_threshold = (self.config.blur_base_threshold
            - text_ratio * self.config.text_area_weight)
            .max(self.config.blur_min_threshold)
            .min(self.config.blur_max_threshold);

        let report = QualityReport {
            blur_score,
            blur_threshold,
            text_ratio,
            contrast: contrast(&gray),
            min_contrast: self.config.min_contrast,
        };

        debug!(
            "Blur score: {:.2}, dynamic threshold: {:.2}, text ratio: {:.2}, contrast: {}",
            report.blur_score, report.blur_threshold, report.text_ratio, report.contrast
        );

        report
    }

    /// Assess and return the rejection, if any. Disabled gates always pass.
    pub fn check(&self, image: &DynamicImage, fragments: &[Fragment]) -> Option<Rejection> {
        if !self.config.enabled {
            return None;
        }
        self.assess(image, fragments).rejection()
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

/// Variance of the 4-neighbour Laplacian with reflect-101 borders.
fn laplacian_variance(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let at = |x: i64, y: i64| -> f64 {
        let x = reflect_101(x, width as i64);
        let y = reflect_101(y, height as i64);
        gray.get_pixel(x as u32, y as u32)[0] as f64
    };

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let value = at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4.0 * at(x, y);
            sum += value;
            sum_sq += value * value;
        }
    }

    let n = (width as f64) * (height as f64);
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}

fn reflect_101(i: i64, len: i64) -> i64 {
    if len == 1 {
        return 0;
    }
    if i < 0 {
        -i
    } else if i >= len {
        2 * (len - 1) - i
    } else {
        i
    }
}

fn text_area_ratio(gray: &GrayImage, fragments: &[Fragment]) -> f64 {
    let total = gray.width() as f64 * gray.height() as f64;
    if total == 0.0 {
        return 0.0;
    }
    let text_area: f64 = fragments
        .iter()
        .map(|f| f.width() as f64 * f.height() as f64)
        .sum();
    text_area / total
}

fn contrast(gray: &GrayImage) -> u8 {
    let mut pixels = gray.pixels().map(|p| p[0]);
    let Some(first) = pixels.next() else {
        return 0;
    };
    let (min, max) = pixels.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn checkerboard(size: u32, low: u8, high: u8) -> DynamicImage {
        let img = GrayImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 { Luma([low]) } else { Luma([high]) }
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_flat_image_is_blurry() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 16, Luma([128])));
        let gate = QualityGate::default();
        let report = gate.assess(&img, &[]);
        assert_eq!(report.blur_score, 0.0);
        assert_eq!(report.blur_threshold, 40.0);
        assert_eq!(gate.check(&img, &[]), Some(Rejection::Blurry));
    }

    #[test]
    fn test_sharp_high_contrast_image_passes() {
        let img = checkerboard(16, 0, 255);
        let gate = QualityGate::default();
        assert!(gate.assess(&img, &[]).blur_score > 60.0);
        assert_eq!(gate.check(&img, &[]), None);
    }

    #[test]
    fn test_sharp_low_contrast_image_rejected() {
        // A 100/130 checkerboard has a Laplacian of +-120 everywhere.
        let img = checkerboard(16, 100, 130);
        let report = QualityGate::default().assess(&img, &[]);
        assert!(!report.is_blurry());
        assert_eq!(report.contrast, 30);
        assert_eq!(report.rejection(), Some(Rejection::LowContrast));
    }

    #[test]
    fn test_text_ratio_lowers_threshold() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([0])));
        let covering = Fragment::new("X", 0.9)
            .with_bbox([[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]]);
        let report = QualityGate::default().assess(&img, &[covering]);
        assert_eq!(report.text_ratio, 0.5);
        // 40 - 0.5 * 65 = 7.5, clamped to the floor of 20.
        assert_eq!(report.blur_threshold, 20.0);
    }

    #[test]
    fn test_disabled_gate_passes_everything() {
        let img = DynamicImage::new_luma8(4, 4);
        let gate = QualityGate::new(QualityConfig {
            enabled: false,
            ..QualityConfig::default()
        });
        assert_eq!(gate.check(&img, &[]), None);
    }

    #[test]
    fn test_empty_image_is_blurry() {
        let img = DynamicImage::new_luma8(0, 0);
        assert_eq!(QualityGate::default().check(&img, &[]), Some(Rejection::Blurry));
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }
}
