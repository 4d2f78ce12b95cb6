//! Logo match against a reference image via perceptual hashing.
//!
//! Every embedded image is extracted to a scratch directory, hashed, and
//! compared to the reference. A single candidate at or above the similarity
//! threshold passes the whole check.

use crate::CheckError;
use img_hash::{image::DynamicImage, HashAlg, HasherConfig, ImageHash};
use std::path::Path;
use tracing::{debug, info};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, Clone)]
pub struct LogoCheckConfig {
    /// Minimum similarity (percent) for a candidate to count as the logo.
    pub similarity_threshold: f64,
    /// Perceptual hash grid edge; the hash carries `hash_size * hash_size` bits.
    pub hash_size: u32,
}

impl Default for LogoCheckConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 90.0,
            hash_size: 8,
        }
    }
}

pub struct LogoChecker {
    config: LogoCheckConfig,
}

impl LogoChecker {
    pub fn new(config: LogoCheckConfig) -> Self {
        Self { config }
    }

    /// Whether any image embedded in `pdf_path` matches the reference logo.
    ///
    /// Candidate images that fail to decode are skipped; an unreadable
    /// reference or an unreadable document is a hard error.
    pub fn check(
        &self,
        pdf_path: &Path,
        reference_path: &Path,
        scratch_dir: &Path,
    ) -> Result<bool, CheckError> {
        let reference = load_image(reference_path)
            .map_err(|e| CheckError::ReferenceImage(format!("{}: {e}", reference_path.display())))?;

        statement_pdf::extract_embedded_images(pdf_path, scratch_dir)?;
        self.scan_directory(&reference, scratch_dir)
    }

    /// Compare every readable image in `dir` against the reference.
    fn scan_directory(&self, reference: &DynamicImage, dir: &Path) -> Result<bool, CheckError> {
        let mut candidates: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        candidates.sort();

        let reference_hash = self.hash(reference);
        for path in candidates {
            let Ok(candidate) = load_image(&path) else {
                debug!(path = %path.display(), "skipping unreadable candidate image");
                continue;
            };
            let score = self.similarity_to_hash(&reference_hash, &candidate);
            debug!(path = %path.display(), score, "compared candidate against reference");
            if score >= self.config.similarity_threshold {
                info!(path = %path.display(), score, "logo matched");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Similarity percentage between two images under the configured hash.
    /// 100.0 means identical hashes, 0.0 means every bit differs.
    pub fn similarity(&self, a: &DynamicImage, b: &DynamicImage) -> f64 {
        self.similarity_to_hash(&self.hash(a), b)
    }

    fn similarity_to_hash(&self, reference: &ImageHash, candidate: &DynamicImage) -> f64 {
        let candidate = self.hash(candidate);
        let bits = (self.config.hash_size * self.config.hash_size) as f64;
        100.0 * (1.0 - f64::from(reference.dist(&candidate)) / bits)
    }

    fn hash(&self, image: &DynamicImage) -> ImageHash {
        HasherConfig::new()
            .hash_alg(HashAlg::Mean)
            .hash_size(self.config.hash_size, self.config.hash_size)
            .to_hasher()
            .hash_image(image)
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, img_hash::image::ImageError> {
    img_hash::image::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use img_hash::image::{DynamicImage, GrayImage, Luma};
    use proptest::prelude::*;

    fn gradient(step: u8) -> DynamicImage {
        let img = GrayImage::from_fn(32, 32, |x, y| Luma([((x + y) as u8).wrapping_mul(step)]));
        DynamicImage::ImageLuma8(img)
    }

    fn checkerboard(cell: u32) -> DynamicImage {
        let img = GrayImage::from_fn(32, 32, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn identical_images_score_100() {
        let checker = LogoChecker::new(LogoCheckConfig::default());
        let img = gradient(3);
        assert_eq!(checker.similarity(&img, &img), 100.0);
    }

    #[test]
    fn dissimilar_images_score_below_threshold() {
        let checker = LogoChecker::new(LogoCheckConfig::default());
        let score = checker.similarity(&gradient(3), &checkerboard(4));
        assert!(score < 90.0, "score was {score}");
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let checker = LogoChecker::new(LogoCheckConfig {
            similarity_threshold: 100.0,
            ..LogoCheckConfig::default()
        });
        let img = gradient(5);
        assert!(checker.similarity(&img, &img) >= checker.config.similarity_threshold);
    }

    #[test]
    fn missing_reference_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let checker = LogoChecker::new(LogoCheckConfig::default());
        let result = checker.check(
            &dir.path().join("statement.pdf"),
            &dir.path().join("no-such-logo.png"),
            &dir.path().join("scratch"),
        );
        assert!(matches!(result, Err(CheckError::ReferenceImage(_))));
    }

    proptest! {
        #[test]
        fn similarity_is_symmetric_and_bounded(a_step in 1u8..16, b_cell in 1u32..8) {
            let checker = LogoChecker::new(LogoCheckConfig::default());
            let a = gradient(a_step);
            let b = checkerboard(b_cell);
            let ab = checker.similarity(&a, &b);
            let ba = checker.similarity(&b, &a);
            prop_assert!((ab - ba).abs() < f64::EPSILON);
            prop_assert!((0.0..=100.0).contains(&ab));
        }
    }
}
