//! Feature extraction: one immutable [`FeatureSet`] per image.
//!
//! The extractor derives every numeric descriptor the downstream scorers
//! consume. It is deterministic (same pixels → same descriptors) and has no
//! side effects. The only hard failure is an empty or too-small image;
//! anything else degrades: when no usable body contour is found the shape
//! descriptors are zeroed and `contour_found` is cleared, which the scorers
//! translate into their lowest-confidence band.
//!
//! Stages
//! - Luma conversion is done by the caller (the pipeline shares the gray
//!   buffer with the identification detectors).
//! - Sobel magnitudes feed the per-half edge densities (`left_activity`,
//!   `right_activity`), the vertical-midline split that drives
//!   symmetry-based lameness detection.
//! - Otsu + largest-component segmentation yields circularity, solidity,
//!   in-body texture/brightness and the principal-axis posture tilt.
//! - Dark-spot components, the HSV red band, bright head-region pixels and
//!   the full-frame texture give the symptom descriptors.

pub mod color;
pub mod grad;
pub mod mask;
pub mod regions;

use serde::Serialize;

use crate::error::EngineError;
use crate::image::{GrayF32, ImageRgb8};

/// Extraction thresholds. All values are data, not code, so they can be
/// tuned without touching the passes.
#[derive(Clone, Debug)]
pub struct FeatureParams {
    /// Minimum width and height accepted.
    pub min_dim: usize,
    /// Sobel magnitude above which a pixel counts as an edge (0..~1020).
    pub edge_mag_thresh: f32,
    /// Gray level below which a pixel is a dark-spot candidate.
    pub dark_spot_thresh: f32,
    /// Minimum connected area (px²) for a dark spot to count as a lesion.
    pub min_spot_area: usize,
    /// Gray level above which a head-region pixel counts as discharge.
    pub bright_thresh: f32,
    /// Fraction of rows (from the top) treated as the head sub-region.
    pub head_region_frac: f32,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            min_dim: 32,
            edge_mag_thresh: 120.0,
            dark_spot_thresh: 60.0,
            min_spot_area: 100,
            bright_thresh: 220.0,
            head_region_frac: 1.0 / 3.0,
        }
    }
}

/// Numeric descriptors derived once per image. Immutable after extraction.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureSet {
    pub circularity: f32,
    pub solidity: f32,
    pub texture_std_dev: f32,
    pub mean_brightness: f32,
    pub left_activity: f32,
    pub right_activity: f32,
    pub posture_deviation: f32,
    pub lesion_spot_count: usize,
    pub red_area_fraction: f32,
    pub discharge_area_px: u32,
    pub coat_texture_std_dev: f32,
    /// Laplacian-variance sharpness (behavior scoring).
    pub sharpness: f32,
    /// False when the shape descriptors are degraded (no usable contour).
    pub contour_found: bool,
}

/// Reject empty or too-small images before any processing.
pub fn validate_image(img: &ImageRgb8<'_>, min_dim: usize) -> Result<(), EngineError> {
    if img.w == 0 || img.h == 0 || img.data.is_empty() {
        return Err(EngineError::InvalidImage("empty image".into()));
    }
    if img.w < min_dim || img.h < min_dim {
        return Err(EngineError::InvalidImage(format!(
            "image {}x{} below minimum dimension {min_dim}",
            img.w, img.h
        )));
    }
    let needed = (img.h - 1) * img.stride + 3 * img.w;
    if img.data.len() < needed {
        return Err(EngineError::InvalidImage(format!(
            "pixel buffer too short: {} < {needed}",
            img.data.len()
        )));
    }
    Ok(())
}

/// Derive the full descriptor set from a validated image and its luma.
pub fn extract_features(img: &ImageRgb8<'_>, gray: &GrayF32, p: &FeatureParams) -> FeatureSet {
    let grads = grad::sobel_gradients(gray);
    let mid = gray.w / 2;
    let left_activity = grad::edge_fraction(&grads.mag, p.edge_mag_thresh, 0, mid);
    let right_activity = grad::edge_fraction(&grads.mag, p.edge_mag_thresh, mid, gray.w);

    let (frame_mean, frame_std) = gray.mean_std();

    let shape = mask::analyze_body(gray);
    if shape.is_none() {
        log::debug!("feature extraction: no usable body contour, shape descriptors degraded");
    }

    FeatureSet {
        circularity: shape.map_or(0.0, |s| s.circularity),
        solidity: shape.map_or(0.0, |s| s.solidity),
        texture_std_dev: shape.map_or(frame_std, |s| s.texture_std_dev),
        mean_brightness: shape.map_or(frame_mean, |s| s.mean_brightness),
        left_activity,
        right_activity,
        posture_deviation: shape.map_or(0.0, |s| s.posture_deviation),
        lesion_spot_count: count_lesion_spots(gray, p),
        red_area_fraction: color::red_fraction(img),
        discharge_area_px: discharge_area(gray, p),
        coat_texture_std_dev: frame_std,
        sharpness: grad::laplacian_variance(gray),
        contour_found: shape.is_some(),
    }
}

/// Dark connected regions large enough to count as lesion candidates.
fn count_lesion_spots(gray: &GrayF32, p: &FeatureParams) -> usize {
    let mask: Vec<bool> = gray.data.iter().map(|&v| v < p.dark_spot_thresh).collect();
    regions::label_components(&mask, gray.w, gray.h)
        .components
        .iter()
        .filter(|c| c.area > p.min_spot_area)
        .count()
}

/// Bright-pixel count in the head sub-region (top rows of the frame).
fn discharge_area(gray: &GrayF32, p: &FeatureParams) -> u32 {
    let head_rows = ((gray.h as f32) * p.head_region_frac) as usize;
    let mut count = 0u32;
    for y in 0..head_rows.min(gray.h) {
        for &v in gray.row(y) {
            if v > p.bright_thresh {
                count += 1;
            }
        }
    }
    count
}
