//! Muzzle-pattern biometric descriptor.
//!
//! The muzzle region (lower center of the frame) carries an individually
//! distinctive texture. The descriptor is a magnitude-weighted histogram of
//! gradient orientations over that region plus edge-density and
//! texture-complexity scalars. Signatures are compared by cosine
//! similarity.
//!
//! Descriptors are per-image only; no cross-session matching or storage
//! happens here.
use nalgebra::SVector;
use serde::Serialize;

use crate::features::grad::sobel_gradients;
use crate::image::GrayF32;

/// Orientation histogram size.
pub const SIGNATURE_BINS: usize = 16;

pub type SignatureVector = SVector<f32, SIGNATURE_BINS>;

#[derive(Clone, Debug)]
pub struct BiometricParams {
    /// Muzzle window as fractions of the frame.
    pub top_frac: f32,
    pub bottom_frac: f32,
    pub left_frac: f32,
    pub right_frac: f32,
    /// Sobel magnitude above which a pixel counts as an edge.
    pub edge_mag_thresh: f32,
    /// Minimum texture std-dev for the region to carry a usable pattern.
    pub min_texture: f32,
    pub confidence: f32,
}

impl Default for BiometricParams {
    fn default() -> Self {
        Self {
            top_frac: 0.5,
            bottom_frac: 0.9,
            left_frac: 0.3,
            right_frac: 0.7,
            edge_mag_thresh: 120.0,
            min_texture: 5.0,
            confidence: 0.70,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BiometricSignature {
    pub histogram: SignatureVector,
    pub edge_density: f32,
    pub texture_complexity: f32,
    pub confidence: f32,
}

/// Extract the muzzle-region descriptor, or `None` when the region carries
/// no usable pattern (too small or near-uniform).
pub fn extract_muzzle_signature(gray: &GrayF32, p: &BiometricParams) -> Option<BiometricSignature> {
    let y0 = (gray.h as f32 * p.top_frac) as usize;
    let y1 = (gray.h as f32 * p.bottom_frac) as usize;
    let x0 = (gray.w as f32 * p.left_frac) as usize;
    let x1 = (gray.w as f32 * p.right_frac) as usize;
    if y1 <= y0 + 2 || x1 <= x0 + 2 {
        return None;
    }

    let mut region = GrayF32::new(x1 - x0, y1 - y0);
    for y in y0..y1 {
        for x in x0..x1 {
            region.set(x - x0, y - y0, gray.get(x, y));
        }
    }

    let (_, texture_complexity) = region.mean_std();
    if texture_complexity < p.min_texture {
        return None;
    }

    let grads = sobel_gradients(&region);
    let mut histogram = SignatureVector::zeros();
    let mut edges = 0usize;
    for y in 0..region.h {
        for x in 0..region.w {
            let mag = grads.mag.get(x, y);
            if mag > p.edge_mag_thresh {
                edges += 1;
            }
            if mag <= 0.0 {
                continue;
            }
            let angle = grads.gy.get(x, y).atan2(grads.gx.get(x, y));
            // (-pi, pi] -> [0, BINS)
            let norm = (angle + std::f32::consts::PI) / (2.0 * std::f32::consts::PI);
            let bin = ((norm * SIGNATURE_BINS as f32) as usize).min(SIGNATURE_BINS - 1);
            histogram[bin] += mag;
        }
    }
    let total = histogram.sum() + 1e-6;
    histogram /= total;

    Some(BiometricSignature {
        histogram,
        edge_density: edges as f32 / (region.w * region.h) as f32,
        texture_complexity,
        confidence: p.confidence,
    })
}

/// Cosine similarity between two signatures; `true` when it clears the
/// match threshold.
pub fn compare_signatures(a: &SignatureVector, b: &SignatureVector, threshold: f32) -> (bool, f32) {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return (false, 0.0);
    }
    let similarity = (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0);
    (similarity >= threshold, similarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured_image(w: usize, h: usize) -> GrayF32 {
        let mut img = GrayF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                // strong deterministic texture
                let v = if (x / 3 + y / 3) % 2 == 0 { 40.0 } else { 210.0 };
                img.set(x, y, v);
            }
        }
        img
    }

    #[test]
    fn textured_muzzle_yields_normalized_signature() {
        let sig = extract_muzzle_signature(&textured_image(128, 128), &BiometricParams::default())
            .expect("textured region should yield a signature");
        let sum: f32 = sig.histogram.iter().sum();
        assert!((sum - 1.0).abs() < 1e-3, "histogram sum {sum}");
        assert!(sig.edge_density > 0.0);
        assert_eq!(sig.confidence, 0.70);
    }

    #[test]
    fn flat_region_has_no_signature() {
        let img = GrayF32::new(128, 128);
        assert!(extract_muzzle_signature(&img, &BiometricParams::default()).is_none());
    }

    #[test]
    fn identical_signatures_match_at_one() {
        let sig = extract_muzzle_signature(&textured_image(128, 128), &BiometricParams::default())
            .unwrap();
        let (matched, similarity) = compare_signatures(&sig.histogram, &sig.histogram, 0.85);
        assert!(matched);
        assert!((similarity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthogonal_signatures_do_not_match() {
        let mut a = SignatureVector::zeros();
        let mut b = SignatureVector::zeros();
        a[0] = 1.0;
        b[8] = 1.0;
        let (matched, similarity) = compare_signatures(&a, &b, 0.85);
        assert!(!matched);
        assert_eq!(similarity, 0.0);
    }

    #[test]
    fn zero_vector_never_matches() {
        let zero = SignatureVector::zeros();
        let mut a = SignatureVector::zeros();
        a[0] = 1.0;
        assert_eq!(compare_signatures(&zero, &a, 0.5), (false, 0.0));
    }
}
