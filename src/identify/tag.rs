//! Colored ear-tag detection.
//!
//! Masks the frame per recognized tag hue, labels the connected regions and
//! keeps those whose area and aspect ratio look like a tag. Confidence grows
//! with area up to a cap; the three strongest candidates are reported.
use serde::Serialize;

use crate::features::color::hue_mask;
use crate::features::regions::label_components;
use crate::image::ImageRgb8;

/// One recognized tag hue window (degrees).
#[derive(Clone, Copy, Debug)]
pub struct TagHue {
    pub name: &'static str,
    pub lo_deg: f32,
    pub hi_deg: f32,
}

#[derive(Clone, Debug)]
pub struct TagParams {
    pub hues: Vec<TagHue>,
    pub min_saturation: f32,
    pub min_value: f32,
    /// Accepted component area window (px²).
    pub min_area: usize,
    pub max_area: usize,
    /// Accepted width/height ratio window.
    pub min_aspect: f32,
    pub max_aspect: f32,
    pub max_candidates: usize,
    pub confidence_cap: f32,
}

impl Default for TagParams {
    fn default() -> Self {
        Self {
            hues: vec![
                TagHue { name: "yellow", lo_deg: 40.0, hi_deg: 60.0 },
                TagHue { name: "orange", lo_deg: 10.0, hi_deg: 30.0 },
                TagHue { name: "green", lo_deg: 80.0, hi_deg: 160.0 },
                TagHue { name: "blue", lo_deg: 200.0, hi_deg: 260.0 },
            ],
            min_saturation: 100.0 / 255.0,
            min_value: 100.0 / 255.0,
            min_area: 500,
            max_area: 50_000,
            min_aspect: 0.5,
            max_aspect: 3.0,
            max_candidates: 3,
            confidence_cap: 0.85,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TagDetection {
    pub color: &'static str,
    /// (x, y, width, height)
    pub bbox: (usize, usize, usize, usize),
    pub area: usize,
    pub confidence: f32,
}

pub fn detect_tags(img: &ImageRgb8<'_>, p: &TagParams) -> Vec<TagDetection> {
    let mut tags = Vec::new();
    for hue in &p.hues {
        let mask = hue_mask(img, hue.lo_deg, hue.hi_deg, p.min_saturation, p.min_value);
        for c in &label_components(&mask, img.w, img.h).components {
            if c.area <= p.min_area || c.area >= p.max_area {
                continue;
            }
            let aspect = c.width() as f32 / c.height() as f32;
            if aspect <= p.min_aspect || aspect >= p.max_aspect {
                continue;
            }
            let confidence =
                (0.5 + (c.area as f32 / p.max_area as f32) * 0.35).min(p.confidence_cap);
            tags.push(TagDetection {
                color: hue.name,
                bbox: (c.min_x, c.min_y, c.width(), c.height()),
                area: c.area,
                confidence,
            });
        }
    }
    tags.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    tags.truncate(p.max_candidates);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_patch(rgb: [u8; 3], x0: usize, y0: usize, pw: usize, ph: usize) -> Vec<u8> {
        let w = 160usize;
        let h = 120usize;
        let mut data = vec![0u8; w * h * 3];
        for px in data.chunks_exact_mut(3) {
            px.copy_from_slice(&[60, 60, 60]);
        }
        for y in y0..y0 + ph {
            for x in x0..x0 + pw {
                let i = (y * w + x) * 3;
                data[i..i + 3].copy_from_slice(&rgb);
            }
        }
        data
    }

    fn view(data: &[u8]) -> ImageRgb8<'_> {
        ImageRgb8 {
            w: 160,
            h: 120,
            stride: 480,
            data,
        }
    }

    #[test]
    fn yellow_patch_is_detected_as_yellow_tag() {
        let data = image_with_patch([230, 220, 30], 20, 20, 48, 32);
        let tags = detect_tags(&view(&data), &TagParams::default());
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].color, "yellow");
        assert_eq!(tags[0].area, 48 * 32);
        assert!(tags[0].confidence > 0.5 && tags[0].confidence <= 0.85);
    }

    #[test]
    fn tiny_patch_is_ignored() {
        let data = image_with_patch([230, 220, 30], 20, 20, 10, 10);
        assert!(detect_tags(&view(&data), &TagParams::default()).is_empty());
    }

    #[test]
    fn elongated_region_fails_aspect_check() {
        // 150x4 strip: aspect 37.5, not a tag
        let data = image_with_patch([40, 200, 60], 5, 50, 150, 4);
        assert!(detect_tags(&view(&data), &TagParams::default()).is_empty());
    }

    #[test]
    fn gray_background_never_matches_a_hue() {
        let data = image_with_patch([60, 60, 60], 0, 0, 1, 1);
        assert!(detect_tags(&view(&data), &TagParams::default()).is_empty());
    }
}
