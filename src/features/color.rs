//! HSV color-space statistics.
//!
//! Hue is in degrees [0, 360), saturation and value in [0, 1]. The red band
//! wraps around 0°, so it is expressed as two windows (below 20° and at or
//! above 340°), matching the two-mask formulation customary for
//! inflammation detection.
use crate::image::ImageRgb8;

#[derive(Clone, Copy, Debug)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta).rem_euclid(6.0))
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let s = if max <= f32::EPSILON { 0.0 } else { delta / max };

    Hsv { h, s, v: max }
}

/// Minimum saturation/value for a pixel to count as colored at all
/// (excludes near-gray and near-black pixels, 50/255 in 8-bit terms).
const MIN_CHROMA: f32 = 50.0 / 255.0;

/// Fraction of pixels in the red hue band (inflammation proxy).
pub fn red_fraction(img: &ImageRgb8<'_>) -> f32 {
    if img.w == 0 || img.h == 0 {
        return 0.0;
    }
    let mut hits = 0usize;
    for y in 0..img.h {
        let row = img.row(y);
        for px in row.chunks_exact(3) {
            let hsv = rgb_to_hsv(px[0], px[1], px[2]);
            if hsv.s >= MIN_CHROMA && hsv.v >= MIN_CHROMA && (hsv.h < 20.0 || hsv.h >= 340.0) {
                hits += 1;
            }
        }
    }
    hits as f32 / (img.w * img.h) as f32
}

/// Boolean mask of pixels falling inside a hue window with minimum
/// saturation and value. Row-major, `w × h`.
pub fn hue_mask(img: &ImageRgb8<'_>, lo_deg: f32, hi_deg: f32, min_s: f32, min_v: f32) -> Vec<bool> {
    let mut mask = vec![false; img.w * img.h];
    for y in 0..img.h {
        let row = img.row(y);
        for (x, px) in row.chunks_exact(3).enumerate() {
            let hsv = rgb_to_hsv(px[0], px[1], px[2]);
            mask[y * img.w + x] =
                hsv.s >= min_s && hsv.v >= min_v && hsv.h >= lo_deg && hsv.h < hi_deg;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues_land_where_expected() {
        assert!(rgb_to_hsv(255, 0, 0).h.abs() < 1.0);
        assert!((rgb_to_hsv(0, 255, 0).h - 120.0).abs() < 1.0);
        assert!((rgb_to_hsv(0, 0, 255).h - 240.0).abs() < 1.0);
        assert!((rgb_to_hsv(255, 255, 0).h - 60.0).abs() < 1.0);
    }

    #[test]
    fn gray_pixels_have_no_saturation() {
        let hsv = rgb_to_hsv(128, 128, 128);
        assert_eq!(hsv.s, 0.0);
    }

    #[test]
    fn red_fraction_counts_red_quarter() {
        let w = 8usize;
        let h = 8usize;
        let mut data = vec![0u8; w * h * 3];
        // top-left 4x4 block pure red, rest dark gray
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 3;
                if x < 4 && y < 4 {
                    data[i] = 200;
                } else {
                    data[i] = 30;
                    data[i + 1] = 30;
                    data[i + 2] = 30;
                }
            }
        }
        let img = ImageRgb8 {
            w,
            h,
            stride: 3 * w,
            data: &data,
        };
        let frac = red_fraction(&img);
        assert!((frac - 0.25).abs() < 1e-6, "fraction {frac}");
    }
}
