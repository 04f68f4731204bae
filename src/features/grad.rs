//! Gradient and sharpness passes over a grayscale image.
//!
//! - Convolves the 3×3 Sobel kernel pair with border clamping and outputs
//!   per-pixel `gx`, `gy`, `mag = sqrt(gx^2 + gy^2)`.
//! - `laplacian_variance` is the variance of the 4-neighbor Laplacian
//!   response, the usual single-number sharpness proxy.
//!
//! Complexity: O(W·H) per pass.
use crate::image::GrayF32;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub gx: GrayF32,
    pub gy: GrayF32,
    pub mag: GrayF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &GrayF32) -> Gradients {
    let w = l.w;
    let h = l.h;
    let mut gx = GrayF32::new(w, h);
    let mut gy = GrayF32::new(w, h);
    let mut mag = GrayF32::new(w, h);

    if w == 0 || h == 0 {
        return Gradients { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_X[ky];
                let ky_row = &SOBEL_Y[ky];
                sum_x += row[x_idx[0]] * kx_row[0]
                    + row[x_idx[1]] * kx_row[1]
                    + row[x_idx[2]] * kx_row[2];
                sum_y += row[x_idx[0]] * ky_row[0]
                    + row[x_idx[1]] * ky_row[1]
                    + row[x_idx[2]] * ky_row[2];
            }

            gx.set(x, y, sum_x);
            gy.set(x, y, sum_y);
            mag.set(x, y, (sum_x * sum_x + sum_y * sum_y).sqrt());
        }
    }

    Gradients { gx, gy, mag }
}

/// Variance of the 4-neighbor Laplacian response.
pub fn laplacian_variance(l: &GrayF32) -> f32 {
    let w = l.w;
    let h = l.h;
    if w < 3 || h < 3 {
        return 0.0;
    }

    let n = ((w - 2) * (h - 2)) as f32;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let v = l.get(x, y - 1) + l.get(x, y + 1) + l.get(x - 1, y) + l.get(x + 1, y)
                - 4.0 * l.get(x, y);
            sum += f64::from(v);
            sum_sq += f64::from(v * v);
        }
    }
    let mean = sum / f64::from(n);
    ((sum_sq / f64::from(n)) - mean * mean).max(0.0) as f32
}

/// Fraction of pixels in columns `[x0, x1)` whose gradient magnitude exceeds
/// `thresh`. The per-half edge density used as the activity proxy.
pub fn edge_fraction(mag: &GrayF32, thresh: f32, x0: usize, x1: usize) -> f32 {
    let x1 = x1.min(mag.w);
    if x0 >= x1 || mag.h == 0 {
        return 0.0;
    }
    let mut hits = 0usize;
    for y in 0..mag.h {
        let row = mag.row(y);
        for &v in &row[x0..x1] {
            if v > thresh {
                hits += 1;
            }
        }
    }
    hits as f32 / ((x1 - x0) * mag.h) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: usize, h: usize) -> GrayF32 {
        let mut img = GrayF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, if x < w / 2 { 0.0 } else { 200.0 });
            }
        }
        img
    }

    #[test]
    fn step_edge_concentrates_magnitude_at_midline() {
        let img = vertical_step(32, 16);
        let grads = sobel_gradients(&img);
        let mid = 32 / 2;
        assert!(grads.mag.get(mid, 8) > 100.0);
        assert!(grads.mag.get(2, 8) < 1.0);
        assert!(grads.mag.get(29, 8) < 1.0);
    }

    #[test]
    fn edge_fraction_sees_only_the_requested_half() {
        let img = vertical_step(32, 16);
        let grads = sobel_gradients(&img);
        // The step sits on the boundary between halves; both see it, but a
        // flat strip far from the midline sees nothing.
        assert_eq!(edge_fraction(&grads.mag, 50.0, 0, 8), 0.0);
        assert!(edge_fraction(&grads.mag, 50.0, 8, 24) > 0.0);
    }

    #[test]
    fn flat_image_has_zero_sharpness() {
        let img = GrayF32::new(16, 16);
        assert_eq!(laplacian_variance(&img), 0.0);
    }
}
