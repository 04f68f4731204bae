//! Body contour analysis: Otsu segmentation, largest-component shape
//! descriptors, convex hull and principal-axis tilt.
//!
//! Pipeline
//! - Otsu threshold on a 256-bin histogram splits the frame into a bright
//!   and a dark class; the animal body is taken as the brighter class.
//! - The largest 4-connected component of that class is the body candidate.
//!   A candidate covering almost the whole frame or almost nothing is
//!   rejected (no usable contour, descriptors degrade).
//! - Descriptors: area, boundary perimeter, circularity `4πA/P²` (clamped to
//!   [0,1]), convex-hull solidity, in-mask brightness statistics, and the
//!   principal-axis tilt from second central moments.
use super::regions::{label_components, Component};
use crate::image::GrayF32;

/// Shape and texture descriptors of the segmented body region.
#[derive(Clone, Copy, Debug)]
pub struct BodyShape {
    pub area: f32,
    pub perimeter: f32,
    pub circularity: f32,
    pub solidity: f32,
    pub mean_brightness: f32,
    pub texture_std_dev: f32,
    /// Principal-axis tilt from horizontal, normalized to [0, 1].
    pub posture_deviation: f32,
}

/// Otsu's threshold over a 256-bin histogram of an 8-bit-range image.
pub fn otsu_threshold(l: &GrayF32) -> f32 {
    let mut hist = [0u32; 256];
    for &v in &l.data {
        let b = (v.clamp(0.0, 255.0)) as usize;
        hist[b.min(255)] += 1;
    }
    let total = l.data.len() as f64;
    if total == 0.0 {
        return 127.0;
    }

    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * f64::from(c))
        .sum();

    let mut sum_bg = 0.0f64;
    let mut w_bg = 0.0f64;
    let mut best_var = -1.0f64;
    let mut best_t = 127usize;
    for (t, &c) in hist.iter().enumerate() {
        w_bg += f64::from(c);
        if w_bg == 0.0 {
            continue;
        }
        let w_fg = total - w_bg;
        if w_fg == 0.0 {
            break;
        }
        sum_bg += t as f64 * f64::from(c);
        let mean_bg = sum_bg / w_bg;
        let mean_fg = (sum_all - sum_bg) / w_fg;
        let between = w_bg * w_fg * (mean_bg - mean_fg) * (mean_bg - mean_fg);
        if between > best_var {
            best_var = between;
            best_t = t;
        }
    }
    best_t as f32
}

/// Segment the body and compute its shape descriptors.
///
/// Returns `None` when no usable contour exists (uniform frame, or the
/// candidate fills/misses the frame); callers treat that as the degraded
/// feature-extraction path.
pub fn analyze_body(l: &GrayF32) -> Option<BodyShape> {
    let w = l.w;
    let h = l.h;
    if w == 0 || h == 0 {
        return None;
    }

    let thresh = otsu_threshold(l);
    let mask: Vec<bool> = l.data.iter().map(|&v| v > thresh).collect();
    let labeling = label_components(&mask, w, h);
    let body = *labeling.largest()?;

    // Reject degenerate candidates: near-full-frame means the threshold did
    // not separate anything; a tiny speck carries no shape information.
    let frame = (w * h) as f32;
    let area = body.area as f32;
    if area > 0.95 * frame || area < 0.002 * frame {
        return None;
    }

    let stats = mask_statistics(l, &labeling.labels, body.label);
    let boundary = boundary_points(&labeling.labels, w, h, body.label);
    let perimeter = boundary.len() as f32;

    let circularity = if perimeter > 0.0 {
        (4.0 * std::f32::consts::PI * area / (perimeter * perimeter)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let hull_area = convex_hull_area(&boundary);
    let solidity = if hull_area > 0.0 {
        (area / hull_area).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(BodyShape {
        area,
        perimeter,
        circularity,
        solidity,
        mean_brightness: stats.mean,
        texture_std_dev: stats.std_dev,
        posture_deviation: principal_tilt(&body, &labeling.labels, w),
    })
}

struct MaskStats {
    mean: f32,
    std_dev: f32,
}

fn mask_statistics(l: &GrayF32, labels: &[u32], label: u32) -> MaskStats {
    let mut n = 0usize;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for (idx, &lab) in labels.iter().enumerate() {
        if lab == label {
            let v = f64::from(l.data[idx]);
            n += 1;
            sum += v;
            sum_sq += v * v;
        }
    }
    if n == 0 {
        return MaskStats {
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let mean = sum / n as f64;
    let var = (sum_sq / n as f64 - mean * mean).max(0.0);
    MaskStats {
        mean: mean as f32,
        std_dev: var.sqrt() as f32,
    }
}

/// Pixels of the component with at least one 4-neighbor outside it.
fn boundary_points(labels: &[u32], w: usize, h: usize, label: u32) -> Vec<(f32, f32)> {
    let mut pts = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if labels[y * w + x] != label {
                continue;
            }
            let edge = x == 0
                || y == 0
                || x + 1 == w
                || y + 1 == h
                || labels[y * w + x - 1] != label
                || labels[y * w + x + 1] != label
                || labels[(y - 1) * w + x] != label
                || labels[(y + 1) * w + x] != label;
            if edge {
                pts.push((x as f32, y as f32));
            }
        }
    }
    pts
}

/// Convex hull area (monotone chain + shoelace).
fn convex_hull_area(points: &[(f32, f32)]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    pts.dedup();
    if pts.len() < 3 {
        return 0.0;
    }

    let cross = |o: (f32, f32), a: (f32, f32), b: (f32, f32)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    let mut hull: Vec<(f32, f32)> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();

    let mut area2 = 0.0f32;
    for i in 0..hull.len() {
        let (x0, y0) = hull[i];
        let (x1, y1) = hull[(i + 1) % hull.len()];
        area2 += x0 * y1 - x1 * y0;
    }
    area2.abs() / 2.0
}

/// Tilt of the mask's principal axis from horizontal, normalized so that a
/// vertical axis maps to 1.0.
fn principal_tilt(body: &Component, labels: &[u32], w: usize) -> f32 {
    let mut n = 0.0f64;
    let mut sx = 0.0f64;
    let mut sy = 0.0f64;
    for (idx, &lab) in labels.iter().enumerate() {
        if lab == body.label {
            sx += (idx % w) as f64;
            sy += (idx / w) as f64;
            n += 1.0;
        }
    }
    if n == 0.0 {
        return 0.0;
    }
    let cx = sx / n;
    let cy = sy / n;

    let mut mu20 = 0.0f64;
    let mut mu02 = 0.0f64;
    let mut mu11 = 0.0f64;
    for (idx, &lab) in labels.iter().enumerate() {
        if lab == body.label {
            let dx = (idx % w) as f64 - cx;
            let dy = (idx / w) as f64 - cy;
            mu20 += dx * dx;
            mu02 += dy * dy;
            mu11 += dx * dy;
        }
    }

    let angle = 0.5 * (2.0 * mu11).atan2(mu20 - mu02);
    // angle in (-pi/2, pi/2]; fold to [0, pi/2] tilt from horizontal
    (angle.abs() / std::f64::consts::FRAC_PI_2).min(1.0) as f32
}
