//! Machine-readable code detection via finder-pattern scanning.
//!
//! Scans binarized rows and columns for the 1:1:3:1:1 dark/light run
//! signature of QR-style finder patterns and counts locations where a row
//! hit coincides with a column hit. Payload decoding is the ingestion
//! layer's concern; the engine corroborates a caller-supplied payload when
//! the pattern count confirms a code is physically present in the frame.
use serde::Serialize;

use crate::features::mask::otsu_threshold;
use crate::image::GrayF32;

#[derive(Clone, Debug)]
pub struct CodeParams {
    /// Coinciding row/column pattern hits required to report a code.
    pub min_patterns: usize,
    /// Relative tolerance on each run against the ideal module size.
    pub ratio_tol: f32,
    /// Runs shorter than this many pixels are noise.
    pub min_module_px: f32,
    /// Confidence when patterns are found / when a supplied payload
    /// corroborates them.
    pub detect_conf: f32,
    pub corroborated_conf: f32,
}

impl Default for CodeParams {
    fn default() -> Self {
        Self {
            min_patterns: 3,
            ratio_tol: 0.5,
            min_module_px: 2.0,
            detect_conf: 0.95,
            corroborated_conf: 0.98,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CodeDetection {
    pub finder_patterns: usize,
    pub payload: Option<String>,
    pub confidence: f32,
}

/// Detect a code in the frame. `claimed` is the caller-supplied payload, if
/// any; it is echoed back (with raised confidence) only when the visual
/// evidence supports it.
pub fn detect_code(gray: &GrayF32, claimed: Option<&str>, p: &CodeParams) -> Option<CodeDetection> {
    if gray.w == 0 || gray.h == 0 {
        return None;
    }
    let thresh = otsu_threshold(gray);

    let mut row_hits: Vec<(f32, f32)> = Vec::new();
    for y in 0..gray.h {
        scan_line(gray.row(y), thresh, p, |center| {
            row_hits.push((center, y as f32));
        });
    }

    let mut col_hits: Vec<(f32, f32)> = Vec::new();
    let mut column = vec![0.0f32; gray.h];
    for x in 0..gray.w {
        for y in 0..gray.h {
            column[y] = gray.get(x, y);
        }
        scan_line(&column, thresh, p, |center| {
            col_hits.push((x as f32, center));
        });
    }

    // A finder pattern needs a row hit and a column hit at the same spot.
    let tol = 4.0 * p.min_module_px;
    let mut centers: Vec<(f32, f32)> = Vec::new();
    for &(rx, ry) in &row_hits {
        let coincides = col_hits
            .iter()
            .any(|&(cx, cy)| (cx - rx).abs() <= tol && (cy - ry).abs() <= tol);
        if !coincides {
            continue;
        }
        let seen = centers
            .iter()
            .any(|&(px, py)| (px - rx).abs() <= tol && (py - ry).abs() <= tol);
        if !seen {
            centers.push((rx, ry));
        }
    }

    if centers.len() < p.min_patterns {
        return None;
    }
    log::debug!(
        "code detection: {} finder patterns ({} row hits, {} column hits)",
        centers.len(),
        row_hits.len(),
        col_hits.len()
    );

    let (payload, confidence) = match claimed {
        Some(id) => (Some(id.to_string()), p.corroborated_conf),
        None => (None, p.detect_conf),
    };
    Some(CodeDetection {
        finder_patterns: centers.len(),
        payload,
        confidence,
    })
}

/// Run-length scan of one line; invokes `on_hit` with the center coordinate
/// of every 1:1:3:1:1 dark/light/dark/light/dark sequence.
fn scan_line(line: &[f32], thresh: f32, p: &CodeParams, mut on_hit: impl FnMut(f32)) {
    // Build runs of (is_dark, length, start).
    let mut runs: Vec<(bool, f32, f32)> = Vec::new();
    let mut start = 0usize;
    for i in 1..=line.len() {
        let boundary = i == line.len() || (line[i] <= thresh) != (line[start] <= thresh);
        if boundary {
            runs.push((line[start] <= thresh, (i - start) as f32, start as f32));
            start = i;
        }
    }

    for window in runs.windows(5) {
        // dark, light, dark(3x), light, dark
        if !window[0].0 || window[1].0 || !window[2].0 || window[3].0 || !window[4].0 {
            continue;
        }
        let total: f32 = window.iter().map(|r| r.1).sum();
        let module = total / 7.0;
        if module < p.min_module_px {
            continue;
        }
        let ok = |run: f32, ideal: f32| (run - ideal * module).abs() <= p.ratio_tol * module * ideal;
        if ok(window[0].1, 1.0)
            && ok(window[1].1, 1.0)
            && ok(window[2].1, 3.0)
            && ok(window[3].1, 1.0)
            && ok(window[4].1, 1.0)
        {
            on_hit(window[2].2 + window[2].1 / 2.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Paint a 7m x 7m finder pattern (dark ring, light ring, dark core).
    fn paint_finder(img: &mut GrayF32, x0: usize, y0: usize, m: usize) {
        for dy in 0..7 * m {
            for dx in 0..7 * m {
                let cx = dx / m;
                let cy = dy / m;
                let ring = cx == 0 || cy == 0 || cx == 6 || cy == 6;
                let core = (2..=4).contains(&cx) && (2..=4).contains(&cy);
                let v = if ring || core { 10.0 } else { 240.0 };
                img.set(x0 + dx, y0 + dy, v);
            }
        }
    }

    fn code_image() -> GrayF32 {
        let mut img = GrayF32::new(160, 160);
        for v in img.data.iter_mut() {
            *v = 240.0;
        }
        paint_finder(&mut img, 10, 10, 4);
        paint_finder(&mut img, 120, 10, 4);
        paint_finder(&mut img, 10, 120, 4);
        img
    }

    #[test]
    fn three_finder_patterns_are_detected() {
        let detection = detect_code(&code_image(), None, &CodeParams::default())
            .expect("patterns should be found");
        assert!(detection.finder_patterns >= 3);
        assert_eq!(detection.confidence, 0.95);
        assert!(detection.payload.is_none());
    }

    #[test]
    fn claimed_payload_is_corroborated() {
        let detection = detect_code(&code_image(), Some("COW-042"), &CodeParams::default())
            .expect("patterns should be found");
        assert_eq!(detection.payload.as_deref(), Some("COW-042"));
        assert_eq!(detection.confidence, 0.98);
    }

    #[test]
    fn blank_image_has_no_code() {
        let mut img = GrayF32::new(128, 128);
        for v in img.data.iter_mut() {
            *v = 200.0;
        }
        assert!(detect_code(&img, Some("COW-042"), &CodeParams::default()).is_none());
    }
}
