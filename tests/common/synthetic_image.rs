//! Synthetic RGB image builders for the integration tests.

/// Uniform RGB buffer.
pub fn solid_rgb(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    data
}

/// A bright ellipse ("animal body") on a dark background. Gives the
/// extractor a clean contour with high solidity.
pub fn body_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = solid_rgb(width, height, [25, 25, 25]);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let a = width as f32 * 0.35;
    let b = height as f32 * 0.22;
    for y in 0..height {
        for x in 0..width {
            let dx = (x as f32 - cx) / a;
            let dy = (y as f32 - cy) / b;
            if dx * dx + dy * dy <= 1.0 {
                let i = (y * width + x) * 3;
                // mild texture so the body is not perfectly flat
                let v = if (x / 4 + y / 4) % 2 == 0 { 185 } else { 195 };
                data[i] = v;
                data[i + 1] = v.saturating_sub(5);
                data[i + 2] = v.saturating_sub(10);
            }
        }
    }
    data
}

/// Paint a solid rectangle into an existing buffer.
pub fn paint_rect(
    data: &mut [u8],
    width: usize,
    x0: usize,
    y0: usize,
    pw: usize,
    ph: usize,
    rgb: [u8; 3],
) {
    for y in y0..y0 + ph {
        for x in x0..x0 + pw {
            let i = (y * width + x) * 3;
            data[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

/// Paint a 7m × 7m QR-style finder pattern (dark ring, light ring, dark
/// core) at `(x0, y0)` with module size `m`.
pub fn paint_finder_pattern(data: &mut [u8], width: usize, x0: usize, y0: usize, m: usize) {
    for dy in 0..7 * m {
        for dx in 0..7 * m {
            let cx = dx / m;
            let cy = dy / m;
            let ring = cx == 0 || cy == 0 || cx == 6 || cy == 6;
            let core = (2..=4).contains(&cx) && (2..=4).contains(&cy);
            let v: u8 = if ring || core { 10 } else { 240 };
            let i = ((y0 + dy) * width + (x0 + dx)) * 3;
            data[i..i + 3].copy_from_slice(&[v, v, v]);
        }
    }
}

/// An image carrying three finder patterns on a bright background, like a
/// code label filling the frame corner.
pub fn code_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = solid_rgb(width, height, [240, 240, 240]);
    let m = 4;
    paint_finder_pattern(&mut data, width, 10, 10, m);
    paint_finder_pattern(&mut data, width, width - 10 - 7 * m, 10, m);
    paint_finder_pattern(&mut data, width, 10, height - 10 - 7 * m, m);
    data
}
