//! I/O helpers for the CLI tool.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned interleaved RGB8
//!   buffer.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The engine itself never touches the filesystem; these helpers live at the
//! tool boundary only.
use super::ImageRgb8;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned interleaved RGB8 buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBuffer {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageRgb8` view.
    pub fn as_view(&self) -> ImageRgb8<'_> {
        ImageRgb8 {
            w: self.width,
            h: self.height,
            stride: 3 * self.width,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to interleaved RGB8.
pub fn load_rgb_image(path: &Path) -> Result<RgbBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(RgbBuffer::new(width, height, img.into_raw()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}
