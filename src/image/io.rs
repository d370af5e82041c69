//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG into an owned 8-bit gray buffer.
//! - `decode_grayscale_png`: same, from an in-memory PNG.
//! - `encode_grayscale_png`: write an owned 8-bit gray buffer to PNG bytes.
//! - `save_grayscale_u8`: write an owned 8-bit gray buffer to a PNG file.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::GrayImageU8;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageEncoder};
use serde::Serialize;
use std::fs;
use std::path::Path;

fn from_dynamic(img: DynamicImage) -> Result<GrayImageU8, String> {
    let luma = img.into_luma8();
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    GrayImageU8::new(width, height, luma.into_raw())
        .ok_or_else(|| "Decoded image has inconsistent dimensions".to_string())
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    from_dynamic(img)
}

/// Decode an in-memory PNG and convert to 8-bit grayscale.
pub fn decode_grayscale_png(bytes: &[u8]) -> Result<GrayImageU8, String> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to decode PNG: {e}"))?;
    from_dynamic(img)
}

/// Encode an 8-bit grayscale buffer as PNG bytes.
pub fn encode_grayscale_png(buffer: &GrayImageU8) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.as_raw(),
            buffer.width() as u32,
            buffer.height() as u32,
            ExtendedColorType::L8,
        )
        .map_err(|e| format!("Failed to encode PNG: {e}"))?;
    Ok(out)
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.as_raw().to_vec(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
