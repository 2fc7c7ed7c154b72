//! Preview Pipeline
//!
//! Turns a file in the store into a [`Preview`]:
//! - Text: the first 10 KiB, validated as text
//! - Image: decoded, downscaled and drawn as ANSI art; anything that fails
//!   to decode falls back to the binary preview
//! - Binary: header plus a hex dump of the first 512 bytes
//!
//! Everything here is blocking and runs on a blocking worker thread.

use image::imageops::FilterType;

use crate::logic::{self, file::PreviewClass};
use crate::model::Preview;
use crate::vfs::{Storage, VfsError};

/// Bytes read for a text preview
pub const TEXT_PREVIEW_BYTES: usize = 10 * 1024;
/// Bytes shown in a hex dump
pub const BINARY_PREVIEW_BYTES: usize = 512;
/// Images above this size are never decoded
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Tunables for the preview pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewOptions {
    /// Maximum share of control characters for a text preview
    pub text_control_threshold: f64,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            text_control_threshold: logic::file::DEFAULT_CONTROL_THRESHOLD,
        }
    }
}

/// Build the preview of `path` for a `width`×`height` cell viewport
///
/// # Arguments
/// * `storage` - Store to read from
/// * `path` - Absolute path of the file
/// * `width`, `height` - Preview pane size in cells; zero means unknown
/// * `options` - Pipeline tunables
///
/// # Returns
/// The preview, or the storage error that prevented reading the file
pub fn generate_preview(
    storage: &dyn Storage,
    path: &str,
    width: u16,
    height: u16,
    options: PreviewOptions,
) -> Result<Preview, VfsError> {
    let meta = storage.stat(path)?;
    if meta.is_dir() || meta.size == 0 {
        return Ok(Preview::Empty);
    }

    match logic::file::classify(path) {
        PreviewClass::Text => text_preview(storage, path, options),
        PreviewClass::Image => {
            if meta.size > MAX_IMAGE_BYTES {
                return Ok(Preview::Notice(format!(
                    "[Image too large to preview: {:.1} MB]\n\nUse a dedicated image viewer for files > 5MB",
                    meta.size as f64 / (1024.0 * 1024.0)
                )));
            }

            match image_preview(storage, path, meta.size, width, height) {
                Ok(preview) => Ok(preview),
                Err(e) => {
                    tracing::debug!(path = %path, error = %e, "image preview failed, showing hex dump");
                    binary_preview(storage, path, meta.size)
                }
            }
        }
        PreviewClass::Binary => binary_preview(storage, path, meta.size),
        PreviewClass::Unsupported(description) => Ok(Preview::Notice(format!(
            "[Cannot preview {} files]",
            description
        ))),
    }
}

fn text_preview(
    storage: &dyn Storage,
    path: &str,
    options: PreviewOptions,
) -> Result<Preview, VfsError> {
    let bytes = storage.read_file(path, 0, TEXT_PREVIEW_BYTES)?;

    if !logic::file::looks_like_text(&bytes, options.text_control_threshold) {
        return Ok(Preview::Notice(
            "[Binary file - cannot preview as text]".to_string(),
        ));
    }

    Ok(Preview::Text(String::from_utf8_lossy(&bytes).into_owned()))
}

fn image_preview(
    storage: &dyn Storage,
    path: &str,
    size: u64,
    width: u16,
    height: u16,
) -> Result<Preview, VfsError> {
    let bytes = storage.read_file(path, 0, size as usize)?;

    let format = image::guess_format(&bytes)?;
    let img = image::load_from_memory_with_format(&bytes, format)?;
    let (orig_width, orig_height) = (img.width(), img.height());

    let (max_width, max_height) = logic::image::pixel_bounds(width, height);
    let (new_width, new_height) =
        logic::image::fit_dimensions(orig_width, orig_height, max_width, max_height);

    let mut rgba = img.to_rgba8();
    if (new_width, new_height) != (orig_width, orig_height) {
        rgba = image::imageops::resize(&rgba, new_width, new_height, FilterType::CatmullRom);
    }

    tracing::debug!(
        path = %path,
        original = ?(orig_width, orig_height),
        scaled = ?(new_width, new_height),
        "rendered image preview"
    );

    Ok(Preview::Image {
        format: logic::image::format_name(format),
        width: orig_width,
        height: orig_height,
        art: logic::image::render_half_blocks(&rgba),
    })
}

fn binary_preview(storage: &dyn Storage, path: &str, size: u64) -> Result<Preview, VfsError> {
    let bytes = storage.read_file(path, 0, BINARY_PREVIEW_BYTES)?;

    let mut out = format!(
        "Binary file: {}\nSize: {} bytes\n\nHex dump (first {} bytes):\n{}\n",
        logic::path::base_name(path),
        size,
        BINARY_PREVIEW_BYTES,
        "-".repeat(60)
    );
    out.push_str(&logic::formatting::hex_dump(&bytes));

    if size > bytes.len() as u64 {
        out.push_str("\n... (truncated)");
    }

    Ok(Preview::Binary(out))
}
