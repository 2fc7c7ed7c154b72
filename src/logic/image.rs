//! Image-to-text rendering
//!
//! Images are drawn with half-block characters: each character cell covers
//! two vertically stacked pixels, the upper one in the foreground colour of
//! `▀` and the lower one in the background colour. The result is a string of
//! 24-bit ANSI escape sequences.

use image::{Rgba, RgbaImage};
use std::fmt::Write as _;

/// Widest rendering in character cells
pub const MAX_CELL_WIDTH: u32 = 260;
/// Tallest rendering in character cells
pub const MAX_CELL_HEIGHT: u32 = 80;
/// Pixels with alpha below this are treated as transparent
const ALPHA_CUTOFF: u8 = 128;

/// Scale `width`×`height` to fit inside `max_width`×`max_height`
///
/// Aspect ratio is preserved, the image is never enlarged, and neither side
/// drops below one pixel.
///
/// # Examples
/// ```
/// use vfsh::logic::image::fit_dimensions;
///
/// assert_eq!(fit_dimensions(100, 50, 260, 160), (100, 50));   // no upscale
/// assert_eq!(fit_dimensions(1000, 500, 260, 160), (260, 130));
/// assert_eq!(fit_dimensions(500, 1000, 260, 160), (80, 160));
/// assert_eq!(fit_dimensions(10000, 1, 260, 160), (260, 1));
/// ```
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }

    let scale = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width.max(1));
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height.max(1));
    (new_width, new_height)
}

/// Pixel bounds for a rendering inside a viewport of `cols`×`rows` cells
///
/// Zero-sized viewports fall back to the fixed cell grid.
///
/// # Examples
/// ```
/// use vfsh::logic::image::pixel_bounds;
///
/// assert_eq!(pixel_bounds(0, 0), (260, 160));
/// assert_eq!(pixel_bounds(80, 24), (80, 48));
/// assert_eq!(pixel_bounds(400, 200), (260, 160));
/// ```
pub fn pixel_bounds(cols: u16, rows: u16) -> (u32, u32) {
    let cols = if cols == 0 { MAX_CELL_WIDTH } else { (cols as u32).min(MAX_CELL_WIDTH) };
    let rows = if rows == 0 { MAX_CELL_HEIGHT } else { (rows as u32).min(MAX_CELL_HEIGHT) };
    (cols, rows * 2)
}

/// Lower-cased display name of a decoded image format
///
/// # Examples
/// ```
/// use vfsh::logic::image::format_name;
///
/// assert_eq!(format_name(image::ImageFormat::Png), "png");
/// assert_eq!(format_name(image::ImageFormat::Jpeg), "jpeg");
/// ```
pub fn format_name(format: image::ImageFormat) -> String {
    format!("{:?}", format).to_lowercase()
}

fn opaque(pixel: &Rgba<u8>) -> bool {
    pixel[3] >= ALPHA_CUTOFF
}

/// Render an already-scaled image as half-block ANSI art
///
/// Every line ends with a colour reset; an odd last pixel row is drawn with
/// a transparent lower half.
pub fn render_half_blocks(img: &RgbaImage) -> String {
    let (width, height) = img.dimensions();
    let mut out = String::new();

    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = img.get_pixel(x, y);
            let bottom = (y + 1 < height).then(|| img.get_pixel(x, y + 1));

            match (opaque(top), bottom.filter(|p| opaque(p))) {
                (true, Some(b)) => {
                    let _ = write!(
                        out,
                        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                        top[0], top[1], top[2], b[0], b[1], b[2]
                    );
                }
                (true, None) => {
                    let _ = write!(out, "\x1b[49m\x1b[38;2;{};{};{}m▀", top[0], top[1], top[2]);
                }
                (false, Some(b)) => {
                    let _ = write!(out, "\x1b[49m\x1b[38;2;{};{};{}m▄", b[0], b[1], b[2]);
                }
                (false, None) => out.push_str("\x1b[0m "),
            }
        }
        out.push_str("\x1b[0m\n");
    }

    out
}
