//! Font resolution and text drawing.
//!
//! Resolution precedence: the theme's custom font asset, then a scan
//! of common system font locations, then an embedded 8x8 bitmap face.
//! Rendering therefore never fails solely because a font asset is
//! missing.

use crate::models::AssetRef;
use crate::store::AssetStore;
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};

/// Candidate system fonts, checked in order.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A usable drawing face.
pub enum ResolvedFont {
    /// A loaded TrueType/OpenType font.
    Vector(FontVec),
    /// The embedded 8x8 bitmap fallback.
    Bitmap,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vector(_) => f.write_str("ResolvedFont::Vector"),
            Self::Bitmap => f.write_str("ResolvedFont::Bitmap"),
        }
    }
}

/// Resolve a drawing face for a theme.
///
/// Failures at each step are logged and fall through to the next; the
/// bitmap face is the floor and always succeeds.
pub fn resolve(assets: &dyn AssetStore, custom: Option<&AssetRef>) -> ResolvedFont {
    if let Some(reference) = custom {
        match assets.load(reference) {
            Ok(bytes) => match FontVec::try_from_vec(bytes) {
                Ok(font) => return ResolvedFont::Vector(font),
                Err(e) => log::warn!("theme font {reference} unusable: {e}"),
            },
            Err(e) => log::warn!("theme font {reference} unavailable: {e}"),
        }
    }

    for path in SYSTEM_FONT_PATHS {
        if let Ok(bytes) = std::fs::read(path)
            && let Ok(font) = FontVec::try_from_vec(bytes)
        {
            return ResolvedFont::Vector(font);
        }
    }

    log::debug!("no system font found, using embedded bitmap face");
    ResolvedFont::Bitmap
}

/// Draw a line of text at `(x, y)` (top-left anchored).
pub fn draw_text(
    canvas: &mut RgbaImage,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    size: u32,
    font: &ResolvedFont,
    text: &str,
) {
    match font {
        ResolvedFont::Vector(face) => {
            let scale = PxScale::from(size as f32);
            imageproc::drawing::draw_text_mut(canvas, color, x, y, scale, face, text);
        }
        ResolvedFont::Bitmap => draw_bitmap_text(canvas, color, x, y, size, text),
    }
}

/// Render with the 8x8 face, scaled up to roughly match `size`.
fn draw_bitmap_text(canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, size: u32, text: &str) {
    let scale = i32::try_from((size / 8).max(1)).unwrap_or(1);
    let mut pen_x = x;

    for ch in text.chars() {
        if ch != ' ' {
            let rows = glyph_rows(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..8u8 {
                    if bits & (0x80 >> col) != 0 {
                        fill_cell(
                            canvas,
                            color,
                            pen_x + i32::from(col) * scale,
                            y + row as i32 * scale,
                            scale,
                        );
                    }
                }
            }
        }
        pen_x += 8 * scale;
    }
}

fn fill_cell(canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, scale: i32) {
    for dy in 0..scale {
        for dx in 0..scale {
            let (px, py) = (x + dx, y + dy);
            if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// 8x8 glyph rows, MSB leftmost. Covers digits, Latin letters (folded
/// to upper case), and the punctuation a standings board needs; every
/// other character renders as a box.
fn glyph_rows(ch: char) -> [u8; 8] {
    match ch.to_ascii_uppercase() {
        '0' => [0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00],
        '1' => [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        '2' => [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E, 0x00],
        '3' => [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
        '4' => [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00],
        '5' => [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
        '6' => [0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00],
        '7' => [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00],
        '8' => [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
        '9' => [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00],
        'A' => [0x18, 0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x00],
        'B' => [0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00],
        'C' => [0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00],
        'D' => [0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00],
        'E' => [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x7E, 0x00],
        'F' => [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x00],
        'G' => [0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00],
        'H' => [0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00],
        'I' => [0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00],
        'J' => [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00],
        'K' => [0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00],
        'L' => [0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00],
        'M' => [0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00],
        'N' => [0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00],
        'O' => [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
        'P' => [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00],
        'Q' => [0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00],
        'R' => [0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00],
        'S' => [0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00],
        'T' => [0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00],
        'U' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
        'V' => [0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00],
        'W' => [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00],
        'X' => [0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00],
        'Y' => [0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00],
        'Z' => [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00],
        '/' => [0x02, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00],
        _ => [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00],
    }
}
