//! Font discovery, text measurement and drawing.
//!
//! An explicit font path must load or the render fails. Without one, a list
//! of well-known system fonts is probed per weight and the first that parses
//! wins; if none does, the built-in bitmap font is used so the image is still
//! produced.

use super::bitmap_font;
use crate::error::SiteFixError;
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Font weight a preset asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

const REGULAR_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BOLD_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

impl Weight {
    fn candidates(self) -> &'static [&'static str] {
        match self {
            Weight::Regular => REGULAR_CANDIDATES,
            Weight::Bold => BOLD_CANDIDATES,
        }
    }
}

/// A loaded typeface.
pub enum Typeface {
    /// TrueType/OpenType outline font (first face of a collection).
    Outline { font: FontVec, path: PathBuf },
    /// Built-in 5×7 bitmap font.
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Typeface").field(&self.name()).finish()
    }
}

fn load_outline(path: &Path) -> Result<FontVec, SiteFixError> {
    let bytes = std::fs::read(path).map_err(|e| SiteFixError::FontLoad {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    FontVec::try_from_vec_and_index(bytes, 0).map_err(|e| SiteFixError::FontLoad {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

impl Typeface {
    /// Resolve a typeface for `weight`.
    ///
    /// # Errors
    /// `FontLoad` only when `explicit` is given and cannot be loaded.
    pub fn load(explicit: Option<&Path>, weight: Weight) -> Result<Self, SiteFixError> {
        if let Some(path) = explicit {
            let font = load_outline(path)?;
            debug!("Using font {}", path.display());
            return Ok(Typeface::Outline {
                font,
                path: path.to_path_buf(),
            });
        }

        for candidate in weight.candidates() {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match load_outline(path) {
                Ok(font) => {
                    debug!("Using system font {}", path.display());
                    return Ok(Typeface::Outline {
                        font,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) => debug!("Skipping {}: {}", path.display(), e),
            }
        }

        warn!("No {:?} system font found, falling back to the built-in bitmap font", weight);
        Ok(Typeface::Builtin)
    }

    /// Font file path, or `"builtin"`.
    pub fn name(&self) -> String {
        match self {
            Typeface::Outline { path, .. } => path.display().to_string(),
            Typeface::Builtin => "builtin".to_string(),
        }
    }

    /// Width and height of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        match self {
            Typeface::Outline { font, .. } => text_size(PxScale::from(size), font, text),
            Typeface::Builtin => bitmap_font::measure(text, size),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        x: i32,
        y: i32,
        size: f32,
        color: Rgb<u8>,
    ) {
        match self {
            Typeface::Outline { font, .. } => {
                draw_text_mut(canvas, color, x, y, PxScale::from(size), font, text)
            }
            Typeface::Builtin => bitmap_font::draw(canvas, text, x, y, size, color),
        }
    }

    /// Draw `text` horizontally centred on the canvas at row `y`.
    ///
    /// Returns the measured text height.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        y: i32,
        size: f32,
        color: Rgb<u8>,
    ) -> u32 {
        let (w, h) = self.measure(text, size);
        let x = (canvas.width() as i32 - w as i32) / 2;
        self.draw(canvas, text, x, y, size, color);
        h
    }

    /// Total width of `text` drawn one character at a time with `spacing`
    /// extra pixels between characters.
    pub fn measure_spaced(&self, text: &str, size: f32, spacing: u32) -> u32 {
        let sum: u32 = text
            .chars()
            .map(|c| self.measure(c.encode_utf8(&mut [0; 4]), size).0 + spacing)
            .sum();
        sum.saturating_sub(spacing)
    }

    /// Draw `text` letter-spaced and horizontally centred at row `y`.
    pub fn draw_spaced_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        y: i32,
        size: f32,
        spacing: u32,
        color: Rgb<u8>,
    ) {
        let total = self.measure_spaced(text, size, spacing);
        let mut x = (canvas.width() as i32 - total as i32) / 2;
        for c in text.chars() {
            let s = c.encode_utf8(&mut [0; 4]).to_string();
            let (w, _) = self.measure(&s, size);
            self.draw(canvas, &s, x, y, size, color);
            x += (w + spacing) as i32;
        }
    }
}
