//! Open-Graph preview images: 1200×630 PNGs for link sharing.
//!
//! ## Data Flow
//!
//! ```text
//! background ──▶ logo ──▶ typeface ──▶ PNG
//! (solid/grad)  (fit+blend) (title/tagline)  (best compression)
//! ```
//!
//! 1. [`background`]: solid fill or vertical gradient
//! 2. [`logo`]: load, fit, Lanczos3 resize, alpha composite
//! 3. [`typeface`]: outline font via `ab_glyph`, or the built-in
//!    [`bitmap_font`] when nothing else is available
//! 4. [`presets`]: the three published layouts
//!
//! The canvas size is fixed whatever the inputs, so a missing logo or font
//! changes what is drawn but never the output dimensions.

pub mod background;
pub mod bitmap_font;
pub mod logo;
pub mod presets;
pub mod typeface;

use crate::config::{resolve_path, OgConfig};
use crate::error::SiteFixError;
use crate::files::write_atomic;
use crate::output::OgReport;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::path::Path;
use tracing::info;

/// Open Graph canvas width.
pub const WIDTH: u32 = 1200;
/// Open Graph canvas height.
pub const HEIGHT: u32 = 630;

/// Encode as PNG with maximum compression.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)?;
    Ok(buf)
}

/// Render the configured preset and write it under `root`.
///
/// # Errors
/// `AssetNotFound` when the brand preset's logo is missing (nothing is
/// written); `ImageDecode`, `FontLoad`, `ImageEncode`, `WriteFailed` otherwise.
pub fn render_preset(root: &Path, config: &OgConfig) -> Result<OgReport, SiteFixError> {
    let output = resolve_path(root, &config.output_path());
    info!("Rendering {} OG image", config.preset.name());

    let rendered = presets::render(root, config)?;

    let png = encode_png(&rendered.image).map_err(|source| SiteFixError::ImageEncode {
        path: output.clone(),
        source,
    })?;
    write_atomic(&output, &png)?;

    info!(
        "Created {} ({}x{}, {} bytes)",
        output.display(),
        rendered.image.width(),
        rendered.image.height(),
        png.len()
    );

    let typeface = if rendered.typefaces.is_empty() {
        "none".to_string()
    } else {
        rendered.typefaces.join(", ")
    };

    Ok(OgReport {
        preset: config.preset.name().to_string(),
        output,
        width: rendered.image.width(),
        height: rendered.image.height(),
        logo: rendered.logo,
        logo_size: rendered.logo_size,
        typeface,
        bytes: png.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_png_round_trips_dimensions() {
        let img = RgbImage::from_pixel(WIDTH, HEIGHT, image::Rgb([2, 6, 23]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (WIDTH, HEIGHT));
    }
}
