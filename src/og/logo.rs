//! Logo loading, sizing and alpha compositing.

use crate::error::SiteFixError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use std::path::Path;
use tracing::debug;

/// Load a logo as RGBA. `Ok(None)` when the file does not exist.
pub fn load_logo(path: &Path) -> Result<Option<RgbaImage>, SiteFixError> {
    if !path.exists() {
        return Ok(None);
    }
    let img = image::open(path).map_err(|source| SiteFixError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded logo {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(Some(img.into_rgba8()))
}

/// Fit a `width`×`height` image inside `max_w`×`max_h`, keeping aspect.
///
/// Landscape images take the full `max_w`; portrait and square images take
/// the full `max_h`. The height is then clamped to `max_h`.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let aspect = f64::from(width) / f64::from(height.max(1));

    let (mut w, mut h) = if width > height {
        (max_w, (f64::from(max_w) / aspect) as u32)
    } else {
        ((f64::from(max_h) * aspect) as u32, max_h)
    };

    if h > max_h {
        h = max_h;
        w = (f64::from(h) * aspect) as u32;
    }

    (w.max(1), h.max(1))
}

/// Scale to `target_h` pixels tall, keeping aspect.
pub fn scale_to_height(width: u32, height: u32, target_h: u32) -> (u32, u32) {
    let aspect = f64::from(width) / f64::from(height.max(1));
    (((f64::from(target_h) * aspect) as u32).max(1), target_h.max(1))
}

/// Lanczos3 resample.
pub fn resize(logo: &RgbaImage, (w, h): (u32, u32)) -> RgbaImage {
    imageops::resize(logo, w, h, FilterType::Lanczos3)
}

/// Alpha-blend `logo` onto `canvas` with its top-left at `(x, y)`.
pub fn composite(canvas: &mut RgbImage, logo: &RgbaImage, x: i64, y: i64) {
    let mut rgba = DynamicImage::ImageRgb8(std::mem::take(canvas)).into_rgba8();
    imageops::overlay(&mut rgba, logo, x, y);
    *canvas = DynamicImage::ImageRgba8(rgba).into_rgb8();
}
