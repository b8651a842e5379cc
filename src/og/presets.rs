//! The three preview-image layouts.
//!
//! All coordinates are relative to a 1200×630 canvas. Text is centred
//! horizontally; vertical positions are offsets from the logo or from the
//! canvas middle, matching the images currently published.

use super::background::{solid, vertical_gradient};
use super::logo::{composite, fit_within, load_logo, resize, scale_to_height};
use super::typeface::{Typeface, Weight};
use super::{HEIGHT, WIDTH};
use crate::config::{resolve_path, OgConfig, OgPreset};
use crate::error::SiteFixError;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SLATE_900: Rgb<u8> = Rgb([15, 23, 42]);
const SLATE_950: Rgb<u8> = Rgb([2, 6, 23]);
const INDIGO_950: Rgb<u8> = Rgb([30, 27, 75]);
const INDIGO_200: Rgb<u8> = Rgb([199, 210, 254]);
const BRAND_300: Rgb<u8> = Rgb([147, 197, 253]);
const SLATE_300: Rgb<u8> = Rgb([203, 213, 225]);
const SLATE_400: Rgb<u8> = Rgb([148, 163, 184]);

/// A rendered canvas plus what went into it.
#[derive(Debug)]
pub struct Rendered {
    pub image: RgbImage,
    pub logo: Option<PathBuf>,
    pub logo_size: Option<(u32, u32)>,
    pub typefaces: Vec<String>,
}

/// Loads each weight at most once per render.
struct Faces<'a> {
    explicit: Option<&'a Path>,
    regular: Option<Typeface>,
    bold: Option<Typeface>,
}

impl<'a> Faces<'a> {
    fn new(explicit: Option<&'a Path>) -> Self {
        Self {
            explicit,
            regular: None,
            bold: None,
        }
    }

    fn get(&mut self, weight: Weight) -> Result<&Typeface, SiteFixError> {
        let slot = match weight {
            Weight::Regular => &mut self.regular,
            Weight::Bold => &mut self.bold,
        };
        let face = match slot.take() {
            Some(face) => face,
            None => Typeface::load(self.explicit, weight)?,
        };
        Ok(slot.insert(face))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = [&self.bold, &self.regular]
            .into_iter()
            .flatten()
            .map(Typeface::name)
            .collect();
        names.dedup();
        names
    }
}

/// Render the preset described by `config` without writing anything.
///
/// # Errors
/// `AssetNotFound` for the brand preset when its logo is missing; decode and
/// font errors for any preset.
pub fn render(root: &Path, config: &OgConfig) -> Result<Rendered, SiteFixError> {
    let logo_path = resolve_path(root, &config.logo_path());
    let font = config.font.as_ref().map(|p| resolve_path(root, p));
    let mut faces = Faces::new(font.as_deref());

    let (image, logo_size) = match config.preset {
        OgPreset::Brand => brand(&logo_path)?,
        OgPreset::Gradient => gradient(&logo_path, config, &mut faces)?,
        OgPreset::Wordmark => wordmark(&logo_path, config, &mut faces)?,
    };

    Ok(Rendered {
        image,
        logo: logo_size.map(|_| logo_path),
        logo_size,
        typefaces: faces.names(),
    })
}

fn centred_x(w: u32) -> i64 {
    (i64::from(WIDTH) - i64::from(w)) / 2
}

/// Solid slate, logo fitted to 80% of the canvas and centred.
fn brand(logo_path: &Path) -> Result<(RgbImage, Option<(u32, u32)>), SiteFixError> {
    let mut canvas = solid(WIDTH, HEIGHT, SLATE_900);

    let logo = load_logo(logo_path)?.ok_or_else(|| SiteFixError::AssetNotFound {
        path: logo_path.to_path_buf(),
    })?;

    let size = fit_within(
        logo.width(),
        logo.height(),
        WIDTH * 8 / 10,
        HEIGHT * 8 / 10,
    );
    let resized = resize(&logo, size);
    let y = (i64::from(HEIGHT) - i64::from(size.1)) / 2;
    composite(&mut canvas, &resized, centred_x(size.0), y);

    info!("Logo centred at {}x{}", size.0, size.1);
    Ok((canvas, Some(size)))
}

/// Slate-to-indigo gradient with logo and subtitle, or a text-only title
/// card when the logo is missing.
fn gradient(
    logo_path: &Path,
    config: &OgConfig,
    faces: &mut Faces<'_>,
) -> Result<(RgbImage, Option<(u32, u32)>), SiteFixError> {
    let mut canvas = vertical_gradient(WIDTH, HEIGHT, SLATE_950, INDIGO_950);

    match load_logo(logo_path)? {
        Some(logo) => {
            let size = fit_within(
                logo.width(),
                logo.height(),
                WIDTH * 7 / 10,
                HEIGHT * 6 / 10,
            );
            let resized = resize(&logo, size);
            let y = (i64::from(HEIGHT) - i64::from(size.1)) / 2 - 40;
            composite(&mut canvas, &resized, centred_x(size.0), y);

            let subtitle = config
                .subtitle
                .as_deref()
                .unwrap_or("Plataforma Imobiliária Completa para Corretores");
            let face = faces.get(Weight::Regular)?;
            face.draw_centered(
                &mut canvas,
                subtitle,
                (y + i64::from(size.1) + 30) as i32,
                42.0,
                SLATE_300,
            );
            Ok((canvas, Some(size)))
        }
        None => {
            warn!(
                "{} not found, creating text-only version",
                logo_path.display()
            );
            let title = config.title.as_deref().unwrap_or("Constellation");
            let face = faces.get(Weight::Bold)?;
            let (_, th) = face.measure(title, 120.0);
            let y = (HEIGHT as i32 - th as i32) / 2 - 50;
            face.draw_centered(&mut canvas, title, y, 120.0, BRAND_300);

            let subtitle = config
                .subtitle
                .as_deref()
                .unwrap_or("Plataforma Imobiliária para Corretores");
            let face = faces.get(Weight::Regular)?;
            face.draw_centered(&mut canvas, subtitle, y + th as i32 + 30, 48.0, SLATE_300);
            Ok((canvas, None))
        }
    }
}

/// Solid background, 180px-tall logo above centre, letter-spaced wordmark
/// and a tagline beneath it. The logo is optional.
fn wordmark(
    logo_path: &Path,
    config: &OgConfig,
    faces: &mut Faces<'_>,
) -> Result<(RgbImage, Option<(u32, u32)>), SiteFixError> {
    let mut canvas = solid(WIDTH, HEIGHT, SLATE_950);

    let logo_size = match load_logo(logo_path)? {
        Some(logo) => {
            let size = scale_to_height(logo.width(), logo.height(), 180);
            let resized = resize(&logo, size);
            let y = (i64::from(HEIGHT) - 180) / 2 - 60;
            composite(&mut canvas, &resized, centred_x(size.0), y);
            Some(size)
        }
        None => {
            info!("{} not found, rendering text only", logo_path.display());
            None
        }
    };

    let face = faces.get(Weight::Regular)?;
    let text_y = HEIGHT as i32 / 2 + 60;
    let title = config.title.as_deref().unwrap_or("CONSTELLATION");
    face.draw_spaced_centered(&mut canvas, title, text_y, 48.0, 12, INDIGO_200);

    let tagline = config
        .subtitle
        .as_deref()
        .unwrap_or("Plataforma Profissional para Corretores");
    face.draw_centered(&mut canvas, tagline, text_y + 70, 24.0, SLATE_400);

    Ok((canvas, logo_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Pixels in rows `y0..y1` that differ from `background`.
    fn changed_in_band(image: &RgbImage, background: &RgbImage, y0: u32, y1: u32) -> usize {
        (y0..y1)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y) != background.get_pixel(x, y))
            .count()
    }

    fn site_with_logo(rel: &str, w: u32, h: u32) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(w, h, Rgba([250, 250, 250, 255]))
            .save(&path)
            .unwrap();
        dir
    }

    #[test]
    fn brand_requires_logo() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(dir.path(), &OgConfig::builder(OgPreset::Brand).build().unwrap())
            .unwrap_err();
        assert!(matches!(err, SiteFixError::AssetNotFound { .. }));
    }

    #[test]
    fn brand_centres_logo() {
        let dir = site_with_logo("public/stella-logo-variation.png", 200, 100);
        let out = render(dir.path(), &OgConfig::default()).unwrap();
        assert_eq!(out.image.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(out.logo_size, Some((960, 480)));
        assert!(out.typefaces.is_empty());
        // Centre is logo, corner is background.
        assert_eq!(*out.image.get_pixel(600, 315), Rgb([250, 250, 250]));
        assert_eq!(*out.image.get_pixel(5, 5), SLATE_900);
    }

    #[test]
    fn gradient_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = render(
            dir.path(),
            &OgConfig::builder(OgPreset::Gradient).build().unwrap(),
        )
        .unwrap();
        assert_eq!(out.image.dimensions(), (WIDTH, HEIGHT));
        assert!(out.logo.is_none());
        assert!(!out.typefaces.is_empty());
        assert_eq!(*out.image.get_pixel(0, 0), SLATE_950);

        // Title sits above the middle, subtitle below it; the corners stay bare.
        let bg = vertical_gradient(WIDTH, HEIGHT, SLATE_950, INDIGO_950);
        assert!(changed_in_band(&out.image, &bg, 150, 320) > 0);
        assert!(changed_in_band(&out.image, &bg, 320, 480) > 0);
        assert_eq!(changed_in_band(&out.image, &bg, 0, 100), 0);
    }

    #[test]
    fn gradient_with_logo() {
        let dir = site_with_logo("public/contellation-logo.png", 100, 100);
        let out = render(
            dir.path(),
            &OgConfig::builder(OgPreset::Gradient).build().unwrap(),
        )
        .unwrap();
        assert_eq!(out.logo_size, Some((378, 378)));
        // Logo spans y = 86..464 (126 - 40 offset), centred horizontally.
        assert_eq!(*out.image.get_pixel(600, 100), Rgb([250, 250, 250]));
    }

    #[test]
    fn wordmark_with_and_without_logo() {
        let dir = site_with_logo("public/tech-icons/contellation-logo.png", 90, 90);
        let cfg = OgConfig::builder(OgPreset::Wordmark).build().unwrap();
        let with = render(dir.path(), &cfg).unwrap();
        assert_eq!(with.logo_size, Some((180, 180)));

        let empty = tempfile::tempdir().unwrap();
        let without = render(empty.path(), &cfg).unwrap();
        assert!(without.logo.is_none());
        assert_eq!(without.image.dimensions(), (WIDTH, HEIGHT));

        // Wordmark at y=375, tagline at y=445, nothing where the logo would be.
        let bg = solid(WIDTH, HEIGHT, SLATE_950);
        assert!(changed_in_band(&without.image, &bg, 370, 440) > 0);
        assert!(changed_in_band(&without.image, &bg, 440, 500) > 0);
        assert_eq!(changed_in_band(&without.image, &bg, 0, 360), 0);
        assert!(changed_in_band(&with.image, &bg, 0, 360) > 0);
    }
}
