//! Canvas backgrounds.

use image::{Rgb, RgbImage};

/// Uniform fill.
pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Top-to-bottom linear gradient.
///
/// Row `y` gets `floor(top + (bottom - top) * y / height)` per channel, so
/// the last row stops just short of `bottom`.
pub fn vertical_gradient(width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    if height == 0 {
        return img;
    }
    for y in 0..height {
        let row = gradient_row(top, bottom, y, height);
        for x in 0..width {
            img.put_pixel(x, y, row);
        }
    }
    img
}

fn gradient_row(top: Rgb<u8>, bottom: Rgb<u8>, y: u32, height: u32) -> Rgb<u8> {
    let lerp = |a: u8, b: u8| {
        let (a, b) = (i64::from(a), i64::from(b));
        (a + ((b - a) * i64::from(y)).div_euclid(i64::from(height))) as u8
    };
    Rgb([
        lerp(top[0], bottom[0]),
        lerp(top[1], bottom[1]),
        lerp(top[2], bottom[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        let top = Rgb([2, 6, 23]);
        let bottom = Rgb([30, 27, 75]);
        let img = vertical_gradient(4, 630, top, bottom);
        assert_eq!(*img.get_pixel(0, 0), top);
        assert_eq!(*img.get_pixel(3, 315), Rgb([16, 16, 49]));
        assert_eq!(*img.get_pixel(0, 629), Rgb([29, 26, 74]));
    }

    #[test]
    fn gradient_can_darken() {
        let img = vertical_gradient(1, 10, Rgb([100, 100, 100]), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(0, 5), Rgb([50, 50, 50]));

        // 100 - 33.3 floors to 66, not 67.
        let img = vertical_gradient(1, 3, Rgb([100, 100, 100]), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(0, 1), Rgb([66, 66, 66]));
        assert_eq!(*img.get_pixel(0, 2), Rgb([33, 33, 33]));
    }

    #[test]
    fn solid_fills_everything() {
        let img = solid(3, 2, Rgb([15, 23, 42]));
        assert!(img.pixels().all(|p| *p == Rgb([15, 23, 42])));
    }
}
