use image::{Rgb, RgbImage};

use crate::extract::Pixel;

/// A single pixel in 8-bit HSV.
///
/// Uses the common 8-bit convention: hue is halved onto `0..180`,
/// saturation and value span `0..=255`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl From<Rgb<u8>> for Hsv {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

        let degrees = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };

        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        let h = (degrees / 2.0).round();

        Hsv {
            // 359.5° rounds up to 180, which is the same hue as 0
            h: if h >= 180.0 { 0 } else { h as u8 },
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// A row-major HSV image buffer.
#[derive(Clone, Debug)]
pub struct HsvImage {
    width: u32,
    height: u32,
    data: Vec<Hsv>,
}

impl HsvImage {
    /// Wraps an existing buffer. Returns `None` if the buffer size does
    /// not match the dimensions.
    pub fn from_vec(width: u32, height: u32, data: Vec<Hsv>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(HsvImage {
            width,
            height,
            data,
        })
    }

    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image.pixels().map(|pixel| Hsv::from(*pixel)).collect();

        HsvImage {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, pixel: Pixel) -> Option<&Hsv> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return None;
        }

        self.data
            .get(pixel.y as usize * self.width as usize + pixel.x as usize)
    }
}
