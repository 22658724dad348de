//! Binary masks and 3x3 morphology.
//!
//! Pixels outside the mask are treated as background. Erosion therefore
//! clears every set pixel touching the image border, and dilation never
//! grows beyond it.

use image::{GrayImage, Luma};

use crate::extract::Pixel;

/// The 3x3 structuring element used by a morphological operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kernel {
    /// All eight neighbours and the centre.
    Square,
    /// The four axis-aligned neighbours and the centre.
    Cross,
}

impl Kernel {
    fn offsets(&self) -> &'static [(i32, i32)] {
        const SQUARE: [(i32, i32); 9] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (0, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        const CROSS: [(i32, i32); 5] = [(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)];

        match self {
            Kernel::Square => &SQUARE,
            Kernel::Cross => &CROSS,
        }
    }
}

/// A row-major binary mask.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mask({}x{}, {} set)",
            self.width,
            self.height,
            self.count()
        )
    }
}

impl Mask {
    /// An empty (all background) mask.
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            data: vec![false; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(Pixel) -> bool) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| Pixel::new(x, y)))
            .map(&mut f)
            .collect();

        Mask {
            width,
            height,
            data,
        }
    }

    /// A mask with exactly the given pixels set. Out of bounds pixels are ignored.
    pub fn from_pixels<'a>(
        width: u32,
        height: u32,
        pixels: impl IntoIterator<Item = &'a Pixel>,
    ) -> Self {
        let mut mask = Mask::new(width, height);
        pixels.into_iter().for_each(|pixel| mask.set(*pixel, true));
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, pixel: Pixel) -> bool {
        pixel.x < self.width && pixel.y < self.height && self.data[self.index(pixel.x, pixel.y)]
    }

    /// Signed lookup, where anything outside the mask is background.
    #[inline]
    pub(crate) fn get_signed(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }

        self.data[self.index(x as u32, y as u32)]
    }

    #[inline]
    pub fn set(&mut self, pixel: Pixel, value: bool) {
        if pixel.x < self.width && pixel.y < self.height {
            let index = self.index(pixel.x, pixel.y);
            self.data[index] = value;
        }
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|set| **set).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|set| *set)
    }

    /// Set pixels, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(index, _)| {
                let index = index as u32;
                Pixel::new(index % width, index / width)
            })
    }

    /// True if every set pixel of `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &Mask) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.data.iter().zip(&other.data).all(|(a, b)| !*a || *b)
    }

    /// Pixel-wise OR.
    pub fn union(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a || b)
    }

    /// Pixel-wise `self AND NOT other`.
    pub fn subtract(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a && !b)
    }

    fn zip_with(&self, other: &Mask, f: impl Fn(bool, bool) -> bool) -> Mask {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));

        Mask {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| f(*a, *b))
                .collect(),
        }
    }

    /// Morphological erosion: a pixel survives only if every pixel
    /// under the kernel is set.
    pub fn erode(&self, kernel: Kernel) -> Mask {
        let offsets = kernel.offsets();
        Mask::from_fn(self.width, self.height, |Pixel { x, y }| {
            offsets
                .iter()
                .all(|(dx, dy)| self.get_signed(x as i64 + *dx as i64, y as i64 + *dy as i64))
        })
    }

    /// Morphological dilation: a pixel is set if any pixel under the
    /// kernel is set.
    pub fn dilate(&self, kernel: Kernel) -> Mask {
        let offsets = kernel.offsets();
        Mask::from_fn(self.width, self.height, |Pixel { x, y }| {
            offsets
                .iter()
                .any(|(dx, dy)| self.get_signed(x as i64 + *dx as i64, y as i64 + *dy as i64))
        })
    }

    /// Erosion followed by dilation, removing specks smaller than the kernel.
    pub fn open(&self, kernel: Kernel) -> Mask {
        self.erode(kernel).dilate(kernel)
    }

    /// Dilation followed by erosion, bridging gaps smaller than the kernel.
    pub fn close(&self, kernel: Kernel) -> Mask {
        self.dilate(kernel).erode(kernel)
    }

    /// Renders the mask as a `0`/`255` grayscale image.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.get(Pixel::new(x, y)) { 255 } else { 0 }])
        })
    }
}
