use serde::{Deserialize, Serialize};

/// An integer pixel coordinate, `x` rightwards and `y` downwards.
///
/// Ordering is lexicographic on `(x, y)`, which is the stable
/// ordering used wherever a component has no natural start.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
}

impl Pixel {
    pub const fn new(x: u32, y: u32) -> Self {
        Pixel { x, y }
    }

    /// Euclidean distance between two pixels.
    #[inline]
    pub fn distance(&self, other: &Pixel) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(&self, other: &Pixel) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx * dx + dy * dy
    }

    /// True if the pixels are distinct and touch, diagonals included.
    #[inline]
    pub fn is_adjacent(&self, other: &Pixel) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }

    /// The in-bounds 8-connected neighbours of this pixel, for an
    /// image of `width`x`height`.
    pub fn neighbours(&self, width: u32, height: u32) -> impl Iterator<Item = Pixel> + '_ {
        NEIGHBOURHOOD.iter().filter_map(move |(dx, dy)| {
            let x = self.x.checked_add_signed(*dx)?;
            let y = self.y.checked_add_signed(*dy)?;
            (x < width && y < height).then_some(Pixel { x, y })
        })
    }
}

/// The eight neighbour offsets, clockwise from north.
pub(crate) const NEIGHBOURHOOD: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

impl From<Pixel> for (f64, f64) {
    fn from(pixel: Pixel) -> Self {
        (pixel.x as f64, pixel.y as f64)
    }
}

impl From<(u32, u32)> for Pixel {
    fn from((x, y): (u32, u32)) -> Self {
        Pixel { x, y }
    }
}

/// An inclusive pixel-space bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBox {
    /// The tight box around `pixels`, or `None` if there are none.
    pub fn enclosing<'a>(pixels: impl IntoIterator<Item = &'a Pixel>) -> Option<Self> {
        pixels.into_iter().fold(None, |bounds, pixel| {
            Some(match bounds {
                None => PixelBox {
                    min_x: pixel.x,
                    min_y: pixel.y,
                    max_x: pixel.x,
                    max_y: pixel.y,
                },
                Some(PixelBox {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                }) => PixelBox {
                    min_x: min_x.min(pixel.x),
                    min_y: min_y.min(pixel.y),
                    max_x: max_x.max(pixel.x),
                    max_y: max_y.max(pixel.y),
                },
            })
        })
    }

    pub fn contains(&self, pixel: &Pixel) -> bool {
        (self.min_x..=self.max_x).contains(&pixel.x) && (self.min_y..=self.max_y).contains(&pixel.y)
    }
}

/// Total Euclidean length of an ordered pixel polyline.
pub fn polyline_length(polyline: &[Pixel]) -> f64 {
    polyline
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}
