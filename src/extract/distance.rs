use crate::extract::{Mask, Pixel};

/// Stand-in for infinity which keeps the parabola intersections finite.
const FAR: f64 = 1e20;

/// Exact Euclidean distance from every pixel to the nearest background
/// pixel, where everything outside the mask counts as background.
///
/// Computed as two separable passes of the lower-envelope squared
/// distance transform (Felzenszwalb & Huttenlocher), over a grid padded
/// by one background pixel on every side.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: u32,
    height: u32,
    distances: Vec<f64>,
}

impl DistanceField {
    pub fn new(mask: &Mask) -> Self {
        let (width, height) = (mask.width(), mask.height());
        let (pw, ph) = (width as usize + 2, height as usize + 2);

        let mut grid = vec![0.0f64; pw * ph];
        for pixel in mask.pixels() {
            grid[(pixel.y as usize + 1) * pw + pixel.x as usize + 1] = FAR;
        }

        let longest = pw.max(ph);
        let mut column = vec![0.0; longest];
        let mut output = vec![0.0; longest];
        let mut hull = vec![0usize; longest];
        let mut bounds = vec![0.0; longest + 1];

        for y in 0..ph {
            let row = &mut grid[y * pw..(y + 1) * pw];
            column[..pw].copy_from_slice(row);
            squared_distance_1d(&column[..pw], &mut output[..pw], &mut hull, &mut bounds);
            row.copy_from_slice(&output[..pw]);
        }

        for x in 0..pw {
            for y in 0..ph {
                column[y] = grid[y * pw + x];
            }
            squared_distance_1d(&column[..ph], &mut output[..ph], &mut hull, &mut bounds);
            for y in 0..ph {
                grid[y * pw + x] = output[y];
            }
        }

        let distances = (0..height as usize)
            .flat_map(|y| {
                let grid = &grid;
                (0..width as usize).map(move |x| grid[(y + 1) * pw + x + 1].sqrt())
            })
            .collect();

        DistanceField {
            width,
            height,
            distances,
        }
    }

    /// Distance at a pixel, `0.0` for background or out of bounds pixels.
    #[inline]
    pub fn get(&self, pixel: Pixel) -> f64 {
        if pixel.x >= self.width || pixel.y >= self.height {
            return 0.0;
        }

        self.distances[pixel.y as usize * self.width as usize + pixel.x as usize]
    }

    /// The greatest distance in the field.
    pub fn max(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }

    /// Pixels whose distance strictly exceeds `threshold`.
    pub fn threshold(&self, threshold: f64) -> Mask {
        Mask::from_fn(self.width, self.height, |pixel| self.get(pixel) > threshold)
    }
}

/// One dimensional squared distance transform of the sampled function `f`.
fn squared_distance_1d(f: &[f64], d: &mut [f64], hull: &mut [usize], bounds: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    let mut k = 0usize;
    hull[0] = 0;
    bounds[0] = f64::NEG_INFINITY;
    bounds[1] = f64::INFINITY;

    for q in 1..n {
        let fq = f[q] + (q * q) as f64;
        let mut s;

        loop {
            let v = hull[k];
            s = (fq - (f[v] + (v * v) as f64)) / (2.0 * q as f64 - 2.0 * v as f64);
            if s <= bounds[k] {
                k -= 1;
            } else {
                break;
            }
        }

        k += 1;
        hull[k] = q;
        bounds[k] = s;
        bounds[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate().take(n) {
        while bounds[k + 1] < q as f64 {
            k += 1;
        }

        let v = hull[k];
        let offset = q as f64 - v as f64;
        *out = offset * offset + f[v];
    }
}
