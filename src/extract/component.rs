use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::extract::{Mask, Pixel};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    /// Components with fewer skeleton pixels are discarded as noise.
    pub min_component_pixels: usize,

    /// Components with more skeleton pixels are subsampled before
    /// ordering, which bounds the cost of the ordering step.
    pub max_component_pixels: usize,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        DecomposeConfig {
            min_component_pixels: 20,
            max_component_pixels: 10_000,
        }
    }
}

/// A connected set of skeleton pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelComponent {
    /// Sequential label, in order of discovery during a row-major scan.
    pub id: u32,

    /// Every pixel of the component, sorted lexicographically.
    pub pixels: Vec<Pixel>,

    /// A uniform subsample of `pixels`, present when the component
    /// exceeded the configured maximum size.
    pub subsample: Option<Vec<Pixel>>,
}

impl PixelComponent {
    /// The pixels the polyline should be ordered from.
    pub fn ordering_pixels(&self) -> &[Pixel] {
        self.subsample.as_deref().unwrap_or(&self.pixels)
    }

    pub fn is_subsampled(&self) -> bool {
        self.subsample.is_some()
    }
}

/// Splits a skeleton into its 8-connected components.
#[derive(Clone, Debug)]
pub struct ComponentDecomposer<'a> {
    config: &'a DecomposeConfig,
}

impl<'a> ComponentDecomposer<'a> {
    pub fn new(config: &'a DecomposeConfig) -> Self {
        ComponentDecomposer { config }
    }

    /// Labels the components of `skeleton` in row-major discovery order,
    /// discarding those below the minimum size. Kept components are
    /// numbered from `1` without gaps.
    pub fn decompose(&self, skeleton: &Mask) -> Vec<PixelComponent> {
        let (width, height) = (skeleton.width(), skeleton.height());
        let mut visited = Mask::new(width, height);
        let mut components = Vec::new();
        let mut discarded = 0usize;

        for seed in skeleton.pixels() {
            if visited.get(seed) {
                continue;
            }

            let mut pixels = flood(skeleton, &mut visited, seed);
            if pixels.len() < self.config.min_component_pixels {
                discarded += 1;
                continue;
            }

            pixels.sort_unstable();
            let subsample = (pixels.len() > self.config.max_component_pixels)
                .then(|| subsample(&pixels, self.config.max_component_pixels));

            if let Some(sample) = &subsample {
                debug!(
                    "Subsampled component of {} pixels down to {}",
                    pixels.len(),
                    sample.len()
                );
            }

            components.push(PixelComponent {
                id: components.len() as u32 + 1,
                pixels,
                subsample,
            });
        }

        debug!(
            "Decomposed skeleton into {} components, discarding {} below {} pixels",
            components.len(),
            discarded,
            self.config.min_component_pixels
        );

        components
    }
}

fn flood(skeleton: &Mask, visited: &mut Mask, seed: Pixel) -> Vec<Pixel> {
    let (width, height) = (skeleton.width(), skeleton.height());
    let mut pixels = vec![];
    let mut queue = VecDeque::from([seed]);
    visited.set(seed, true);

    while let Some(pixel) = queue.pop_front() {
        pixels.push(pixel);

        for neighbour in pixel.neighbours(width, height) {
            if skeleton.get(neighbour) && !visited.get(neighbour) {
                visited.set(neighbour, true);
                queue.push_back(neighbour);
            }
        }
    }

    pixels
}

/// Keeps every n-th pixel of a sorted set, the smallest stride which
/// brings it within `limit`.
fn subsample(sorted: &[Pixel], limit: usize) -> Vec<Pixel> {
    let stride = sorted.len().div_ceil(limit.max(1)).max(2);
    sorted.iter().step_by(stride).copied().collect()
}
