//! Reduction of a route mask into a one pixel wide skeleton.
//!
//! Two strategies are available, see [`SkeletonStrategy`]. Both finish
//! with a Zhang-Suen thinning pass, so the output is one pixel wide away
//! from junctions and keeps the connectivity of its input. Both only ever
//! remove pixels: the skeleton is always a subset of the (optionally
//! pre-dilated) input mask.

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::extract::pixel::NEIGHBOURHOOD;
use crate::extract::{DistanceField, Kernel, Mask, Pixel};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkeletonStrategy {
    /// Iterated cross-shaped erosion, accumulating the residual between
    /// each mask and the dilation of its erosion.
    ///
    /// The residuals alone may fall apart into pieces, so they anchor a
    /// thinning of the whole mask rather than form the skeleton directly.
    /// Follows the geometric centre of uniform strokes closely, but
    /// produces short spurs at rounded caps and corners.
    #[default]
    Morphological,

    /// Thresholds the Euclidean distance transform at a fraction of its
    /// maximum, keeping the ridge along the middle of the stroke.
    ///
    /// Better centred on wide or variable-width strokes, though narrow
    /// sections of a variable-width stroke may fall below the ridge
    /// threshold and break the skeleton apart.
    Ridge,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    pub strategy: SkeletonStrategy,

    /// 3x3 dilations applied before skeletonising, to reconnect strokes.
    pub pre_dilate: usize,

    /// Fraction of the maximum distance a pixel must exceed to be part of
    /// the ridge. Only used by [`SkeletonStrategy::Ridge`].
    pub ridge_fraction: f64,

    /// Removes spurs shorter than this many pixels, which run from an
    /// endpoint into a junction.
    pub prune_branch_length: Option<usize>,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        SkeletonConfig {
            strategy: SkeletonStrategy::default(),
            pre_dilate: 0,
            ridge_fraction: 0.5,
            prune_branch_length: None,
        }
    }
}

pub struct Skeletonizer<'a> {
    config: &'a SkeletonConfig,
}

impl<'a> Skeletonizer<'a> {
    pub fn new(config: &'a SkeletonConfig) -> Self {
        Skeletonizer { config }
    }

    pub fn skeletonize(&self, mask: &Mask) -> Mask {
        let prepared =
            (0..self.config.pre_dilate).fold(mask.clone(), |m, _| m.dilate(Kernel::Square));

        let skeleton = match self.config.strategy {
            SkeletonStrategy::Morphological => {
                let anchors = morphological(&prepared);
                thin(&zhang_suen(&prepared, Some(&anchors)))
            }
            SkeletonStrategy::Ridge => {
                let field = DistanceField::new(&prepared);
                let ridge = field.threshold(field.max() * self.config.ridge_fraction);
                thin(&ridge)
            }
        };

        let skeleton = match self.config.prune_branch_length {
            Some(length) => prune(&skeleton, length),
            None => skeleton,
        };

        debug!(
            "Skeletonised {} pixels into {} using {}",
            prepared.count(),
            skeleton.count(),
            self.config.strategy
        );

        skeleton
    }
}

/// Morphological (Lantuéjoul) skeleton.
pub fn morphological(mask: &Mask) -> Mask {
    let bound = mask.width().min(mask.height()) / 2 + 1;

    let mut skeleton = Mask::new(mask.width(), mask.height());
    let mut current = mask.clone();

    for _ in 0..=bound {
        if current.is_empty() {
            break;
        }

        let eroded = current.erode(Kernel::Cross);
        let residual = current.subtract(&eroded.dilate(Kernel::Cross));

        skeleton = skeleton.union(&residual);
        current = eroded;
    }

    skeleton
}

/// The eight neighbours of a pixel as `[P2, .., P9]`, clockwise from north.
#[inline]
fn ring(mask: &Mask, pixel: Pixel) -> [bool; 8] {
    NEIGHBOURHOOD.map(|(dx, dy)| {
        mask.get_signed(pixel.x as i64 + dx as i64, pixel.y as i64 + dy as i64)
    })
}

/// Zhang-Suen thinning.
pub fn thin(mask: &Mask) -> Mask {
    zhang_suen(mask, None)
}

/// Zhang-Suen thinning which never removes a pixel set in `anchors`.
fn zhang_suen(mask: &Mask, anchors: Option<&Mask>) -> Mask {
    let bound = mask.width().max(mask.height()) as usize + 1;
    let mut current = mask.clone();

    for _ in 0..bound {
        let mut changed = false;

        for step in 0..2 {
            let removable = current
                .pixels()
                .filter(|pixel| !anchors.is_some_and(|anchors| anchors.get(*pixel)))
                .filter(|pixel| {
                    let [p2, p3, p4, p5, p6, p7, p8, p9] = ring(&current, *pixel);
                    let neighbours = [p2, p3, p4, p5, p6, p7, p8, p9];

                    let count = neighbours.iter().filter(|set| **set).count();
                    let transitions = crossings(&neighbours);

                    let directional = if step == 0 {
                        !(p2 && p4 && p6) && !(p4 && p6 && p8)
                    } else {
                        !(p2 && p4 && p8) && !(p2 && p6 && p8)
                    };

                    (2..=6).contains(&count) && transitions == 1 && directional
                })
                .collect::<Vec<_>>();

            changed |= !removable.is_empty();
            removable
                .into_iter()
                .for_each(|pixel| current.set(pixel, false));
        }

        if !changed {
            break;
        }
    }

    current
}

/// Number of background to foreground transitions around a pixel.
#[inline]
fn crossings(neighbours: &[bool; 8]) -> usize {
    (0..8)
        .filter(|i| !neighbours[*i] && neighbours[(i + 1) % 8])
        .count()
}

/// True if three or more separate branches meet at `pixel`.
///
/// Counted by crossing number, so a diagonal staircase, where a pixel
/// may touch three others without forking, is not a junction.
#[inline]
pub(crate) fn is_junction(skeleton: &Mask, pixel: Pixel) -> bool {
    skeleton.get(pixel) && crossings(&ring(skeleton, pixel)) >= 3
}

/// Removes dangling branches shorter than `min_length` pixels, which run
/// from an endpoint into a junction. Junction pixels themselves are kept.
pub fn prune(skeleton: &Mask, min_length: usize) -> Mask {
    let (width, height) = (skeleton.width(), skeleton.height());
    let junction = |pixel: &Pixel| is_junction(skeleton, *pixel);
    let is_endpoint = |pixel: &Pixel| {
        let neighbours = ring(skeleton, *pixel);
        let count = neighbours.iter().filter(|set| **set).count();
        (1..=2).contains(&count) && crossings(&neighbours) == 1
    };

    let mut pruned = skeleton.clone();
    let endpoints = skeleton.pixels().filter(is_endpoint).collect::<Vec<_>>();

    for endpoint in endpoints {
        let mut branch = vec![endpoint];
        let mut reached_junction = false;

        while branch.len() < min_length {
            let current = branch[branch.len() - 1];
            let mut next = current
                .neighbours(width, height)
                .filter(|n| skeleton.get(*n) && !branch.contains(n))
                .collect::<Vec<_>>();

            if next.iter().any(junction) {
                reached_junction = true;
                break;
            }

            // A staircase step presents two mutually adjacent candidates,
            // which is a continuation rather than a fork.
            if next.len() == 2 && next[0].is_adjacent(&next[1]) {
                next.sort_by(|a, b| {
                    a.distance_squared(&current)
                        .total_cmp(&b.distance_squared(&current))
                });
                next.truncate(1);
            }

            match next.as_slice() {
                [single] => branch.push(*single),
                _ => break,
            }
        }

        if reached_junction && branch.len() < min_length {
            branch.iter().for_each(|pixel| pruned.set(*pixel, false));
        }
    }

    pruned
}
