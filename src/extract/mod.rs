//! Recovery of drawn route polylines from raster images.
//!
//! Each stage is usable on its own, and [`RouteExtractor`] chains them:
//!
//! 1. [`Segmenter`] classifies route-colored pixels into a [`Mask`].
//! 2. [`MaskCleaner`] bridges gaps and removes specks.
//! 3. [`Skeletonizer`] thins the mask to a one pixel wide skeleton.
//! 4. [`ComponentDecomposer`] splits the skeleton into connected pieces.
//! 5. [`PathOrderer`] orders each piece into a polyline, described as a [`RouteComponent`].
//! 6. [`PrimarySelector`] picks the most route-like component.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

mod clean;
mod component;
mod debug;
mod distance;
mod error;
mod extractor;
mod graph;
mod hsv;
mod mask;
pub mod order;
pub(crate) mod pixel;
mod result;
mod route;
mod segment;
mod select;
pub mod skeleton;


pub use clean::{CleanConfig, MaskCleaner};
pub use component::{ComponentDecomposer, DecomposeConfig, PixelComponent};
pub use distance::DistanceField;
pub use error::ExtractError;
pub use extractor::RouteExtractor;
pub use graph::{PixelGraph, Traversal};
pub use hsv::{Hsv, HsvImage};
pub use mask::{Kernel, Mask};
pub use order::{OrderConfig, OrderStrategy, PathOrderer};
pub use pixel::{Pixel, PixelBox, polyline_length};
pub use result::ExtractionResult;
pub use route::{RouteComponent, Surroundings};
pub use segment::{ColorBand, SegmentConfig, Segmenter};
pub use select::{PrimarySelector, SelectConfig, Selection};
pub use skeleton::{SkeletonConfig, SkeletonStrategy, Skeletonizer};

/// Configuration for every extraction stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub segment: SegmentConfig,
    pub clean: CleanConfig,
    pub skeleton: SkeletonConfig,
    pub decompose: DecomposeConfig,
    pub order: OrderConfig,
    pub select: SelectConfig,

    /// Endpoints closer than this many pixels mark a closed shape.
    pub closure_tolerance: f64,

    /// When set, stage images are written into this directory.
    pub debug_dir: Option<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            segment: SegmentConfig::default(),
            clean: CleanConfig::default(),
            skeleton: SkeletonConfig::default(),
            decompose: DecomposeConfig::default(),
            order: OrderConfig::default(),
            select: SelectConfig::default(),
            closure_tolerance: 10.0,
            debug_dir: None,
        }
    }
}
