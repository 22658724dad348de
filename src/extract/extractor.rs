use std::path::Path;

use image::{DynamicImage, RgbImage};
use log::{debug, info};
use measure_time::debug_time;
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::extract::debug::DebugWriter;
use crate::extract::route::Surroundings;
use crate::extract::{
    ComponentDecomposer, DistanceField, ExtractConfig, ExtractError, ExtractionResult, HsvImage,
    MaskCleaner, PathOrderer, PrimarySelector, RouteComponent, Segmenter, Skeletonizer,
};

/// Runs the full extraction pipeline over an image:
/// segmentation, cleaning, skeletonisation, decomposition, ordering
/// and primary selection.
///
/// ```rust,no_run
/// use inkroute::extract::{ExtractConfig, RouteExtractor};
///
/// let extractor = RouteExtractor::new(ExtractConfig::default());
/// let result = extractor.extract_path("route.png")?;
///
/// if let Some(primary) = result.primary() {
///     println!("{} points", primary.pixel_polyline.len());
/// }
/// # Ok::<(), inkroute::extract::ExtractError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct RouteExtractor {
    config: ExtractConfig,
}

impl RouteExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        RouteExtractor { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Decodes and extracts from an image file.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractError> {
        let image = image::open(path.as_ref())?;
        self.extract_image(&image)
    }

    /// Decodes and extracts from an encoded image held in memory.
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
        let image = image::load_from_memory(bytes)?;
        self.extract_image(&image)
    }

    pub fn extract_image(&self, image: &DynamicImage) -> Result<ExtractionResult, ExtractError> {
        self.extract_rgb(&image.to_rgb8())
    }

    pub fn extract_rgb(&self, image: &RgbImage) -> Result<ExtractionResult, ExtractError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ExtractError::InvalidInput(format!(
                "image has no pixels ({width}x{height})"
            )));
        }

        self.run(image)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    fn run(&self, image: &RgbImage) -> Result<ExtractionResult, ExtractError> {
        debug_time!("route extraction");
        let (width, height) = image.dimensions();
        let hsv = {
            debug_time!("rgb to hsv conversion");
            HsvImage::from_rgb(image)
        };
        let mut debug = self
            .config
            .debug_dir
            .as_deref()
            .and_then(DebugWriter::new);

        let segmenter = Segmenter::new(&self.config.segment);
        let mask = {
            debug_time!("segmentation");
            segmenter.segment(&hsv)
        };

        let cleaned = {
            debug_time!("mask cleaning");
            MaskCleaner::new(&self.config.clean).clean(&mask)
        };

        let skeleton = {
            debug_time!("skeletonisation");
            Skeletonizer::new(&self.config.skeleton).skeletonize(&cleaned)
        };

        if let Some(writer) = debug.as_mut() {
            writer.mask("01_mask", &mask);
            writer.mask("02_cleaned", &cleaned);
            writer.mask("03_skeleton", &skeleton);
        }

        let pieces = {
            debug_time!("component decomposition");
            ComponentDecomposer::new(&self.config.decompose).decompose(&skeleton)
        };

        let widths = DistanceField::new(&cleaned);
        let surroundings = Surroundings {
            skeleton: &skeleton,
            widths: &widths,
            image: &hsv,
            segmenter: &segmenter,
            closure_tolerance: self.config.closure_tolerance,
        };

        let orderer = PathOrderer::new(&self.config.order);
        let mut components = {
            debug_time!("path ordering");
            pieces
                .par_iter()
                .filter_map(|piece| RouteComponent::build(piece, &orderer, &surroundings))
                .collect::<Vec<_>>()
        };

        let selection = PrimarySelector::new(&self.config.select).select(&components);
        for component in components.iter_mut() {
            component.is_candidate_route = selection.id == Some(component.id);
        }

        if let (Some(writer), Some(primary)) = (
            debug.as_mut(),
            components.iter().find(|c| c.is_candidate_route),
        ) {
            writer.polyline("04_polyline", image, &primary.pixel_polyline);
        }

        match selection.id {
            Some(id) => info!(
                "Extracted {} components, primary {id} with confidence {:.2}",
                components.len(),
                selection.confidence
            ),
            None => debug!("No route components found in {width}x{height} image"),
        }

        Ok(ExtractionResult {
            image_width: width,
            image_height: height,
            components,
            primary_candidate_id: selection.id,
            confidence: selection.confidence,
            debug_artifacts: debug.map(DebugWriter::finish).unwrap_or_default(),
        })
    }
}
