use log::debug;
use serde::{Deserialize, Serialize};

use crate::extract::{Hsv, HsvImage, Mask};

/// An inclusive HSV range, labelled with the color it detects.
///
/// Several bands may share a name, which is how a hue range crossing
/// the wraparound point (such as red) is expressed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub name: String,
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorBand {
    pub fn new(name: impl Into<String>, lower: [u8; 3], upper: [u8; 3]) -> Self {
        ColorBand {
            name: name.into(),
            lower,
            upper,
        }
    }

    #[inline]
    pub fn contains(&self, hsv: &Hsv) -> bool {
        let [lh, ls, lv] = self.lower;
        let [uh, us, uv] = self.upper;

        (lh..=uh).contains(&hsv.h) && (ls..=us).contains(&hsv.s) && (lv..=uv).contains(&hsv.v)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub bands: Vec<ColorBand>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        SegmentConfig {
            bands: vec![
                ColorBand::new("blue", [90, 50, 50], [130, 255, 255]),
                ColorBand::new("red", [0, 50, 50], [10, 255, 255]),
                ColorBand::new("red", [170, 50, 50], [180, 255, 255]),
            ],
        }
    }
}

/// Classifies pixels as route-colored by the union of its bands.
#[derive(Clone, Debug)]
pub struct Segmenter<'a> {
    config: &'a SegmentConfig,
}

impl<'a> Segmenter<'a> {
    pub fn new(config: &'a SegmentConfig) -> Self {
        Segmenter { config }
    }

    /// The first band matching `hsv`, if any.
    pub fn classify(&self, hsv: &Hsv) -> Option<&'a ColorBand> {
        self.config.bands.iter().find(|band| band.contains(hsv))
    }

    pub fn segment(&self, image: &HsvImage) -> Mask {
        let mask = Mask::from_fn(image.width(), image.height(), |pixel| {
            image
                .get(pixel)
                .is_some_and(|hsv| self.classify(hsv).is_some())
        });

        debug!(
            "Segmented {} route pixels from {} bands",
            mask.count(),
            self.config.bands.len()
        );

        mask
    }
}
