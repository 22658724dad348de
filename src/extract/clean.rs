use log::debug;
use serde::{Deserialize, Serialize};

use crate::extract::{Kernel, Mask};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Dilations (then as many erosions) used to bridge small gaps.
    pub close_iterations: usize,
    /// Erosions (then as many dilations) used to remove specks.
    pub open_iterations: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            close_iterations: 2,
            open_iterations: 1,
        }
    }
}

/// Denoises a segmentation mask with a closing, then an opening,
/// over a 3x3 square neighbourhood.
#[derive(Clone, Debug)]
pub struct MaskCleaner<'a> {
    config: &'a CleanConfig,
}

impl<'a> MaskCleaner<'a> {
    pub fn new(config: &'a CleanConfig) -> Self {
        MaskCleaner { config }
    }

    pub fn clean(&self, mask: &Mask) -> Mask {
        let closed = repeat(mask, self.config.close_iterations, |m| m.dilate(Kernel::Square));
        let closed = repeat(&closed, self.config.close_iterations, |m| {
            m.erode(Kernel::Square)
        });

        let opened = repeat(&closed, self.config.open_iterations, |m| {
            m.erode(Kernel::Square)
        });
        let opened = repeat(&opened, self.config.open_iterations, |m| {
            m.dilate(Kernel::Square)
        });

        debug!(
            "Cleaned mask from {} to {} pixels",
            mask.count(),
            opened.count()
        );

        opened
    }
}

fn repeat(mask: &Mask, times: usize, op: impl Fn(&Mask) -> Mask) -> Mask {
    (0..times).fold(mask.clone(), |current, _| op(&current))
}
