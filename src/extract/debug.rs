use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use log::{debug, warn};

use crate::extract::{Mask, Pixel};

const POLYLINE_COLOR: Rgb<u8> = Rgb([0, 200, 0]);
const POLYLINE_RADIUS: i32 = 1;

/// Writes intermediate stage images into a directory.
///
/// Failing to write an artifact never fails the extraction, it is only
/// logged and left out of the recorded artifacts.
pub(crate) struct DebugWriter {
    directory: PathBuf,
    written: BTreeMap<String, PathBuf>,
}

impl DebugWriter {
    pub fn new(directory: &Path) -> Option<DebugWriter> {
        if let Err(error) = std::fs::create_dir_all(directory) {
            warn!(
                "Cannot create debug directory {}: {error}",
                directory.display()
            );
            return None;
        }

        Some(DebugWriter {
            directory: directory.to_path_buf(),
            written: BTreeMap::new(),
        })
    }

    pub fn mask(&mut self, stage: &str, mask: &Mask) {
        let path = self.directory.join(format!("{stage}.png"));
        match mask.to_image().save(&path) {
            Ok(()) => self.record(stage, path),
            Err(error) => warn!("Cannot write {}: {error}", path.display()),
        }
    }

    /// Draws `polyline` over a copy of `source`.
    pub fn polyline(&mut self, stage: &str, source: &RgbImage, polyline: &[Pixel]) {
        let mut canvas = source.clone();

        for pixel in polyline {
            draw_filled_circle_mut(
                &mut canvas,
                (pixel.x as i32, pixel.y as i32),
                POLYLINE_RADIUS,
                POLYLINE_COLOR,
            );
        }

        let path = self.directory.join(format!("{stage}.png"));
        match canvas.save(&path) {
            Ok(()) => self.record(stage, path),
            Err(error) => warn!("Cannot write {}: {error}", path.display()),
        }
    }

    fn record(&mut self, stage: &str, path: PathBuf) {
        debug!("Wrote {stage} to {}", path.display());
        self.written.insert(stage.to_string(), path);
    }

    pub fn finish(self) -> BTreeMap<String, PathBuf> {
        self.written
    }
}
