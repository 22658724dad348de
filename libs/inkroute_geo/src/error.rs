use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    #[error("image must have non-zero dimensions, given {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },
}
