use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    #[error("no route could be detected in the image")]
    NoRouteDetected,
}

impl From<image::ImageError> for ExtractError {
    fn from(error: image::ImageError) -> Self {
        ExtractError::InvalidInput(error.to_string())
    }
}
