use thiserror::Error;

/// Failure of a [`RoadSource`](crate::matching::RoadSource) to supply roads.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not read road data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed road on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("road source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("cannot match an empty path")]
    EmptyPath,

    #[error(transparent)]
    Source(#[from] SourceError),
}
