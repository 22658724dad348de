use inkroute_geo::GeoError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::extract::ExtractError;
use crate::impl_err;
use crate::matching::MatchError;

/// Any failure of the `inkroute` pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Extract(ExtractError),

    #[error(transparent)]
    Geo(GeoError),

    #[error(transparent)]
    Match(MatchError),

    #[error(transparent)]
    Config(ConfigError),
}

impl_err!(ExtractError, Extract);
impl_err!(GeoError, Geo);
impl_err!(MatchError, Match);
impl_err!(ConfigError, Config);

pub type Result<T> = std::result::Result<T, Error>;
