//! Configuration for a full extraction and matching run, loadable from JSON.
//!
//! Every field is optional, missing fields take their defaults:
//!
//! ```json
//! {
//!   "extract": {
//!     "skeleton": { "strategy": "ridge", "prune_branch_length": 10 },
//!     "select": { "length_threshold": 250.0 }
//!   },
//!   "matching": { "anchor_radius_meters": 50.0 },
//!   "padding_meters": 100.0
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::ExtractConfig;
use crate::matching::MatchConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractConfig,
    pub matching: MatchConfig,

    /// Distance, in meters, the bounding box is grown by when asking for
    /// candidate roads. Projection always uses the unpadded box.
    pub padding_meters: f64,
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&source)
    }
}

#[cfg(test)]
mod test {
    use crate::config::{Config, ConfigError};
    use crate::extract::SkeletonStrategy;

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_json("{}").expect("empty config is valid");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn nested_fields_override_defaults() {
        let config = Config::from_json(
            r#"{
                "extract": { "skeleton": { "strategy": "ridge" } },
                "matching": { "anchor_bonus": 2.5 },
                "padding_meters": 100.0
            }"#,
        )
        .expect("config parses");

        assert_eq!(config.extract.skeleton.strategy, SkeletonStrategy::Ridge);
        assert_eq!(config.matching.anchor_bonus, 2.5);
        assert_eq!(config.matching.marker_step, 5.0);
        assert_eq!(config.padding_meters, 100.0);
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(matches!(
            Config::from_json(r#"{ "padding_meters": "wide" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_json_file("/nonexistent/inkroute.json"),
            Err(ConfigError::Read { .. })
        ));
    }
}
