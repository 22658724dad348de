use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extract::{ExtractError, RouteComponent};

/// Everything recovered from a single image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub image_width: u32,
    pub image_height: u32,

    /// Retained components, in label order.
    pub components: Vec<RouteComponent>,
    pub primary_candidate_id: Option<u32>,
    pub confidence: f64,

    /// Intermediate images written during extraction, by stage name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub debug_artifacts: BTreeMap<String, PathBuf>,
}

impl ExtractionResult {
    pub fn primary(&self) -> Option<&RouteComponent> {
        let id = self.primary_candidate_id?;
        self.components.iter().find(|component| component.id == id)
    }

    /// The primary component, treating its absence as an error.
    pub fn require_primary(&self) -> Result<&RouteComponent, ExtractError> {
        self.primary().ok_or(ExtractError::NoRouteDetected)
    }

    pub fn component(&self, id: u32) -> Option<&RouteComponent> {
        self.components.iter().find(|component| component.id == id)
    }
}
