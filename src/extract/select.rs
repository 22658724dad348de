use log::debug;
use serde::{Deserialize, Serialize};

use crate::extract::RouteComponent;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Pixel length a component must exceed to score for length.
    pub length_threshold: f64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        SelectConfig {
            length_threshold: 300.0,
        }
    }
}

/// The outcome of primary route selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub id: Option<u32>,
    /// The winner's share of all component scores, within `0..=1`.
    pub confidence: f64,
}

impl Selection {
    pub const NONE: Selection = Selection {
        id: None,
        confidence: 0.0,
    };
}

/// Picks the component most likely to be the drawn route.
///
/// A component scores two points for exceeding the length threshold and
/// one for not being a loop. The first component with the highest score
/// wins, so ties resolve to the earliest label.
#[derive(Clone, Debug)]
pub struct PrimarySelector<'a> {
    config: &'a SelectConfig,
}

impl<'a> PrimarySelector<'a> {
    pub fn new(config: &'a SelectConfig) -> Self {
        PrimarySelector { config }
    }

    pub fn score(&self, component: &RouteComponent) -> u32 {
        let length = if component.pixel_length > self.config.length_threshold {
            2
        } else {
            0
        };

        length + u32::from(!component.loops)
    }

    pub fn select(&self, components: &[RouteComponent]) -> Selection {
        let scores = components
            .iter()
            .map(|component| (component.id, self.score(component)))
            .collect::<Vec<_>>();

        let best = scores
            .iter()
            .fold(None, |best: Option<(u32, u32)>, (id, score)| match best {
                Some((_, top)) if top >= *score => best,
                _ => Some((*id, *score)),
            });

        let Some((id, score)) = best else {
            return Selection::NONE;
        };

        let total = scores.iter().map(|(_, score)| score).sum::<u32>();
        let confidence = if total == 0 {
            0.0
        } else {
            score as f64 / total as f64
        };

        debug!("Selected component {id} as primary, scoring {score} of {total}");

        Selection {
            id: Some(id),
            confidence,
        }
    }
}
