//! End to end tracing of a route image: extraction, projection of the
//! primary component, then matching against a [`RoadSource`].

use geo::{LineString, Point};
use image::DynamicImage;
use inkroute_geo::{BoundingBox, GeoProjector};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::Level;

use crate::config::Config;
use crate::error::Result;
use crate::extract::{ExtractionResult, Pixel, RouteExtractor};
use crate::matching::{MapMatchCandidate, MapMatcher, Marker, MatchQuery, RoadSource};

/// Optional hints supplied alongside an image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hints {
    /// Points known to lie on the route, in `(x: lng, y: lat)` order.
    pub anchors: Vec<Point>,
    /// Numbered distance markers, located in the image's pixel space.
    pub markers: Vec<(Pixel, i64)>,
}

/// The outcome of tracing one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceOutput {
    pub extraction: ExtractionResult,
    /// The primary component projected into `(x: lng, y: lat)`, if any.
    pub path: Option<LineString>,
    pub matches: Vec<MapMatchCandidate>,
}

#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    extractor: RouteExtractor,
    matcher: MapMatcher,
    padding_meters: f64,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline {
            extractor: RouteExtractor::new(config.extract),
            matcher: MapMatcher::new(config.matching),
            padding_meters: config.padding_meters,
        }
    }

    /// Traces `image`, which depicts the area `bbox`.
    ///
    /// An image without a route is not an error: the output then has
    /// no path and no matches. Without a `source`, matching is skipped.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err(level = Level::INFO)))]
    pub fn trace(
        &self,
        image: &DynamicImage,
        bbox: &BoundingBox,
        source: Option<&dyn RoadSource>,
        hints: &Hints,
    ) -> Result<TraceOutput> {
        bbox.validate()?;

        let extraction = self.extractor.extract_image(image)?;
        let Some(primary) = extraction.primary() else {
            warn!("No route detected, skipping projection and matching");
            return Ok(TraceOutput {
                extraction,
                path: None,
                matches: vec![],
            });
        };

        let projector = GeoProjector::new(*bbox, extraction.image_width, extraction.image_height)?;
        let path = projector.project_polyline(primary.pixel_polyline.iter().copied());

        let matches = match source {
            Some(source) => {
                let markers = hints
                    .markers
                    .iter()
                    .map(|(pixel, value)| Marker::from_pixel(&projector, *pixel, *value))
                    .collect();

                let query = MatchQuery::new(path.clone())
                    .with_anchors(hints.anchors.clone())
                    .with_markers(markers);

                let area = bbox.expand(self.padding_meters);
                self.matcher.match_source(&query, source, &area)?
            }
            None => vec![],
        };

        info!(
            "Traced component {} into {} points with {} candidate roads",
            primary.id,
            path.0.len(),
            matches.len()
        );

        Ok(TraceOutput {
            extraction,
            path: Some(path),
            matches,
        })
    }
}

#[cfg(test)]
mod test {
    use geo::line_string;
    use image::DynamicImage;
    use inkroute_fixtures::roads::diagonal;
    use inkroute_fixtures::{empty_route, l_route};
    use inkroute_geo::BoundingBox;

    use crate::error::Error;
    use crate::matching::{RoadSegment, StaticRoads};
    use crate::pipeline::{Hints, Pipeline};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(1.0, 0.0, 1.0, 0.0).expect("valid box")
    }

    // The fixture's "L", projected onto the unit box.
    fn l_road() -> RoadSegment {
        RoadSegment::new(
            1,
            line_string![
                (x: 0.1, y: 1.0 - 40.0 / 300.0),
                (x: 0.1, y: 1.0 - 250.0 / 300.0),
                (x: 0.9, y: 1.0 - 250.0 / 300.0),
            ],
        )
    }

    #[test_log::test]
    fn traces_and_matches_a_route() {
        let roads = StaticRoads::new(vec![RoadSegment::new(2, diagonal()), l_road()]);
        let image = DynamicImage::ImageRgb8(l_route());

        let output = Pipeline::default()
            .trace(&image, &unit_box(), Some(&roads), &Hints::default())
            .expect("tracing succeeds");

        assert_eq!(output.extraction.primary_candidate_id, Some(1));

        let path = output.path.expect("route is projected");
        let primary = output.extraction.primary().expect("primary component");
        assert_eq!(path.0.len(), primary.pixel_polyline.len());

        assert_eq!(output.matches.len(), 2);
        assert_eq!(output.matches[0].id, 1);
        assert!(output.matches[0].score > output.matches[1].score);
    }

    #[test]
    fn tracing_without_a_source_skips_matching() {
        let image = DynamicImage::ImageRgb8(l_route());
        let output = Pipeline::default()
            .trace(&image, &unit_box(), None, &Hints::default())
            .expect("tracing succeeds");

        assert!(output.path.is_some());
        assert!(output.matches.is_empty());
    }

    #[test]
    fn empty_image_has_no_path() {
        let roads = StaticRoads::new(vec![l_road()]);
        let image = DynamicImage::ImageRgb8(empty_route());

        let output = Pipeline::default()
            .trace(&image, &unit_box(), Some(&roads), &Hints::default())
            .expect("no route is not an error");

        assert_eq!(output.extraction.primary_candidate_id, None);
        assert_eq!(output.path, None);
        assert!(output.matches.is_empty());
    }

    #[test]
    fn invalid_bounding_box_is_fatal() {
        let flipped = BoundingBox {
            north: 0.0,
            south: 1.0,
            east: 1.0,
            west: 0.0,
        };

        let image = DynamicImage::ImageRgb8(l_route());
        let result = Pipeline::default().trace(&image, &flipped, None, &Hints::default());

        assert!(matches!(result, Err(Error::Geo(_))));
    }
}
