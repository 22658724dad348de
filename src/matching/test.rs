#![cfg(test)]

use approx::assert_relative_eq;
use geo::{LineString, line_string, point};
use inkroute_fixtures::roads::{WKT_ROADS, diagonal, southern};
use inkroute_geo::{BoundingBox, GeoProjector};

use crate::extract::Pixel;
use crate::matching::markers::{marker_order, project_markers};
use crate::matching::{
    MapMatcher, MarkerProjection, Marker, MatchError, MatchQuery, RoadSegment, RoadSource,
    ScoreTerm, SourceError, StaticRoads, anchors_near, hausdorff_lite,
};

fn unit_box() -> BoundingBox {
    BoundingBox::new(1.0, 0.0, 1.0, 0.0).expect("valid box")
}

fn equator() -> LineString {
    line_string![
        (x: 0.0, y: 0.0),
        (x: 1.0, y: 0.0),
        (x: 2.0, y: 0.0),
        (x: 3.0, y: 0.0),
    ]
}

fn projections(values: &[i64], travelled: &[f64]) -> Vec<MarkerProjection> {
    values
        .iter()
        .zip(travelled)
        .map(|(value, travelled)| MarkerProjection {
            value: *value,
            segment: 0,
            travelled: *travelled,
        })
        .collect()
}

#[test]
fn query_starts_without_hints() {
    let query = MatchQuery::new(diagonal());

    assert_eq!(query.path, diagonal());
    assert!(query.anchors.is_empty());
    assert!(query.markers.is_empty());

    let hinted = query.with_anchors(vec![point! { x: 0.5, y: 0.5 }]);
    assert_eq!(hinted.anchors.len(), 1);
    assert!(hinted.markers.is_empty());
}

#[test]
fn hausdorff_of_a_line_with_itself_is_zero() {
    assert_eq!(hausdorff_lite(&diagonal(), &diagonal()), 0.0);
    assert_eq!(hausdorff_lite(&southern(), &southern()), 0.0);
}

#[test]
fn hausdorff_is_directed_and_averaged() {
    let short = line_string![(x: 0.0, y: 0.0)];
    let long = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];

    assert_relative_eq!(hausdorff_lite(&short, &long), 0.0);
    assert_relative_eq!(hausdorff_lite(&long, &short), 5.0);
}

#[test]
fn hausdorff_handles_empty_lines() {
    let empty = LineString::new(vec![]);

    assert_eq!(hausdorff_lite(&empty, &diagonal()), 0.0);
    assert!(hausdorff_lite(&diagonal(), &empty).is_infinite());
}

#[test]
fn anchors_count_within_radius() {
    let anchors = vec![
        point! { x: 0.5, y: 0.5001 },
        point! { x: 0.5, y: 0.501 },
        point! { x: 0.0, y: 1.0 },
    ];

    assert_eq!(anchors_near(&diagonal(), &anchors, 30.0), 2);
    assert_eq!(anchors_near(&diagonal(), &anchors, 200.0), 3);
    assert_eq!(anchors_near(&diagonal(), &[], 30.0), 0);
}

#[test]
fn increasing_markers_are_rewarded() {
    let increasing = projections(&[1, 2, 3], &[10.0, 20.0, 30.0]);
    assert_relative_eq!(marker_order(&increasing, 5.0), 10.0);

    let decreasing = projections(&[3, 2, 1], &[10.0, 20.0, 30.0]);
    assert_relative_eq!(marker_order(&decreasing, 5.0), -10.0);

    // One pair out of order, one in order
    let shuffled = projections(&[3, 1, 2], &[10.0, 20.0, 30.0]);
    assert_relative_eq!(marker_order(&shuffled, 5.0), 0.0);

    let tied = projections(&[2, 2], &[10.0, 20.0]);
    assert_relative_eq!(marker_order(&tied, 5.0), -5.0);

    assert_eq!(marker_order(&[], 5.0), 0.0);
    assert_eq!(marker_order(&projections(&[4], &[1.0]), 5.0), 0.0);
}

#[test]
fn markers_are_sorted_by_travelled_distance() {
    let out_of_order = projections(&[3, 1, 2], &[30.0, 10.0, 20.0]);
    assert_relative_eq!(marker_order(&out_of_order, 5.0), 10.0);
}

#[test]
fn markers_project_onto_closest_segment() {
    let markers = vec![
        Marker::new(point! { x: 2.5, y: 0.1 }, 3),
        Marker::new(point! { x: 0.5, y: 0.1 }, 1),
        Marker::new(point! { x: 1.5, y: -0.1 }, 2),
    ];

    let projected = project_markers(&markers, &equator());
    let segments = projected.iter().map(|p| p.segment).collect::<Vec<_>>();
    assert_eq!(segments, vec![2, 0, 1]);

    assert_eq!(projected[1].travelled, 0.0);
    assert!(projected[2].travelled > 110_000.0 && projected[2].travelled < 112_000.0);
    assert!(projected[0].travelled > projected[2].travelled);

    assert_relative_eq!(marker_order(&projected, 5.0), 10.0);
}

#[test]
fn markers_need_a_segment() {
    let markers = vec![Marker::new(point! { x: 0.0, y: 0.0 }, 1)];
    assert!(project_markers(&markers, &line_string![(x: 0.0, y: 0.0)]).is_empty());
}

#[test]
fn markers_from_pixels_are_projected() {
    let projector = GeoProjector::new(unit_box(), 100, 100).expect("valid projector");
    let marker = Marker::from_pixel(&projector, Pixel::new(50, 50), 7);

    assert_relative_eq!(marker.position.x(), 0.5);
    assert_relative_eq!(marker.position.y(), 0.5);
    assert_eq!(marker.value, 7);
}

#[test_log::test]
fn identical_road_ranks_first() {
    let roads = vec![
        RoadSegment::new(1, southern()),
        RoadSegment::new(2, diagonal()).with_name("Diagonal Road"),
    ];

    let ranked = MapMatcher::default()
        .rank(&MatchQuery::new(diagonal()), &roads)
        .expect("ranking succeeds");

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, 2);
    assert_eq!(
        ranked[0].metadata.get("name").map(String::as_str),
        Some("Diagonal Road")
    );
    assert_eq!(ranked[0].term(ScoreTerm::ShapeSimilarity), 0.0);
    assert!(ranked[1].score < 0.0);
}

#[test_log::test]
fn breakdown_sums_to_score() {
    let roads = vec![
        RoadSegment::new(1, equator()),
        RoadSegment::new(2, equator().into_iter().rev().collect()),
        RoadSegment::new(3, diagonal()),
    ];

    let query = MatchQuery::new(line_string![(x: 0.2, y: 0.01), (x: 2.8, y: 0.01)])
        .with_anchors(vec![point! { x: 1.0, y: 0.0001 }])
        .with_markers(vec![
            Marker::new(point! { x: 0.5, y: 0.01 }, 1),
            Marker::new(point! { x: 1.5, y: 0.01 }, 2),
            Marker::new(point! { x: 2.5, y: 0.01 }, 3),
        ]);

    let ranked = MapMatcher::default()
        .rank(&query, &roads)
        .expect("ranking succeeds");

    for candidate in &ranked {
        let sum = candidate.breakdown.values().sum::<f64>();
        assert_relative_eq!(candidate.score, sum);
        assert_eq!(candidate.breakdown.len(), 3);
    }

    let forwards = ranked.iter().find(|c| c.id == 1).expect("road 1 ranked");
    let backwards = ranked.iter().find(|c| c.id == 2).expect("road 2 ranked");

    assert_relative_eq!(forwards.term(ScoreTerm::AnchorBonus), 10.0);
    assert_relative_eq!(forwards.term(ScoreTerm::MarkerOrder), 10.0);
    assert_relative_eq!(backwards.term(ScoreTerm::MarkerOrder), -10.0);
    assert_eq!(ranked[0].id, 1);
}

#[test]
fn equal_scores_keep_source_order() {
    let roads = vec![
        RoadSegment::new(5, diagonal()),
        RoadSegment::new(3, diagonal()),
        RoadSegment::new(4, diagonal()),
    ];

    let ranked = MapMatcher::default()
        .rank(&MatchQuery::new(southern()), &roads)
        .expect("ranking succeeds");

    let ids = ranked.iter().map(|c| c.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![5, 3, 4]);
}

#[test]
fn no_roads_rank_as_empty() {
    let ranked = MapMatcher::default()
        .rank(&MatchQuery::new(diagonal()), &[])
        .expect("ranking succeeds");

    assert!(ranked.is_empty());
}

#[test]
fn roads_without_vertices_are_skipped() {
    let roads = vec![
        RoadSegment::new(1, LineString::new(vec![])),
        RoadSegment::new(2, diagonal()),
    ];

    let ranked = MapMatcher::default()
        .rank(&MatchQuery::new(diagonal()), &roads)
        .expect("ranking succeeds");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, 2);
}

#[test]
fn empty_path_is_an_error() {
    let result = MapMatcher::default().rank(
        &MatchQuery::new(LineString::new(vec![])),
        &[RoadSegment::new(1, diagonal())],
    );

    assert!(matches!(result, Err(MatchError::EmptyPath)));
}

#[test]
fn static_roads_parse_wkt() {
    let source = StaticRoads::from_wkt(WKT_ROADS).expect("fixture parses");
    let all = source.roads_unfiltered();

    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7, 8, 3]);
    assert_eq!(all[0].name.as_deref(), Some("Diagonal Road"));
    assert_eq!(all[1].name, None);
    assert_eq!(all[0].geometry, diagonal());

    let within = source.roads(&unit_box()).expect("static source");
    assert_eq!(within.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7, 8]);
}

#[test]
fn static_roads_report_malformed_lines() {
    let bad_id = StaticRoads::from_wkt("x;Street;LINESTRING (0 0, 1 1)");
    assert!(matches!(bad_id, Err(SourceError::Parse { line: 1, .. })));

    let bad_wkt = StaticRoads::from_wkt("# roads\n\nLINESTRING (0 0,");
    assert!(matches!(bad_wkt, Err(SourceError::Parse { line: 3, .. })));
}

#[test]
fn matching_a_source_filters_by_area() {
    let source = StaticRoads::from_wkt(WKT_ROADS).expect("fixture parses");

    let ranked = MapMatcher::default()
        .match_source(&MatchQuery::new(diagonal()), &source, &unit_box())
        .expect("matching succeeds");

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, 7);
    assert_eq!(
        ranked[0].metadata.get("name").map(String::as_str),
        Some("Diagonal Road")
    );
}

#[test]
fn candidates_serialise_terms_by_name() {
    let ranked = MapMatcher::default()
        .rank(
            &MatchQuery::new(diagonal()),
            &[RoadSegment::new(1, diagonal())],
        )
        .expect("ranking succeeds");

    let json = serde_json::to_value(&ranked[0]).expect("serialisable");
    assert!(json["breakdown"]["shape_similarity"].is_number());
    assert!(json["breakdown"]["anchor_bonus"].is_number());
    assert!(json["breakdown"]["marker_order"].is_number());
}

#[test]
fn score_terms_are_named_in_snake_case() {
    assert_eq!(ScoreTerm::AnchorBonus.to_string(), "anchor_bonus");
    assert_eq!(
        "marker_order".parse::<ScoreTerm>().ok(),
        Some(ScoreTerm::MarkerOrder)
    );
    assert!("shapeSimilarity".parse::<ScoreTerm>().is_err());
}
