use crate::{BoundingBox, GeoError, GeoProjector, METERS_PER_DEGREE};

use approx::assert_relative_eq;

fn unit_box() -> BoundingBox {
    BoundingBox::new(1.0, 0.0, 1.0, 0.0).expect("unit box is valid")
}

#[test]
fn projects_centre_pixel() {
    let projector = GeoProjector::new(unit_box(), 100, 100).expect("valid projector");
    let point = projector.project(50.0, 50.0);

    assert_eq!(point.y(), 0.5);
    assert_eq!(point.x(), 0.5);
}

#[test]
fn corners_round_trip_exactly() {
    let boxes = [
        BoundingBox::new(38.9176, 38.8872, -76.9934, -77.0351),
        BoundingBox::new(-33.8835, -33.8900, 151.2014, 151.1800),
        BoundingBox::new(0.3, 0.1, 0.7, 0.1),
    ];

    for bbox in boxes {
        let bbox = bbox.expect("valid box");
        let projector = GeoProjector::new(bbox, 640, 480).expect("valid projector");

        let north_west = projector.project(0.0, 0.0);
        assert_eq!((north_west.y(), north_west.x()), (bbox.north, bbox.west));

        let south_east = projector.project(640.0, 480.0);
        assert_eq!((south_east.y(), south_east.x()), (bbox.south, bbox.east));
    }
}

#[test]
fn polyline_keeps_length_and_order() {
    let projector = GeoProjector::new(unit_box(), 10, 20).expect("valid projector");
    let line = projector.project_polyline([(0.0, 0.0), (5.0, 10.0), (10.0, 20.0)]);

    assert_eq!(line.0.len(), 3);
    assert_relative_eq!(line.0[1].x, 0.5);
    assert_relative_eq!(line.0[1].y, 0.5);
    assert_relative_eq!(line.0[2].y, 0.0);
}

#[test]
fn unproject_inverts_project() {
    let bbox = BoundingBox::new(38.9176, 38.8872, -76.9934, -77.0351).expect("valid box");
    let projector = GeoProjector::new(bbox, 800, 600).expect("valid projector");

    let (x, y) = projector.unproject(projector.project(123.0, 456.0));
    assert_relative_eq!(x, 123.0, epsilon = 1e-6);
    assert_relative_eq!(y, 456.0, epsilon = 1e-6);
}

#[test]
fn rejects_degenerate_boxes() {
    assert!(matches!(
        BoundingBox::new(1.0, 1.0, 1.0, 0.0),
        Err(GeoError::InvalidBoundingBox(_))
    ));
    assert!(matches!(
        BoundingBox::new(1.0, 0.0, 0.0, 0.0),
        Err(GeoError::InvalidBoundingBox(_))
    ));
    assert!(matches!(
        BoundingBox::new(f64::NAN, 0.0, 1.0, 0.0),
        Err(GeoError::InvalidBoundingBox(_))
    ));

    // Constructed directly, bypassing validation
    let flipped = BoundingBox {
        north: 0.0,
        south: 1.0,
        east: 1.0,
        west: 0.0,
    };
    assert!(matches!(
        GeoProjector::new(flipped, 10, 10),
        Err(GeoError::InvalidBoundingBox(_))
    ));
}

#[test]
fn rejects_empty_image() {
    assert_eq!(
        GeoProjector::new(unit_box(), 0, 10).unwrap_err(),
        GeoError::InvalidImageSize {
            width: 0,
            height: 10
        }
    );
}

#[test]
fn expands_by_padding() {
    let bbox = unit_box().expand(METERS_PER_DEGREE);

    assert_relative_eq!(bbox.north, 2.0);
    assert_relative_eq!(bbox.south, -1.0);
    assert_relative_eq!(bbox.east, 2.0);
    assert_relative_eq!(bbox.west, -1.0);

    assert_eq!(unit_box().expand(0.0), unit_box());
    assert_eq!(unit_box().expand(-5.0), unit_box());
}
