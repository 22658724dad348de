//! Synthetic fixtures shared by the `inkroute` tests and benches.
//!
//! Images are drawn in memory instead of loaded from disk, so every
//! fixture is reproducible and its ground-truth geometry is known.

use geo::{LineString, line_string};
use image::{Rgb, RgbImage};

/// A saturated blue, inside the default blue band (hue ≈ 114 on the 0..180 scale).
pub const ROUTE_BLUE: Rgb<u8> = Rgb([30, 60, 220]);

/// A saturated red, inside the default low red band.
pub const ROUTE_RED: Rgb<u8> = Rgb([220, 30, 30]);

/// A magenta-ish red on the other side of the hue wraparound (hue ≈ 174).
pub const ROUTE_RED_WRAPPED: Rgb<u8> = Rgb([220, 30, 70]);

/// A desaturated grey, outside every band.
pub const BACKGROUND_GREY: Rgb<u8> = Rgb([200, 200, 200]);

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Creates a white canvas.
pub fn canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, WHITE)
}

/// Paints a filled disk of the given radius centred on `(cx, cy)`.
pub fn stamp(image: &mut RgbImage, cx: f64, cy: f64, radius: f64, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    let reach = radius.ceil() as i64;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let x = cx.round() as i64 + dx;
            let y = cy.round() as i64 + dy;

            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                continue;
            }

            if ((dx * dx + dy * dy) as f64) <= radius * radius {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Draws a stroke of the given width through `points`, in order.
pub fn stroke(image: &mut RgbImage, points: &[(f64, f64)], width: f64, color: Rgb<u8>) {
    let radius = (width / 2.0).max(0.0);

    for pair in points.windows(2) {
        let [(x0, y0), (x1, y1)] = [pair[0], pair[1]];
        let steps = ((x1 - x0).abs().max((y1 - y0).abs()).ceil() as usize).max(1);

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            stamp(image, x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, radius, color);
        }
    }

    if let [(x, y)] = points {
        stamp(image, *x, *y, radius, color);
    }
}

/// A 400x300 canvas with a thick blue "L" shaped route, and a small red
/// annotation blob which is below the noise threshold once skeletonised.
pub fn l_route() -> RgbImage {
    let mut image = canvas(400, 300);
    stroke(
        &mut image,
        &[(40.0, 40.0), (40.0, 250.0), (360.0, 250.0)],
        7.0,
        ROUTE_BLUE,
    );
    stamp(&mut image, 300.0, 60.0, 2.0, ROUTE_RED);
    image
}

/// A 200x200 canvas with a thick red ring, which should skeletonise
/// into a closed loop.
pub fn ring_route() -> RgbImage {
    let mut image = canvas(200, 200);
    let samples = 180;

    let ring = (0..=samples)
        .map(|step| {
            let theta = step as f64 / samples as f64 * std::f64::consts::TAU;
            (100.0 + 60.0 * theta.cos(), 100.0 + 60.0 * theta.sin())
        })
        .collect::<Vec<_>>();

    stroke(&mut image, &ring, 7.0, ROUTE_RED);
    image
}

/// A canvas holding two separate routes: a long blue one along the top
/// and a short red one in the bottom corner.
pub fn two_routes() -> RgbImage {
    let mut image = canvas(500, 300);
    stroke(&mut image, &[(20.0, 40.0), (480.0, 60.0)], 7.0, ROUTE_BLUE);
    stroke(&mut image, &[(40.0, 240.0), (110.0, 270.0)], 7.0, ROUTE_RED_WRAPPED);
    image
}

/// A canvas with no route colored pixels at all.
pub fn empty_route() -> RgbImage {
    let mut image = canvas(120, 80);
    stroke(&mut image, &[(10.0, 10.0), (110.0, 70.0)], 5.0, BACKGROUND_GREY);
    image
}

/// Road geometries, in (lng, lat), laid over the unit bounding box
/// `{north: 1, south: 0, east: 1, west: 0}`.
pub mod roads {
    use super::*;

    /// Runs along the diagonal, north-west to south-east.
    pub fn diagonal() -> LineString {
        line_string![
            (x: 0.0, y: 1.0),
            (x: 0.25, y: 0.75),
            (x: 0.5, y: 0.5),
            (x: 0.75, y: 0.25),
            (x: 1.0, y: 0.0),
        ]
    }

    /// Runs along the southern edge.
    pub fn southern() -> LineString {
        line_string![
            (x: 0.0, y: 0.02),
            (x: 0.5, y: 0.02),
            (x: 1.0, y: 0.02),
        ]
    }

    /// A few roads in WKT, one per line, with an `id;name;` prefix.
    pub const WKT_ROADS: &str = "\
7;Diagonal Road;LINESTRING (0 1, 0.25 0.75, 0.5 0.5, 0.75 0.25, 1 0)
8;;LINESTRING (0 0.02, 0.5 0.02, 1 0.02)
LINESTRING (5 5, 6 6)
";
}
