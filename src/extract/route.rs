use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::extract::pixel::polyline_length;
use crate::extract::skeleton::is_junction;
use crate::extract::{
    DistanceField, HsvImage, Mask, PathOrderer, Pixel, PixelBox, PixelComponent, PixelGraph,
    Segmenter, order,
};

/// Spacing, in polyline points, between the vertices used to measure
/// turning angles. Single pixel steps only ever turn by multiples of 45°.
const CURVATURE_STRIDE: usize = 5;

/// A connected skeleton component, ordered into a polyline and described.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteComponent {
    pub id: u32,

    /// Ordered pixel path. Consecutive points are distinct.
    pub pixel_polyline: Vec<Pixel>,
    /// Sum of the Euclidean lengths of the polyline's segments.
    pub pixel_length: f64,

    /// The two path extremities, or empty if the component has fewer
    /// than two endpoint pixels.
    pub endpoints: Vec<Pixel>,
    /// True when no pixel of the component has a single neighbour.
    pub loops: bool,
    pub bounding_box: PixelBox,
    pub is_candidate_route: bool,

    /// Mean stroke width, estimated from the distance to the stroke edge
    /// at each skeleton pixel.
    pub avg_width: f64,
    pub width_std: f64,
    /// Mean absolute turning angle along the polyline, in radians.
    pub curvature: f64,
    /// Number of skeleton pixels at which three or more branches meet.
    pub self_intersections: usize,
    /// Skeleton pixel count per matched color band name.
    pub color_profile: BTreeMap<String, usize>,
    pub dominant_color: Option<String>,
    /// A loop, or a path whose ends nearly meet.
    pub is_closed_shape: bool,
}

/// Images shared by every component of one extraction.
pub struct Surroundings<'a> {
    pub skeleton: &'a Mask,
    pub widths: &'a DistanceField,
    pub image: &'a HsvImage,
    pub segmenter: &'a Segmenter<'a>,
    /// Endpoints closer than this, in pixels, make a closed shape.
    pub closure_tolerance: f64,
}

impl RouteComponent {
    pub fn build(
        component: &PixelComponent,
        orderer: &PathOrderer<'_>,
        surroundings: &Surroundings<'_>,
    ) -> Option<RouteComponent> {
        let graph = PixelGraph::new(&component.pixels);
        let bounding_box = PixelBox::enclosing(&component.pixels)?;

        let extremities = graph.extremities();
        let endpoints = extremities
            .as_ref()
            .map(|(start, _, end)| vec![graph.pixel(*start), graph.pixel(*end)])
            .unwrap_or_default();
        let loops = graph.endpoints().is_empty();

        // A subsample is no longer 8-connected, so only a greedy walk
        // can order it.
        let pixel_polyline = match (&component.subsample, order::start_pixel(&graph)) {
            (Some(sample), Some(start)) => order::nearest_neighbour(sample, start)
                .into_iter()
                .dedup()
                .collect(),
            (Some(sample), None) => sample.clone(),
            (None, _) => orderer.order_graph(&graph),
        };

        let (avg_width, width_std) = width_statistics(&component.pixels, surroundings.widths);
        let color_profile = color_profile(&component.pixels, surroundings);
        let dominant_color = color_profile
            .iter()
            .fold(None, |best: Option<(&String, usize)>, (name, count)| match best {
                Some((_, top)) if top >= *count => best,
                _ => Some((name, *count)),
            })
            .map(|(name, _)| name.clone());

        let closes = match endpoints.as_slice() {
            [first, last] => first.distance(last) <= surroundings.closure_tolerance,
            _ => false,
        };

        Some(RouteComponent {
            id: component.id,
            pixel_length: polyline_length(&pixel_polyline),
            curvature: curvature(&pixel_polyline),
            pixel_polyline,
            endpoints,
            loops,
            bounding_box,
            is_candidate_route: false,
            avg_width,
            width_std,
            self_intersections: component
                .pixels
                .iter()
                .filter(|pixel| is_junction(surroundings.skeleton, **pixel))
                .count(),
            color_profile,
            dominant_color,
            is_closed_shape: loops || closes,
        })
    }
}

/// Mean and population standard deviation of the stroke width under
/// each pixel, taking width as twice the edge distance less the centre.
fn width_statistics(pixels: &[Pixel], widths: &DistanceField) -> (f64, f64) {
    if pixels.is_empty() {
        return (0.0, 0.0);
    }

    let samples = pixels
        .iter()
        .map(|pixel| (2.0 * widths.get(*pixel) - 1.0).max(0.0))
        .collect::<Vec<_>>();

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

fn curvature(polyline: &[Pixel]) -> f64 {
    let mut vertices = polyline.iter().step_by(CURVATURE_STRIDE).copied().collect::<Vec<_>>();
    if let Some(last) = polyline.last() {
        if vertices.last() != Some(last) {
            vertices.push(*last);
        }
    }

    let turns = vertices
        .iter()
        .tuple_windows()
        .filter_map(|(a, b, c)| {
            let (ux, uy) = (b.x as f64 - a.x as f64, b.y as f64 - a.y as f64);
            let (vx, vy) = (c.x as f64 - b.x as f64, c.y as f64 - b.y as f64);
            if (ux == 0.0 && uy == 0.0) || (vx == 0.0 && vy == 0.0) {
                return None;
            }

            Some((ux * vy - uy * vx).atan2(ux * vx + uy * vy).abs())
        })
        .collect::<Vec<_>>();

    if turns.is_empty() {
        return 0.0;
    }

    turns.iter().sum::<f64>() / turns.len() as f64
}

fn color_profile(pixels: &[Pixel], surroundings: &Surroundings<'_>) -> BTreeMap<String, usize> {
    pixels
        .iter()
        .filter_map(|pixel| surroundings.image.get(*pixel))
        .filter_map(|hsv| surroundings.segmenter.classify(hsv))
        .fold(BTreeMap::new(), |mut profile, band| {
            *profile.entry(band.name.clone()).or_insert(0) += 1;
            profile
        })
}
