//! Cross-view line projection.
//!
//! A line is authored as two endpoints in one view. "Straight" depends on that view: a line
//! drawn on a flat map is a straight segment in the map's plane, while a line drawn on the globe
//! follows the great circle. To show the same line elsewhere, the path is sampled in its source
//! view, unprojected to geographic coordinates, and forward-projected into the target view.

pub mod line;
pub mod outline;

pub use line::{LineReport, LineSegment};
pub use outline::project_ring;

use globe_core::GeoCoordinate;
use globe_core::units::wrap_radians;
use globe_geodesic::{central_angle_rad, interpolate_great_circle};
use globe_projection::{
    PlanePoint, ProjectedPoint, Projection, from_azimuthal_equidistant, from_mercator,
    to_azimuthal_equidistant, to_mercator,
};
use log::debug;
use serde::Serialize;
use std::f64::consts::PI;

/// Samples per line when the caller has no preference.
pub const DEFAULT_SAMPLES: usize = 64;

/// How many times longer than its surface arc a step on the azimuthal disc must be drawn before
/// it counts as wrapping around the South Pole.
const SOUTH_POLE_STRETCH: f64 = 4.0;

/// A renderable path made of disjoint polylines.
///
/// Paths are split wherever consecutive samples wrap around a seam of the target view, so a
/// renderer can draw each segment as a plain polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPath {
    pub projection: Projection,
    pub segments: Vec<Vec<ProjectedPoint>>,
}

impl ProjectedPath {
    fn empty(projection: Projection) -> Self {
        Self {
            projection,
            segments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// All points in drawing order, ignoring segment breaks.
    pub fn points(&self) -> impl Iterator<Item = &ProjectedPoint> {
        self.segments.iter().flatten()
    }
}

/// Re-express `line` in the `target` view.
///
/// When the target is the view the line was drawn in, planar lines come back as their two
/// projected endpoints and globe lines as their great-circle arc. Otherwise the source-space
/// path is sampled `samples + 1` times and carried across. Antipodal globe lines have no
/// defined arc and yield an empty path.
pub fn reproject_line(line: &LineSegment, target: Projection, samples: usize) -> ProjectedPath {
    let samples = samples.max(1);
    if line.source() == target {
        return match target {
            Projection::Sphere => project_path(&line.source_path(samples), target),
            Projection::Mercator => {
                let (a, b) = mercator_endpoints(&line.start(), &line.end());
                ProjectedPath {
                    projection: target,
                    segments: vec![vec![ProjectedPoint::Plane(a), ProjectedPoint::Plane(b)]],
                }
            }
            Projection::Azimuthal => ProjectedPath {
                projection: target,
                segments: vec![vec![
                    target.forward(&line.start()),
                    target.forward(&line.end()),
                ]],
            },
        };
    }

    let path = line.source_path(samples);
    if path.is_empty() {
        debug!(
            "line {} -> {} has no path in its {} source view",
            line.start(),
            line.end(),
            line.source()
        );
        return ProjectedPath::empty(target);
    }
    project_path(&path, target)
}

/// Reproject a line into every view at once, in [`Projection::ALL`] order.
pub fn reproject_everywhere(line: &LineSegment, samples: usize) -> Vec<ProjectedPath> {
    Projection::ALL
        .iter()
        .map(|&target| reproject_line(line, target, samples))
        .collect()
}

/// Geographic samples of the straight line between two points in `source` space.
pub(crate) fn sample_source_path(
    start: &GeoCoordinate,
    end: &GeoCoordinate,
    source: Projection,
    samples: usize,
) -> Vec<GeoCoordinate> {
    let mut path: Vec<GeoCoordinate> = match source {
        Projection::Sphere => match interpolate_great_circle(start, end, samples) {
            Some(arc) => arc.collect(),
            None => return Vec::new(),
        },
        Projection::Mercator => {
            let (a, b) = mercator_endpoints(start, end);
            sample_plane(&a, &b, samples, from_mercator)
        }
        Projection::Azimuthal => {
            let a = to_azimuthal_equidistant(start);
            let b = to_azimuthal_equidistant(end);
            sample_plane(&a, &b, samples, from_azimuthal_equidistant)
        }
    };
    // clamped Mercator latitudes must not leak into the endpoints
    if let Some(first) = path.first_mut() {
        *first = *start;
    }
    if let Some(last) = path.last_mut() {
        *last = *end;
    }
    path
}

fn sample_plane(
    a: &PlanePoint,
    b: &PlanePoint,
    samples: usize,
    inverse: fn(&PlanePoint) -> Option<GeoCoordinate>,
) -> Vec<GeoCoordinate> {
    (0..=samples)
        .filter_map(|i| inverse(&a.lerp(b, i as f64 / samples as f64)))
        .collect()
}

/// Mercator endpoints with the end unwrapped so the segment takes the shorter way around.
fn mercator_endpoints(start: &GeoCoordinate, end: &GeoCoordinate) -> (PlanePoint, PlanePoint) {
    let a = to_mercator(start);
    let b = to_mercator(end);
    let dx = wrap_radians(b.x - a.x);
    (a, PlanePoint::new(a.x + dx, b.y))
}

/// Forward-project geographic samples and split them at the target's seams.
pub(crate) fn project_path(path: &[GeoCoordinate], target: Projection) -> ProjectedPath {
    let mut segments: Vec<Vec<ProjectedPoint>> = Vec::new();
    let mut current: Vec<ProjectedPoint> = Vec::new();
    let mut previous: Option<&GeoCoordinate> = None;
    for coord in path {
        let point = target.forward(coord);
        let wrapped = match (previous, current.last()) {
            (Some(prev_coord), Some(prev_point)) => {
                crosses_seam(target, (prev_coord, prev_point), (coord, &point))
            }
            _ => false,
        };
        if wrapped {
            segments.push(std::mem::take(&mut current));
        }
        current.push(point);
        previous = Some(coord);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    ProjectedPath {
        projection: target,
        segments,
    }
}

fn crosses_seam(
    target: Projection,
    (a_geo, a): (&GeoCoordinate, &ProjectedPoint),
    (b_geo, b): (&GeoCoordinate, &ProjectedPoint),
) -> bool {
    let Some(threshold) = target.seam_threshold() else {
        return false;
    };
    match (target, a.as_plane(), b.as_plane()) {
        // only the horizontal jump matters; large vertical steps near the poles are genuine
        (Projection::Mercator, Some(pa), Some(pb)) => (pb.x - pa.x).abs() > threshold,
        // the disc is continuous except at the South Pole, which is smeared over the whole rim
        (Projection::Azimuthal, Some(pa), Some(pb)) => {
            let jump = pa.distance(&pb);
            let arc = central_angle_rad(a_geo, b_geo) / PI * threshold;
            jump > threshold && jump > SOUTH_POLE_STRETCH * arc
        }
        _ => a.distance(b) > threshold,
    }
}
