//! Immutable user-drawn line segments.

use globe_core::GeoCoordinate;
use globe_geodesic::{haversine_distance_km, path_length_km};
use globe_projection::Projection;
use serde::Serialize;

use crate::sample_source_path;

/// Two endpoints plus the view they were drawn in.
///
/// `distance_km` is the great-circle distance between the endpoints. It belongs to the
/// endpoints, not to the drawing view, and is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    start: GeoCoordinate,
    end: GeoCoordinate,
    source: Projection,
    distance_km: f64,
}

impl LineSegment {
    pub fn new(start: GeoCoordinate, end: GeoCoordinate, source: Projection) -> Self {
        Self {
            start,
            end,
            source,
            distance_km: haversine_distance_km(&start, &end),
        }
    }

    pub fn start(&self) -> GeoCoordinate {
        self.start
    }

    pub fn end(&self) -> GeoCoordinate {
        self.end
    }

    /// View the line was authored in.
    pub fn source(&self) -> Projection {
        self.source
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Geographic samples (`samples + 1` points) of the path as drawn in the source view.
    ///
    /// Empty for a globe line between antipodal points.
    pub fn source_path(&self, samples: usize) -> Vec<GeoCoordinate> {
        sample_source_path(&self.start, &self.end, self.source, samples.max(1))
    }

    /// Compare the geodesic distance with the true surface length of the drawn path.
    pub fn report(&self, samples: usize) -> LineReport {
        let path = self.source_path(samples);
        let drawn_path_km = path_length_km(&path);
        let detour_ratio = if self.distance_km > 0.0 && !path.is_empty() {
            drawn_path_km / self.distance_km
        } else {
            1.0
        };
        LineReport {
            source: self.source,
            geodesic_km: self.distance_km,
            drawn_path_km,
            detour_ratio,
        }
    }
}

/// How much longer a drawn line is on the real globe than the shortest route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineReport {
    pub source: Projection,
    pub geodesic_km: f64,
    pub drawn_path_km: f64,
    pub detour_ratio: f64,
}
