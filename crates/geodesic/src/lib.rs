//! Great-circle helpers on a spherical Earth of radius [`EARTH_RADIUS_KM`].

use globe_core::GeoCoordinate;
use globe_core::constants::EARTH_RADIUS_KM;
use globe_core::vector::{self, Vector3};
use log::debug;

/// Central angle (radians) below which two points are treated as coincident.
const COINCIDENT_EPS: f64 = 1e-12;
/// Central angle (radians) within this distance of π is treated as antipodal.
const ANTIPODAL_EPS: f64 = 1e-9;

/// Central angle between two points (radians) using the haversine formula.
pub fn central_angle_rad(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let (lat1, lat2) = (a.lat_rad(), b.lat_rad());
    let dlat = lat2 - lat1;
    let dlon = b.lon_rad() - a.lon_rad();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Haversine surface distance in kilometres.
pub fn haversine_distance_km(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    EARTH_RADIUS_KM * central_angle_rad(a, b)
}

/// Initial great-circle bearing from `a` towards `b`, degrees clockwise from north in `[0, 360)`.
pub fn initial_bearing_deg(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let (lat1, lat2) = (a.lat_rad(), b.lat_rad());
    let dlon = b.lon_rad() - a.lon_rad();
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Total surface length of a polyline, summing the haversine distance of each leg.
pub fn path_length_km<'a, I>(points: I) -> f64
where
    I: IntoIterator<Item = &'a GeoCoordinate>,
{
    let mut iter = points.into_iter();
    let Some(mut prev) = iter.next() else {
        return 0.0;
    };
    let mut total = 0.0;
    for point in iter {
        total += haversine_distance_km(prev, point);
        prev = point;
    }
    total
}

/// Lazily evaluated samples along the minor great-circle arc between two points.
///
/// Yields exactly `n + 1` coordinates; the first is the start point and the last is the end
/// point, returned as given rather than recomputed. The iterator is `Clone`, so a path can be
/// walked again without recomputing the arc setup.
#[derive(Debug, Clone)]
pub struct GreatCircleIter {
    start: GeoCoordinate,
    end: GeoCoordinate,
    a: Vector3,
    b: Vector3,
    omega: f64,
    sin_omega: f64,
    segments: usize,
    next: usize,
}

impl GreatCircleIter {
    /// Central angle spanned by the arc (radians).
    pub fn angle_rad(&self) -> f64 {
        self.omega
    }

    fn point_at(&self, i: usize) -> GeoCoordinate {
        if i == 0 || self.omega < COINCIDENT_EPS {
            return self.start;
        }
        if i == self.segments {
            return self.end;
        }
        let t = i as f64 / self.segments as f64;
        let wa = ((1.0 - t) * self.omega).sin() / self.sin_omega;
        let wb = (t * self.omega).sin() / self.sin_omega;
        let p = vector::add(&vector::scale(&self.a, wa), &vector::scale(&self.b, wb));
        unit_to_geo(&p)
    }
}

impl Iterator for GreatCircleIter {
    type Item = GeoCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.segments {
            return None;
        }
        let point = self.point_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GreatCircleIter {}

/// Spherical linear interpolation along the minor arc from `start` to `end` in `n` steps.
///
/// Coincident endpoints produce `n + 1` copies of `start`. Antipodal endpoints have no unique
/// great circle; they return `None` and callers skip the path.
pub fn interpolate_great_circle(
    start: &GeoCoordinate,
    end: &GeoCoordinate,
    n: usize,
) -> Option<GreatCircleIter> {
    let a = geo_to_unit(start);
    let b = geo_to_unit(end);
    // atan2 stays well conditioned near 0 and π, where haversine's asin does not
    let omega = vector::norm(&vector::cross(&a, &b)).atan2(vector::dot(&a, &b));
    if omega > std::f64::consts::PI - ANTIPODAL_EPS {
        debug!("no unique great circle between antipodal points {start} and {end}");
        return None;
    }
    Some(GreatCircleIter {
        start: *start,
        end: *end,
        a,
        b,
        omega,
        sin_omega: omega.sin(),
        segments: n,
        next: 0,
    })
}

/// Earth-centred unit vector, `z` towards the North Pole and `x` through the prime meridian.
fn geo_to_unit(coord: &GeoCoordinate) -> Vector3 {
    let (lat, lon) = (coord.lat_rad(), coord.lon_rad());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn unit_to_geo(v: &Vector3) -> GeoCoordinate {
    let [x, y, z] = *v;
    GeoCoordinate::from_radians(z.atan2(x.hypot(y)), y.atan2(x))
}
