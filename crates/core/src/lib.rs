//! Core units, constants, and shared primitives for the Globe Views workspace.

pub mod geo;
pub mod time;

pub use geo::GeoCoordinate;
pub use time::SimulatedInstant;

/// Physical and calendar constants (kilometres, degrees and days unless stated otherwise).
pub mod constants {
    /// Earth mean radius (km) used for every spherical distance.
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Axial tilt used by the sinusoidal declination model (degrees).
    pub const AXIAL_TILT_DEG: f64 = 23.5;
    /// Days in the simulated (non-leap) calendar year.
    pub const DAYS_PER_YEAR: u16 = 365;
    /// Hours per simulated day.
    pub const HOURS_PER_DAY: f64 = 24.0;
    /// Longitude swept by the Sun per hour (degrees, westward).
    pub const DEGREES_PER_HOUR: f64 = 15.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert millions of kilometres to kilometres.
    #[inline]
    pub fn million_km_to_km(v: f64) -> f64 {
        v * 1.0e6
    }

    /// Normalize an angle in degrees into `[-180, 180)`.
    #[inline]
    pub fn wrap_degrees(deg: f64) -> f64 {
        let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
        // rem_euclid may return exactly 360 for tiny negative inputs
        if wrapped >= 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Normalize an angle in radians into `[-π, π)`.
    #[inline]
    pub fn wrap_radians(rad: f64) -> f64 {
        use std::f64::consts::{PI, TAU};
        let wrapped = (rad + PI).rem_euclid(TAU) - PI;
        if wrapped >= PI { wrapped - TAU } else { wrapped }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector; units depend on context (unit sphere, km, scene units).
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }
}
