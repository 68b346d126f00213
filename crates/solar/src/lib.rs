//! Solar geometry driven by the simulated clock.
//!
//! Declination follows the sinusoidal approximation
//! `23.5° · sin(2π/365 · (day − 81))`, which crosses zero at the March equinox (day 81) and
//! peaks near the solstices (days 172 and 355). It is a teaching model rather than an
//! ephemeris: it ignores orbital eccentricity and the equation of time.

use std::f64::consts::{FRAC_PI_2, TAU};

use globe_core::constants::{AXIAL_TILT_DEG, DAYS_PER_YEAR, DEGREES_PER_HOUR};
use globe_core::{GeoCoordinate, SimulatedInstant};
use serde::Serialize;

/// Day-of-year of the March equinox in the declination model.
pub const MARCH_EQUINOX_DAY: f64 = 81.0;
/// Hour at which the Sun stands over the prime meridian.
pub const SOLAR_NOON_HOUR: f64 = 12.0;

/// Meteorological-style season label for the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// `[80,172)` spring, `[172,266)` summer, `[266,355)` autumn, otherwise winter.
    pub fn from_day_of_year(day: u16) -> Self {
        match day {
            80..=171 => Self::Spring,
            172..=265 => Self::Summer,
            266..=354 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

/// Derived solar quantities for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarState {
    pub declination_deg: f64,
    pub subsolar_point: GeoCoordinate,
    pub season: Season,
}

impl SolarState {
    pub fn at(instant: &SimulatedInstant) -> Self {
        Self {
            declination_deg: declination_deg(instant.day_of_year()),
            subsolar_point: subsolar_point(instant),
            season: Season::from_day_of_year(instant.day_of_year()),
        }
    }
}

/// Solar declination (degrees) for a day of the year.
pub fn declination_deg(day_of_year: u16) -> f64 {
    let phase = TAU / DAYS_PER_YEAR as f64 * (day_of_year as f64 - MARCH_EQUINOX_DAY);
    AXIAL_TILT_DEG * phase.sin()
}

/// Point where the Sun is overhead.
///
/// Longitude is 0° at hour 12 and moves 15° west per hour.
pub fn subsolar_point(instant: &SimulatedInstant) -> GeoCoordinate {
    let lon = (SOLAR_NOON_HOUR - instant.hour_of_day()) * DEGREES_PER_HOUR;
    GeoCoordinate::new(declination_deg(instant.day_of_year()), lon)
}

/// Day/night boundary as a closed ring of `n + 1` points.
///
/// Each point lies 90° from the subsolar point along azimuth `2πi/n`, so the first and last
/// points coincide up to rounding. `n = 0` yields the single point at azimuth 0.
pub fn terminator(instant: &SimulatedInstant, n: usize) -> Vec<GeoCoordinate> {
    let sun = subsolar_point(instant);
    let step = if n == 0 { 0.0 } else { TAU / n as f64 };
    let (sin_lat, cos_lat) = sun.lat_rad().sin_cos();
    (0..=n)
        .map(|i| {
            let azimuth = step * i as f64;
            // destination point at angular distance 90°: cos δ = 0, sin δ = 1
            let lat = (cos_lat * azimuth.cos()).clamp(-1.0, 1.0).asin();
            let dlon = (azimuth.sin() * cos_lat).atan2(-sin_lat * lat.sin());
            GeoCoordinate::from_radians(lat, sun.lon_rad() + dlon)
        })
        .collect()
}

/// Cosine of the angular distance between `coord` and the subsolar point.
fn cos_sun_angle(coord: &GeoCoordinate, instant: &SimulatedInstant) -> f64 {
    let sun = subsolar_point(instant);
    let (lat1, lat2) = (coord.lat_rad(), sun.lat_rad());
    let dlon = sun.lon_rad() - coord.lon_rad();
    (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos()).clamp(-1.0, 1.0)
}

/// True when the Sun is above the horizon, i.e. the point is less than 90° from the subsolar
/// point.
pub fn is_daylight(coord: &GeoCoordinate, instant: &SimulatedInstant) -> bool {
    cos_sun_angle(coord, instant) > 0.0
}

/// Elevation of the Sun above the horizon (degrees, negative at night).
pub fn solar_elevation_deg(coord: &GeoCoordinate, instant: &SimulatedInstant) -> f64 {
    (FRAC_PI_2 - cos_sun_angle(coord, instant).acos()).to_degrees()
}

/// Elevation of the noon Sun at a latitude, as drawn in the sun-ray diagram.
///
/// Negative values mean the Sun stays below the horizon all day.
pub fn noon_elevation_deg(lat_deg: f64, day_of_year: u16) -> f64 {
    90.0 - (lat_deg - declination_deg(day_of_year)).abs()
}

/// Hours between sunrise and sunset from the sunrise equation.
///
/// Saturates at 24 during polar day and 0 during polar night.
pub fn day_length_hours(lat_deg: f64, day_of_year: u16) -> f64 {
    let lat = lat_deg.clamp(-90.0, 90.0).to_radians();
    let decl = declination_deg(day_of_year).to_radians();
    let cos_h0 = -lat.tan() * decl.tan();
    if cos_h0 <= -1.0 {
        24.0
    } else if cos_h0 >= 1.0 {
        0.0
    } else {
        2.0 * cos_h0.acos().to_degrees() / DEGREES_PER_HOUR
    }
}
