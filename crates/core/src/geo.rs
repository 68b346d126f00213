//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

use crate::units::wrap_degrees;

/// A point on the Earth's surface in degrees.
///
/// Longitude is circular and always stored in `[-180, 180)`. Latitude is clamped into
/// `[-90, 90]` rather than rejected; a NaN latitude stays NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCoordinate")]
pub struct GeoCoordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl From<RawCoordinate> for GeoCoordinate {
    fn from(raw: RawCoordinate) -> Self {
        GeoCoordinate::new(raw.lat, raw.lon)
    }
}

impl GeoCoordinate {
    /// Build a coordinate, clamping latitude and normalizing longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lon: wrap_degrees(lon),
        }
    }

    /// Build a coordinate from radians.
    pub fn from_radians(lat_rad: f64, lon_rad: f64) -> Self {
        Self::new(lat_rad.to_degrees(), lon_rad.to_degrees())
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, within `[-180, 180)`.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    /// True when both components agree within `tolerance_deg`, treating longitude circularly.
    pub fn approx_eq(&self, other: &GeoCoordinate, tolerance_deg: f64) -> bool {
        let dlat = (self.lat - other.lat).abs();
        let dlon = wrap_degrees(self.lon - other.lon).abs();
        dlat <= tolerance_deg && dlon <= tolerance_deg
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.3}°{} {:.3}°{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}
