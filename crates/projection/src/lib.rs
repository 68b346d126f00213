//! Coordinate conversions between geographic coordinates and each rendered view.
//!
//! Three target spaces are supported:
//!
//! * the 3D globe (`Sphere`), a right-handed scene frame with `y` up and longitude negated so
//!   that increasing longitude moves east when the globe is viewed from outside;
//! * the Mercator map, normalized so its image is the square `[-π, π]²`;
//! * the north-polar azimuthal-equidistant "flat Earth" disc of unit radius.
//!
//! Every forward projection has an inverse. Inverses return `None` for points outside the
//! projection's image instead of extrapolating.

use std::f64::consts::{FRAC_PI_4, PI};

use globe_core::GeoCoordinate;
use globe_core::units::wrap_radians;
use globe_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};

/// Latitude limit (degrees) at which the Mercator image becomes square.
pub const MERCATOR_LAT_LIMIT_DEG: f64 = 85.051_128_779_806_59;

/// Radius of the azimuthal-equidistant disc; the South Pole lies on this circle.
pub const AZIMUTHAL_DISC_RADIUS: f64 = 1.0;

const BOUNDARY_EPS: f64 = 1e-12;

/// Point in a planar map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &PlanePoint, t: f64) -> PlanePoint {
        PlanePoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn distance(&self, other: &PlanePoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Views a line can be authored in or rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Sphere,
    Mercator,
    Azimuthal,
}

impl Projection {
    pub const ALL: [Projection; 3] = [
        Projection::Sphere,
        Projection::Mercator,
        Projection::Azimuthal,
    ];

    /// Lowercase identifier used in manifests and exported files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Mercator => "mercator",
            Self::Azimuthal => "azimuthal",
        }
    }

    /// Project onto this view. The globe uses a unit sphere.
    pub fn forward(self, coord: &GeoCoordinate) -> ProjectedPoint {
        match self {
            Self::Sphere => ProjectedPoint::Space(to_cartesian(coord, 1.0)),
            Self::Mercator => ProjectedPoint::Plane(to_mercator(coord)),
            Self::Azimuthal => ProjectedPoint::Plane(to_azimuthal_equidistant(coord)),
        }
    }

    /// Inverse of [`Projection::forward`]; `None` when the point is outside this view's image
    /// or belongs to a different kind of space.
    pub fn inverse(self, point: &ProjectedPoint) -> Option<GeoCoordinate> {
        match (self, point) {
            (Self::Sphere, ProjectedPoint::Space(v)) => from_cartesian(v),
            (Self::Mercator, ProjectedPoint::Plane(p)) => from_mercator(p),
            (Self::Azimuthal, ProjectedPoint::Plane(p)) => from_azimuthal_equidistant(p),
            _ => None,
        }
    }

    /// Half the visible width of the view, the shortest jump between consecutive path samples
    /// that can mean a wrap around a seam. On the azimuthal disc a longer jump only wraps when
    /// it passes the South Pole. The globe has no seam.
    pub fn seam_threshold(self) -> Option<f64> {
        match self {
            Self::Sphere => None,
            Self::Mercator => Some(PI),
            Self::Azimuthal => Some(AZIMUTHAL_DISC_RADIUS),
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" | "globe" => Ok(Self::Sphere),
            "mercator" => Ok(Self::Mercator),
            "azimuthal" | "flat" => Ok(Self::Azimuthal),
            other => Err(format!("unknown projection `{other}`")),
        }
    }
}

/// Point in either a planar map or the 3D globe scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectedPoint {
    Plane(PlanePoint),
    Space(Vector3),
}

impl ProjectedPoint {
    /// Components padded to three dimensions (`z = 0` for planar points).
    pub fn xyz(&self) -> Vector3 {
        match self {
            Self::Plane(p) => [p.x, p.y, 0.0],
            Self::Space(v) => *v,
        }
    }

    pub fn as_plane(&self) -> Option<PlanePoint> {
        match self {
            Self::Plane(p) => Some(*p),
            Self::Space(_) => None,
        }
    }

    /// Euclidean distance in the shared space of both points.
    pub fn distance(&self, other: &ProjectedPoint) -> f64 {
        vector::norm(&vector::sub(&self.xyz(), &other.xyz()))
    }
}

/// Map a coordinate onto a sphere of the given radius.
pub fn to_cartesian(coord: &GeoCoordinate, radius: f64) -> Vector3 {
    let lat = coord.lat_rad();
    let lon = -coord.lon_rad();
    [
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    ]
}

/// Inverse of [`to_cartesian`] for any radius; `None` for the zero or a non-finite vector.
pub fn from_cartesian(v: &Vector3) -> Option<GeoCoordinate> {
    let [x, y, z] = *v;
    let r = vector::norm(v);
    if r == 0.0 || !r.is_finite() {
        return None;
    }
    // atan2 form of asin(y / r); stays exact near the poles
    let lat = y.atan2(x.hypot(z));
    let lon = -z.atan2(x);
    Some(GeoCoordinate::from_radians(lat, lon))
}

/// North-polar azimuthal-equidistant projection onto the unit disc.
///
/// The radius grows linearly with colatitude, so the South Pole is smeared along the whole
/// boundary circle. That distortion belongs to the projection and is kept as is.
pub fn to_azimuthal_equidistant(coord: &GeoCoordinate) -> PlanePoint {
    let r = (90.0 - coord.lat()) / 180.0 * AZIMUTHAL_DISC_RADIUS;
    let theta = coord.lon_rad();
    PlanePoint::new(r * theta.cos(), r * theta.sin())
}

/// Inverse of [`to_azimuthal_equidistant`]; `None` outside the disc.
pub fn from_azimuthal_equidistant(p: &PlanePoint) -> Option<GeoCoordinate> {
    if !(p.x.is_finite() && p.y.is_finite()) {
        return None;
    }
    let r = p.x.hypot(p.y);
    if r > AZIMUTHAL_DISC_RADIUS + BOUNDARY_EPS {
        return None;
    }
    let r = r.min(AZIMUTHAL_DISC_RADIUS);
    let lat = 90.0 - r / AZIMUTHAL_DISC_RADIUS * 180.0;
    let lon = if r == 0.0 { 0.0 } else { p.y.atan2(p.x).to_degrees() };
    Some(GeoCoordinate::new(lat, lon))
}

/// Spherical Mercator with `x = λ` and `y = ln tan(π/4 + φ/2)`.
///
/// Latitudes beyond [`MERCATOR_LAT_LIMIT_DEG`] are clamped so the output is always finite.
pub fn to_mercator(coord: &GeoCoordinate) -> PlanePoint {
    let lat = coord
        .lat()
        .clamp(-MERCATOR_LAT_LIMIT_DEG, MERCATOR_LAT_LIMIT_DEG)
        .to_radians();
    PlanePoint::new(coord.lon_rad(), (FRAC_PI_4 + lat / 2.0).tan().ln())
}

/// Inverse of [`to_mercator`].
///
/// `x` is circular and is wrapped rather than rejected; `None` when `y` lies outside the
/// clamped image.
pub fn from_mercator(p: &PlanePoint) -> Option<GeoCoordinate> {
    if !(p.x.is_finite() && p.y.is_finite()) {
        return None;
    }
    if p.y.abs() > PI + BOUNDARY_EPS {
        return None;
    }
    let lat = 2.0 * p.y.exp().atan() - std::f64::consts::FRAC_PI_2;
    Some(GeoCoordinate::from_radians(lat, wrap_radians(p.x)))
}
