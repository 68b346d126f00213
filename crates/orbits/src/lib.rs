//! Keplerian helpers placing the Earth on its elliptical orbit around the Sun.
//!
//! The orbit is fixed: eccentricity 0.0167, perihelion on day 3 at 147.1 million km,
//! aphelion 152.1 million km. Both [`orbital_angle`] and [`earth_sun_distance_million_km`]
//! route through [`OrbitalState::at`], so the true anomaly used for the orbital position is
//! by construction the one used for the distance.

use std::f64::consts::TAU;

use globe_core::units::million_km_to_km;
use serde::Serialize;

/// Orbital eccentricity of the Earth.
pub const ECCENTRICITY: f64 = 0.0167;
/// Day-of-year of perihelion.
pub const PERIHELION_DAY: f64 = 3.0;
/// Length of the anomalistic year used for the mean motion (days).
pub const ORBITAL_PERIOD_DAYS: f64 = 365.25;
/// Perihelion distance (million km).
pub const PERIHELION_MILLION_KM: f64 = 147.1;
/// Aphelion distance (million km).
pub const APHELION_MILLION_KM: f64 = 152.1;
/// Semi-major axis (million km).
pub const SEMI_MAJOR_AXIS_MILLION_KM: f64 = (PERIHELION_MILLION_KM + APHELION_MILLION_KM) / 2.0;
/// Fixed-point rounds used for Kepler's equation; ample for e ≈ 0.017.
pub const KEPLER_ITERATIONS: usize = 10;

/// Orbital position of the Earth on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalState {
    pub true_anomaly_rad: f64,
    pub distance_million_km: f64,
}

impl OrbitalState {
    /// Solve the orbit for a (possibly fractional) day of the year.
    pub fn at(day_of_year: f64) -> Self {
        let mean = mean_anomaly(day_of_year);
        let eccentric = solve_kepler(mean, ECCENTRICITY, KEPLER_ITERATIONS);
        let true_anomaly_rad = true_anomaly_from_eccentric(eccentric, ECCENTRICITY);
        Self {
            true_anomaly_rad,
            distance_million_km: distance_at_true_anomaly(true_anomaly_rad),
        }
    }

    /// Position in the orbital plane (million km), Sun at the origin, perihelion on +x.
    pub fn heliocentric_position(&self) -> [f64; 2] {
        let (sin_v, cos_v) = self.true_anomaly_rad.sin_cos();
        [
            self.distance_million_km * cos_v,
            self.distance_million_km * sin_v,
        ]
    }

    pub fn distance_km(&self) -> f64 {
        million_km_to_km(self.distance_million_km)
    }
}

/// Mean anomaly (radians) measured from perihelion.
pub fn mean_anomaly(day_of_year: f64) -> f64 {
    TAU * (day_of_year - PERIHELION_DAY) / ORBITAL_PERIOD_DAYS
}

/// Solve `E = M + e·sin(E)` by fixed-point iteration starting from `E = M`.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64, iterations: usize) -> f64 {
    let mut e_anom = mean_anomaly;
    for _ in 0..iterations {
        e_anom = mean_anomaly + eccentricity * e_anom.sin();
    }
    e_anom
}

/// Half-angle conversion from eccentric to true anomaly.
pub fn true_anomaly_from_eccentric(eccentric: f64, eccentricity: f64) -> f64 {
    let half = eccentric / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
        .atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Orbit equation `r = a(1 − e²) / (1 + e·cos ν)` in million km.
pub fn distance_at_true_anomaly(true_anomaly_rad: f64) -> f64 {
    SEMI_MAJOR_AXIS_MILLION_KM * (1.0 - ECCENTRICITY * ECCENTRICITY)
        / (1.0 + ECCENTRICITY * true_anomaly_rad.cos())
}

/// True anomaly (radians) of the Earth on a day of the year.
pub fn orbital_angle(day_of_year: f64) -> f64 {
    OrbitalState::at(day_of_year).true_anomaly_rad
}

/// Earth-Sun distance (million km) on a day of the year.
pub fn earth_sun_distance_million_km(day_of_year: f64) -> f64 {
    OrbitalState::at(day_of_year).distance_million_km
}
