//! Simulated clock shared by every view.
//!
//! A [`SimulatedInstant`] is a day-of-year in `1..=365` plus a fractional hour in `[0, 24)`.
//! Both fields are circular: advancing past midnight carries into the next day and advancing
//! past day 365 wraps to day 1. The instant maps one-to-one onto a UTC timestamp inside the
//! non-leap [`REFERENCE_YEAR`].

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_YEAR, HOURS_PER_DAY, SECONDS_PER_HOUR};

/// Non-leap calendar year the simulated clock is anchored to.
pub const REFERENCE_YEAR: i32 = 2023;

const LAST_NANOSECOND_OF_DAY: i64 = 86_400 * 1_000_000_000 - 1;

/// Point on the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawInstant")]
pub struct SimulatedInstant {
    day_of_year: u16,
    hour_of_day: f64,
}

#[derive(Deserialize)]
struct RawInstant {
    day_of_year: i64,
    hour_of_day: f64,
}

impl From<RawInstant> for SimulatedInstant {
    fn from(raw: RawInstant) -> Self {
        SimulatedInstant::new(raw.day_of_year, raw.hour_of_day)
    }
}

impl Default for SimulatedInstant {
    fn default() -> Self {
        Self {
            day_of_year: 1,
            hour_of_day: 12.0,
        }
    }
}

impl SimulatedInstant {
    /// Build an instant, normalizing both fields circularly.
    ///
    /// Hours outside `[0, 24)` carry into the day, so `new(365, 25.0)` is day 1 at 01:00.
    /// A non-finite hour is treated as midnight.
    pub fn new(day_of_year: i64, hour_of_day: f64) -> Self {
        let hour = if hour_of_day.is_finite() {
            hour_of_day
        } else {
            0.0
        };
        let mut wrapped = hour.rem_euclid(HOURS_PER_DAY);
        let mut carry = ((hour - wrapped) / HOURS_PER_DAY).round();
        // rem_euclid of a tiny negative hour rounds up to exactly 24
        if wrapped >= HOURS_PER_DAY {
            wrapped -= HOURS_PER_DAY;
            carry += 1.0;
        }
        // only the carry modulo a year matters, and it must fit an i64
        let carry = carry.rem_euclid(DAYS_PER_YEAR as f64) as i64;
        Self {
            day_of_year: wrap_day(wrap_day(day_of_year) as i64 + carry),
            hour_of_day: wrapped.max(0.0),
        }
    }

    pub fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    pub fn hour_of_day(&self) -> f64 {
        self.hour_of_day
    }

    /// Day-of-year with the hour folded in (`day + hour / 24`), used for smooth orbital motion.
    pub fn fractional_day(&self) -> f64 {
        self.day_of_year as f64 + self.hour_of_day / HOURS_PER_DAY
    }

    /// Advance the clock by `delta_seconds` of wall time scaled by `hours_per_second`.
    ///
    /// Negative deltas run the clock backwards. A zero delta returns the same instant.
    pub fn advance(&self, delta_seconds: f64, hours_per_second: f64) -> Self {
        let delta_hours = delta_seconds * hours_per_second;
        if delta_hours == 0.0 || !delta_hours.is_finite() {
            return *self;
        }
        Self::new(self.day_of_year as i64, self.hour_of_day + delta_hours)
    }

    /// Shift the clock by a number of simulated hours.
    pub fn plus_hours(&self, hours: f64) -> Self {
        self.advance(hours * SECONDS_PER_HOUR, 1.0 / SECONDS_PER_HOUR)
    }

    /// The UTC timestamp this instant represents within [`REFERENCE_YEAR`].
    ///
    /// The hour is kept to the nanosecond and never rounds past midnight into the next day.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        let start = NaiveDate::from_yo_opt(REFERENCE_YEAR, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let nanos = ((self.hour_of_day * SECONDS_PER_HOUR * 1.0e9).round() as i64)
            .clamp(0, LAST_NANOSECOND_OF_DAY);
        start
            + TimeDelta::days(self.day_of_year as i64 - 1)
            + TimeDelta::nanoseconds(nanos)
    }

    /// Map a UTC timestamp from any year onto the simulated clock by its ordinal day and time.
    ///
    /// Day 366 of a leap year wraps to day 1.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        let seconds = dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 * 1.0e-9;
        Self::new(dt.ordinal() as i64, seconds / SECONDS_PER_HOUR)
    }
}

impl std::fmt::Display for SimulatedInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_minutes = (self.hour_of_day * 60.0).floor() as u32;
        write!(
            f,
            "day {:03} {:02}:{:02}",
            self.day_of_year,
            total_minutes / 60,
            total_minutes % 60
        )
    }
}

/// Wrap any integer day onto `1..=365`.
pub fn wrap_day(day: i64) -> u16 {
    let days = DAYS_PER_YEAR as i64;
    ((day.rem_euclid(days) + days - 1) % days + 1) as u16
}
