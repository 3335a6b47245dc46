//! Travel time estimates.

use std::fmt;

use super::AvgSpeed;

/// Float noise tolerated before rounding minutes up.
///
/// `(t - floor(t)) * 60` can land a hair above an exact minute count
/// (e.g. 15.000000000000002), which would otherwise ceil to the next minute.
const CEIL_MARGIN_MINS: f64 = 1e-9;

/// A driving time estimate in whole hours and minutes.
///
/// Minutes are always in `0..60`. Estimates round up: any positive
/// fractional minute counts as a full minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TravelTime {
    hours: u64,
    minutes: u32,
}

impl TravelTime {
    /// Create a travel time, carrying whole hours out of `minutes`.
    pub fn new(hours: u64, minutes: u32) -> Self {
        Self {
            hours: hours + u64::from(minutes / 60),
            minutes: minutes % 60,
        }
    }

    /// Estimate the time to drive `distance_km` at `speed`.
    ///
    /// `hours = floor(d / v)`, `minutes = ceil(frac(d / v) * 60)`. A ceiling
    /// of 60 minutes rolls over into the next hour.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::domain::{AvgSpeed, TravelTime};
    ///
    /// let t = TravelTime::estimate(100.0, AvgSpeed::new(80).unwrap());
    /// assert_eq!(t.to_string(), "1 hours 15 minutes");
    /// ```
    pub fn estimate(distance_km: f64, speed: AvgSpeed) -> Self {
        let time_hours = (distance_km / f64::from(speed.kmh())).max(0.0);
        let hours = time_hours.floor();
        let fraction_mins = (time_hours - hours) * 60.0;
        let minutes = (fraction_mins - CEIL_MARGIN_MINS).ceil().max(0.0);

        Self::new(hours as u64, minutes as u32)
    }

    /// Whole hours.
    pub fn hours(&self) -> u64 {
        self.hours
    }

    /// Minutes past the whole hours, in `0..60`.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours {} minutes", self.hours, self.minutes)
    }
}
