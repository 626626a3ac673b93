//! Clock arithmetic and approximate astronomy for small devices.
//!
//! An [`Almanac`] holds a fixed observer configuration (location, timezone,
//! DST rule) and computes local civil time, sunrise/sunset, sidereal time,
//! lunar phase and season from a caller-supplied [`ClockTime`]. Everything
//! is integer or low-order trigonometric arithmetic: no calendar tables, no
//! allocation, valid for the years 2000 through 2099.
//!
//! Operations that shift a value in time mutate it in place and document
//! exactly which fields they overwrite; pure queries borrow immutably.
//! Sidereal time carries a ±2 second error bound through roughly 2100.

mod config;
mod consts;
mod prelude;
mod sun;
mod types;

pub use config::{ConfigError, DstRule, Location, TimezoneOffset};
pub use consts::*;
pub use sun::SunError;
pub use types::{ClockTime, TimeError, days_in_month, is_leap_year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use sun::SunEvent;
use types::day_number;

/// One of the four seasons, as seen from the configured hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Stable index in `0..=3`, winter first. Opposite seasons differ by 2.
    pub const fn index(self) -> u8 {
        match self {
            Self::Winter => 0,
            Self::Spring => 1,
            Self::Summer => 2,
            Self::Autumn => 3,
        }
    }

    const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::Winter,
            1 => Self::Spring,
            2 => Self::Summer,
            _ => Self::Autumn,
        }
    }
}

/// The computation engine: a fixed observer configuration plus the
/// operations of the crate.
///
/// Configuration is set at construction (or through the `set_*` methods,
/// which never partially apply) and shared by all computations. The engine
/// itself holds no per-call state; callers own their [`ClockTime`] values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Almanac {
    location: Location,
    timezone: TimezoneOffset,
    dst_rule: DstRule,
}

impl Almanac {
    pub const fn new(location: Location, timezone: TimezoneOffset, dst_rule: DstRule) -> Self {
        Self {
            location,
            timezone,
            dst_rule,
        }
    }

    /// Replaces the observer position.
    ///
    /// # Errors
    /// Returns `ConfigError` and leaves the prior location in place if
    /// either coordinate is out of range.
    pub fn set_location(&mut self, latitude: f64, longitude: f64) -> Result<(), ConfigError> {
        self.location = Location::new(latitude, longitude)?;
        Ok(())
    }

    /// Replaces the timezone offset.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidTimezone` and leaves the prior offset in
    /// place if |minutes| > 720.
    pub fn set_timezone(&mut self, minutes: i16) -> Result<(), ConfigError> {
        self.timezone = TimezoneOffset::new(minutes)?;
        Ok(())
    }

    /// Replaces the DST rule.
    ///
    /// # Errors
    /// Returns `ConfigError` and leaves the prior rule in place if any
    /// month or Sunday ordinal is out of range.
    pub fn set_dst_rule(
        &mut self,
        start_month: u8,
        start_sunday: u8,
        end_month: u8,
        end_sunday: u8,
        advance_minutes: u8,
    ) -> Result<(), ConfigError> {
        self.dst_rule = DstRule::new(
            start_month,
            start_sunday,
            end_month,
            end_sunday,
            advance_minutes,
        )?;
        Ok(())
    }

    pub const fn location(&self) -> Location {
        self.location
    }

    pub const fn timezone(&self) -> TimezoneOffset {
        self.timezone
    }

    pub const fn dst_rule(&self) -> DstRule {
        self.dst_rule
    }

    /// Converts local standard time to UTC in place, by the negated
    /// timezone offset.
    pub fn gmt(&self, when: &mut ClockTime) {
        when.adjust(-i32::from(self.timezone.minutes()));
    }

    /// Applies the DST advance in place if `when` (a standard-time value)
    /// falls within the DST period; otherwise leaves it untouched.
    pub fn dst(&self, when: &mut ClockTime) {
        if self.in_dst(when) {
            when.adjust(i32::from(self.dst_rule.advance_minutes()));
        }
    }

    /// Whether DST is in effect at `when`, which must be standard (not
    /// DST-adjusted) time. Transitions happen at 02:00 on the rule's
    /// ordinal Sundays: on the start Sunday, times before 02:00 are not yet
    /// in DST; on the end Sunday, times before 02:00 still are.
    pub fn in_dst(&self, when: &ClockTime) -> bool {
        let rule = &self.dst_rule;
        if when.month < rule.start_month() || when.month > rule.end_month() {
            return false;
        }
        if when.month > rule.start_month() && when.month < rule.end_month() {
            return true;
        }

        // Boundary month: count the Sundays elapsed so far
        let weekday = when.day_of_week();
        let previous_sunday = i32::from(when.day) - i32::from(weekday) + 1;
        let sundays = if previous_sunday > 0 {
            previous_sunday / 7 + 1
        } else {
            0
        };

        if when.month == rule.start_month() {
            if sundays != i32::from(rule.start_sunday()) {
                return sundays > i32::from(rule.start_sunday());
            }
            return weekday > 1 || when.hour > 1;
        }

        if sundays != i32::from(rule.end_sunday()) {
            return sundays < i32::from(rule.end_sunday());
        }
        weekday == 1 && when.hour <= 1
    }

    /// Computes local sunrise on `when`'s date.
    ///
    /// On success the hour, minute and second fields are overwritten with
    /// the local standard time of sunrise (the date fields can roll if the
    /// event lands across midnight UTC). On failure the value is untouched.
    ///
    /// # Errors
    /// Returns `SunError::NoEventToday` under polar day/night conditions.
    pub fn sun_rise(&self, when: &mut ClockTime) -> Result<(), SunError> {
        self.solar_event(when, SunEvent::Rise)
    }

    /// Computes local sunset on `when`'s date. Same contract as
    /// [`Almanac::sun_rise`].
    ///
    /// # Errors
    /// Returns `SunError::NoEventToday` under polar day/night conditions.
    pub fn sun_set(&self, when: &mut ClockTime) -> Result<(), SunError> {
        self.solar_event(when, SunEvent::Set)
    }

    fn solar_event(&self, when: &mut ClockTime, event: SunEvent) -> Result<(), SunError> {
        let minutes = sun::event_minutes_utc(when, event, &self.location)?
            + i32::from(self.timezone.minutes());
        when.hour = 0;
        when.minute = 0;
        when.second = 0;
        when.adjust(minutes);
        Ok(())
    }

    /// Converts `when` (local standard time) to sidereal time in place:
    /// GMT sidereal time, or local sidereal time when `local` is set.
    ///
    /// Elapsed seconds since the Jan 1, 2000 epoch are scaled by the
    /// sidereal/solar ratio with integer multiply-then-divide, sidestepping
    /// the precision loss a 32-bit float would accumulate over decades.
    /// Residual error stays within ±2 seconds (±30 arc-seconds) through
    /// about 2100.
    pub fn sidereal(&self, when: &mut ClockTime, local: bool) {
        self.gmt(when);

        let days = i64::from(
            day_number(i32::from(when.year_full()), when.month, when.day)
                - day_number(i32::from(BASE_YEAR), 1, 1),
        );
        let mut seconds = days * SECONDS_PER_DAY
            + i64::from(when.hour) * SECONDS_PER_HOUR
            + i64::from(when.minute) * SECONDS_PER_MINUTE
            + i64::from(when.second);

        seconds = seconds * SIDEREAL_RATIO_NUMERATOR / SIDEREAL_RATIO_DENOMINATOR;
        seconds += SIDEREAL_EPOCH_SECONDS;

        if local {
            seconds += (SIDEREAL_SECONDS_PER_DEGREE * self.location.longitude()) as i64;
        }

        // Fold into one calendar day; floor-style so west longitudes near
        // the epoch stay positive
        seconds = seconds.rem_euclid(SECONDS_PER_DAY);

        let minutes = seconds / SECONDS_PER_MINUTE;
        when.second = (seconds % SECONDS_PER_MINUTE) as u8;
        when.hour = 0;
        when.minute = 0;
        when.adjust(minutes as i32);
    }

    /// Season at `when`'s date for the configured hemisphere. Southern
    /// latitudes see the opposite season (index rotated by 2).
    pub fn season(&self, when: &ClockTime) -> Season {
        let northern = northern_season(when);
        if self.location.latitude() < 0.0 {
            Season::from_index(northern.index() + 2)
        } else {
            northern
        }
    }
}

/// Northern-hemisphere season by fixed calendar thresholds: Mar 22, Jun 21,
/// Sep 22, Dec 21.
fn northern_season(when: &ClockTime) -> Season {
    match when.month {
        1 | 2 => Season::Winter,
        3 => {
            if when.day < 22 {
                Season::Winter
            } else {
                Season::Spring
            }
        }
        4 | 5 => Season::Spring,
        6 => {
            if when.day < 21 {
                Season::Spring
            } else {
                Season::Summer
            }
        }
        7 | 8 => Season::Summer,
        9 => {
            if when.day < 22 {
                Season::Summer
            } else {
                Season::Autumn
            }
        }
        10 | 11 => Season::Autumn,
        _ => {
            if when.day < 21 {
                Season::Autumn
            } else {
                Season::Winter
            }
        }
    }
}
