use crate::consts::{
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE_MINUTES, MAX_DST_SUNDAY, MAX_MONTH,
    MAX_TIMEZONE_MINUTES,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Error type for configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Latitude outside ±90°.
    #[error("Invalid latitude: {0}° (must be within ±90°)")]
    InvalidLatitude(f64),

    /// Longitude outside ±180°.
    #[error("Invalid longitude: {0}° (must be within ±180°)")]
    InvalidLongitude(f64),

    /// Timezone offset outside ±720 minutes.
    #[error("Invalid timezone offset: {0} minutes (must be within ±720)")]
    InvalidTimezone(i16),

    /// DST rule month outside 1..=12.
    #[error("Invalid DST rule month: {0} (must be 1-12)")]
    InvalidDstMonth(u8),

    /// DST rule Sunday ordinal outside 1..=4.
    #[error("Invalid DST rule Sunday ordinal: {0} (must be 1-4)")]
    InvalidDstSunday(u8),
}

/// Observer position in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Display, Serialize, Deserialize)]
#[display(fmt = "({latitude}°, {longitude}°)")]
#[serde(try_from = "RawLocation")]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location, validating both coordinates.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidLatitude` / `InvalidLongitude` when a
    /// coordinate is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ConfigError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::InvalidLongitude(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl TryFrom<RawLocation> for Location {
    type Error = ConfigError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

/// Offset of local standard time from UTC, in signed minutes.
/// Magnitude is limited to 720 (±12h).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i16", into = "i16")]
pub struct TimezoneOffset(i16);

impl TimezoneOffset {
    /// Creates a timezone offset, validating the magnitude.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidTimezone` if |minutes| > 720.
    pub fn new(minutes: i16) -> Result<Self, ConfigError> {
        if minutes.abs() > MAX_TIMEZONE_MINUTES {
            return Err(ConfigError::InvalidTimezone(minutes));
        }
        Ok(Self(minutes))
    }

    /// Returns the offset in minutes
    #[inline]
    pub const fn minutes(self) -> i16 {
        self.0
    }
}

impl Default for TimezoneOffset {
    fn default() -> Self {
        Self(DEFAULT_TIMEZONE_MINUTES)
    }
}

impl TryFrom<i16> for TimezoneOffset {
    type Error = ConfigError;

    fn try_from(minutes: i16) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<TimezoneOffset> for i16 {
    fn from(tz: TimezoneOffset) -> Self {
        tz.0
    }
}

impl std::fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let magnitude = self.0.abs();
        write!(f, "{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
    }
}

/// Daylight-saving rule: DST starts on the `start_sunday`-th Sunday of
/// `start_month` and ends on the `end_sunday`-th Sunday of `end_month`,
/// both at 02:00 local standard time, advancing the clock by
/// `advance_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDstRule")]
pub struct DstRule {
    start_month: u8,
    start_sunday: u8,
    end_month: u8,
    end_sunday: u8,
    advance_minutes: u8,
}

#[derive(Deserialize)]
struct RawDstRule {
    start_month: u8,
    start_sunday: u8,
    end_month: u8,
    end_sunday: u8,
    advance_minutes: u8,
}

impl DstRule {
    /// Creates a DST rule, validating the month and ordinal fields.
    /// `advance_minutes` is unconstrained (typically 60).
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidDstMonth` / `InvalidDstSunday` when a
    /// field is zero or out of range.
    pub fn new(
        start_month: u8,
        start_sunday: u8,
        end_month: u8,
        end_sunday: u8,
        advance_minutes: u8,
    ) -> Result<Self, ConfigError> {
        for month in [start_month, end_month] {
            if month == 0 || month > MAX_MONTH {
                return Err(ConfigError::InvalidDstMonth(month));
            }
        }
        for sunday in [start_sunday, end_sunday] {
            if sunday == 0 || sunday > MAX_DST_SUNDAY {
                return Err(ConfigError::InvalidDstSunday(sunday));
            }
        }
        Ok(Self {
            start_month,
            start_sunday,
            end_month,
            end_sunday,
            advance_minutes,
        })
    }

    /// The historical USA rule: second Sunday of March to first Sunday of
    /// November, advancing one hour. Kept as the literal default.
    pub const fn usa() -> Self {
        Self {
            start_month: 3,
            start_sunday: 2,
            end_month: 11,
            end_sunday: 1,
            advance_minutes: 60,
        }
    }

    #[inline]
    pub const fn start_month(&self) -> u8 {
        self.start_month
    }

    #[inline]
    pub const fn start_sunday(&self) -> u8 {
        self.start_sunday
    }

    #[inline]
    pub const fn end_month(&self) -> u8 {
        self.end_month
    }

    #[inline]
    pub const fn end_sunday(&self) -> u8 {
        self.end_sunday
    }

    /// Minutes the clock advances while DST is in effect
    #[inline]
    pub const fn advance_minutes(&self) -> u8 {
        self.advance_minutes
    }
}

impl Default for DstRule {
    fn default() -> Self {
        Self::usa()
    }
}

impl TryFrom<RawDstRule> for DstRule {
    type Error = ConfigError;

    fn try_from(raw: RawDstRule) -> Result<Self, Self::Error> {
        Self::new(
            raw.start_month,
            raw.start_sunday,
            raw.end_month,
            raw.end_sunday,
            raw.advance_minutes,
        )
    }
}
