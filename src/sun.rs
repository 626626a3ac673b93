//! Low-order solar ephemeris for sunrise and sunset.
//!
//! Truncated NOAA-style Fourier series: two harmonics for the equation of
//! time, three for the solar declination. Good to a few minutes, which is
//! what a minute-resolution clock can show anyway.

use crate::config::Location;
use crate::consts::{DEGREES_PER_RADIAN, FRACTIONAL_YEAR_SCALE, MEAN_MONTH_DAYS, SUNRISE_ZENITH_RADIANS};
use crate::types::ClockTime;

/// Error type for sun event calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SunError {
    /// Polar day or night: the sun neither rises nor sets on this date at
    /// this latitude.
    #[error("The sun does not rise or set on this date at this latitude")]
    NoEventToday,
}

/// Which sun event is being solved for. The approximate hour feeds the
/// fractional-year angle; the hour-angle sign picks the morning or evening
/// crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SunEvent {
    Rise,
    Set,
}

impl SunEvent {
    const fn approximate_hour(self) -> f64 {
        match self {
            Self::Rise => 6.0,
            Self::Set => 18.0,
        }
    }
}

/// Equation of time in minutes for a fractional-year angle in radians
fn equation_of_time(y: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * y.cos()
            - 0.032077 * y.sin()
            - 0.014615 * (2.0 * y).cos()
            - 0.040849 * (2.0 * y).sin())
}

/// Solar declination in radians for a fractional-year angle in radians
fn solar_declination(y: f64) -> f64 {
    0.006918 - 0.399912 * y.cos() + 0.070257 * y.sin() - 0.006758 * (2.0 * y).cos()
        + 0.000907 * (2.0 * y).sin()
        - 0.002697 * (3.0 * y).cos()
        + 0.001480 * (3.0 * y).sin()
}

/// Minutes from midnight UTC of the requested sun event on the given date.
///
/// # Errors
/// Returns `SunError::NoEventToday` under polar day/night conditions.
pub(crate) fn event_minutes_utc(
    date: &ClockTime,
    event: SunEvent,
    location: &Location,
) -> Result<i32, SunError> {
    let lat = location.latitude() / DEGREES_PER_RADIAN;
    // Sign flipped: the series wants west-positive longitude
    let lon = -location.longitude() / DEGREES_PER_RADIAN;

    // Approximate fractional day of year, shifted to the event hour
    let days = f64::from(date.month - 1) * MEAN_MONTH_DAYS
        + f64::from(date.day - 1)
        + event.approximate_hour() / 24.0;
    let y = days * FRACTIONAL_YEAR_SCALE;

    let eqt = equation_of_time(y);
    let decl = solar_declination(y);

    // Cosine of the hour angle at the sunrise/sunset zenith
    let cos_ha =
        SUNRISE_ZENITH_RADIANS.cos() / (lat.cos() * decl.cos()) - lat.tan() * decl.tan();
    if cos_ha.abs() > 1.0 {
        return Err(SunError::NoEventToday);
    }

    let ha = match event {
        SunEvent::Rise => cos_ha.acos(),
        SunEvent::Set => -cos_ha.acos(),
    };

    Ok((720.0 + 4.0 * (lon - ha) * DEGREES_PER_RADIAN - eqt) as i32)
}
