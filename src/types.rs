use crate::consts::{
    BASE_YEAR, CENTURY_CYCLE, FEBRUARY, FEBRUARY_DAYS, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    HOURS_PER_DAY, JULY, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY, MINUTES_PER_HOUR,
    SYNODIC_MONTH_DAYS,
};
use crate::prelude::*;
use std::fmt;
use std::str::FromStr;

/// A civil date and time in the two-digit-year calendar (2000..=2099).
///
/// Fields are plain `u8` and public: operations that shift a value in time
/// (`adjust`, and the `Almanac` operations built on it) mutate the caller's
/// value in place, which is the whole point of this compact representation.
/// Every mutating operation leaves all fields back in range.
///
/// Values built by hand must satisfy the field ranges below; out-of-range
/// fields are a precondition violation and the arithmetic makes no attempt
/// to detect them. Use [`ClockTime::new`] to construct with validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    /// Seconds, `0..=59`
    pub second: u8,
    /// Minutes, `0..=59`
    pub minute: u8,
    /// Hours, `0..=23`
    pub hour: u8,
    /// Day of month, `1..=days_in_month`
    pub day: u8,
    /// Month, `1..=12`
    pub month: u8,
    /// Years since 2000, `0..=99`
    pub year: u8,
}

/// Error type for constructing or parsing a [`ClockTime`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TimeError {
    #[display(fmt = "Invalid date-time format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", BASE_YEAR, "BASE_YEAR + MAX_YEAR as u16")]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid hour: {_0} (must be 0-23)")]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {_0} (must be 0-59)")]
    InvalidMinute(u8),
    #[display(fmt = "Invalid second: {_0} (must be 0-59)")]
    InvalidSecond(u8),
    #[display(fmt = "Empty date-time string")]
    EmptyInput,
}

impl std::error::Error for TimeError {}

impl ClockTime {
    /// Creates a validated value from a full calendar year and time of day.
    ///
    /// # Errors
    /// Returns the `TimeError` variant naming the first out-of-range field.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TimeError> {
        if year < BASE_YEAR || year > BASE_YEAR + u16::from(MAX_YEAR) {
            return Err(TimeError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(TimeError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDay { month, day, year });
        }
        if hour > 23 {
            return Err(TimeError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(TimeError::InvalidMinute(minute));
        }
        if second > 59 {
            return Err(TimeError::InvalidSecond(second));
        }
        Ok(Self {
            second,
            minute,
            hour,
            day,
            month,
            year: (year - BASE_YEAR) as u8,
        })
    }

    /// Full calendar year (2000..=2099)
    #[inline]
    pub const fn year_full(&self) -> u16 {
        BASE_YEAR + self.year as u16
    }

    /// Whether this value falls in a leap year
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year_full())
    }

    /// Number of days in this value's month
    pub const fn length_of_month(&self) -> u8 {
        days_in_month(self.year_full(), self.month)
    }

    /// Day of week in `1..=7`, where 1 is Sunday and 7 is Saturday.
    /// Zeller-style congruence; anchored in tests to Jan 1, 2000 (Saturday).
    pub fn day_of_week(&self) -> u8 {
        let mut year = i32::from(self.year_full());
        let mut month = i32::from(self.month);
        if month < 3 {
            month += 12;
            year -= 1;
        }
        let dow =
            ((13 * month + 3) / 5 + i32::from(self.day) + year + year / 4 - year / 100 + year / 400)
                % 7;
        ((dow + 1) % 7 + 1) as u8
    }

    /// Adds a signed number of minutes, carrying through minute, hour, day,
    /// month and year in turn. Carries use floor-style division, so negative
    /// offsets borrow correctly, and the day loop crosses as many month
    /// boundaries as the offset requires.
    ///
    /// The year is stored modulo 100: adjusting across the 2000/2099
    /// boundary wraps silently. This is a documented limitation of the
    /// two-digit representation, not an error condition.
    pub fn adjust(&mut self, offset_minutes: i32) {
        let total = i32::from(self.minute) + offset_minutes;
        self.minute = total.rem_euclid(MINUTES_PER_HOUR) as u8;

        let total = total.div_euclid(MINUTES_PER_HOUR) + i32::from(self.hour);
        self.hour = total.rem_euclid(HOURS_PER_DAY) as u8;

        let mut day = total.div_euclid(HOURS_PER_DAY) + i32::from(self.day);
        let mut month = i32::from(self.month);
        let mut year = i32::from(self.year_full());

        while day > month_length(year, month) {
            day -= month_length(year, month);
            month += 1;
            if month > i32::from(MAX_MONTH) {
                month = 1;
                year += 1;
            }
        }
        while day < i32::from(MIN_DAY) {
            month -= 1;
            if month < 1 {
                month = i32::from(MAX_MONTH);
                year -= 1;
            }
            day += month_length(year, month);
        }

        self.day = day as u8;
        self.month = month as u8;
        self.year = (year - i32::from(BASE_YEAR)).rem_euclid(i32::from(CENTURY_CYCLE)) as u8;
    }

    /// Non-mutating companion to [`ClockTime::adjust`].
    pub fn adjusted(mut self, offset_minutes: i32) -> Self {
        self.adjust(offset_minutes);
        self
    }

    /// Fraction of the lunar cycle elapsed at this date, in `[0, 1)`.
    /// 0 is a new moon, 0.5 a full moon. Time of day is ignored; the
    /// reference new moon is Jan 6, 2000.
    pub fn moon_phase(&self) -> f64 {
        let days = day_number(i32::from(self.year_full()), self.month, self.day)
            - day_number(i32::from(BASE_YEAR), 1, 6);
        (f64::from(days) / SYNODIC_MONTH_DAYS).rem_euclid(1.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year_full(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parses `YYYY-MM-DD HH:MM:SS`, validating every field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TimeError::EmptyInput);
        }
        let (date, time) = trimmed
            .split_once(' ')
            .ok_or_else(|| TimeError::InvalidFormat(trimmed.to_owned()))?;

        let date: Vec<&str> = date.split('-').collect();
        let time: Vec<&str> = time.trim().split(':').collect();
        if date.len() != 3 || time.len() != 3 {
            return Err(TimeError::InvalidFormat(trimmed.to_owned()));
        }

        let year = parse_u16(date[0])?;
        let month = parse_u8(date[1])?;
        let day = parse_u8(date[2])?;
        let hour = parse_u8(time[0])?;
        let minute = parse_u8(time[1])?;
        let second = parse_u8(time[2])?;

        Self::new(year, month, day, hour, minute, second)
    }
}

fn parse_u16(s: &str) -> Result<u16, TimeError> {
    s.parse::<u16>()
        .map_err(|_| TimeError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, TimeError> {
    s.parse::<u8>()
        .map_err(|_| TimeError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// --- calendar arithmetic helpers ---

/// Gregorian leap year rule
pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in the given month. Months alternate 31/30 starting from January,
/// with the alternation inverted after July; February follows the leap rule.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY {
        if is_leap_year(year) {
            return FEBRUARY_DAYS_LEAP;
        }
        return FEBRUARY_DAYS;
    }
    let mut odd = month & 1 == 1;
    if month > JULY {
        odd = !odd;
    }
    if odd { 31 } else { 30 }
}

/// Continuous day count for differencing dates. Shifts the calendar so the
/// year starts in March, which pushes the leap day to year-end and keeps the
/// month-length polynomial exact. Not a public Julian day.
pub(crate) const fn day_number(year: i32, month: u8, day: u8) -> i32 {
    let m = (month as i32 + 9) % 12;
    let y = year - m / 10;
    365 * y + y / 4 - y / 100 + y / 400 + (m * 306 + 5) / 10 + day as i32 - 1
}

/// Month length for the normalizer's running (unwrapped) year.
/// Leap status repeats every 400 years, so folding keeps `days_in_month`
/// on its `u16` domain even if the running year drifts below zero.
fn month_length(year: i32, month: i32) -> i32 {
    i32::from(days_in_month(year.rem_euclid(400) as u16, month as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> ClockTime {
        ClockTime::new(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn test_new_valid() {
        assert!(ClockTime::new(2000, 1, 1, 0, 0, 0).is_ok());
        assert!(ClockTime::new(2099, 12, 31, 23, 59, 59).is_ok());
        assert!(ClockTime::new(2024, 2, 29, 12, 0, 0).is_ok());
    }

    #[test]
    fn test_new_invalid_fields() {
        assert!(matches!(
            ClockTime::new(1999, 1, 1, 0, 0, 0),
            Err(TimeError::InvalidYear(1999))
        ));
        assert!(matches!(
            ClockTime::new(2100, 1, 1, 0, 0, 0),
            Err(TimeError::InvalidYear(2100))
        ));
        assert!(matches!(
            ClockTime::new(2024, 13, 1, 0, 0, 0),
            Err(TimeError::InvalidMonth(13))
        ));
        assert!(matches!(
            ClockTime::new(2024, 0, 1, 0, 0, 0),
            Err(TimeError::InvalidMonth(0))
        ));
        assert!(matches!(
            ClockTime::new(2023, 2, 29, 0, 0, 0),
            Err(TimeError::InvalidDay { .. })
        ));
        assert!(matches!(
            ClockTime::new(2024, 1, 0, 0, 0, 0),
            Err(TimeError::InvalidDay { .. })
        ));
        assert!(matches!(
            ClockTime::new(2024, 1, 1, 24, 0, 0),
            Err(TimeError::InvalidHour(24))
        ));
        assert!(matches!(
            ClockTime::new(2024, 1, 1, 0, 60, 0),
            Err(TimeError::InvalidMinute(60))
        ));
        assert!(matches!(
            ClockTime::new(2024, 1, 1, 0, 0, 60),
            Err(TimeError::InvalidSecond(60))
        ));
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 2004,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2001,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_31_day_months() {
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(
                days_in_month(2023, month),
                31,
                "Month {month} should have 31 days"
            );
        }
    }

    #[test]
    fn test_days_in_month_30_day_months() {
        for month in [4, 6, 9, 11] {
            assert_eq!(
                days_in_month(2023, month),
                30,
                "Month {month} should have 30 days"
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29, "Century divisible by 400");
        assert_eq!(days_in_month(2100, 2), 28, "Century not divisible by 400");
    }

    #[test]
    fn test_day_of_week_known_dates() {
        // Jan 1, 2000 was a Saturday (mapping: 1 = Sunday .. 7 = Saturday)
        assert_eq!(at(2000, 1, 1, 0, 0, 0).day_of_week(), 7);
        // Jan 2, 2000: Sunday
        assert_eq!(at(2000, 1, 2, 0, 0, 0).day_of_week(), 1);
        // Mar 1, 2000: Wednesday
        assert_eq!(at(2000, 3, 1, 0, 0, 0).day_of_week(), 4);
        // Jul 4, 2026: Saturday
        assert_eq!(at(2026, 7, 4, 0, 0, 0).day_of_week(), 7);
        // Feb 29, 2024: Thursday
        assert_eq!(at(2024, 2, 29, 0, 0, 0).day_of_week(), 5);
    }

    #[test]
    fn test_day_number_differences() {
        let days =
            |y: i32, m: u8, d: u8| day_number(y, m, d) - day_number(i32::from(BASE_YEAR), 1, 1);
        assert_eq!(days(2000, 1, 1), 0);
        assert_eq!(days(2000, 1, 2), 1);
        assert_eq!(days(2000, 3, 1), 60, "2000 has a Feb 29");
        assert_eq!(days(2001, 1, 1), 366);
        assert_eq!(days(2002, 1, 1), 731);
    }

    #[test]
    fn test_adjust_zero_is_identity() {
        let original = at(2024, 6, 15, 12, 30, 45);
        let mut t = original;
        t.adjust(0);
        assert_eq!(t, original);
    }

    #[test]
    fn test_adjust_within_hour() {
        let mut t = at(2024, 6, 15, 12, 30, 0);
        t.adjust(15);
        assert_eq!(t, at(2024, 6, 15, 12, 45, 0));
        t.adjust(-45);
        assert_eq!(t, at(2024, 6, 15, 12, 0, 0));
    }

    #[test]
    fn test_adjust_across_midnight() {
        let mut t = at(2024, 6, 15, 23, 59, 0);
        t.adjust(1);
        assert_eq!(t, at(2024, 6, 16, 0, 0, 0));

        let mut t = at(2024, 6, 15, 0, 0, 0);
        t.adjust(-1);
        assert_eq!(t, at(2024, 6, 14, 23, 59, 0));
    }

    #[test]
    fn test_adjust_across_month_boundaries() {
        let mut t = at(2023, 1, 31, 23, 30, 0);
        t.adjust(60);
        assert_eq!(t, at(2023, 2, 1, 0, 30, 0));

        let mut t = at(2023, 3, 1, 0, 30, 0);
        t.adjust(-60);
        assert_eq!(t, at(2023, 2, 28, 23, 30, 0));

        // Leap February
        let mut t = at(2024, 3, 1, 0, 30, 0);
        t.adjust(-60);
        assert_eq!(t, at(2024, 2, 29, 23, 30, 0));
    }

    #[test]
    fn test_adjust_across_year_boundary() {
        let mut t = at(2023, 12, 31, 23, 59, 0);
        t.adjust(1);
        assert_eq!(t, at(2024, 1, 1, 0, 0, 0));

        let mut t = at(2024, 1, 1, 0, 0, 0);
        t.adjust(-1);
        assert_eq!(t, at(2023, 12, 31, 23, 59, 0));
    }

    #[test]
    fn test_adjust_multi_month_offset() {
        // 100 days forward from Jan 1, 2023: Apr 11
        let mut t = at(2023, 1, 1, 0, 0, 0);
        t.adjust(100 * 24 * 60);
        assert_eq!(t, at(2023, 4, 11, 0, 0, 0));

        // and back again
        t.adjust(-100 * 24 * 60);
        assert_eq!(t, at(2023, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_adjust_round_trip() {
        let original = at(2024, 2, 29, 13, 7, 11);
        for offset in [1, 59, 60, 1440, 44_640, 527_040, -1, -1440, -100_000] {
            let t = original.adjusted(offset).adjusted(-offset);
            assert_eq!(t, original, "offset {offset} did not round-trip");
        }
    }

    #[test]
    fn test_adjust_century_wrap() {
        // Two-digit year storage: 2099 wraps to 2000, not 2100
        let mut t = at(2099, 12, 31, 23, 59, 0);
        t.adjust(1);
        assert_eq!(t, at(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_moon_phase_reference_new_moon() {
        let phase = at(2000, 1, 6, 0, 0, 0).moon_phase();
        assert!(phase < 1e-9, "reference new moon should be phase 0, got {phase}");
    }

    #[test]
    fn test_moon_phase_progression() {
        // Half a synodic month after the reference: near full moon
        let phase = at(2000, 1, 21, 0, 0, 0).moon_phase();
        assert!((phase - 0.5).abs() < 0.02, "got {phase}");

        // One full cycle later: near new again
        let phase = at(2000, 2, 4, 0, 0, 0).moon_phase();
        assert!(phase > 0.96 || phase < 0.02, "got {phase}");
    }

    #[test]
    fn test_moon_phase_in_range() {
        for day in 1..=28 {
            let phase = at(2026, 8, day, 0, 0, 0).moon_phase();
            assert!((0.0..1.0).contains(&phase));
        }
    }

    #[test]
    fn test_display() {
        let t = at(2026, 8, 28, 9, 5, 3);
        assert_eq!(t.to_string(), "2026-08-28 09:05:03");
    }

    #[test]
    fn test_from_str() {
        let t = "2026-08-28 09:05:03".parse::<ClockTime>().unwrap();
        assert_eq!(t, at(2026, 8, 28, 9, 5, 3));

        let t = " 2024-02-29 23:59:59 ".parse::<ClockTime>().unwrap();
        assert_eq!(t, at(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(matches!("".parse::<ClockTime>(), Err(TimeError::EmptyInput)));
        assert!(matches!(
            "2026-08-28".parse::<ClockTime>(),
            Err(TimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2026-08-28 09:05".parse::<ClockTime>(),
            Err(TimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2026-08-XX 09:05:03".parse::<ClockTime>(),
            Err(TimeError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-02-29 00:00:00".parse::<ClockTime>(),
            Err(TimeError::InvalidDay { .. })
        ));
        assert!(matches!(
            "1999-12-31 00:00:00".parse::<ClockTime>(),
            Err(TimeError::InvalidYear(1999))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let t = at(2026, 8, 28, 9, 5, 3);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#""2026-08-28 09:05:03""#);
        let parsed: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }

    #[test]
    fn test_serde_validation() {
        let result: Result<ClockTime, _> = serde_json::from_str(r#""2024-13-01 00:00:00""#);
        assert!(result.is_err());

        let result: Result<ClockTime, _> = serde_json::from_str(r#""2024-02-30 00:00:00""#);
        assert!(result.is_err());
    }
}
