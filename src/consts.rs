/// Earliest representable year; stored years are offsets from this base.
pub const BASE_YEAR: u16 = 2000;

/// Maximum stored year offset (inclusive), i.e. calendar year 2099
pub const MAX_YEAR: u8 = 99;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for July, after which the 31/30 alternation inverts
pub const JULY: u8 = 7;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;
/// Days in February for common years
pub const FEBRUARY_DAYS: u8 = 28;

/// Maximum valid Sunday ordinal in a DST rule (a month holds at most
/// five Sundays, but rules are expressed with the first four)
pub const MAX_DST_SUNDAY: u8 = 4;

/// Maximum timezone offset magnitude in minutes (±12h)
pub const MAX_TIMEZONE_MINUTES: i16 = 720;

pub const MINUTES_PER_HOUR: i32 = 60;
pub const HOURS_PER_DAY: i32 = 24;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_DAY: i64 = 86400;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Mean length of the synodic month (new moon to new moon) in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Ratio of sidereal to solar time, scaled by 1e9 for integer math
pub(crate) const SIDEREAL_RATIO_NUMERATOR: i64 = 1_002_737_909;
pub(crate) const SIDEREAL_RATIO_DENOMINATOR: i64 = 1_000_000_000;
/// GMT sidereal time at the Jan 1, 2000 epoch, in seconds (06:39:52)
pub(crate) const SIDEREAL_EPOCH_SECONDS: i64 = 23_992;
/// Sidereal seconds of longitude correction per degree (4 min / 15°)
pub(crate) const SIDEREAL_SECONDS_PER_DEGREE: f64 = 240.0;

pub(crate) const DEGREES_PER_RADIAN: f64 = 57.295_779_513_082_322;

/// Zenith angle for official sunrise/sunset, 90°50', in radians.
/// Accounts for atmospheric refraction and the solar disc radius.
pub(crate) const SUNRISE_ZENITH_RADIANS: f64 = 1.585_340_737_228_125;

/// Mean month length used for the approximate day-of-year
pub(crate) const MEAN_MONTH_DAYS: f64 = 30.4375;

/// Radians of fractional-year angle per day (2π / 365.56)
pub(crate) const FRACTIONAL_YEAR_SCALE: f64 = 1.718_771_839_885e-2;

/// Default observer: Tampa, Florida, US Eastern standard time
pub const DEFAULT_LATITUDE: f64 = 27.0;
pub const DEFAULT_LONGITUDE: f64 = -82.0;
pub const DEFAULT_TIMEZONE_MINUTES: i16 = -300;
