//! Moment: the canonical date value
//!
//! A millisecond instant stored as an `i64` offset from the Unix epoch.
//! Calendar fields are derived on demand in local time or UTC; composing an
//! instant from fields normalises overflow (month 12 rolls into the next year,
//! day 0 is the last day of the previous month, and so on).
//!
//! Design principles:
//! - Calendar math is our own (Gregorian proleptic); only the local offset
//!   comes from the host time zone database
//! - Every operation returns a new value, a `Moment` is never mutated in place
//! - Never panics - construction outside the supported range is an error

use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Largest representable distance from the epoch: 100,000,000 days
pub const MAX_MILLIS: i64 = 100_000_000 * MILLIS_PER_DAY;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Years beyond this can never land inside `MAX_MILLIS`; rejecting them early
/// keeps the civil-day arithmetic far away from `i64` limits.
const MAX_YEAR_MAGNITUDE: i64 = 1_000_000;

// ============================================================================
// MomentError
// ============================================================================

/// Errors raised while building a `Moment`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MomentError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Instant out of range: {0} ms")]
    OutOfRange(i64),
}

// ============================================================================
// Fields
// ============================================================================

/// Calendar fields of an instant as seen from one zone
///
/// `month` is zero-based. When passed to [`Moment::from_fields`] the values
/// may be out of their natural range and are normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub millisecond: i64,
}

impl Fields {
    /// Midnight on the given day (month zero-based)
    pub fn date(year: i64, month: i64, day: i64) -> Self {
        Self { year, month, day, hour: 0, minute: 0, second: 0, millisecond: 0 }
    }
}

// ============================================================================
// Moment
// ============================================================================

/// An absolute instant with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Moment {
    /// Milliseconds since Unix epoch (negative for pre-1970 instants)
    millis: i64,
}

impl Moment {
    // ========== Construction ==========

    /// Create a moment from milliseconds since Unix epoch
    pub fn from_millis(millis: i64) -> Result<Self, MomentError> {
        if millis.checked_abs().map_or(true, |abs| abs > MAX_MILLIS) {
            tracing::debug!(millis, "timestamp outside representable range");
            return Err(MomentError::OutOfRange(millis));
        }
        Ok(Self { millis })
    }

    /// Current instant
    pub fn now() -> Self {
        let millis = match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(e) => -(e.duration().as_millis() as i64),
        };
        Self { millis }
    }

    /// Compose an instant from calendar fields interpreted in `zone`
    ///
    /// Out-of-range fields roll over into their neighbours, the way the
    /// host platform's date setters behave.
    pub fn from_fields(fields: &Fields, zone: Zone) -> Result<Self, MomentError> {
        let wall = wall_millis(fields).ok_or(MomentError::OutOfRange(i64::MAX))?;
        let utc = wall
            .checked_sub(zone.offset_for_wall(wall))
            .ok_or(MomentError::OutOfRange(wall))?;
        Self::from_millis(utc)
    }

    /// Midnight of the given local day (month zero-based)
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, MomentError> {
        Self::from_fields(&Fields::date(year, month, day), Zone::Local)
    }

    // ========== Accessors ==========

    /// Get milliseconds since Unix epoch
    pub fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Get seconds since Unix epoch (truncated toward zero)
    pub fn as_unix_secs(&self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    /// Decompose into calendar fields as seen from `zone`
    pub fn fields(&self, zone: Zone) -> Fields {
        let wall = self.wall(zone);
        let days = wall.div_euclid(MILLIS_PER_DAY);
        let day_millis = wall.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Fields {
            year,
            month: month as i64 - 1,
            day: day as i64,
            hour: day_millis / MILLIS_PER_HOUR,
            minute: (day_millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            second: (day_millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
            millisecond: day_millis % MILLIS_PER_SECOND,
        }
    }

    /// Day of week as seen from `zone` (0=Sunday, 6=Saturday)
    pub fn weekday_in(&self, zone: Zone) -> i64 {
        let days = self.wall(zone).div_euclid(MILLIS_PER_DAY);
        // 1970-01-01 was Thursday (4)
        (days + 4).rem_euclid(7)
    }

    /// Get year component (local time)
    pub fn year(&self) -> i64 {
        self.fields(Zone::Local).year
    }

    /// Get month component (local time, 0-11)
    pub fn month(&self) -> i64 {
        self.fields(Zone::Local).month
    }

    /// Get day-of-month component (local time, 1-31)
    pub fn day(&self) -> i64 {
        self.fields(Zone::Local).day
    }

    /// Get day of week (local time, 0=Sunday)
    pub fn weekday(&self) -> i64 {
        self.weekday_in(Zone::Local)
    }

    /// Get hour component (local time, 0-23)
    pub fn hour(&self) -> i64 {
        self.fields(Zone::Local).hour
    }

    /// Get minute component (local time, 0-59)
    pub fn minute(&self) -> i64 {
        self.fields(Zone::Local).minute
    }

    /// Get second component (local time, 0-59)
    pub fn second(&self) -> i64 {
        self.fields(Zone::Local).second
    }

    /// Get millisecond component (0-999)
    pub fn millisecond(&self) -> i64 {
        self.fields(Zone::Local).millisecond
    }

    /// Milliseconds since epoch of the wall clock reading in `zone`
    fn wall(&self, zone: Zone) -> i64 {
        self.millis + zone.offset_at(self.millis)
    }

    // ========== Formatting ==========

    /// Format as ISO 8601 string in UTC
    pub fn to_iso_string(&self) -> String {
        let f = self.fields(Zone::Utc);
        let year = if (0..=9999).contains(&f.year) {
            format!("{:04}", f.year)
        } else {
            format!("{:+07}", f.year)
        };
        format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year, f.month + 1, f.day, f.hour, f.minute, f.second, f.millisecond
        )
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}

impl TryFrom<i64> for Moment {
    type Error = MomentError;

    fn try_from(millis: i64) -> Result<Self, Self::Error> {
        Self::from_millis(millis)
    }
}

impl From<Moment> for i64 {
    fn from(m: Moment) -> Self {
        m.millis
    }
}

/// Wall-clock milliseconds for (possibly denormalised) fields
fn wall_millis(f: &Fields) -> Option<i64> {
    let year = f.year.checked_add(f.month.div_euclid(12))?;
    if year.unsigned_abs() > MAX_YEAR_MAGNITUDE.unsigned_abs() {
        return None;
    }
    let month = f.month.rem_euclid(12) as u32 + 1;
    let days = days_from_civil(year, month, 1).checked_add(f.day.checked_sub(1)?)?;

    let time = f.hour.checked_mul(MILLIS_PER_HOUR)?
        .checked_add(f.minute.checked_mul(MILLIS_PER_MINUTE)?)?
        .checked_add(f.second.checked_mul(MILLIS_PER_SECOND)?)?
        .checked_add(f.millisecond)?;

    days.checked_mul(MILLIS_PER_DAY)?.checked_add(time)
}

// ============================================================================
// Calendar Utilities (Gregorian proleptic)
// ============================================================================

/// Check if year is a leap year
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get days in a month (1-based month)
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        m if (1..=12).contains(&m) => DAYS_IN_MONTH[(m - 1) as usize],
        _ => 0,
    }
}

/// Convert civil date to days since Unix epoch
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

/// Convert days since Unix epoch to civil date (1-based month)
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year, m as u32, d as u32)
}

// ============================================================================
// Tests
// ============================================================================
