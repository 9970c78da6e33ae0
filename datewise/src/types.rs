//! Shared vocabulary
//!
//! Date inputs, time units, weekday names, the decomposed date record and
//! the option structs accepted by `format` and `set`.

use crate::constants::{DEFAULT_FORMAT, DEFAULT_PAD_ZERO, WEEK_NAMES_EN};
use datewise_core::{
    DateError, Moment, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Time
// ============================================================================

/// A value that may denote a point in time
///
/// Validity is only established when the value is resolved (see
/// [`crate::validator::is_date`] and [`crate::transfer::to_date`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Time {
    /// An already-resolved instant
    Moment(Moment),
    /// A date string, e.g. `2022-01-18 12:12:12` or `2022/01/18`
    Text(String),
    /// Milliseconds since the Unix epoch
    Millis(i64),
}

impl Time {
    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Time::Moment(_) => "Moment",
            Time::Text(_) => "Text",
            Time::Millis(_) => "Millis",
        }
    }
}

impl From<Moment> for Time {
    fn from(m: Moment) -> Self {
        Time::Moment(m)
    }
}

impl From<&Moment> for Time {
    fn from(m: &Moment) -> Self {
        Time::Moment(*m)
    }
}

impl From<&str> for Time {
    fn from(s: &str) -> Self {
        Time::Text(s.to_string())
    }
}

impl From<String> for Time {
    fn from(s: String) -> Self {
        Time::Text(s)
    }
}

impl From<&String> for Time {
    fn from(s: &String) -> Self {
        Time::Text(s.clone())
    }
}

impl From<i64> for Time {
    fn from(ms: i64) -> Self {
        Time::Millis(ms)
    }
}

impl From<&Time> for Time {
    fn from(t: &Time) -> Self {
        t.clone()
    }
}

impl TryFrom<&serde_json::Value> for Time {
    type Error = DateError;

    /// Strings become `Text`, numbers become `Millis` (fractions truncated).
    /// Every other JSON value is rejected.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        let reject = |got: &str| DateError::arg_type("Time", "value", "string or number", got);
        match value {
            Json::String(s) => Ok(Time::Text(s.clone())),
            Json::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .map(Time::Millis)
                .ok_or_else(|| reject("non-finite number")),
            Json::Null => Err(reject("null")),
            Json::Bool(_) => Err(reject("bool")),
            Json::Array(_) => Err(reject("array")),
            Json::Object(_) => Err(reject("object")),
        }
    }
}

// ============================================================================
// TimeUnit
// ============================================================================

/// Granularity used by `offset`, `diff` and `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// Fixed magnitude in milliseconds.
    ///
    /// Month and year are 30 and 365 days; only `diff` uses these two,
    /// `offset` moves them on the calendar instead.
    pub fn millis(self) -> i64 {
        match self {
            TimeUnit::Millisecond => 1,
            TimeUnit::Second => MILLIS_PER_SECOND,
            TimeUnit::Minute => MILLIS_PER_MINUTE,
            TimeUnit::Hour => MILLIS_PER_HOUR,
            TimeUnit::Day => MILLIS_PER_DAY,
            TimeUnit::Week => 7 * MILLIS_PER_DAY,
            TimeUnit::Month => 30 * MILLIS_PER_DAY,
            TimeUnit::Year => 365 * MILLIS_PER_DAY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Millisecond => "millisecond",
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.name() == s)
            .ok_or_else(|| {
                tracing::debug!(unit = s, "unknown time unit");
                DateError::invalid_unit("TimeUnit", s)
            })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// WeekName
// ============================================================================

/// Calendar weekday, indexed 0 (Sunday) to 6 (Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekName {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekName {
    const ALL: [WeekName; 7] = [
        WeekName::Sunday,
        WeekName::Monday,
        WeekName::Tuesday,
        WeekName::Wednesday,
        WeekName::Thursday,
        WeekName::Friday,
        WeekName::Saturday,
    ];

    pub fn index(self) -> i64 {
        self as i64
    }

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        WEEK_NAMES_EN[self as usize]
    }
}

impl FromStr for WeekName {
    type Err = DateError;

    /// Full English name, ASCII case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeekName::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                tracing::debug!(name = s, "unknown weekday name");
                DateError::arg_type("WeekName", "name", "an English weekday name", s)
            })
    }
}

impl fmt::Display for WeekName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// DateObject
// ============================================================================

/// A date decomposed into local-time fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateObject {
    pub year: i64,
    /// Zero-based month (0 = January)
    pub month: i64,
    pub day: i64,
    /// Zero-based weekday (0 = Sunday)
    pub week: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub millisecond: i64,
}

// ============================================================================
// FormatOption
// ============================================================================

/// Options for `format`; unset fields fall back to the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_zero: Option<bool>,
}

impl FormatOption {
    /// Option carrying only a template
    pub fn template(format: impl Into<String>) -> Self {
        Self { format: Some(format.into()), pad_zero: None }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_pad_zero(mut self, pad_zero: bool) -> Self {
        self.pad_zero = Some(pad_zero);
        self
    }

    /// Build from a loosely-typed JSON option.
    ///
    /// A string is a template. An object contributes its `format` (if a
    /// string) and `padZero` (if a boolean); an object with neither, or any
    /// other value, yields the defaults.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::template(s.clone()),
            serde_json::Value::Object(map) => {
                let format = map.get("format").and_then(|v| v.as_str()).map(str::to_string);
                let pad_zero = map.get("padZero").and_then(|v| v.as_bool());
                if format.is_none() && pad_zero.is_none() {
                    tracing::debug!("format option has no recognized field, using defaults");
                }
                Self { format, pad_zero }
            }
            other => {
                tracing::debug!(option = %other, "ignoring format option");
                Self::default()
            }
        }
    }

    /// Template in effect
    pub fn resolved_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    /// Padding in effect
    pub fn resolved_pad_zero(&self) -> bool {
        self.pad_zero.unwrap_or(DEFAULT_PAD_ZERO)
    }
}

impl From<&str> for FormatOption {
    fn from(format: &str) -> Self {
        Self::template(format)
    }
}

impl From<String> for FormatOption {
    fn from(format: String) -> Self {
        Self::template(format)
    }
}

// ============================================================================
// SetOption
// ============================================================================

/// Field assignment for `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOption {
    pub unit: TimeUnit,
    pub value: i64,
    /// Target the UTC fields instead of local ones
    #[serde(default)]
    pub utc: bool,
}

impl SetOption {
    pub fn new(unit: TimeUnit, value: i64) -> Self {
        Self { unit, value, utc: false }
    }

    pub fn utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }
}
