//! Conversions between date inputs and their decomposed forms

use crate::constants::TRADITIONAL_HOURS;
use crate::types::{DateObject, Time};
use crate::Result;
use datewise_core::{parse, DateError, Fields, Moment, Zone};

/// Resolve any date input to a `Moment`, naming `func` in the error.
///
/// Strings have every `/` replaced by `-` first, so `2022/01/18` and
/// `2022-01-18` are read the same way.
pub(crate) fn resolve(func: &str, input: impl Into<Time>) -> Result<Moment> {
    let resolved = match input.into() {
        Time::Moment(m) => Ok(m),
        Time::Text(s) => parse(&s.replace('/', "-")),
        Time::Millis(ms) => Moment::from_millis(ms),
    };
    resolved.map_err(|e| {
        tracing::trace!(func, error = %e, "rejecting date input");
        DateError::invalid_date(func, e.to_string())
    })
}

/// Convert a date input into a `Moment`
///
/// A `Moment` is returned unchanged.
pub fn to_date(input: impl Into<Time>) -> Result<Moment> {
    resolve("toDate", input)
}

/// Decompose into local-time fields, weekday included
pub fn to_object(input: impl Into<Time>) -> Result<DateObject> {
    let m = resolve("toObject", input)?;
    let f = m.fields(Zone::Local);
    Ok(DateObject {
        year: f.year,
        month: f.month,
        day: f.day,
        week: m.weekday_in(Zone::Local),
        hour: f.hour,
        minute: f.minute,
        second: f.second,
        millisecond: f.millisecond,
    })
}

/// `[year, month, day, hour, minute, second, millisecond]` in local time
///
/// Month is zero-based. The weekday is not part of the array form.
pub fn to_array(input: impl Into<Time>) -> Result<[i64; 7]> {
    let f = resolve("toArray", input)?.fields(Zone::Local);
    Ok([f.year, f.month, f.day, f.hour, f.minute, f.second, f.millisecond])
}

/// Rebuild a local-time `Moment` from the output of [`to_array`]
///
/// Out-of-range fields roll over into their neighbours.
pub fn from_array(parts: [i64; 7]) -> Result<Moment> {
    let [year, month, day, hour, minute, second, millisecond] = parts;
    let fields = Fields { year, month, day, hour, minute, second, millisecond };
    Moment::from_fields(&fields, Zone::Local)
        .map_err(|e| DateError::from(e).in_function("fromArray"))
}

/// Name of the traditional two-hour period containing `hour`
///
/// 23:00 and 00:00 both fall in the first period.
pub fn to_traditional_hour(hour: i64) -> Result<&'static str> {
    if !(0..=23).contains(&hour) {
        return Err(DateError::out_of_range("toTraditionalHour", "hour", hour, "0..=23"));
    }
    Ok(TRADITIONAL_HOURS[(((hour + 1) % 24) / 2) as usize])
}
