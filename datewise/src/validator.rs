//! Date validity checks and comparisons
//!
//! `is_date` and `is_date_value` never fail; every comparison resolves its
//! inputs first and fails if any of them is not a date.

use crate::transfer::resolve;
use crate::types::Time;
use crate::Result;
use datewise_core::{is_leap_year, parse, Moment, Zone};

/// Whether `input` denotes a point in time
///
/// Strings are read as-is, without the `/` to `-` rewrite `to_date` applies.
pub fn is_date(input: impl Into<Time>) -> bool {
    match input.into() {
        Time::Moment(_) => true,
        Time::Text(s) => parse(&s).is_ok(),
        Time::Millis(ms) => Moment::from_millis(ms).is_ok(),
    }
}

/// [`is_date`] for loosely-typed JSON input; objects, arrays, booleans and
/// null are never dates
pub fn is_date_value(value: &serde_json::Value) -> bool {
    Time::try_from(value).is_ok_and(is_date)
}

/// Both inputs denote the same millisecond
pub fn is_same(a: impl Into<Time>, b: impl Into<Time>) -> Result<bool> {
    Ok(resolve("isSame", a)? == resolve("isSame", b)?)
}

fn before(func: &str, a: impl Into<Time>, b: impl Into<Time>) -> Result<bool> {
    Ok(resolve(func, a)? < resolve(func, b)?)
}

/// `a` is strictly earlier than `b`
pub fn is_before(a: impl Into<Time>, b: impl Into<Time>) -> Result<bool> {
    before("isBefore", a, b)
}

/// Negation of [`is_before`]: equal instants count as "after"
pub fn is_after(a: impl Into<Time>, b: impl Into<Time>) -> Result<bool> {
    Ok(!before("isAfter", a, b)?)
}

/// Gregorian leap year
pub fn is_leap(year: i64) -> bool {
    is_leap_year(year)
}

/// Earlier than the moment of the call
pub fn is_past(date: impl Into<Time>) -> Result<bool> {
    Ok(resolve("isPast", date)? < Moment::now())
}

/// Later than the moment of the call
pub fn is_future(date: impl Into<Time>) -> Result<bool> {
    Ok(resolve("isFuture", date)? > Moment::now())
}

/// `start <= date < end`
///
/// The lower bound is inclusive because "after" includes equality.
pub fn is_between(date: impl Into<Time>, start: impl Into<Time>, end: impl Into<Time>) -> Result<bool> {
    let date = resolve("isBetween", date)?;
    let start = resolve("isBetween", start)?;
    let end = resolve("isBetween", end)?;
    Ok(date >= start && date < end)
}

/// Same local calendar day as now
pub fn is_today(date: impl Into<Time>) -> Result<bool> {
    let d = resolve("isToday", date)?.fields(Zone::Local);
    let now = Moment::now().fields(Zone::Local);
    Ok((d.year, d.month, d.day) == (now.year, now.month, now.day))
}
