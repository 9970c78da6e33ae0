//! Weekday queries
//!
//! Each function takes an optional date; `None` means the current instant
//! and always succeeds. Strings are read as given, so `2022/01/18` is local
//! midnight here while `to_date` reads it as `2022-01-18` (UTC).

use crate::constants::{WEEK_ABBRS_EN, WEEK_NAMES_EN, WEEK_NAMES_ZH};
use crate::transfer::resolve;
use crate::types::{Time, WeekName};
use crate::Result;
use datewise_core::{parse, DateError, Moment};

fn check(func: &str, date: Option<Time>) -> Result<Moment> {
    match date {
        Some(Time::Text(s)) => parse(&s).map_err(|e| DateError::invalid_date(func, e.to_string())),
        Some(date) => resolve(func, date),
        None => Ok(Moment::now()),
    }
}

/// Local weekday index, 0 = Sunday
pub fn index(date: Option<Time>) -> Result<i64> {
    Ok(check("Week.index", date)?.weekday())
}

/// Chinese weekday character with `prefix` in front, e.g. `周二`
pub fn zh(date: Option<Time>, prefix: &str) -> Result<String> {
    let i = check("Week.zh", date)?.weekday() as usize;
    Ok(format!("{}{}", prefix, WEEK_NAMES_ZH[i]))
}

/// Full English weekday name
pub fn en(date: Option<Time>) -> Result<&'static str> {
    Ok(WEEK_NAMES_EN[check("Week.en", date)?.weekday() as usize])
}

/// Abbreviated English weekday name, e.g. `Tue.`
pub fn abbr(date: Option<Time>) -> Result<&'static str> {
    Ok(WEEK_ABBRS_EN[check("Week.abbr", date)?.weekday() as usize])
}

/// Monday to Friday
pub fn is_work_day(date: Option<Time>) -> Result<bool> {
    Ok((1..=5).contains(&check("Week.isWorkDay", date)?.weekday()))
}

pub fn is_week_end(date: Option<Time>) -> Result<bool> {
    Ok(!(1..=5).contains(&check("Week.isWeekEnd", date)?.weekday()))
}

/// Whether the date falls on `name`
pub fn is_week(date: Option<Time>, name: WeekName) -> Result<bool> {
    Ok(check("Week.isWeek", date)?.weekday() == name.index())
}
