//! Calendar arithmetic, formatting and counting
//!
//! Everything here works on local-time fields unless stated otherwise, and
//! returns a new `Moment` rather than touching its input.

mod format;
pub mod week;

pub use format::{format, format_default};

use crate::transfer::resolve;
use crate::types::{SetOption, Time, TimeUnit};
use crate::Result;
use datewise_core::{days_in_month as month_length, DateError, Fields, Moment, Zone, MILLIS_PER_DAY};

// ============================================================================
// Arithmetic
// ============================================================================

/// The field a unit moves or sets; `None` for `Week`, which has no field
fn field_mut(fields: &mut Fields, unit: TimeUnit) -> Option<&mut i64> {
    match unit {
        TimeUnit::Year => Some(&mut fields.year),
        TimeUnit::Month => Some(&mut fields.month),
        TimeUnit::Day => Some(&mut fields.day),
        TimeUnit::Hour => Some(&mut fields.hour),
        TimeUnit::Minute => Some(&mut fields.minute),
        TimeUnit::Second => Some(&mut fields.second),
        TimeUnit::Millisecond => Some(&mut fields.millisecond),
        TimeUnit::Week => None,
    }
}

/// Move `date` by `amount` units on the local calendar
///
/// Overflow rolls into the neighbouring fields: one month after January 31
/// is March 2 or 3. A week is seven days.
pub fn offset(date: impl Into<Time>, amount: i64, unit: TimeUnit) -> Result<Moment> {
    let mut fields = resolve("offset", date)?.fields(Zone::Local);

    let (unit, amount) = match unit {
        TimeUnit::Week => (TimeUnit::Day, amount.checked_mul(7)),
        unit => (unit, Some(amount)),
    };
    if let Some(field) = field_mut(&mut fields, unit) {
        *field = amount
            .and_then(|a| field.checked_add(a))
            .ok_or_else(|| DateError::date_overflow(i64::MAX).in_function("offset"))?;
    }

    Moment::from_fields(&fields, Zone::Local).map_err(|e| DateError::from(e).in_function("offset"))
}

fn extreme<I>(func: &str, dates: I, pick: fn(Moment, Moment) -> Moment) -> Result<Moment>
where
    I: IntoIterator,
    I::Item: Into<Time>,
{
    let mut best: Option<Moment> = None;
    for date in dates {
        let m = resolve(func, date)?;
        best = Some(best.map_or(m, |b| pick(b, m)));
    }
    best.ok_or_else(|| DateError::arg_type(func, "dates", "a non-empty list", "an empty list"))
}

/// Earliest of `dates`; fails on an empty list or any invalid element
pub fn min<I>(dates: I) -> Result<Moment>
where
    I: IntoIterator,
    I::Item: Into<Time>,
{
    extreme("min", dates, std::cmp::min)
}

/// Latest of `dates`; fails on an empty list or any invalid element
pub fn max<I>(dates: I) -> Result<Moment>
where
    I: IntoIterator,
    I::Item: Into<Time>,
{
    extreme("max", dates, std::cmp::max)
}

/// `(a - b)` expressed in `unit`
///
/// A plain division by the unit's fixed length, so months count as 30 days
/// and years as 365.
pub fn diff(a: impl Into<Time>, b: impl Into<Time>, unit: TimeUnit) -> Result<f64> {
    let a = resolve("diff", a)?.as_millis();
    let b = resolve("diff", b)?.as_millis();
    Ok((a - b) as f64 / unit.millis() as f64)
}

/// Copy of a date that is already a `Moment`
pub fn clone(date: &Time) -> Result<Moment> {
    match date {
        Time::Moment(m) => Ok(*m),
        other => Err(DateError::arg_type("clone", "date", "Moment", other.type_name())),
    }
}

/// Replace one field of `date`; `utc` picks UTC fields over local ones
///
/// The value may be out of range and rolls over like `offset`. Weeks have no
/// field and are rejected.
pub fn set(date: impl Into<Time>, option: SetOption) -> Result<Moment> {
    let zone = if option.utc { Zone::Utc } else { Zone::Local };
    let mut fields = resolve("set", date)?.fields(zone);

    let field = field_mut(&mut fields, option.unit)
        .ok_or_else(|| DateError::invalid_unit("set", option.unit.name()))?;
    *field = option.value;

    Moment::from_fields(&fields, zone).map_err(|e| DateError::from(e).in_function("set"))
}

// ============================================================================
// Counting
// ============================================================================

/// Ceiling of `a / b` for positive `b`
fn ceil_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b) + i64::from(a.rem_euclid(b) != 0)
}

/// Local midnight of the given day
fn midnight(func: &str, year: i64, month: i64, day: i64) -> Result<Moment> {
    Moment::from_ymd(year, month, day).map_err(|e| DateError::from(e).in_function(func))
}

/// Length of the date's month in days
pub fn days_in_month(date: impl Into<Time>) -> Result<i64> {
    let f = resolve("daysInMonth", date)?.fields(Zone::Local);
    Ok(month_length(f.year, f.month as u32 + 1) as i64)
}

/// Week of the month, counted as whole-or-partial weeks since the 1st
///
/// Midnight on the 1st is week 0.
pub fn week_of_month(date: impl Into<Time>) -> Result<i64> {
    let m = resolve("weekOfMonth", date)?;
    let f = m.fields(Zone::Local);
    let first = midnight("weekOfMonth", f.year, f.month, 1)?;
    Ok(ceil_div(m.as_millis() - first.as_millis(), 7 * MILLIS_PER_DAY))
}

/// Whole-or-partial days elapsed since local midnight on January 1
pub fn days_of_year(date: impl Into<Time>) -> Result<i64> {
    let m = resolve("daysOfYear", date)?;
    let first = midnight("daysOfYear", m.year(), 0, 1)?;
    Ok(ceil_div(m.as_millis() - first.as_millis(), MILLIS_PER_DAY))
}

/// `ceil(days_of_year / 7)`; not an ISO week number
pub fn week_of_year(date: impl Into<Time>) -> Result<i64> {
    let m = resolve("weekOfYear", date)?;
    let days = days_of_year(m).map_err(|e| e.in_function("weekOfYear"))?;
    Ok(ceil_div(days, 7))
}

/// Milliseconds since the Unix epoch
pub fn get_time(date: impl Into<Time>) -> Result<i64> {
    Ok(resolve("getTime", date)?.as_millis())
}

/// Seconds since the Unix epoch, truncated toward zero
pub fn get_unix_time(date: impl Into<Time>) -> Result<i64> {
    Ok(resolve("getUnixTime", date)?.as_unix_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{to_array, to_date};
    use datewise_core::{codes, MILLIS_PER_HOUR};

    fn local(s: &str) -> Moment {
        to_date(s).unwrap()
    }

    mod offset_tests {
        use super::*;

        #[test]
        fn test_fixed_units_are_exact() {
            let d = local("2022-1-18 12:12:12");
            for (unit, n) in [
                (TimeUnit::Millisecond, 250),
                (TimeUnit::Second, 30),
                (TimeUnit::Minute, 45),
                (TimeUnit::Hour, 5),
                (TimeUnit::Day, 3),
                (TimeUnit::Week, 1),
            ] {
                let ahead = offset(d, n, unit).unwrap().as_millis();
                let behind = offset(d, -n, unit).unwrap().as_millis();
                assert_eq!(ahead - behind, 2 * n * unit.millis(), "{}", unit);
            }
        }

        #[test]
        fn test_calendar_units() {
            assert_eq!(to_array(offset("2022-1-18 12:12:12", 1, TimeUnit::Month).unwrap()).unwrap(), [2022, 1, 18, 12, 12, 12, 0]);
            assert_eq!(to_array(offset("2022-1-18 12:12:12", -2, TimeUnit::Year).unwrap()).unwrap(), [2020, 0, 18, 12, 12, 12, 0]);
            assert_eq!(to_array(offset("2022-12-18", 0, TimeUnit::Day).unwrap()).unwrap()[0], 2022);
        }

        #[test]
        fn test_month_overflow_rolls_over() {
            let d = offset("2023-1-31 10:00:00", 1, TimeUnit::Month).unwrap();
            assert_eq!(to_array(d).unwrap(), [2023, 2, 3, 10, 0, 0, 0]);

            let d = offset("2024-2-29 10:00:00", 1, TimeUnit::Year).unwrap();
            assert_eq!(to_array(d).unwrap(), [2025, 2, 1, 10, 0, 0, 0]);
        }

        #[test]
        fn test_input_untouched() {
            let d = local("2022-1-18 12:12:12");
            let moved = offset(d, 1, TimeUnit::Day).unwrap();
            assert_ne!(moved, d);
            assert_eq!(d, local("2022-1-18 12:12:12"));
        }

        #[test]
        fn test_errors() {
            assert_eq!(offset("bad", 1, TimeUnit::Day).unwrap_err().code, codes::INVALID_DATE);
            assert_eq!(offset("2022-1-18", i64::MAX, TimeUnit::Week).unwrap_err().code, codes::DATE_OVERFLOW);
            assert_eq!(offset("2022-1-18", 400_000, TimeUnit::Year).unwrap_err().code, codes::DATE_OVERFLOW);
        }
    }

    mod extreme_tests {
        use super::*;

        #[test]
        fn test_min_max_mixed_inputs() {
            let dates = vec![
                Time::from("2022-1-1"),
                Time::from("2022-12-1"),
                Time::from(local("2023-1-1")),
            ];
            assert_eq!(min(&dates).unwrap(), local("2022-1-1"));
            assert_eq!(max(dates).unwrap(), local("2023-1-1"));
        }

        #[test]
        fn test_single_element() {
            assert_eq!(min(["2022-1-1"]).unwrap(), local("2022-1-1"));
        }

        #[test]
        fn test_invalid_element_raises() {
            let err = max(["2022-1-1", "not a date"]).unwrap_err();
            assert_eq!(err.code, codes::INVALID_DATE);
            assert!(err.message.starts_with("max:"));
        }

        #[test]
        fn test_empty_list_raises() {
            let err = min(Vec::<Time>::new()).unwrap_err();
            assert_eq!(err.code, codes::INVALID_ARG);
        }
    }

    mod diff_tests {
        use super::*;

        #[test]
        fn test_diff() {
            assert_eq!(diff("2022-1-18 12:00:00", "2022-1-18 10:30:00", TimeUnit::Hour).unwrap(), 1.5);
            assert_eq!(diff("2022-1-18", "2022-1-25", TimeUnit::Week).unwrap(), -1.0);
            assert_eq!(diff(2 * MILLIS_PER_HOUR, 0i64, TimeUnit::Minute).unwrap(), 120.0);
        }

        #[test]
        fn test_month_and_year_are_approximate() {
            assert_eq!(diff("2022-03-02", "2022-01-31", TimeUnit::Month).unwrap(), 1.0);
            assert_eq!(diff("2021-01-01", "2020-01-01", TimeUnit::Year).unwrap(), 366.0 / 365.0);
        }

        #[test]
        fn test_invalid() {
            assert!(diff("2022-1-18", "later", TimeUnit::Day).is_err());
        }
    }

    mod clone_tests {
        use super::*;

        #[test]
        fn test_clone_moment() {
            let d = local("2022-1-18 12:12:12");
            let c = clone(&Time::Moment(d)).unwrap();
            assert_eq!(get_time(c).unwrap(), get_time(d).unwrap());
        }

        #[test]
        fn test_clone_rejects_other_shapes() {
            let err = clone(&Time::from("2022-1-18")).unwrap_err();
            assert_eq!(err.code, codes::INVALID_ARG);
            assert!(err.message.contains("Text"));
            assert!(clone(&Time::Millis(0)).is_err());
        }
    }

    mod set_tests {
        use super::*;

        #[test]
        fn test_set_local_fields() {
            let d = set("2022-1-18 12:12:12", SetOption::new(TimeUnit::Hour, 3)).unwrap();
            assert_eq!(to_array(d).unwrap(), [2022, 0, 18, 3, 12, 12, 0]);

            let d = set("2022-1-18 12:12:12", SetOption::new(TimeUnit::Month, 5)).unwrap();
            assert_eq!(to_array(d).unwrap(), [2022, 5, 18, 12, 12, 12, 0]);
        }

        #[test]
        fn test_set_rolls_over() {
            let d = set("2022-1-18 12:12:12", SetOption::new(TimeUnit::Day, 32)).unwrap();
            assert_eq!(to_array(d).unwrap(), [2022, 1, 1, 12, 12, 12, 0]);
        }

        #[test]
        fn test_set_utc_fields() {
            let d = set("2022-01-18", SetOption::new(TimeUnit::Hour, 6).utc(true)).unwrap();
            assert_eq!(d.to_iso_string(), "2022-01-18T06:00:00.000Z");
        }

        #[test]
        fn test_set_week_rejected() {
            let err = set("2022-1-18", SetOption::new(TimeUnit::Week, 1)).unwrap_err();
            assert_eq!(err.code, codes::INVALID_UNIT);
            assert!(err.message.starts_with("set:"));
        }

        #[test]
        fn test_set_extreme_year_raises() {
            for value in [i64::MIN, i64::MAX] {
                let err = set("2022-1-18", SetOption::new(TimeUnit::Year, value)).unwrap_err();
                assert_eq!(err.code, codes::DATE_OVERFLOW);
                let err = set("2022-1-18", SetOption::new(TimeUnit::Year, value).utc(true)).unwrap_err();
                assert_eq!(err.code, codes::DATE_OVERFLOW);
            }
        }

        #[test]
        fn test_set_invalid_date() {
            assert_eq!(set("x", SetOption::new(TimeUnit::Day, 1)).unwrap_err().code, codes::INVALID_DATE);
        }
    }

    mod counting_tests {
        use super::*;

        #[test]
        fn test_days_in_month() {
            assert_eq!(days_in_month("2024-1-15").unwrap(), 31);
            assert_eq!(days_in_month("2024-2-15").unwrap(), 29);
            assert_eq!(days_in_month("2023-2-15").unwrap(), 28);
            assert_eq!(days_in_month("2023-4-30").unwrap(), 30);
        }

        #[test]
        fn test_week_of_month() {
            assert_eq!(week_of_month("2022-1-1 00:00:00").unwrap(), 0);
            assert_eq!(week_of_month("2022-1-1 08:00:00").unwrap(), 1);
            assert_eq!(week_of_month("2022-1-8 00:00:00").unwrap(), 1);
            assert_eq!(week_of_month("2022-1-18 12:12:12").unwrap(), 3);
        }

        #[test]
        fn test_days_and_weeks_of_year() {
            assert_eq!(days_of_year("2022-1-18 12:12:12").unwrap(), 18);
            assert_eq!(week_of_year("2022-1-18 12:12:12").unwrap(), 3);
            assert_eq!(days_of_year("2022-1-1 00:00:00").unwrap(), 0);
            assert_eq!(week_of_year("2022-1-1 00:00:00").unwrap(), 0);
            assert_eq!(days_of_year("2022-1-1 00:00:01").unwrap(), 1);
        }

        #[test]
        fn test_get_time() {
            assert_eq!(get_time(1_642_479_132_123i64).unwrap(), 1_642_479_132_123);
            assert_eq!(get_unix_time(1_642_479_132_999i64).unwrap(), 1_642_479_132);
            assert_eq!(get_unix_time(-1_500i64).unwrap(), -1);
        }

        #[test]
        fn test_counting_rejects_invalid() {
            assert!(days_in_month("nope").is_err());
            let err = week_of_year("nope").unwrap_err();
            assert!(err.message.starts_with("weekOfYear:"));
        }
    }
}
