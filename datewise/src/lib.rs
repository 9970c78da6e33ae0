//! Datewise - date validation, conversion, formatting and calendar arithmetic
//!
//! Every function is a free function over [`Time`] inputs (a [`Moment`], a
//! date string or a millisecond timestamp):
//! - `validator`: `is_date` and the comparisons
//! - `transfer`: `to_date`, field decomposition, traditional hours
//! - `common`: `format`, `offset`, `min`/`max`, `diff`, `set` and the counters
//! - `common::week`: weekday names and classification
//!
//! Date strings follow the host date parser's numeric forms: ISO 8601
//! (date-only is UTC, date-time is local) and `Y-M-D H:MM:SS` style local
//! times. Days past a month's end roll over (`2022-02-30` is March 2).
//! Unlike the host, strings that spell out month or weekday names, such as
//! `Tue Jan 18 2022`, are not dates.

pub mod common;
pub mod constants;
pub mod transfer;
pub mod types;
pub mod utils;
pub mod validator;

pub use common::{
    clone, days_in_month, days_of_year, diff, format, format_default, get_time, get_unix_time, max,
    min, offset, set, week, week_of_month, week_of_year,
};
pub use datewise_core::{codes, DateError, Moment, Zone};
pub use transfer::{from_array, to_array, to_date, to_object, to_traditional_hour};
pub use types::{DateObject, FormatOption, SetOption, Time, TimeUnit, WeekName};
pub use validator::{
    is_after, is_before, is_between, is_date, is_date_value, is_future, is_leap, is_past, is_same,
    is_today,
};

/// Result alias used by every fallible operation
pub type Result<T> = std::result::Result<T, DateError>;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DateError, FormatOption, Moment, SetOption, Time, TimeUnit, WeekName};
    pub use crate::common::week;
}
