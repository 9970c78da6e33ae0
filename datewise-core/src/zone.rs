//! Local/UTC zone bridge
//!
//! Calendar fields are read and written either in UTC or in the host's local
//! time zone. Only the offset lookup touches the host time zone database.

use crate::moment::MILLIS_PER_DAY;
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, Offset, TimeZone};
use serde::{Deserialize, Serialize};

/// Which clock calendar fields are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The host's local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

impl Zone {
    /// Offset (local minus UTC, in ms) in force at the given UTC instant
    pub fn offset_at(self, utc_millis: i64) -> i64 {
        match self {
            Zone::Utc => 0,
            Zone::Local => naive(utc_millis)
                .map(|n| Local.offset_from_utc_datetime(&n).local_minus_utc() as i64 * 1000)
                .unwrap_or(0),
        }
    }

    /// Offset (in ms) that applies to a wall-clock reading in this zone
    ///
    /// Ambiguous readings (clocks turned back) resolve to the earlier instant.
    /// Readings inside a gap (clocks turned forward) use the offset in force
    /// before the transition.
    pub fn offset_for_wall(self, wall_millis: i64) -> i64 {
        match self {
            Zone::Utc => 0,
            Zone::Local => {
                let Some(n) = naive(wall_millis) else {
                    return 0;
                };
                wall_offset(Local.from_local_datetime(&n), || {
                    self.offset_at(wall_millis - MILLIS_PER_DAY)
                })
            }
        }
    }
}

/// Offset (in ms) to use for a resolved wall-clock reading
///
/// Of two candidates the larger offset wins, since it maps the reading to the
/// earlier instant. `gap` supplies the offset when the reading does not exist.
fn wall_offset<Tz: TimeZone>(resolved: LocalResult<DateTime<Tz>>, gap: impl FnOnce() -> i64) -> i64 {
    let millis = |dt: &DateTime<Tz>| dt.offset().fix().local_minus_utc() as i64 * 1000;
    match resolved {
        LocalResult::Single(dt) => millis(&dt),
        LocalResult::Ambiguous(a, b) => millis(&a).max(millis(&b)),
        LocalResult::None => gap(),
    }
}

/// Naive date-time for a millisecond count, if chrono can represent it
fn naive(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}
