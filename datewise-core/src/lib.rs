//! Datewise Core - Fundamental types
//!
//! This crate provides the core types used throughout Datewise:
//! - `Moment`: Millisecond-precision instant with calendar field access
//! - `Zone`: Local time or UTC, the two clocks fields can be read in
//! - `parse`: Date string parsing (ISO 8601 and the common legacy forms)
//! - `DateError`: Structured errors naming the function and argument at fault

mod error;
mod moment;
mod parse;
mod zone;

pub use error::{codes, DateError};
pub use moment::{
    civil_from_days, days_from_civil, days_in_month, is_leap_year, Fields, Moment, MomentError,
    MAX_MILLIS, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};
pub use parse::parse;
pub use zone::Zone;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DateError, Fields, Moment, Zone};
    pub use crate::error::codes;
}
