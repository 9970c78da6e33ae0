//! Lookup tables and defaults

/// Template used by `format` when none is given
pub const DEFAULT_FORMAT: &str = "yyyy-mm-dd HH:MM:SS";

/// Whether `format` zero-pads fields by default
pub const DEFAULT_PAD_ZERO: bool = true;

/// Chinese weekday characters, Sunday first
pub const WEEK_NAMES_ZH: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// English weekday names, Sunday first
pub const WEEK_NAMES_EN: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// English weekday abbreviations, Sunday first
pub const WEEK_ABBRS_EN: [&str; 7] = ["Sun.", "Mon.", "Tue.", "Wed.", "Thu.", "Fri.", "Sat."];

/// The twelve traditional two-hour periods, starting with the one
/// that straddles midnight (23:00-01:00)
pub const TRADITIONAL_HOURS: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
