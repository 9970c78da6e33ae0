//! Date string parsing
//!
//! Two grammars are accepted, tried in order:
//!
//! - ISO 8601: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, optionally followed by
//!   `THH:mm[:ss[.fff]]` and `Z` or `±HH:mm`. Date-only forms are UTC,
//!   date-time forms without a zone are local time.
//! - Legacy: `Y-M-D`, `Y/M/D` or `Y M D` with 1-2 digit month and day,
//!   optionally followed by whitespace and `H:mm[:ss[.fff]]`, optionally
//!   followed by `Z` or `±HH:mm`. Local time unless a zone is given.
//!
//! Day numbers up to 31 are accepted in every month and roll over into the
//! next one. Anything else is rejected: letters (so no `Tue Jan 18 2022`
//! style strings with month or weekday names), stray separators, and fields
//! outside month 1-12, day 1-31, hour 0-23 (or exactly 24:00), minute and
//! second 0-59.

use crate::moment::{Fields, Moment, MomentError, MILLIS_PER_MINUTE};
use crate::zone::Zone;

/// Where a parsed wall-clock reading lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedZone {
    Local,
    Utc,
    /// Explicit offset in minutes east of UTC
    Offset(i64),
}

#[derive(Debug, Clone, Copy)]
struct Parsed {
    year: i64,
    month: i64, // 1-12
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
    zone: ParsedZone,
}

impl Parsed {
    fn date(year: i64, month: i64, day: i64, zone: ParsedZone) -> Self {
        Self { year, month, day, hour: 0, minute: 0, second: 0, millisecond: 0, zone }
    }
}

/// Parse a date string into a `Moment`
pub fn parse(s: &str) -> Result<Moment, MomentError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MomentError::Parse("empty string".to_string()));
    }

    let parsed = parse_iso(s)
        .or_else(|| parse_legacy(s))
        .ok_or_else(|| MomentError::Parse(format!("unrecognized format: {}", s)))?;

    if !in_range(&parsed) {
        tracing::debug!(input = s, "date string has out-of-range fields");
        return Err(MomentError::Parse(format!("field out of range: {}", s)));
    }

    let fields = Fields {
        year: parsed.year,
        month: parsed.month - 1,
        day: parsed.day,
        hour: parsed.hour,
        minute: parsed.minute,
        second: parsed.second,
        millisecond: parsed.millisecond,
    };

    match parsed.zone {
        ParsedZone::Local => Moment::from_fields(&fields, Zone::Local),
        ParsedZone::Utc => Moment::from_fields(&fields, Zone::Utc),
        ParsedZone::Offset(minutes) => {
            let wall = Moment::from_fields(&fields, Zone::Utc)?;
            Moment::from_millis(wall.as_millis() - minutes * MILLIS_PER_MINUTE)
        }
    }
}

fn in_range(p: &Parsed) -> bool {
    if !(1..=12).contains(&p.month) {
        return false;
    }
    // Days past the end of the month roll over, as on the host: 02-30 is 03-02
    if !(1..=31).contains(&p.day) {
        return false;
    }
    // 24:00 is accepted as the end of the day
    let end_of_day = p.hour == 24 && p.minute == 0 && p.second == 0 && p.millisecond == 0;
    (p.hour <= 23 || end_of_day) && p.minute <= 59 && p.second <= 59
}

// ============================================================================
// Grammars
// ============================================================================

fn parse_iso(s: &str) -> Option<Parsed> {
    let mut sc = Scanner::new(s);

    let year = sc.digits(4, 4)?;
    let mut month = 1;
    let mut day = 1;
    if sc.eat(b'-') {
        month = sc.digits(2, 2)?;
        if sc.eat(b'-') {
            day = sc.digits(2, 2)?;
        }
    }

    if sc.is_done() {
        return Some(Parsed::date(year, month, day, ParsedZone::Utc));
    }

    if !sc.eat(b'T') {
        return None;
    }
    let mut p = Parsed::date(year, month, day, ParsedZone::Local);
    sc.time(&mut p, 2)?;
    if let Some(zone) = sc.zone(true) {
        p.zone = zone?;
    }

    sc.is_done().then_some(p)
}

fn parse_legacy(s: &str) -> Option<Parsed> {
    let mut sc = Scanner::new(s);

    let year = sc.digits(1, 6)?;
    sc.date_separator()?;
    let month = sc.digits(1, 2)?;
    sc.date_separator()?;
    let day = sc.digits(1, 2)?;

    let mut p = Parsed::date(year, month, day, ParsedZone::Local);
    if sc.whitespace() && sc.peek_digit() {
        sc.time(&mut p, 1)?;
        sc.whitespace();
    }
    if let Some(zone) = sc.zone(false) {
        p.zone = zone?;
    }

    sc.is_done().then_some(p)
}

// ============================================================================
// Scanner
// ============================================================================

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Self { bytes: s.as_bytes(), pos: 0 }
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_digit(&self) -> bool {
        self.peek().is_some_and(|b| b.is_ascii_digit())
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a run of whitespace, reporting whether there was any
    fn whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Read between `min` and `max` ASCII digits as a number
    fn digits(&mut self, min: usize, max: usize) -> Option<i64> {
        let start = self.pos;
        while self.pos - start < max && self.peek_digit() {
            self.pos += 1;
        }
        if self.pos - start < min {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos]).ok()?.parse().ok()
    }

    /// Fractional seconds, truncated to milliseconds
    fn fraction(&mut self) -> Option<i64> {
        let start = self.pos;
        while self.peek_digit() {
            self.pos += 1;
        }
        let frac = &self.bytes[start..self.pos];
        if frac.is_empty() {
            return None;
        }
        Some(
            frac.iter()
                .chain(std::iter::repeat(&b'0'))
                .take(3)
                .fold(0, |acc, b| acc * 10 + (b - b'0') as i64),
        )
    }

    fn date_separator(&mut self) -> Option<()> {
        if self.eat(b'-') || self.eat(b'/') || self.whitespace() {
            Some(())
        } else {
            None
        }
    }

    /// `H:mm[:ss[.fff]]`, hour digits at least `hour_min` wide
    fn time(&mut self, p: &mut Parsed, hour_min: usize) -> Option<()> {
        p.hour = self.digits(hour_min, 2)?;
        if !self.eat(b':') {
            return None;
        }
        p.minute = self.digits(2, 2)?;
        if self.eat(b':') {
            p.second = self.digits(2, 2)?;
            if self.eat(b'.') {
                p.millisecond = self.fraction()?;
            }
        }
        Some(())
    }

    /// Optional zone designator. `None` if absent, `Some(None)` if malformed.
    fn zone(&mut self, colon_required: bool) -> Option<Option<ParsedZone>> {
        if self.eat(b'Z') {
            return Some(Some(ParsedZone::Utc));
        }
        let sign = match self.peek() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return None,
        };
        self.pos += 1;
        Some(self.offset(colon_required).map(|minutes| ParsedZone::Offset(sign * minutes)))
    }

    fn offset(&mut self, colon_required: bool) -> Option<i64> {
        let hours = self.digits(2, 2)?;
        let has_colon = self.eat(b':');
        if colon_required && !has_colon {
            return None;
        }
        let minutes = self.digits(2, 2)?;
        (hours <= 23 && minutes <= 59).then_some(hours * 60 + minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::MILLIS_PER_HOUR;

    fn local(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Moment {
        let f = Fields { year, month, day, hour, minute, second, millisecond: 0 };
        Moment::from_fields(&f, Zone::Local).unwrap()
    }

    #[test]
    fn test_iso_date_only_is_utc() {
        let m = parse("2022-01-18").unwrap();
        assert_eq!(m.as_millis(), 1_642_464_000_000);
        assert_eq!(parse("2022").unwrap().to_iso_string(), "2022-01-01T00:00:00.000Z");
        assert_eq!(parse("2022-03").unwrap().to_iso_string(), "2022-03-01T00:00:00.000Z");
    }

    #[test]
    fn test_iso_with_zone() {
        let m = parse("2023-05-01T00:00:00.000Z").unwrap();
        assert_eq!(m.to_iso_string(), "2023-05-01T00:00:00.000Z");

        let m = parse("2022-01-18T12:12:12+08:00").unwrap();
        assert_eq!(m.as_millis(), 1_642_479_132_000);

        let m = parse("2022-01-18T00:00:00-01:30").unwrap();
        assert_eq!(m.to_iso_string(), "2022-01-18T01:30:00.000Z");
    }

    #[test]
    fn test_iso_without_zone_is_local() {
        assert_eq!(parse("2022-12-12T12:12:00").unwrap(), local(2022, 11, 12, 12, 12, 0));
        assert_eq!(parse("2022-12-12T12:12").unwrap(), local(2022, 11, 12, 12, 12, 0));
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(parse("2023-05-01T00:00:00.5Z").unwrap().as_millis() % 1000, 500);
        assert_eq!(parse("2023-05-01T00:00:00.123456Z").unwrap().as_millis() % 1000, 123);
    }

    #[test]
    fn test_legacy_formats_are_local() {
        let expected = local(2022, 0, 18, 12, 12, 12);
        assert_eq!(parse("2022-1-18 12:12:12").unwrap(), expected);
        assert_eq!(parse("2022/1/18 12:12:12").unwrap(), expected);
        assert_eq!(parse("2022-01-18 12:12:12").unwrap(), expected);
        assert_eq!(parse("  2022-1-18   12:12:12 ").unwrap(), expected);
        assert_eq!(parse("2022 12 12").unwrap(), local(2022, 11, 12, 0, 0, 0));
        assert_eq!(parse("2022-1-1").unwrap(), local(2022, 0, 1, 0, 0, 0));
    }

    #[test]
    fn test_legacy_with_zone() {
        let m = parse("2022-1-18 12:12:12 +0800").unwrap();
        assert_eq!(m.as_millis(), 1_642_479_132_000);
        let m = parse("2022-1-18 4:12:12Z").unwrap();
        assert_eq!(m.as_millis(), 1_642_479_132_000);
    }

    #[test]
    fn test_end_of_day() {
        let m = parse("2022-01-18T24:00:00Z").unwrap();
        assert_eq!(m.to_iso_string(), "2022-01-19T00:00:00.000Z");
        assert_eq!(parse("2022-01-18T24:00:00Z").unwrap().as_millis()
            - parse("2022-01-18T00:00:00Z").unwrap().as_millis(), 24 * MILLIS_PER_HOUR);
        assert!(parse("2022-01-18T24:01:00Z").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        for s in [
            "",
            "   ",
            "xx",
            "xxx",
            "2022年12月12日",
            "2022-12-12 T12:12:00",
            "2022-12-12T",
            "2022-13-01",
            "2022-1-32",
            "2022-1-18 25:00",
            "2022-1-18 12:60",
            "2022-01-18T12:12:12+8",
            "2022-1-18 12",
            "Tue Jan 18 2022",
        ] {
            assert!(parse(s).is_err(), "expected {:?} to be rejected", s);
        }
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(parse("2024-02-29").unwrap().to_iso_string(), "2024-02-29T00:00:00.000Z");
        assert_eq!(parse("2000-2-29").unwrap(), local(2000, 1, 29, 0, 0, 0));
        assert_eq!(parse("1900-2-29").unwrap(), local(1900, 2, 1, 0, 0, 0));
    }

    #[test]
    fn test_day_past_month_end_rolls_over() {
        assert_eq!(parse("2022-02-30").unwrap(), parse("2022-03-02").unwrap());
        assert_eq!(parse("2022-02-31").unwrap().to_iso_string(), "2022-03-03T00:00:00.000Z");
        assert_eq!(parse("2022-4-31 10:00:00").unwrap(), local(2022, 4, 1, 10, 0, 0));
        assert!(parse("2022-02-32").is_err());
        assert!(parse("2022-02-00").is_err());
    }
}
