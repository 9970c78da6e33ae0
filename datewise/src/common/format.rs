//! Template formatting
//!
//! Tokens are replaced literally and globally, in the order
//! `yyyy`, `mm`, `dd`, `HH`, `MM`, `SS`.

use crate::transfer::resolve;
use crate::types::{FormatOption, Time};
use crate::utils::zero_fill;
use crate::Result;
use datewise_core::Zone;

/// Render a date with a template (default `yyyy-mm-dd HH:MM:SS`)
///
/// Accepts a template string or a [`FormatOption`]. With padding on, every
/// field but the year is padded to two digits.
pub fn format(date: impl Into<Time>, option: impl Into<FormatOption>) -> Result<String> {
    let f = resolve("format", date)?.fields(Zone::Local);
    let option = option.into();
    let pad = option.resolved_pad_zero();
    let render = |n: i64| if pad { zero_fill(n) } else { n.to_string() };

    Ok(option
        .resolved_format()
        .replace("yyyy", &f.year.to_string())
        .replace("mm", &render(f.month + 1))
        .replace("dd", &render(f.day))
        .replace("HH", &render(f.hour))
        .replace("MM", &render(f.minute))
        .replace("SS", &render(f.second)))
}

/// [`format`] with the default template and padding
pub fn format_default(date: impl Into<Time>) -> Result<String> {
    format(date, FormatOption::default())
}
