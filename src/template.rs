//! Flat Markdown skeletons for a span of days
//!
//! Pure text generation over the date types; no dependency on parsing or the
//! aggregate tree. Hosts insert the result into a note so the planner lists
//! are pre-seeded with classifiable root lines.

use chrono::{Datelike, Weekday};
use std::fmt::Write;

use crate::date::{DateRange, Week, Ymd};
use crate::error::{DateError, DateResult};

/// Generate one `- YYYY/MM/DD` bullet per day of `[from, to]`, inclusive
///
/// Whenever a day is a Monday, a `- <from> ~ <to>` week-range line for its
/// week is inserted before it.
///
/// # Errors
///
/// Returns [`DateError::InvalidRange`] when `from > to`, or
/// [`DateError::InvalidDate`] when a bound is not a real calendar date.
pub fn daily_skeleton(from: Ymd, to: Ymd) -> DateResult<String> {
    let range = DateRange::new(from, to)?;
    let mut day = range.from.to_naive()?;
    let last = range.to.to_naive()?;

    let mut out = String::new();
    while day <= last {
        let ymd = Ymd::from_naive(day);
        if day.weekday() == Weekday::Mon {
            let week = Week::containing(ymd)?;
            let _ = writeln!(out, "- {week}");
        }
        let _ = writeln!(out, "- {ymd}");
        day = day
            .succ_opt()
            .ok_or_else(|| DateError::invalid_date(ymd.to_string()))?;
    }

    Ok(out)
}
