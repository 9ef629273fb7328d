//! Calendar value types: single days, inclusive date ranges, Monday-to-Sunday weeks

use core::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{DateError, DateResult};

/// A plain calendar date with structural ordering by (year, month, day).
///
/// Construction never fails: out-of-range month/day values are representable
/// and only rejected when calendar arithmetic is actually requested. All date
/// arithmetic in this crate goes through [`Ymd::plus_days`] and
/// [`Ymd::weekday`], which validate against the real calendar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    uniffi::Record,
)]
pub struct Ymd {
    pub year: i32,
    /// 1-12 for real calendar dates
    pub month: u32,
    pub day: u32,
}

impl Ymd {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Convert to a validated calendar date
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if the fields do not name a real
    /// calendar date.
    pub fn to_naive(self) -> DateResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| DateError::invalid_date(self.to_string()))
    }

    /// Build from a validated calendar date
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }

    /// The date `days` calendar days after this one (negative walks backwards)
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if this value is not a real calendar
    /// date or the result overflows the calendar.
    pub fn plus_days(self, days: i64) -> DateResult<Self> {
        let shifted = self
            .to_naive()?
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| DateError::invalid_date(self.to_string()))?;
        Ok(Self::from_naive(shifted))
    }

    /// Day of week for this date
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if this value is not a real calendar
    /// date.
    pub fn weekday(self) -> DateResult<Weekday> {
        Ok(self.to_naive()?.weekday())
    }

    /// Whether this date falls on a Monday; not a real calendar date counts as no
    #[must_use]
    pub fn is_monday(self) -> bool {
        self.weekday() == Ok(Weekday::Mon)
    }
}

impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// An inclusive `[from, to]` pair of dates with `from <= to`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record,
)]
pub struct DateRange {
    pub from: Ymd,
    pub to: Ymd,
}

impl DateRange {
    /// Create a range, enforcing `from <= to`
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidRange`] when `from > to`. `from == to` is a
    /// valid one-day range.
    pub fn new(from: Ymd, to: Ymd) -> DateResult<Self> {
        if from > to {
            return Err(DateError::invalid_range(from.to_string(), to.to_string()));
        }
        Ok(Self { from, to })
    }

    /// Whether `day` falls inside this range (inclusive on both ends)
    #[must_use]
    pub fn includes_day(&self, day: Ymd) -> bool {
        self.from <= day && day <= self.to
    }

    /// Whether `other` is fully nested within this range
    ///
    /// Reflexive, and monotonic over nesting: if `a.includes(b)` and
    /// `b.includes(c)` then `a.includes(c)`.
    #[must_use]
    pub fn includes(&self, other: &Self) -> bool {
        self.from <= other.from && other.to <= self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.from, self.to)
    }
}

/// A [`DateRange`] that starts on a Monday and ends on the following Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    range: DateRange,
}

impl Week {
    /// Validate a range as a Monday-to-Sunday week
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidWeekRange`] when the range is not aligned,
    /// or [`DateError::InvalidDate`] when a bound is not a real calendar date.
    pub fn new(range: DateRange) -> DateResult<Self> {
        if range.from.weekday()? != Weekday::Mon {
            return Err(DateError::invalid_week_range(range.to_string()));
        }
        if range.to != range.from.plus_days(6)? {
            return Err(DateError::invalid_week_range(range.to_string()));
        }
        Ok(Self { range })
    }

    /// Validate a `[from, to]` pair as a week
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidRange`] for a backwards pair, then the same
    /// errors as [`Week::new`].
    pub fn from_bounds(from: Ymd, to: Ymd) -> DateResult<Self> {
        Self::new(DateRange::new(from, to)?)
    }

    /// The week containing `day`
    ///
    /// Yields the identical range for every one of the week's seven days.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] when `day` is not a real calendar
    /// date.
    pub fn containing(day: Ymd) -> DateResult<Self> {
        let offset = i64::from(day.weekday()?.num_days_from_monday());
        let monday = day.plus_days(-offset)?;
        Ok(Self {
            range: DateRange {
                from: monday,
                to: monday.plus_days(6)?,
            },
        })
    }

    /// Whether `range` is Monday-to-Sunday aligned
    #[must_use]
    pub fn is_week_range(range: &DateRange) -> bool {
        Self::new(*range).is_ok()
    }

    /// Monday this week starts on
    #[must_use]
    pub const fn start(&self) -> Ymd {
        self.range.from
    }

    /// Sunday this week ends on
    #[must_use]
    pub const fn end(&self) -> Ymd {
        self.range.to
    }

    /// The underlying date range
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.range.fmt(f)
    }
}
