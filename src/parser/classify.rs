//! Temporal classification of root-level subtree text

use regex::Regex;

use crate::date::{DateRange, Week, Ymd};
use crate::error::ClassifyError;
use crate::models::Temporal;

/// Literal delimiter between the two dates of a week range line
pub const RANGE_DELIMITER: &str = " ~ ";

/// Decides whether a root bullet's text names a day or a week
///
/// Date format is `YYYY/MM/DD`; ranges are `"<date> ~ <date>"` with the
/// delimiter taken literally. Anything else is malformed, with format errors
/// (wrong shape) distinguished from semantic ones (backwards range, not
/// Monday-to-Sunday). Date construction errors never escape this boundary.
#[derive(Debug)]
pub struct TemporalClassifier {
    date: Regex,
}

impl TemporalClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            date: Regex::new(r"^(\d{4})/(\d{2})/(\d{2})$").unwrap(),
        }
    }

    /// Classify `text` as a [`Temporal`]
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError`] naming the malformed-entry reason.
    pub fn classify(&self, text: &str) -> Result<Temporal, ClassifyError> {
        let trimmed = text.trim();

        if let Some((lhs, rhs)) = trimmed.split_once(RANGE_DELIMITER) {
            let (Some(from), Some(to)) = (self.date_shape(lhs), self.date_shape(rhs)) else {
                return Err(ClassifyError::NotTwoDates);
            };
            let from = calendar_checked(from)?;
            let to = calendar_checked(to)?;
            let range =
                DateRange::new(from, to).map_err(|_| ClassifyError::StartAfterEnd)?;
            let week = Week::new(range).map_err(|_| ClassifyError::InvalidWeekRange)?;
            return Ok(Temporal::Range { week });
        }

        let Some(date) = self.date_shape(trimmed) else {
            return Err(ClassifyError::NotTemporal);
        };
        Ok(Temporal::Day {
            date: calendar_checked(date)?,
        })
    }

    /// Match the `YYYY/MM/DD` shape without calendar validation
    fn date_shape(&self, text: &str) -> Option<Ymd> {
        let caps = self.date.captures(text)?;
        let year = caps.get(1)?.as_str().parse().ok()?;
        let month = caps.get(2)?.as_str().parse().ok()?;
        let day = caps.get(3)?.as_str().parse().ok()?;
        Some(Ymd::new(year, month, day))
    }
}

impl Default for TemporalClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject date-shaped text that is not a real calendar date
fn calendar_checked(date: Ymd) -> Result<Ymd, ClassifyError> {
    if date.to_naive().is_err() {
        return Err(ClassifyError::BadDateSyntax(date.to_string()));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_single_day() {
        let classifier = TemporalClassifier::new();
        let temporal = classifier.classify("2025/03/03").unwrap();
        assert_eq!(
            temporal,
            Temporal::Day {
                date: Ymd::new(2025, 3, 3)
            }
        );
    }

    #[test]
    fn classify_monday_to_sunday_week() {
        let classifier = TemporalClassifier::new();
        let temporal = classifier.classify("2025/03/03 ~ 2025/03/09").unwrap();
        let week = temporal.as_range().expect("week expected");
        assert_eq!(week.start(), Ymd::new(2025, 3, 3));
        assert_eq!(week.end(), Ymd::new(2025, 3, 9));
    }

    #[test]
    fn tuesday_start_is_invalid_week_range() {
        let classifier = TemporalClassifier::new();
        let err = classifier.classify("2025/03/04 ~ 2025/03/09").unwrap_err();
        assert_eq!(err, ClassifyError::InvalidWeekRange);
        assert_eq!(err.to_string(), "invalid week range");
    }

    #[test]
    fn backwards_range_is_start_after_end() {
        let classifier = TemporalClassifier::new();
        let err = classifier.classify("2025/03/10 ~ 2025/03/03").unwrap_err();
        assert_eq!(err, ClassifyError::StartAfterEnd);
    }

    #[test]
    fn prose_is_not_temporal() {
        let classifier = TemporalClassifier::new();
        assert_eq!(
            classifier.classify("groceries").unwrap_err(),
            ClassifyError::NotTemporal
        );
    }

    #[test]
    fn half_formed_range_is_not_two_dates() {
        let classifier = TemporalClassifier::new();
        assert_eq!(
            classifier.classify("2025/03/03 ~ eventually").unwrap_err(),
            ClassifyError::NotTwoDates
        );
        assert_eq!(
            classifier.classify("soon ~ 2025/03/09").unwrap_err(),
            ClassifyError::NotTwoDates
        );
    }

    #[test]
    fn impossible_calendar_date_is_bad_syntax() {
        let classifier = TemporalClassifier::new();
        assert!(matches!(
            classifier.classify("2025/13/40").unwrap_err(),
            ClassifyError::BadDateSyntax(_)
        ));
        assert!(matches!(
            classifier.classify("2025/02/30 ~ 2025/03/09").unwrap_err(),
            ClassifyError::BadDateSyntax(_)
        ));
    }

    #[test]
    fn delimiter_must_match_exactly() {
        let classifier = TemporalClassifier::new();
        // "~" without surrounding spaces is not the range delimiter
        assert_eq!(
            classifier.classify("2025/03/03~2025/03/09").unwrap_err(),
            ClassifyError::NotTemporal
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let classifier = TemporalClassifier::new();
        assert!(classifier.classify("  2025/03/03  ").is_ok());
    }
}
