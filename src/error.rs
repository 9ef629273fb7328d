//! Error types for the weeknote library
//!
//! This module provides centralized error handling using `thiserror` across all components

use thiserror::Error;

/// Date and range construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum DateError {
    /// Range constructed with `from` after `to`
    #[error("Invalid range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    /// Range is not a Monday-to-Sunday week
    #[error("Invalid week range: {0}")]
    InvalidWeekRange(String),

    /// Value does not name a real calendar date
    #[error("Not a calendar date: {0}")]
    InvalidDate(String),
}

impl DateError {
    /// Create an invalid range error from the offending bounds
    pub fn invalid_range(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidRange {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an invalid week range error
    pub fn invalid_week_range(range: impl Into<String>) -> Self {
        Self::InvalidWeekRange(range.into())
    }

    /// Create an invalid date error
    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::InvalidDate(date.into())
    }
}

/// Result type for date operations
pub type DateResult<T> = Result<T, DateError>;

/// List parsing errors
///
/// Both variants are fatal for the hunk being parsed; the caller decides
/// whether to skip the hunk or abort the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum ParseError {
    /// A line's raw indent is not a multiple of the hunk's indent step
    #[error("Malformed indentation at line {line}: width {width} is not a multiple of {step}")]
    MalformedIndentation { line: u64, width: u64, step: u64 },

    /// Indentation deepened by more than one level on a single line
    #[error("Indent jump at line {line}: level {from_level} to {to_level}")]
    IndentJump {
        line: u64,
        from_level: i64,
        to_level: i64,
    },
}

impl ParseError {
    /// Create a malformed indentation error
    #[must_use]
    pub const fn malformed_indentation(line: u64, width: u64, step: u64) -> Self {
        Self::MalformedIndentation { line, width, step }
    }

    /// Create an indent jump error
    #[must_use]
    pub const fn indent_jump(line: u64, from_level: i64, to_level: i64) -> Self {
        Self::IndentJump {
            line,
            from_level,
            to_level,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Reasons a root-level subtree fails temporal classification
///
/// These are soft errors: the classifier records them as malformed entries
/// and keeps going, they never propagate further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Text is neither a date nor a date range
    #[error("not a date or date range")]
    NotTemporal,

    /// Range delimiter present but the sides are not two dates
    #[error("not two dates")]
    NotTwoDates,

    /// Date-shaped text that does not name a real calendar date
    #[error("bad date syntax: {0}")]
    BadDateSyntax(String),

    /// Two valid dates in the wrong order
    #[error("range start after end")]
    StartAfterEnd,

    /// Two valid dates that do not span Monday to Sunday
    #[error("invalid week range")]
    InvalidWeekRange,
}

/// Main unified error type that can represent any weeknote error
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum WeeknoteError {
    /// Date or range error
    #[error(transparent)]
    Date(#[from] DateError),

    /// Parsing error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

impl WeeknoteError {
    /// Create a generic error
    pub fn other(reason: impl Into<String>) -> Self {
        Self::Other(reason.into())
    }
}

/// Result type for weeknote operations
pub type WeeknoteResult<T> = Result<T, WeeknoteError>;
