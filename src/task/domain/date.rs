//! Due-date parsing and canonical formatting.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar due date stored in canonical sortable `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses user-supplied text in strict `YYYY-MM-DD` form.
    ///
    /// Only zero-padded four-digit-year dates that exist on the proleptic
    /// Gregorian calendar are accepted; locale variants and partial dates
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateFormat`] for any other input.
    pub fn parse(text: &str) -> Result<Self, TaskDomainError> {
        let invalid = || TaskDomainError::InvalidDateFormat(text.to_owned());

        let mut segments = text.split('-');
        let year_segment = segments.next().filter(|s| is_padded_number(s, 4));
        let month_segment = segments.next().filter(|s| is_padded_number(s, 2));
        let day_segment = segments.next().filter(|s| is_padded_number(s, 2));
        if segments.next().is_some() {
            return Err(invalid());
        }
        let (Some(year_text), Some(month_text), Some(day_text)) =
            (year_segment, month_segment, day_segment)
        else {
            return Err(invalid());
        };

        let year: i32 = year_text.parse().map_err(|_| invalid())?;
        let month: u32 = month_text.parse().map_err(|_| invalid())?;
        let day: u32 = day_text.parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Formats the date back to its canonical `YYYY-MM-DD` form.
    ///
    /// Exact inverse of [`DueDate::parse`]: `parse(format(d)) == d` for
    /// every valid date.
    #[must_use]
    pub fn format(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn into_inner(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Checks that a segment is exactly `width` ASCII digits.
fn is_padded_number(segment: &str, width: usize) -> bool {
    segment.len() == width && segment.chars().all(|ch| ch.is_ascii_digit())
}
