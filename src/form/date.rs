//! Registration date parsing
//!
//! Dates are written day first, dot separated, with unpadded day and month
//! allowed: "29.3.2018" and "01.04.2018" are both accepted.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// chrono format for `D.M.YYYY`; numeric fields accept one or two digits
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Earliest year a registration date may name
const MIN_YEAR: i32 = 1;

/// Why a date string is not a usable calendar day
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("{0}")]
    Format(#[from] chrono::ParseError),

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

/// Calendar date taken from the `date` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl ParsedDate {
    /// Parses `D.M.YYYY`, rejecting impossible days such as 31.4. and
    /// years before 1.
    pub fn parse(value: &str) -> Result<Self, DateError> {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT)?;
        if date.year() < MIN_YEAR {
            return Err(DateError::YearOutOfRange(date.year()));
        }
        Ok(Self::from(date))
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for ParsedDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day, self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpadded_date() {
        let date = ParsedDate::parse("29.3.2018").unwrap();
        assert_eq!(date, ParsedDate { day: 29, month: 3, year: 2018 });
    }

    #[test]
    fn test_padded_date() {
        let date = ParsedDate::parse("01.04.2018").unwrap();
        assert_eq!((date.day, date.month, date.year), (1, 4, 2018));
    }

    #[test]
    fn test_impossible_day_rejected() {
        assert!(ParsedDate::parse("31.4.2018").is_err());
        assert!(ParsedDate::parse("29.2.2018").is_err());
        assert!(ParsedDate::parse("0.1.2018").is_err());
        assert!(ParsedDate::parse("1.13.2018").is_err());
    }

    #[test]
    fn test_year_zero_rejected() {
        assert_eq!(ParsedDate::parse("1.1.0000"), Err(DateError::YearOutOfRange(0)));
        assert_eq!(
            ParsedDate::parse("1.1.0001").unwrap(),
            ParsedDate { day: 1, month: 1, year: 1 }
        );
    }

    #[test]
    fn test_leap_day_accepted() {
        assert!(ParsedDate::parse("29.2.2020").is_ok());
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(ParsedDate::parse("aa.bb.cccc").is_err());
        assert!(ParsedDate::parse("").is_err());
    }

    #[test]
    fn test_display_and_naive_date() {
        let date = ParsedDate::parse("29.3.2018").unwrap();
        assert_eq!(date.to_string(), "29.3.2018");
        assert_eq!(date.to_naive_date(), NaiveDate::from_ymd_opt(2018, 3, 29));
    }
}
