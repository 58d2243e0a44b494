//! Front matter date parsing and display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::DateGrouping;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized date '{0}'")]
pub struct DateError(pub String);

/// Date-time layouts accepted besides RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%b %d %Y", "%d %B %Y"];

/// Parse a front matter date, keeping only the calendar day.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    Err(DateError(value.to_string()))
}

/// Format a date for the page title block ("Wed Jan 10 2024").
pub fn display_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// The heading a blog entry is listed under.
pub fn group_label(date: NaiveDate, grouping: DateGrouping) -> String {
    match grouping {
        DateGrouping::Month => date.format("%B %Y").to_string(),
        DateGrouping::Year => date.format("%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-01-10"), Ok(ymd(2024, 1, 10)));
        assert_eq!(parse_date(" 2024/03/01 "), Ok(ymd(2024, 3, 1)));
    }

    #[test]
    fn test_parse_datetimes() {
        assert_eq!(parse_date("2024-01-10T08:30:00Z"), Ok(ymd(2024, 1, 10)));
        assert_eq!(parse_date("2024-01-10T23:30:00+02:00"), Ok(ymd(2024, 1, 10)));
        assert_eq!(parse_date("2024-01-10 08:30:00"), Ok(ymd(2024, 1, 10)));
    }

    #[test]
    fn test_parse_written_dates() {
        assert_eq!(parse_date("January 10, 2024"), Ok(ymd(2024, 1, 10)));
        assert_eq!(parse_date("Jan 10 2024"), Ok(ymd(2024, 1, 10)));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("2024-13-45").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(ymd(2024, 1, 10)), "Wed Jan 10 2024");
        assert_eq!(display_date(ymd(2023, 6, 1)), "Thu Jun 01 2023");
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label(ymd(2024, 1, 10), DateGrouping::Month), "January 2024");
        assert_eq!(group_label(ymd(2024, 1, 10), DateGrouping::Year), "2024");
    }
}
