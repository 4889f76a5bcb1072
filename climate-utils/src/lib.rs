//! Shared utility functions for climate crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Duration, NaiveDate};

    /// Calendar format used by every `date` column in the dataset.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Length of the reporting window counted back from the latest observation.
    pub const ONE_YEAR_DAYS: i64 = 365;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in strict "YYYY-MM-DD" format.
    ///
    /// chrono alone accepts unpadded fields ("2017-8-3"), signs and leading
    /// spaces, none of which compare correctly against the zero-padded
    /// strings stored in SQLite. The input must format back to itself.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|e| DateError(format!("'{s}' is not a valid calendar date: {e}")))?;
        if format_date(&date) != s {
            return Err(DateError(format!("'{s}' is not a YYYY-MM-DD date")).into());
        }
        Ok(date)
    }

    /// The date exactly [`ONE_YEAR_DAYS`] days before `date`.
    pub fn one_year_before(date: &NaiveDate) -> NaiveDate {
        *date - Duration::days(ONE_YEAR_DAYS)
    }

    /// Start of the one-year window ending at `max_date`, as a "YYYY-MM-DD" string.
    pub fn window_start(max_date: &str) -> anyhow::Result<String> {
        let end = parse_date(max_date)?;
        Ok(format_date(&one_year_before(&end)))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2017-08-23");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_malformed() {
            assert!(parse_date("not-a-date").is_err());
            assert!(parse_date("2017-8-3").is_err());
            assert!(parse_date("2017/08/23").is_err());
            assert!(parse_date("2017-02-30").is_err());
            assert!(parse_date("2017-13-01").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_parse_rejects_non_canonical() {
            // All of these are accepted by chrono and are ten bytes long.
            assert!(parse_date("+201-01-01").is_err());
            assert!(parse_date(" 017-01-01").is_err());
            assert!(parse_date("2017-01- 1").is_err());
            assert!(parse_date("0201-01-01").is_ok());
        }

        #[test]
        fn test_parse_error_mentions_input() {
            let err = parse_date("garbage").unwrap_err();
            assert!(err.to_string().contains("garbage"));
        }

        #[test]
        fn test_one_year_before() {
            let max = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            assert_eq!(
                one_year_before(&max),
                NaiveDate::from_ymd_opt(2016, 8, 23).unwrap()
            );
        }

        #[test]
        fn test_one_year_before_crosses_leap_day() {
            // 2016 is a leap year, so 365 days back from 2016-12-31 is 2016-01-01.
            let max = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
            assert_eq!(
                one_year_before(&max),
                NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()
            );
        }

        #[test]
        fn test_window_start() {
            assert_eq!(window_start("2017-08-23").unwrap(), "2016-08-23");
            assert!(window_start("2017-08").is_err());
        }
    }
}

/// Error types
pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("Date error: {0}")]
    pub struct DateError(pub String);

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_date_error_display() {
            let err = DateError("'x' is not a YYYY-MM-DD date".to_string());
            assert_eq!(err.to_string(), "Date error: 'x' is not a YYYY-MM-DD date");
        }
    }
}
