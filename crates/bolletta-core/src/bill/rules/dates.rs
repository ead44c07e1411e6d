//! Date parsing for Italian bills (DD/MM/YYYY or DD-MM-YYYY).

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_DMY: Regex =
        Regex::new(r"\b([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{4})\b").unwrap();
}

/// Parse an Italian bill date. Calendar-invalid dates (31/02/...) are
/// rejected by the chrono constructor and yield `None`.
pub fn parse_italian_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash_date() {
        assert_eq!(
            parse_italian_date("15/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_parse_dash_date() {
        assert_eq!(
            parse_italian_date("3-11-2023"),
            NaiveDate::from_ymd_opt(2023, 11, 3)
        );
    }

    #[test]
    fn test_invalid_calendar_date_dropped() {
        assert_eq!(parse_italian_date("31/02/2024"), None);
        assert_eq!(parse_italian_date("non è una data"), None);
    }
}
