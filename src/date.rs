//! Calendar-date parsing for backend date fields.
//!
//! The backend stores dates as text. Plain `YYYY-MM-DD` is the common case,
//! but records edited through other clients may carry full timestamps. Every
//! accepted form is reduced to a calendar date; the time of day is dropped.

use crate::record::loose_text;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text form of a raw date field.
///
/// Integer values are epoch milliseconds and are rendered as `YYYY-MM-DD`
/// (UTC). Any other non-string value keeps its JSON text, which later fails
/// to parse as a date for that loan alone.
pub fn date_field_text(value: Option<Value>) -> Option<String> {
    if let Some(Value::Number(n)) = &value {
        if let Some(ts) = n.as_i64().and_then(DateTime::from_timestamp_millis) {
            return Some(ts.date_naive().format(DATE_FORMAT).to_string());
        }
    }
    loose_text(value)
}

/// Parses a backend date field into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC first) and
/// offset-less `YYYY-MM-DDTHH:MM:SS[.fff]`. Returns `None` for anything else.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Whole calendar days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_calendar_date("2024-01-10"), Some(ymd(2024, 1, 10)));
        assert_eq!(parse_calendar_date("  2024-01-10 "), Some(ymd(2024, 1, 10)));
    }

    #[test]
    fn test_parse_rfc3339_uses_utc_date() {
        assert_eq!(
            parse_calendar_date("2024-01-10T23:30:00Z"),
            Some(ymd(2024, 1, 10))
        );
        assert_eq!(
            parse_calendar_date("2024-01-11T01:00:00+02:00"),
            Some(ymd(2024, 1, 10))
        );
    }

    #[test]
    fn test_parse_naive_timestamp() {
        assert_eq!(
            parse_calendar_date("2024-01-10T08:15:00.250"),
            Some(ymd(2024, 1, 10))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
        assert_eq!(parse_calendar_date("10/01/2024"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date("soon"), None);
    }

    #[test]
    fn test_date_field_text() {
        assert_eq!(
            date_field_text(Some(Value::from(1704844800000i64))),
            Some("2024-01-10".to_string())
        );
        assert_eq!(
            date_field_text(Some(Value::from(" 2024-01-10 "))),
            Some("2024-01-10".to_string())
        );
        assert_eq!(date_field_text(Some(Value::from(""))), None);
        assert_eq!(date_field_text(Some(Value::Null)), None);
        assert_eq!(date_field_text(None), None);

        let text = date_field_text(Some(Value::from(1.5))).unwrap();
        assert_eq!(parse_calendar_date(&text), None);
        let text = date_field_text(Some(serde_json::json!({"day": 10}))).unwrap();
        assert_eq!(parse_calendar_date(&text), None);
    }

    #[test]
    fn test_days_between_sign() {
        assert_eq!(days_between(ymd(2024, 1, 10), ymd(2024, 1, 15)), 5);
        assert_eq!(days_between(ymd(2024, 1, 10), ymd(2024, 1, 10)), 0);
        assert_eq!(days_between(ymd(2024, 1, 10), ymd(2024, 1, 9)), -1);
        assert_eq!(days_between(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
    }
}
