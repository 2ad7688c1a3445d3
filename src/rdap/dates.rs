//! WHOIS date parsing and RDAP date formatting

use crate::whois::WhoisValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// RDAP event date format (UTC, seconds precision)
pub const RDAP_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats carrying a UTC offset, e.g. `2024-08-02 02:17:33+0000`
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S%:z"];

/// Formats without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"];

const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Parse a WHOIS date string.
///
/// Formats are tried in order and the first match wins; RFC 3339 (fractional
/// seconds, numeric offsets) is the last resort.
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_ONLY_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SSZ`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format(RDAP_DATE_FORMAT).to_string()
}

/// Parse and re-format a single date string; `None` when unparsable
pub fn normalize_date(date_str: &str) -> Option<String> {
    parse_date(date_str).map(|dt| format_date(&dt))
}

/// Every parsable date in a WHOIS value, in source order
pub fn format_dates(value: &WhoisValue) -> Vec<String> {
    match value {
        WhoisValue::Timestamp(ts) => vec![format_date(ts)],
        WhoisValue::Single(s) => normalize_date(s).into_iter().collect(),
        WhoisValue::Many(values) => values.iter().filter_map(|s| normalize_date(s)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_supported_formats() {
        assert_eq!(
            normalize_date("2024-08-02 02:17:33+0000").as_deref(),
            Some("2024-08-02T02:17:33Z")
        );
        assert_eq!(
            normalize_date("2024-08-02 02:17:33+00:00").as_deref(),
            Some("2024-08-02T02:17:33Z")
        );
        assert_eq!(
            normalize_date("2019-09-09 15:39:04").as_deref(),
            Some("2019-09-09T15:39:04Z")
        );
        assert_eq!(
            normalize_date("2024-08-02T02:17:33Z").as_deref(),
            Some("2024-08-02T02:17:33Z")
        );
        assert_eq!(normalize_date("2024-08-02").as_deref(), Some("2024-08-02T00:00:00Z"));
    }

    #[test]
    fn test_offsets_and_fractions_are_normalized() {
        assert_eq!(
            normalize_date("2024-08-02 04:17:33+0200").as_deref(),
            Some("2024-08-02T02:17:33Z")
        );
        assert_eq!(
            normalize_date("2024-08-02T02:17:33.123Z").as_deref(),
            Some("2024-08-02T02:17:33Z")
        );
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("before 1995"), None);
        assert_eq!(normalize_date("02-Aug-2024"), None);
        assert_eq!(normalize_date("2024-13-45"), None);
    }

    #[test]
    fn test_format_dates_drops_bad_values() {
        let value = WhoisValue::from(vec!["2019-09-09 15:39:04", "garbage", "2020-01-01"]);
        assert_eq!(
            format_dates(&value),
            vec!["2019-09-09T15:39:04Z", "2020-01-01T00:00:00Z"]
        );

        let ts = Utc.with_ymd_and_hms(2021, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(format_dates(&WhoisValue::from(ts)), vec!["2021-05-06T07:08:09Z"]);
    }
}
