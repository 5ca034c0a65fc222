//! Post date parsing and formatting

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::path::{Component, Path};
use std::time::SystemTime;

/// Format of every date written into front matter
pub const FRONT_MATTER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Export timestamps stamped `+0000` are really UTC+8 wall-clock times
const ZERO_OFFSET_MARKER: &str = "+0000";
const CORRECTED_OFFSET_SECS: i32 = 8 * 3600;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(FRONT_MATTER_DATE_FORMAT).to_string()
}

/// `/YYYY/MM/DD`, the directory alias redirects live under
pub fn redirect_base(date: &NaiveDateTime) -> String {
    date.format("/%Y/%m/%d").to_string()
}

/// Parse the `date` field of a sidecar record.
///
/// Returns `None` when the value cannot be understood as a date.
pub fn parse_sidecar_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(raw) => parse_date_str(raw),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.with_timezone(&Local).naive_local()),
        _ => None,
    }
}

pub fn parse_date_str(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    let with_offset = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok());
    if let Some(dt) = with_offset {
        if raw.ends_with(ZERO_OFFSET_MARKER) {
            let corrected = FixedOffset::east_opt(CORRECTED_OFFSET_SECS)?;
            return Some(dt.with_timezone(&corrected).naive_local());
        }
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Date encoded by a trailing `YYYY/MM/DD` in the post's directory.
///
/// `Ok(None)` when the directory carries no such segments, `Err` when it
/// does but they name an impossible calendar date.
pub fn date_from_dir(post: &Path) -> Result<Option<NaiveDateTime>, String> {
    let Some(parent) = post.parent() else {
        return Ok(None);
    };
    let segments: Vec<&str> = parent
        .components()
        .rev()
        .take(3)
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    let &[day, month, year] = segments.as_slice() else {
        return Ok(None);
    };
    if !is_digits(year, 4) || !is_digits(month, 2) || !is_digits(day, 2) {
        return Ok(None);
    }

    let parse = |s: &str| s.parse::<u32>().map_err(|e| e.to_string());
    let date = NaiveDate::from_ymd_opt(parse(year)? as i32, parse(month)?, parse(day)?)
        .ok_or_else(|| format!("{}/{}/{} is not a valid date", year, month, day))?;
    Ok(date.and_hms_opt(0, 0, 0))
}

pub fn local_from_system_time(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_zero_offset_is_shifted_to_utc_plus_8() {
        let date = parse_sidecar_date(&json!("2020-01-02T03:04:05+0000")).unwrap();
        assert_eq!(format_date(&date), "2020-01-02 11:04:05");
    }

    #[test]
    fn test_zero_offset_crossing_midnight() {
        let date = parse_date_str("2019-12-31T20:00:00+0000").unwrap();
        assert_eq!(date, ymd_hms(2020, 1, 1, 4, 0, 0));
    }

    #[test]
    fn test_other_offsets_keep_wall_clock() {
        let date = parse_date_str("2020-01-02T03:04:05+0900").unwrap();
        assert_eq!(date, ymd_hms(2020, 1, 2, 3, 4, 5));

        let date = parse_date_str("2020-01-02T03:04:05Z").unwrap();
        assert_eq!(date, ymd_hms(2020, 1, 2, 3, 4, 5));
    }

    #[test]
    fn test_naive_formats() {
        assert_eq!(
            parse_date_str("2020-01-02 03:04:05").unwrap(),
            ymd_hms(2020, 1, 2, 3, 4, 5)
        );
        assert_eq!(
            parse_date_str("2020-01-02").unwrap(),
            ymd_hms(2020, 1, 2, 0, 0, 0)
        );
    }

    #[test]
    fn test_unparseable_dates() {
        assert!(parse_sidecar_date(&json!("yesterday")).is_none());
        assert!(parse_sidecar_date(&json!(true)).is_none());
        assert!(parse_sidecar_date(&json!(["2020-01-02"])).is_none());
    }

    #[test]
    fn test_date_from_dir() {
        let date = date_from_dir(Path::new("/export/posts/2020/01/02/hello.md")).unwrap();
        assert_eq!(date, Some(ymd_hms(2020, 1, 2, 0, 0, 0)));

        assert_eq!(date_from_dir(Path::new("/export/posts/misc/hello.md")), Ok(None));
        assert_eq!(date_from_dir(Path::new("hello.md")), Ok(None));
        assert!(date_from_dir(Path::new("/posts/2020/13/40/hello.md")).is_err());
    }

    #[test]
    fn test_redirect_base() {
        assert_eq!(redirect_base(&ymd_hms(2020, 1, 2, 11, 4, 5)), "/2020/01/02");
    }
}
