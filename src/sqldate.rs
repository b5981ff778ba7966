//! Parser for the date/time text layouts that SQL exports put into spreadsheets.
//!
//! Not used by the reformat pass, which only changes number formats and never
//! rewrites date text.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

/// Parses `text` against the supported layouts, taking the value as UTC.
/// Minute/second-only text (`mm:ss.0`) is placed on today's UTC date.
pub fn parse_sql_date(text: &str) -> Option<DateTime<Utc>> {
    parse_sql_date_on(text, Utc::now().date_naive())
}

/// Like [`parse_sql_date`], with an explicit date for time-only text.
pub fn parse_sql_date_on(text: &str, today: NaiveDate) -> Option<DateTime<Utc>> {
    let naive = parse_fixed_width(text)
        .or_else(|| parse_twelve_hour(text))
        .or_else(|| parse_minutes_seconds(text, today))?;
    Some(naive.and_utc())
}

/// Zero-padded layouts: shape check first, since chrono also accepts unpadded fields.
const FIXED_WIDTH: [(&str, &str); 4] = [
    (r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}$", "%Y-%m-%d %H:%M:%S%.f"),
    (r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$", "%Y-%m-%d %H:%M:%S"),
    (r"^\d{4}-\d{2}-\d{2}$", "%Y-%m-%d"),
    (r"^\d{2}-\d{2}-\d{4}$", "%m-%d-%Y"),
];

struct Patterns {
    fixed_width: Vec<(Regex, &'static str)>,
    twelve_hour: Regex,
    minutes_seconds: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        fixed_width: FIXED_WIDTH
            .iter()
            .map(|(shape, format)| (Regex::new(shape).expect("valid regex"), *format))
            .collect(),
        // M/d/yyyy h:mm
        twelve_hour: Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}) (\d{1,2}):(\d{2})$")
            .expect("valid regex"),
        // mm:ss.0
        minutes_seconds: Regex::new(r"^(\d{2}):(\d{2})\.0$").expect("valid regex"),
    })
}

fn parse_fixed_width(text: &str) -> Option<NaiveDateTime> {
    let (_, format) = patterns()
        .fixed_width
        .iter()
        .find(|(shape, _)| shape.is_match(text))?;
    if format.contains("%H") {
        NaiveDateTime::parse_from_str(text, format).ok()
    } else {
        NaiveDate::parse_from_str(text, format)
            .ok()?
            .and_hms_opt(0, 0, 0)
    }
}

fn parse_twelve_hour(text: &str) -> Option<NaiveDateTime> {
    let caps = patterns().twelve_hour.captures(text)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    // 12-hour clock without a meridiem reads as AM; 0 and 12 are both midnight
    if hour > 12 {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour % 12, minute, 0)?;
    Some(date.and_time(time))
}

fn parse_minutes_seconds(text: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let caps = patterns().minutes_seconds.captures(text)?;
    let minute: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[2].parse().ok()?;
    let time = NaiveTime::from_hms_opt(0, minute, second)?;
    Some(today.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn sql_layouts() {
        let parsed = parse_sql_date("2021-03-04 13:05:09.120").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 120);
        assert_eq!(parsed.with_nanosecond(0).unwrap(), utc(2021, 3, 4, 13, 5, 9));

        assert_eq!(
            parse_sql_date("2021-03-04 13:05:09"),
            Some(utc(2021, 3, 4, 13, 5, 9))
        );
        assert_eq!(parse_sql_date("2021-03-04"), Some(utc(2021, 3, 4, 0, 0, 0)));
        assert_eq!(parse_sql_date("03-04-2021"), Some(utc(2021, 3, 4, 0, 0, 0)));
    }

    #[test]
    fn twelve_hour_layout() {
        assert_eq!(parse_sql_date("3/4/2021 1:05"), Some(utc(2021, 3, 4, 1, 5, 0)));
        assert_eq!(parse_sql_date("12/31/2020 12:30"), Some(utc(2020, 12, 31, 0, 30, 0)));
        assert_eq!(parse_sql_date("3/4/2021 13:05"), None);
        assert_eq!(parse_sql_date("3/4/2021 0:05"), Some(utc(2021, 3, 4, 0, 5, 0)));
    }

    #[test]
    fn minutes_seconds_use_the_given_day() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let parsed = parse_sql_date_on("05:09.0", day).unwrap();
        assert_eq!(parsed, utc(2024, 2, 29, 0, 5, 9));
        assert_eq!(parse_sql_date_on("05:09.5", day), None);
        assert!(parse_sql_date("00:01.0").is_some());
    }

    #[test]
    fn rejects_other_text() {
        for text in ["", "null", "2021-3-4 1:2:3", " 2021-03-04", "2021-03-04 13:05:09.1", "2021/03/04"] {
            assert_eq!(parse_sql_date(text), None, "{text:?}");
        }
    }
}
