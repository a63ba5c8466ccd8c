//! Wall-clock time helpers
//!
//! Reservations are stored as naive local wall-clock timestamps. "Local" is
//! the business timezone configured on the server; values that arrive with an
//! explicit offset are converted into it, values without one are taken as-is.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// `<input type="datetime-local">` value format
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Persisted / serialized format
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// List view format
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Trailing `Z`/`z` or a numeric offset (`+07:00`, `-0500`)
static EXPLICIT_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[zZ]$|[+\-]\d{2}:?\d{2}$").expect("offset pattern"));

/// `YYYY-MM-DD` optionally followed by `HH:MM[:SS]`
static LOCAL_WALL_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})(?:[T ]?(\d{2}):(\d{2})(?::\d{2})?)?$")
        .expect("wall clock pattern")
});

/// `YYYY-MM-DDTHH:MM` exactly, as produced by a datetime-local input
static DATETIME_LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").expect("datetime-local pattern")
});

const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Current wall-clock time in the business timezone
pub fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Whether the value ends with an explicit UTC marker or numeric offset
pub fn has_explicit_offset(value: &str) -> bool {
    EXPLICIT_OFFSET.is_match(value.trim())
}

fn parse_with_offset(value: &str) -> Option<DateTime<FixedOffset>> {
    let normalized = match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(&normalized, f).ok())
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Parse a submitted or persisted timestamp into local wall-clock time.
///
/// Offset-carrying values are converted into `tz`; naive values are kept.
/// Sub-second precision is dropped.
pub fn parse_local_datetime(value: &str, tz: Tz) -> Option<NaiveDateTime> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }
    let parsed = if has_explicit_offset(s) {
        parse_with_offset(s).map(|dt| dt.with_timezone(&tz).naive_local())
    } else {
        parse_naive(s)
    };
    parsed.and_then(|dt| dt.with_nanosecond(0))
}

/// Convert a persisted value into the `YYYY-MM-DDTHH:MM` form used to
/// pre-fill a datetime-local input.
///
/// Returns an empty string when the value cannot be interpreted.
pub fn to_input_datetime(value: &str, tz: Tz) -> String {
    let s = value.trim();
    if s.is_empty() {
        return String::new();
    }

    if has_explicit_offset(s) {
        return parse_with_offset(s)
            .map(|dt| dt.with_timezone(&tz).format(INPUT_FORMAT).to_string())
            .unwrap_or_default();
    }

    let Some(caps) = LOCAL_WALL_CLOCK.captures(s) else {
        return String::new();
    };
    let date = &caps[1];
    let hh = caps.get(2).map_or("00", |m| m.as_str());
    let mm = caps.get(3).map_or("00", |m| m.as_str());
    format!("{date}T{hh}:{mm}")
}

/// Normalize a datetime-local value (`YYYY-MM-DDTHH:MM`) into
/// `YYYY-MM-DD HH:MM:00` without any timezone conversion.
///
/// Anything else is returned trimmed and untouched.
pub fn from_input_datetime(value: &str) -> String {
    let s = value.trim();
    if DATETIME_LOCAL.is_match(s) {
        format!("{}:00", s.replacen('T', " ", 1))
    } else {
        s.to_string()
    }
}

pub fn format_storage(dt: &NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

pub fn format_input(dt: &NaiveDateTime) -> String {
    dt.format(INPUT_FORMAT).to_string()
}

pub fn format_display(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Serde adapter: `NaiveDateTime` <-> `YYYY-MM-DD HH:MM:SS`
pub mod wall_clock {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_storage(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_naive(raw.trim())
            .ok_or_else(|| de::Error::custom(format!("invalid wall-clock timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn detects_explicit_offsets() {
        assert!(has_explicit_offset("2025-03-01T10:00:00Z"));
        assert!(has_explicit_offset("2025-03-01T10:00:00z"));
        assert!(has_explicit_offset("2025-03-01T10:00:00+07:00"));
        assert!(has_explicit_offset("2025-03-01 10:00:00-0500"));
        assert!(!has_explicit_offset("2025-03-01"));
        assert!(!has_explicit_offset("2025-12-31 10:00:00"));
        assert!(!has_explicit_offset("2025-03-01T10:00"));
    }

    #[test]
    fn input_value_from_naive_strings() {
        let tz = chrono_tz::UTC;
        assert_eq!(to_input_datetime("2025-03-01 18:30:00", tz), "2025-03-01T18:30");
        assert_eq!(to_input_datetime("2025-03-01T18:30", tz), "2025-03-01T18:30");
        assert_eq!(to_input_datetime(" 2025-03-01 18:30 ", tz), "2025-03-01T18:30");
        assert_eq!(to_input_datetime("2025-03-01", tz), "2025-03-01T00:00");
    }

    #[test]
    fn input_value_converts_offsets_into_business_zone() {
        let tz: Tz = "Asia/Ho_Chi_Minh".parse().unwrap();
        assert_eq!(
            to_input_datetime("2025-03-01T11:30:00.000000Z", tz),
            "2025-03-01T18:30"
        );
        assert_eq!(
            to_input_datetime("2025-03-01T18:30:00+07:00", tz),
            "2025-03-01T18:30"
        );
        assert_eq!(
            to_input_datetime("2025-03-01 06:30:00-0500", tz),
            "2025-03-01T18:30"
        );
    }

    #[test]
    fn input_value_is_empty_for_garbage() {
        let tz = chrono_tz::UTC;
        assert_eq!(to_input_datetime("", tz), "");
        assert_eq!(to_input_datetime("tomorrow", tz), "");
        assert_eq!(to_input_datetime("2025-03-01T99Z", tz), "");
        assert_eq!(to_input_datetime("01/03/2025 18:30", tz), "");
    }

    #[test]
    fn datetime_local_is_normalized_without_conversion() {
        assert_eq!(from_input_datetime("2025-03-01T18:30"), "2025-03-01 18:30:00");
        assert_eq!(from_input_datetime(""), "");
        assert_eq!(from_input_datetime("2025-03-01 18:30:00"), "2025-03-01 18:30:00");
    }

    #[test]
    fn parses_local_values_as_wall_clock() {
        let tz: Tz = "Europe/Madrid".parse().unwrap();
        assert_eq!(
            parse_local_datetime("2025-03-01T18:30", tz),
            Some(dt(2025, 3, 1, 18, 30, 0))
        );
        assert_eq!(
            parse_local_datetime("2025-03-01 18:30:45.123", tz),
            Some(dt(2025, 3, 1, 18, 30, 45))
        );
        assert_eq!(
            parse_local_datetime("2025-03-01", tz),
            Some(dt(2025, 3, 1, 0, 0, 0))
        );
        // 17:30 UTC is 18:30 in Madrid (CET, +01:00)
        assert_eq!(
            parse_local_datetime("2025-03-01T17:30:00Z", tz),
            Some(dt(2025, 3, 1, 18, 30, 0))
        );
        assert_eq!(parse_local_datetime("not a date", tz), None);
        assert_eq!(parse_local_datetime("2025-02-30 10:00", tz), None);
    }

    #[test]
    fn formats() {
        let value = dt(2025, 3, 1, 9, 5, 0);
        assert_eq!(format_storage(&value), "2025-03-01 09:05:00");
        assert_eq!(format_input(&value), "2025-03-01T09:05");
        assert_eq!(format_display(&value), "2025-03-01 09:05");
    }

    #[test]
    fn wall_clock_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "wall_clock")]
            at: NaiveDateTime,
        }

        let json = serde_json::to_string(&Wrapper {
            at: dt(2025, 3, 1, 18, 30, 0),
        })
        .unwrap();
        assert_eq!(json, r#"{"at":"2025-03-01 18:30:00"}"#);

        let back: Wrapper = serde_json::from_str(r#"{"at":"2025-03-01T18:30"}"#).unwrap();
        assert_eq!(back.at, dt(2025, 3, 1, 18, 30, 0));

        assert!(serde_json::from_str::<Wrapper>(r#"{"at":"soon"}"#).is_err());
    }
}
