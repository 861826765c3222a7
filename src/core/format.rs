// LogDash - core/format.rs
//
// Display formatting for log fields: the short row timestamp and the
// indented metadata text. Both functions are total; neither can fail.

use crate::util::constants::ROW_TIMESTAMP_FORMAT;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Layouts carrying an explicit numeric offset that RFC 3339 rejects
/// (missing seconds).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Layouts without an offset. The wall-clock time is shown as written.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Rewrite the ISO 8601 variants chrono does not parse directly into the
/// extended form: `T` separator, `hh:mm[:ss]` time, `.` decimal mark, and
/// `±hh:mm` offsets. Basic-format dates and times (`20240115T103000Z`) and
/// reduced-precision times (`T10Z`) are expanded too.
///
/// Input that does not look like a date-time is returned in a form that
/// still fails to parse.
fn normalise_iso8601(s: &str) -> String {
    let s = s.replace(',', ".");
    let (date, rest) = match s.find(['T', ' ']) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s.as_str(), None),
    };

    let date = if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
    } else {
        date.to_string()
    };
    let Some(rest) = rest else {
        return date;
    };

    let (time, zone) = if let Some(t) = rest.strip_suffix(['Z', 'z']) {
        (t, "Z".to_string())
    } else if let Some(pos) = rest.rfind(['+', '-']) {
        (&rest[..pos], normalise_offset(&rest[pos..]))
    } else {
        (rest, String::new())
    };

    let (clock, fraction) = match time.find('.') {
        Some(pos) => time.split_at(pos),
        None => (time, ""),
    };
    let clock = if clock.bytes().all(|b| b.is_ascii_digit()) {
        match clock.len() {
            2 => format!("{clock}:00"),
            4 => format!("{}:{}", &clock[..2], &clock[2..]),
            6 => format!("{}:{}:{}", &clock[..2], &clock[2..4], &clock[4..]),
            _ => clock.to_string(),
        }
    } else {
        clock.to_string()
    };

    format!("{date}T{clock}{fraction}{zone}")
}

/// `+02` becomes `+02:00`, `-0530` becomes `-05:30`; anything else is kept.
fn normalise_offset(offset: &str) -> String {
    let (sign, digits) = offset.split_at(1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return offset.to_string();
    }
    match digits.len() {
        2 => format!("{sign}{digits}:00"),
        4 => format!("{sign}{}:{}", &digits[..2], &digits[2..]),
        _ => offset.to_string(),
    }
}

/// Parse a timestamp string into a wall-clock date-time.
///
/// Zoned inputs are normalised to UTC so output does not depend on the
/// machine's locale or time zone.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = normalise_iso8601(trimmed);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Some(dt.with_timezone(&Utc).naive_utc());
        }
    }

    // A trailing Z that RFC 3339 did not accept (e.g. no seconds) is still UTC.
    let body = s.strip_suffix('Z').unwrap_or(s.as_str());

    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(body, fmt) {
            return Some(ndt);
        }
    }

    NaiveDate::parse_from_str(body, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a timestamp for the collapsed row, e.g. `Jan 15, 10:30:00`.
///
/// Returns the input unchanged when it cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ndt) => ndt.format(ROW_TIMESTAMP_FORMAT).to_string(),
        None => {
            tracing::trace!(raw, "Unparseable timestamp shown verbatim");
            raw.to_string()
        }
    }
}

/// Serialise metadata as JSON with two-space indentation, keeping the key
/// order of the input.
pub fn format_metadata(metadata: &serde_json::Value) -> String {
    // Serialising a Value cannot fail (all map keys are strings), but fall
    // back to the compact form rather than panic.
    serde_json::to_string_pretty(metadata).unwrap_or_else(|_| metadata.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_utc_iso_timestamp() {
        assert_eq!(format_timestamp("2024-01-15T10:30:00Z"), "Jan 15, 10:30:00");
    }

    #[test]
    fn test_fractional_seconds_dropped() {
        assert_eq!(
            format_timestamp("2024-03-02T23:59:58.123456Z"),
            "Mar 02, 23:59:58"
        );
    }

    #[test]
    fn test_offset_normalised_to_utc() {
        assert_eq!(
            format_timestamp("2024-01-15T12:30:00+02:00"),
            "Jan 15, 10:30:00"
        );
        assert_eq!(
            format_timestamp("2024-01-15T12:30:00+0200"),
            "Jan 15, 10:30:00"
        );
        assert_eq!(format_timestamp("2024-01-15T10:30:00+02"), "Jan 15, 08:30:00");
        assert_eq!(
            format_timestamp("2024-01-15T10:30:00.123-05"),
            "Jan 15, 15:30:00"
        );
        assert_eq!(format_timestamp("2024-01-15T10:30+02:00"), "Jan 15, 08:30:00");
        assert_eq!(
            format_timestamp("2024-01-15 12:30:00+02:00"),
            "Jan 15, 10:30:00"
        );
    }

    #[test]
    fn test_comma_decimal_and_reduced_precision() {
        assert_eq!(format_timestamp("2024-01-15T10:30:00,5Z"), "Jan 15, 10:30:00");
        assert_eq!(format_timestamp("2024-01-15T10Z"), "Jan 15, 10:00:00");
        assert_eq!(format_timestamp("2024-01-15T10:30Z"), "Jan 15, 10:30:00");
    }

    #[test]
    fn test_basic_format() {
        assert_eq!(format_timestamp("20240115T103000Z"), "Jan 15, 10:30:00");
        assert_eq!(format_timestamp("20240115T1230+0200"), "Jan 15, 10:30:00");
        assert_eq!(format_timestamp("20240115"), "Jan 15, 00:00:00");
    }

    #[test]
    fn test_offset_crossing_midnight_changes_date() {
        assert_eq!(
            format_timestamp("2024-01-01T01:00:00+03:00"),
            "Dec 31, 22:00:00"
        );
    }

    #[test]
    fn test_naive_timestamps_kept_as_written() {
        assert_eq!(format_timestamp("2024-07-04T08:05:09"), "Jul 04, 08:05:09");
        assert_eq!(format_timestamp("2024-07-04 08:05:09"), "Jul 04, 08:05:09");
        assert_eq!(format_timestamp("2024-07-04T08:05"), "Jul 04, 08:05:00");
        assert_eq!(format_timestamp("2024-07-04T08"), "Jul 04, 08:00:00");
        assert_eq!(format_timestamp("2024-07-04T08:05:09,25"), "Jul 04, 08:05:09");
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(format_timestamp("2024-11-30"), "Nov 30, 00:00:00");
    }

    #[test]
    fn test_midnight_uses_zero_hour() {
        assert_eq!(format_timestamp("2024-05-01T00:00:00Z"), "May 01, 00:00:00");
    }

    #[test]
    fn test_unparseable_returned_verbatim() {
        for raw in [
            "not-a-date",
            "garbage",
            "",
            "   ",
            "2024-13-45T99:99:99Z",
            "1705314600000",
            "15/01/2024 10:30",
        ] {
            assert_eq!(format_timestamp(raw), raw, "input {raw:?}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(
            format_timestamp("  2024-01-15T10:30:00Z\n"),
            "Jan 15, 10:30:00"
        );
    }

    #[test]
    fn test_metadata_two_space_indent() {
        let value = json!({"disk": "/dev/sda1"});
        assert_eq!(format_metadata(&value), "{\n  \"disk\": \"/dev/sda1\"\n}");
    }

    #[test]
    fn test_metadata_preserves_input_key_order() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"zeta":1,"alpha":{"b":2,"a":[true,null]}}"#).unwrap();
        let text = format_metadata(&value);
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        assert!(zeta < alpha, "key order changed:\n{text}");
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
        assert!(text.contains("\n    \"b\": 2"));
    }

    #[test]
    fn test_metadata_scalar_values() {
        assert_eq!(format_metadata(&json!("plain")), "\"plain\"");
        assert_eq!(format_metadata(&json!(42)), "42");
        assert_eq!(format_metadata(&json!([])), "[]");
    }
}
