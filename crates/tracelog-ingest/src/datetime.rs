//! Lenient timestamp parsing for inspection logs.
//!
//! Test stations export timestamps in a handful of layouts. Parsing never
//! fails loudly: a value that matches none of them is simply absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts tried in order. `%.f` also accepts no fraction.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a raw cell into a point in time.
///
/// Offsets (`Z`, `+09:00`) are accepted and dropped: the wall-clock time the
/// station recorded is what gets bucketed.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    parse_compact(trimmed)
}

/// `YYYYMMDDhhmmss`, as written by some station firmware.
fn parse_compact(value: &str) -> Option<NaiveDateTime> {
    if value.len() != 14 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |range: std::ops::Range<usize>| value[range].parse::<u32>().ok();
    let year = i32::try_from(field(0..4)?).ok()?;
    NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?.and_hms_opt(
        field(8..10)?,
        field(10..12)?,
        field(12..14)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, mo, d).and_then(|date| date.and_hms_opt(h, mi, s))
    }

    #[test]
    fn parses_common_layouts() {
        let want = expect(2025, 1, 5, 10, 30, 15);
        assert_eq!(parse_timestamp("2025-01-05 10:30:15"), want);
        assert_eq!(parse_timestamp("2025/01/05 10:30:15"), want);
        assert_eq!(parse_timestamp("2025-01-05T10:30:15"), want);
        assert_eq!(parse_timestamp("20250105103015"), want);
        assert_eq!(parse_timestamp("  2025-01-05 10:30:15  "), want);
    }

    #[test]
    fn parses_without_seconds_and_date_only() {
        assert_eq!(
            parse_timestamp("2025/01/05 10:30"),
            expect(2025, 1, 5, 10, 30, 0)
        );
        assert_eq!(parse_timestamp("2025-01-05"), expect(2025, 1, 5, 0, 0, 0));
    }

    #[test]
    fn parses_unpadded_fields() {
        assert_eq!(
            parse_timestamp("2025/1/5 9:03:00"),
            expect(2025, 1, 5, 9, 3, 0)
        );
    }

    #[test]
    fn keeps_wall_clock_for_offsets() {
        assert_eq!(
            parse_timestamp("2025-01-31T23:30:00+09:00"),
            expect(2025, 1, 31, 23, 30, 0)
        );
        assert_eq!(
            parse_timestamp("2025-01-31T23:30:00Z"),
            expect(2025, 1, 31, 23, 30, 0)
        );
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let parsed = parse_timestamp("2025-01-05 10:30:15.250").unwrap();
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn unparseable_is_absent() {
        for bad in ["", "   ", "not a date", "2025-13-01 00:00:00", "2025-02-30", "12345"] {
            assert!(parse_timestamp(bad).is_none(), "parsed {bad:?}");
        }
    }
}
