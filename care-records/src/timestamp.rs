//! Timestamp encoding for stored records
//!
//! New documents carry RFC 3339 UTC timestamps. Older data files hold naive
//! `YYYY-MM-DD HH:MM:SS[.ffffff]` or `YYYY-MM-DD HH:MM` values, which are read
//! as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const LEGACY_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

pub fn format(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    LEGACY_FORMATS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let encoded = format(&ts);
        assert_eq!(encoded, "2024-03-01T09:30:00.000000Z");
        assert_eq!(parse(&encoded), Some(ts));
    }

    #[test]
    fn test_offset_is_normalised_to_utc() {
        let parsed = parse("2024-03-01T11:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_legacy_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(parse("2024-03-01 09:30:00"), Some(expected));
        assert_eq!(parse("2024-03-01 09:30"), Some(expected));

        let with_micros = parse("2024-03-01 09:30:00.250000").unwrap();
        assert_eq!(with_micros.timestamp_subsec_micros(), 250_000);
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse(""), None);
    }
}
