//! Wire-format validators for the values the warehouse domain owns:
//! dates as `YYYY/MM/DD` with an optional ` HH:MM` suffix, 32-digit RFIDs,
//! and 12-digit position ids built from three 4-digit segments.

use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap());
static DATE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}$").unwrap());
static RFID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{32}$").unwrap());
static POSITION_SEGMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());
static POSITION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{12}$").unwrap());

/// Parses a warehouse date string. Date-only values resolve to midnight.
pub fn parse_warehouse_date(value: &str) -> Option<NaiveDateTime> {
    if DATE_TIME_RE.is_match(value) {
        NaiveDateTime::parse_from_str(value, "%Y/%m/%d %H:%M").ok()
    } else if DATE_RE.is_match(value) {
        NaiveDate::parse_from_str(value, "%Y/%m/%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    } else {
        None
    }
}

/// True when `value` is a well-formed warehouse date.
pub fn date_format_is_valid(value: &str) -> bool {
    parse_warehouse_date(value).is_some()
}

/// True when `value` is well-formed and does not lie in the future.
pub fn date_is_valid(value: &str) -> bool {
    match parse_warehouse_date(value) {
        Some(parsed) => parsed <= Local::now().naive_local(),
        None => false,
    }
}

/// RFIDs are exactly 32 decimal digits.
pub fn rfid_is_valid(value: &str) -> bool {
    RFID_RE.is_match(value)
}

/// Aisle, row, and column segments are exactly 4 decimal digits.
pub fn position_segment_is_valid(value: &str) -> bool {
    POSITION_SEGMENT_RE.is_match(value)
}

/// Position ids are exactly 12 decimal digits (aisle + row + column).
pub fn position_id_is_valid(value: &str) -> bool {
    POSITION_ID_RE.is_match(value)
}

/// Splits a validated 12-digit position id into (aisle, row, column).
pub fn split_position_id(value: &str) -> Option<(String, String, String)> {
    if !position_id_is_valid(value) {
        return None;
    }
    Some((
        value[0..4].to_string(),
        value[4..8].to_string(),
        value[8..12].to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2022/04/04" => true; "plain date")]
    #[test_case("2022/04/04 10:30" => true; "date with time")]
    #[test_case("2022-04-04" => false; "wrong separator")]
    #[test_case("2022/4/4" => false; "unpadded")]
    #[test_case("2022/13/40" => false; "out of range")]
    #[test_case("" => false; "empty")]
    fn date_formats(value: &str) -> bool {
        date_format_is_valid(value)
    }

    #[test]
    fn future_dates_are_rejected() {
        let tomorrow = (Local::now() + chrono::Duration::days(1))
            .format("%Y/%m/%d")
            .to_string();
        assert!(!date_is_valid(&tomorrow));
        assert!(date_is_valid("2021/11/29"));
        assert!(date_is_valid("2021/11/29 12:30"));
    }

    #[test]
    fn rfid_format() {
        assert!(rfid_is_valid("12345678901234567890123456789016"));
        assert!(!rfid_is_valid("1234567890123456789012345678901")); // 31 digits
        assert!(!rfid_is_valid("123456789012345678901234567890165")); // 33 digits
        assert!(!rfid_is_valid("1234567890123456789012345678901x"));
    }

    #[test]
    fn position_ids() {
        assert!(position_id_is_valid("800234543412"));
        assert!(!position_id_is_valid("80023454341"));
        assert!(!position_id_is_valid("8002345434123"));
        assert!(position_segment_is_valid("8002"));
        assert!(!position_segment_is_valid("802"));

        let (aisle, row, col) = split_position_id("800234543412").unwrap();
        assert_eq!(aisle, "8002");
        assert_eq!(row, "3454");
        assert_eq!(col, "3412");
        assert!(split_position_id("nope").is_none());
    }

    #[test]
    fn date_ordering_matches_wire_strings() {
        let issue = parse_warehouse_date("2022/04/04 10:00").unwrap();
        let delivery_same_day = parse_warehouse_date("2022/04/04").unwrap();
        let delivery_next_day = parse_warehouse_date("2022/04/05").unwrap();
        assert!(issue > delivery_same_day);
        assert!(issue < delivery_next_day);
    }
}
