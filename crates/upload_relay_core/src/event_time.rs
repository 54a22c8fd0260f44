use chrono::NaiveDateTime;

use crate::error::RelayError;

/// Storage notifications stamp events with microsecond precision and a
/// literal `Z` suffix, e.g. `2024-01-02T03:04:05.678901Z`.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
pub const MAX_FRACTION_DIGITS: usize = 6;

/// `YYYY-MM-DDTHH:MM:SS.` with `#` marking a required ASCII digit.
const DATE_TIME_LAYOUT: &[u8] = b"####-##-##T##:##:##.";
const SECONDS_TENS_INDEX: usize = 17;

/// Parses an event timestamp into whole Unix epoch seconds (UTC).
///
/// The layout is fixed-width except for the fraction, which must carry 1 to
/// 6 digits and is truncated, never rounded. Leap seconds are rejected.
pub fn parse_event_time(value: &str) -> Result<i64, RelayError> {
    let mismatch = || {
        RelayError::parse(
            "event_time",
            format!("'{value}' does not match {EVENT_TIME_FORMAT}"),
        )
    };

    let bytes = value.as_bytes();
    let Some(fraction) = bytes
        .strip_suffix(b"Z")
        .and_then(|rest| rest.get(DATE_TIME_LAYOUT.len()..))
    else {
        return Err(mismatch());
    };

    let layout_matches = DATE_TIME_LAYOUT
        .iter()
        .zip(bytes)
        .all(|(expected, actual)| match expected {
            b'#' => actual.is_ascii_digit(),
            separator => actual == separator,
        });
    if !layout_matches {
        return Err(mismatch());
    }

    if fraction.is_empty()
        || fraction.len() > MAX_FRACTION_DIGITS
        || !fraction.iter().all(u8::is_ascii_digit)
    {
        return Err(RelayError::parse(
            "event_time",
            format!("'{value}' must carry 1 to {MAX_FRACTION_DIGITS} fractional digits"),
        ));
    }

    if bytes[SECONDS_TENS_INDEX] >= b'6' {
        return Err(RelayError::parse(
            "event_time",
            format!("'{value}' has seconds out of range"),
        ));
    }

    let parsed = NaiveDateTime::parse_from_str(value, EVENT_TIME_FORMAT)
        .map_err(|error| RelayError::parse("event_time", format!("'{value}': {error}")))?;
    Ok(parsed.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_microseconds_to_epoch_seconds() {
        assert_eq!(
            parse_event_time("2024-01-02T03:04:05.678901Z"),
            Ok(1_704_164_645)
        );
    }

    #[test]
    fn accepts_short_fractions() {
        assert_eq!(parse_event_time("1970-01-01T00:00:01.5Z"), Ok(1));
    }

    #[test]
    fn rejects_missing_fraction() {
        let error = parse_event_time("2024-01-02T03:04:05Z").expect_err("fraction is required");
        assert!(error.is_parse());
    }

    #[test]
    fn rejects_inputs_outside_fixed_layout() {
        for value in [
            " 2024-01-02T03:04:05.1Z",
            "2024-01-02T 3:04:05.1Z",
            "+2024-01-02T03:04:05.1Z",
            "2024-1-02T03:04:05.1Z",
            "2024-01-02 03:04:05.1Z",
            "2024-01-02T03:04:05.1Z ",
            "2024-01-02T03:04:05.Z",
            "Z",
        ] {
            let error = parse_event_time(value).expect_err(value);
            assert!(error.is_parse(), "{value}");
        }
    }

    #[test]
    fn rejects_leap_second() {
        let error = parse_event_time("2024-01-02T03:04:60.000000Z")
            .expect_err("second 60 should fail");
        assert!(error.is_parse());
    }

    #[test]
    fn rejects_offset_instead_of_zulu_suffix() {
        let error = parse_event_time("2024-01-02T03:04:05.678901+00:00")
            .expect_err("offset suffix should fail");
        assert!(error.is_parse());
    }

    #[test]
    fn rejects_nanosecond_precision() {
        let error = parse_event_time("2024-01-02T03:04:05.678901234Z")
            .expect_err("more than six digits should fail");
        assert!(error.is_parse());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let error =
            parse_event_time("2024-13-02T03:04:05.000000Z").expect_err("month 13 should fail");
        assert!(error.is_parse());
    }
}
