use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Canonical textual form of a normalized timestamp, also used by the
/// database layer. Fixed-width, so lexicographic order is chronological.
pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("'{0}' does not start with a YYYY-MM-DDTHH:MM:SS date and time")]
    InvalidDateTime(String),
    #[error("'{0}' has a malformed fractional seconds part")]
    InvalidFraction(String),
    #[error("'{0}' has a malformed timezone offset")]
    InvalidOffset(String)
}

/// Parses a site list timestamp into a timezone-free point in time, expressed
/// as if in UTC. Site lists in the wild carry several ISO-8601 variants that
/// a strict parser rejects. The accepted shape is
/// `YYYY-MM-DDTHH:MM:SS[.fraction][offset]` with offset forms `±HH:MM`,
/// `±HHMM` and `±HH` (sign mandatory, no `Z`). A numeric offset is subtracted
/// from the wall-clock time to normalize it to UTC.
///
/// Fractional seconds are not preserved: any non-empty fraction adds exactly
/// one second to the base time, whatever its digits say. Existing consumers
/// rely on that rounding, so it must not be "fixed" to round-to-nearest.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, FormatError> {
    let datetime = parse_base(text)?;
    let (datetime, rest) = apply_fraction(datetime, &text[19..], text)?;
    apply_offset(datetime, rest, text)
}

pub fn format_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses the mandatory fixed-width date and time portion of the timestamp.
/// Calendar validation (month 13, hour 24, ...) happens here.
fn parse_base(text: &str) -> Result<NaiveDateTime, FormatError> {
    if text.len() < 19 || !text.is_char_boundary(19) {
        return Err(FormatError::InvalidDateTime(text.to_string()));
    }
    NaiveDateTime::parse_from_str(&text[..19], TIMESTAMP_FORMAT)
        .map_err(|_| FormatError::InvalidDateTime(text.to_string()))
}

/// Consumes an optional `.digits` fraction and applies the one-second bump.
/// Returns the adjusted time and the remaining (offset) part of the text.
fn apply_fraction<'a>(datetime: NaiveDateTime, rest: &'a str, text: &str)
    -> Result<(NaiveDateTime, &'a str), FormatError> {
    match rest.strip_prefix('.') {
        Some(tail) => {
            let digits = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
            if digits == 0 {
                return Err(FormatError::InvalidFraction(text.to_string()));
            }
            Ok((datetime + Duration::seconds(1), &tail[digits..]))
        }
        None => Ok((datetime, rest))
    }
}

/// Consumes the optional timezone offset. The input is only accepted if the
/// offset spans the complete remainder of the text.
fn apply_offset(datetime: NaiveDateTime, rest: &str, text: &str)
    -> Result<NaiveDateTime, FormatError> {
    if rest.is_empty() {
        return Ok(datetime);
    }
    match parse_offset(rest) {
        Some(minutes) => Ok(datetime - Duration::minutes(minutes)),
        None => Err(FormatError::InvalidOffset(text.to_string()))
    }
}

/// Returns the signed offset in minutes, or None if the text does not match
/// any of the accepted offset forms.
fn parse_offset(rest: &str) -> Option<i64> {
    let (sign, tail) = match rest.strip_prefix('+') {
        Some(tail) => (1, tail),
        None => (-1, rest.strip_prefix('-')?)
    };
    if !tail.is_ascii() {
        return None;
    }
    let (hours, minutes) = match tail.len() {
        2 => (parse_two_digits(tail)?, 0),
        4 => (parse_two_digits(&tail[..2])?, parse_two_digits(&tail[2..])?),
        5 if &tail[2..3] == ":" => (parse_two_digits(&tail[..2])?, parse_two_digits(&tail[3..])?),
        _ => return None
    };
    if minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

// str::parse alone would also accept "+1" and "-1"
fn parse_two_digits(text: &str) -> Option<i64> {
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}
