//! `WARC-Date` values: UTC, second precision.

use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// A record timestamp, normalized to UTC and truncated to whole seconds.
///
/// Displays as `2010-12-26T10:11:12Z`. Parses from the ISO 8601 form with or
/// without the trailing `Z`, or from a 14-digit `YYYYMMDDhhmmss` timestamp.
///
/// ```
/// use warcit_warc::date::WarcDate;
///
/// let date: WarcDate = "2010-12-26T10:11:12".parse().unwrap();
/// assert_eq!(date.to_string(), "2010-12-26T10:11:12Z");
/// assert_eq!("20101226101112".parse::<WarcDate>().unwrap(), date);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WarcDate(OffsetDateTime);
impl WarcDate {
    /// The current time.
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    fn parse_digits(input: &str) -> Option<OffsetDateTime> {
        if input.len() != 14 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let field = |range: std::ops::Range<usize>| input[range].parse::<u8>().ok();
        let year = input[0..4].parse::<i32>().ok()?;
        let month = Month::try_from(field(4..6)?).ok()?;
        let date = Date::from_calendar_date(year, month, field(6..8)?).ok()?;
        let time = Time::from_hms(field(8..10)?, field(10..12)?, field(12..14)?).ok()?;
        Some(PrimitiveDateTime::new(date, time).assume_utc())
    }
}

impl From<OffsetDateTime> for WarcDate {
    fn from(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        // Zero nanoseconds is always in range.
        Self(utc.replace_nanosecond(0).unwrap_or(utc))
    }
}

impl FromStr for WarcDate {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        if let Some(parsed) = Self::parse_digits(input) {
            return Ok(parsed.into());
        }
        let iso = input.strip_suffix('Z').unwrap_or(input);
        let parsed = PrimitiveDateTime::parse(iso, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
            .or_raise(|| ErrorKind::InvalidDate(s.to_string()))?;
        Ok(parsed.assume_utc().into())
    }
}

impl Display for WarcDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // RFC 3339 renders a UTC offset as `Z` and omits zero sub-seconds.
        let formatted = self.0.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    #[rstest]
    #[case("2010-12-26T10:11:12", "2010-12-26T10:11:12Z")]
    #[case("2010-12-26T10:11:12Z", "2010-12-26T10:11:12Z")]
    #[case(" 2017-10-17T14:30:26 ", "2017-10-17T14:30:26Z")]
    #[case("20101226101112", "2010-12-26T10:11:12Z")]
    fn test_parse(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(input.parse::<WarcDate>().unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2010-12-26")]
    #[case("2010-13-26T10:11:12")]
    #[case("20101326101112")]
    #[case("2010122610111")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = input.parse::<WarcDate>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidDate(_)));
    }

    #[test]
    fn test_normalized_to_utc_seconds() {
        let date = WarcDate::from(datetime!(2010-12-26 12:11:12.987 +02:00));
        assert_eq!(date.to_string(), "2010-12-26T10:11:12Z");
        assert_eq!(date.as_offset_date_time(), datetime!(2010-12-26 10:11:12 UTC));
    }
}
