//! Packed date and datetime encodings.
//!
//! These encodings are shared with the on-disk format:
//!
//! - `Date24`: `year << 9 | month << 5 | day`, held in the low 24 bits.
//! - `Datetime64`: the decimal digits `YYYYMMDDhhmmss` as one integer,
//!   i.e. `YYYYMMDD * 10^6 + hhmmss`.
//!
//! The raw codecs do not validate; callers building literals go through
//! `FromStr` or the `chrono` conversions, which do.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PredicateError, Result};

/// Largest year representable in a [`Date24`].
pub const MAX_DATE_YEAR: u32 = (1 << 15) - 1;

/// Largest year representable in a [`Datetime64`] (four decimal digits).
pub const MAX_DATETIME_YEAR: u32 = 9999;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Packs a calendar date into its 24-bit encoding.
#[must_use]
pub const fn encode_date(year: u32, month: u32, day: u32) -> u32 {
    (year << 9) | (month << 5) | day
}

/// Unpacks a 24-bit date into `(year, month, day)`.
#[must_use]
pub const fn decode_date(packed: u32) -> (u32, u32, u32) {
    ((packed >> 9) & MAX_DATE_YEAR, (packed >> 5) & 0xF, packed & 0x1F)
}

/// Packs a calendar datetime into its `YYYYMMDDhhmmss` encoding.
#[must_use]
pub const fn encode_datetime(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> u64 {
    let date = year as u64 * 10_000 + month as u64 * 100 + day as u64;
    let time = hour as u64 * 10_000 + minute as u64 * 100 + second as u64;
    date * 1_000_000 + time
}

/// Unpacks a `YYYYMMDDhhmmss` datetime into `(year, month, day, hour, minute, second)`.
#[must_use]
pub const fn decode_datetime(packed: u64) -> (u32, u32, u32, u32, u32, u32) {
    let date = packed / 1_000_000;
    let time = packed % 1_000_000;
    (
        (date / 10_000) as u32,
        (date / 100 % 100) as u32,
        (date % 100) as u32,
        (time / 10_000) as u32,
        (time / 100 % 100) as u32,
        (time % 100) as u32,
    )
}

/// A date in the packed 24-bit column encoding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Date24(u32);

impl Date24 {
    /// Packs `(year, month, day)` without validation.
    #[must_use]
    pub const fn new(year: u32, month: u32, day: u32) -> Self {
        Date24(encode_date(year, month, day))
    }

    /// Wraps an already packed value.
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Date24(packed & 0x00FF_FFFF)
    }

    /// Returns the packed value.
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Returns `(year, month, day)`.
    #[must_use]
    pub const fn parts(self) -> (u32, u32, u32) {
        decode_date(self.0)
    }

    /// Packs a validated calendar date.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside `0..2^15`.
    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        let year = u32::try_from(date.year())
            .ok()
            .filter(|y| *y <= MAX_DATE_YEAR)
            .ok_or_else(|| {
                PredicateError::ConversionError(format!("date {date} is outside the DATE range"))
            })?;
        Ok(Date24::new(year, date.month(), date.day()))
    }

    /// Converts back to a calendar date, if the packed parts form one.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        let (year, month, day) = self.parts();
        NaiveDate::from_ymd_opt(year as i32, month, day)
    }
}

impl FromStr for Date24 {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
            PredicateError::InvalidLiteral {
                field_type: "DATE",
                literal: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Date24::from_naive(date)
    }
}

impl fmt::Display for Date24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.parts();
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

/// A datetime in the packed `YYYYMMDDhhmmss` column encoding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Datetime64(u64);

impl Datetime64 {
    /// Packs the six components without validation.
    #[must_use]
    pub const fn new(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Datetime64(encode_datetime(year, month, day, hour, minute, second))
    }

    /// Wraps an already packed value.
    #[must_use]
    pub const fn from_packed(packed: u64) -> Self {
        Datetime64(packed)
    }

    /// Returns the packed value.
    #[must_use]
    pub const fn packed(self) -> u64 {
        self.0
    }

    /// Returns `(year, month, day, hour, minute, second)`.
    #[must_use]
    pub const fn parts(self) -> (u32, u32, u32, u32, u32, u32) {
        decode_datetime(self.0)
    }

    /// Packs a validated calendar datetime. Sub-second precision is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside `0..=9999`.
    pub fn from_naive(datetime: NaiveDateTime) -> Result<Self> {
        let year = u32::try_from(datetime.year())
            .ok()
            .filter(|y| *y <= MAX_DATETIME_YEAR)
            .ok_or_else(|| {
                PredicateError::ConversionError(format!(
                    "datetime {datetime} is outside the DATETIME range"
                ))
            })?;
        Ok(Datetime64::new(
            year,
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            datetime.second(),
        ))
    }

    /// Converts back to a calendar datetime, if the packed parts form one.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        let (year, month, day, hour, minute, second) = self.parts();
        NaiveDate::from_ymd_opt(year as i32, month, day)?.and_hms_opt(hour, minute, second)
    }
}

impl FromStr for Datetime64 {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self> {
        let datetime = NaiveDateTime::parse_from_str(s.trim(), DATETIME_FORMAT).map_err(|e| {
            PredicateError::InvalidLiteral {
                field_type: "DATETIME",
                literal: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Datetime64::from_naive(datetime)
    }
}

impl fmt::Display for Datetime64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day, hour, minute, second) = self.parts();
        write!(
            f,
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_date_layout() {
        // 2017 * 512 + 9 * 32 + 7
        assert_eq!(encode_date(2017, 9, 7), 1_032_999);
        assert_eq!(decode_date(1_032_999), (2017, 9, 7));
    }

    #[test]
    fn test_encode_datetime_digits() {
        assert_eq!(encode_datetime(2017, 9, 9, 0, 0, 1), 20_170_909_000_001);
        assert_eq!(decode_datetime(20_170_909_235_959), (2017, 9, 9, 23, 59, 59));
    }

    #[test]
    fn test_date_parse_and_display() {
        let date: Date24 = "2017-09-10".parse().unwrap();
        assert_eq!(date.parts(), (2017, 9, 10));
        assert_eq!(date.to_string(), "2017-09-10");
        assert_eq!(date.to_naive(), NaiveDate::from_ymd_opt(2017, 9, 10));
    }

    #[test]
    fn test_date_parse_rejects_invalid_calendar_day() {
        assert!("2017-02-30".parse::<Date24>().is_err());
        assert!("2017-9".parse::<Date24>().is_err());
        assert!("not a date".parse::<Date24>().is_err());
    }

    #[test]
    fn test_datetime_parse_and_display() {
        let dt: Datetime64 = "2017-09-10 01:02:03".parse().unwrap();
        assert_eq!(dt.packed(), 20_170_910_010_203);
        assert_eq!(dt.to_string(), "2017-09-10 01:02:03");
    }

    #[test]
    fn test_datetime_parse_rejects_invalid_time() {
        assert!("2017-09-10 24:00:00".parse::<Datetime64>().is_err());
        assert!("2017-09-10".parse::<Datetime64>().is_err());
    }

    #[test]
    fn test_date_ordering_follows_calendar() {
        assert!(Date24::new(2017, 9, 30) < Date24::new(2017, 10, 1));
        assert!(Date24::new(2016, 12, 31) < Date24::new(2017, 1, 1));
    }
}
