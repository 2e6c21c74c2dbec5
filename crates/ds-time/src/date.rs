//! `Date` type.
//!
//! Dates are stored as a serial number of days, serial 1 being
//! January 1, 1900 (a Monday). The valid range is 1900-01-01 to 9999-12-31.
//!
//! A `Date` is a plain calendar date: there is no time of day and no time
//! zone, so two dates compare equal exactly when their ISO strings do.
//! `Display` and `FromStr` both use the zero-padded `YYYY-MM-DD` form that
//! every entity record carries.

use crate::weekday::Weekday;
use ds_core::errors::{Error, Result};

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// First supported year.
    pub const MIN_YEAR: u16 = 1900;

    /// Last supported year.
    pub const MAX_YEAR: u16 = 9999;

    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(2_958_464);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [{}, {}]",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Create a date from components already known to be valid.
    pub(crate) fn from_ymd_unchecked(year: u16, month: u8, day: u8) -> Self {
        debug_assert!(
            (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year)
                && (1..=12).contains(&month)
                && day >= 1
                && day <= days_in_month(year, month),
            "invalid date {year}-{month:02}-{day:02}"
        );
        Date(serial_from_ymd(year, month, day))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1900–9999).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)` in one decomposition.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // serial 1 → Monday, serial 2 → Tuesday, …
        let w = ((self.0 - 1).rem_euclid(7) + 1) as u8;
        match Weekday::from_ordinal(w) {
            Some(day) => day,
            None => unreachable!("rem_euclid always in 1..=7"),
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days, returning `None` outside the valid range.
    pub fn checked_add_days(self, n: i32) -> Option<Self> {
        let serial = self.0.checked_add(n)?;
        let d = Date(serial);
        (Self::MIN..=Self::MAX).contains(&d).then_some(d)
    }

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        self.checked_add_days(n).ok_or_else(|| {
            Error::Date(format!("date arithmetic: {self} + {n} days out of range"))
        })
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the *n*-th occurrence of `weekday` in the month of `year`/`month`.
    ///
    /// For example, `nth_weekday(2, Weekday::Monday, 2024, 1)` returns the
    /// second Monday of January 2024 (2024-01-08).
    ///
    /// # Errors
    /// Returns an error if the result is out of the valid date range or if `n`
    /// is zero or larger than the number of such weekdays in the month.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: u16, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::Date("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?;
        // Days to advance from the 1st to reach the first occurrence.
        let skip = (weekday.index() as i32 - first.weekday().index() as i32).rem_euclid(7) as u8;
        let day = 1 + skip + 7 * (n - 1);
        if day > days_in_month(year, month) {
            return Err(Error::Date(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}"
            )));
        }
        Date::from_ymd(year, month, day)
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Formatting & parsing ──────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    /// Parse a zero-padded ISO `YYYY-MM-DD` string.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(Error::Date(format!("expected YYYY-MM-DD, got {s:?}")));
        }
        // All ten bytes are ASCII, so slicing cannot split a character.
        let field = |range: std::ops::Range<usize>| -> Result<u16> {
            s[range]
                .parse::<u16>()
                .map_err(|e| Error::Date(format!("{s:?}: {e}")))
        };
        let year = field(0..4)?;
        let month = field(5..7)?;
        let day = field(8..10)?;
        Date::from_ymd(year, month as u8, day as u8)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional date, reading `null` and `""` as `None`.
///
/// For use with `#[serde(deserialize_with = "...")]` on `Option<Date>` fields
/// where a blank value means "open-ended".
#[cfg(feature = "serde")]
pub fn deserialize_optional<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Date>, D::Error> {
    let s = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Convert (year, month, day) to a serial number. Serial 1 = 1900-01-01.
fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32;
    let m = month as i32;
    let d = day as i32;

    // Days in years 1900..year
    let mut serial = (y - 1900) * 365;
    // Leap days in [1900, year); 1900 itself is not a leap year
    serial += (y - 1901) / 4 - (y - 1901) / 100 + (y - 1601) / 400;
    serial += MONTH_OFFSET[m as usize - 1] as i32;
    if m > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial += d;
    serial
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    // Estimate, then walk until the serial falls within the year.
    let mut y = (serial / 365 + 1900) as u16;
    loop {
        if serial < serial_from_ymd(y, 1, 1) {
            y -= 1;
        } else if serial >= serial_from_ymd(y + 1, 1, 1) {
            y += 1;
        } else {
            break;
        }
    }
    let mut remaining = serial - serial_from_ymd(y, 1, 1) + 1;
    let mut m = 1u8;
    loop {
        let days = days_in_month(y, m) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        m += 1;
    }
    (y, m, remaining as u8)
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let d = Date::from_ymd(1900, 1, 1).unwrap();
        assert_eq!(d.serial(), 1);
        assert_eq!(d, Date::MIN);
        assert_eq!(d.weekday(), Weekday::Monday);
    }

    #[test]
    fn test_max() {
        assert_eq!(Date::from_ymd(9999, 12, 31).unwrap(), Date::MAX);
        assert_eq!(Date::MAX.checked_add_days(1), None);
        assert!(Date::from_ymd(10000, 1, 1).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let dates = [
            (1900, 1, 1),
            (1900, 12, 31),
            (2000, 2, 29),
            (2100, 2, 28),
            (2024, 7, 24),
            (2199, 12, 31),
            (9999, 12, 31),
        ];
        for (y, m, d) in dates {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!(date.ymd(), (y, m, d), "mismatch for {y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_weekday() {
        // 2024-01-01 is a Monday, 2024-06-30 a Sunday
        assert_eq!(Date::from_ymd(2024, 1, 1).unwrap().weekday(), Weekday::Monday);
        assert_eq!(Date::from_ymd(2024, 6, 30).unwrap().weekday(), Weekday::Sunday);
        assert_eq!(Date::from_ymd(2025, 3, 1).unwrap().weekday(), Weekday::Saturday);
    }

    #[test]
    fn test_display_and_parse() {
        let d = Date::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(d.to_string(), "2024-03-05");
        assert_eq!("2024-03-05".parse::<Date>().unwrap(), d);
        assert_eq!(format!("{d:?}"), "Date(2024-03-05)");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["2024-3-5", "2024/03/05", "2024-02-30", "abcd-01-01", "", "2024-13-01"] {
            assert!(bad.parse::<Date>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_arithmetic() {
        let d = Date::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(d.add_days(1).unwrap(), Date::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(Date::from_ymd(2023, 2, 1).unwrap() - Date::from_ymd(2023, 1, 1).unwrap(), 31);
        assert!(Date::MIN.add_days(-1).is_err());
    }

    #[test]
    fn test_nth_weekday() {
        // 2nd Monday of January 2024 = January 8
        let d = Date::nth_weekday(2, Weekday::Monday, 2024, 1).unwrap();
        assert_eq!(d, Date::from_ymd(2024, 1, 8).unwrap());

        // September 1, 2024 is a Sunday: 3rd Monday = September 16
        let d2 = Date::nth_weekday(3, Weekday::Monday, 2024, 9).unwrap();
        assert_eq!(d2, Date::from_ymd(2024, 9, 16).unwrap());

        // 5th Monday of January 2024 = January 29
        let d3 = Date::nth_weekday(5, Weekday::Monday, 2024, 1).unwrap();
        assert_eq!(d3, Date::from_ymd(2024, 1, 29).unwrap());
    }

    #[test]
    fn test_nth_weekday_out_of_range() {
        assert!(Date::nth_weekday(5, Weekday::Wednesday, 2024, 2).is_err());
        assert!(Date::nth_weekday(0, Weekday::Monday, 2024, 1).is_err());
    }
}
