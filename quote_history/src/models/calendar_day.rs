//! Calendar-day normalization.
//!
//! Every date the pipeline touches (provider timestamps, lookup targets,
//! horizon dates) is reduced to a [`CalendarDay`]: the UTC midnight instant of
//! the day the input falls on in UTC. Two instants on the same UTC day always
//! produce the identical value, so downstream code can compare days with `==`
//! and `<` without worrying about intraday jitter or the caller's time zone.
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use quote_history::models::calendar_day::{normalize, CalendarDay};
//!
//! // 2024-03-10 22:30 at UTC-05:00 is already 2024-03-11 in UTC.
//! let local = FixedOffset::west_opt(5 * 3600)
//!     .unwrap()
//!     .with_ymd_and_hms(2024, 3, 10, 22, 30, 0)
//!     .unwrap();
//! assert_eq!(normalize(local), CalendarDay::from_ymd(2024, 3, 11).unwrap());
//! ```

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// ISO-8601 calendar date, the only textual form a [`CalendarDay`] takes.
const DAY_FORMAT: &str = "%Y-%m-%d";

/// A date with no time-of-day component, stored as its UTC midnight instant.
///
/// The inner instant is always 00:00:00 UTC; the only way to build one is
/// through [`normalize`] or the constructors below, which all go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(DateTime<Utc>);

/// Anything that denotes an instant and can therefore be placed on a UTC day.
pub trait DateLike {
    /// The instant this value denotes, in UTC.
    fn to_utc(&self) -> DateTime<Utc>;
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn to_utc(&self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

/// A bare date is taken to mean that day in UTC.
impl DateLike for NaiveDate {
    fn to_utc(&self) -> DateTime<Utc> {
        self.and_time(NaiveTime::MIN).and_utc()
    }
}

/// A naive timestamp is interpreted as UTC wall time.
impl DateLike for NaiveDateTime {
    fn to_utc(&self) -> DateTime<Utc> {
        self.and_utc()
    }
}

impl DateLike for CalendarDay {
    fn to_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn to_utc(&self) -> DateTime<Utc> {
        (**self).to_utc()
    }
}

/// Reduces any date-like value to the UTC midnight of its UTC calendar day.
///
/// Pure and total. `normalize(normalize(x)) == normalize(x)` for every `x`.
pub fn normalize<D: DateLike>(d: D) -> CalendarDay {
    CalendarDay::from_date(d.to_utc().date_naive())
}

impl CalendarDay {
    fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Builds a day from its components; `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_date)
    }

    /// The day containing the given Unix timestamp (seconds).
    ///
    /// `None` when the timestamp is outside chrono's representable range.
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(normalize)
    }

    /// The current UTC day.
    pub fn today() -> Self {
        normalize(Utc::now())
    }

    /// The UTC midnight instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Seconds since the Unix epoch of this day's midnight.
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// The following day, or `None` on chrono's last representable day.
    pub fn checked_succ(&self) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(1)).map(Self)
    }

    /// The following day. Saturates at chrono's maximum date.
    pub fn succ(&self) -> Self {
        self.checked_succ().unwrap_or(*self)
    }

    /// `days` days earlier, or `None` when that is before chrono's minimum date.
    pub fn checked_days_back(&self, days: u32) -> Option<Self> {
        self.0.checked_sub_signed(Duration::days(i64::from(days))).map(Self)
    }

    /// Saturates at chrono's minimum date, like [`months_back`](Self::months_back).
    pub fn days_back(&self, days: u32) -> Self {
        self.checked_days_back(days)
            .unwrap_or_else(|| Self::from_date(NaiveDate::MIN))
    }

    /// Calendar arithmetic: the same day-of-month `months` months earlier,
    /// clamped to the last day of the target month (Mar 31 - 1M = Feb 28/29).
    /// Saturates at chrono's minimum date.
    pub fn months_back(&self, months: u32) -> Self {
        let date = self
            .date()
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self::from_date(date)
    }

    /// Same as [`months_back`](Self::months_back) in whole years, so Feb 29
    /// goes to Feb 28 of a non-leap year.
    pub fn years_back(&self, years: u32) -> Self {
        self.months_back(years.saturating_mul(12))
    }

    /// January 1st of this day's year.
    pub fn start_of_year(&self) -> Self {
        Self::from_ymd(self.0.year(), 1, 1).unwrap_or(*self)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for CalendarDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT).map(Self::from_date)
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
