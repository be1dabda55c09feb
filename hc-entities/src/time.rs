use std::{
    fmt,
    ops::{Add, Sub},
};

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

pub use time::{Date, Duration};

const DATE_FORMAT: &[FormatItem] = format_description!("[year]-[month]-[day]");

/// A point in time with millisecond precision (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_millis(OffsetDateTime::now_utc().unix_timestamp_nanos() as i64 / 1_000_000)
    }

    pub fn from_millis(millis: i64) -> Self {
        let nanos = i128::from(millis) * 1_000_000;
        Self(OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH))
    }

    pub fn from_secs(secs: i64) -> Self {
        Self::from_millis(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn as_secs(self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn date(self) -> Date {
        self.0.date()
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self::from_millis((from.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;
    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current date in UTC.
pub fn today() -> Date {
    Timestamp::now().date()
}

pub fn format_date(date: Date) -> String {
    // The format description only contains components of a date
    date.format(DATE_FORMAT).unwrap_or_default()
}

pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s.trim(), DATE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn millis_round_trip() {
        let t1 = Timestamp::now();
        let t2 = Timestamp::from_millis(t1.as_millis());
        assert_eq!(t1, t2);
    }

    #[test]
    fn seconds_are_truncated_millis() {
        let t = Timestamp::from_millis(1_234_567);
        assert_eq!(t.as_secs(), 1_234);
        assert_eq!(Timestamp::from_secs(1_234).as_millis(), 1_234_000);
    }

    #[test]
    fn format_and_parse_dates() {
        let d = date!(2020 - 02 - 29);
        assert_eq!(format_date(d), "2020-02-29");
        assert_eq!(parse_date("2020-02-29").unwrap(), d);
        assert!(parse_date("2020-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn add_and_subtract_durations() {
        let t = Timestamp::from_secs(100);
        assert_eq!((t + Duration::seconds(5)).as_secs(), 105);
        assert_eq!((t - Duration::seconds(5)).as_secs(), 95);
    }
}
