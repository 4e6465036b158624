use std::{fmt, str::FromStr};

use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

pub use time::Duration;

/// An instant in time that remembers the UTC offset it was given with.
///
/// Comparisons are based on the instant only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub const fn from_offset_date_time(from: OffsetDateTime) -> Self {
        Self(from)
    }

    pub const fn to_offset_date_time(self) -> OffsetDateTime {
        self.0
    }

    pub fn from_seconds(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds).ok().map(Self)
    }

    pub const fn into_seconds(self) -> i64 {
        self.0.unix_timestamp()
    }

    #[must_use]
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration).map(Self)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self(from)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid date '{0}'")]
pub struct ParseTimestampError(String);

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    /// Accepts RFC 3339, a date-time without offset (taken as UTC)
    /// or a bare date (midnight UTC).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
            return Ok(Self(dt));
        }
        let with_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
        let without_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]");
        if let Ok(dt) = PrimitiveDateTime::parse(s, &with_seconds)
            .or_else(|_| PrimitiveDateTime::parse(s, &without_seconds))
        {
            return Ok(Self(dt.assume_utc()));
        }
        let date_only = format_description!("[year]-[month]-[day]");
        Date::parse(s, &date_only)
            .map(|date| Self(date.midnight().assume_utc()))
            .map_err(|_| ParseTimestampError(s.to_owned()))
    }
}
