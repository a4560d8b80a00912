//! Millisecond-precision timestamps with lenient parsing.
//!
//! Dates cross the API boundary as epoch milliseconds on output and are
//! accepted as either an integer millisecond timestamp or a handful of
//! common date string formats on input.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A UTC timestamp serialized as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochMillis(DateTime<Utc>);

impl EpochMillis {
    /// The current time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build from a millisecond timestamp. Out-of-range values are `None`.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Self)
    }

    /// Parse a date string. Accepts a bare millisecond timestamp,
    /// RFC 3339, plus a few date-only and date-time forms.
    pub fn parse(input: &str) -> Option<Self> {
        if let Ok(millis) = input.parse::<i64>() {
            return Self::from_millis(millis);
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
            return Some(Self(parsed.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
                return Some(Self(parsed.and_utc()));
            }
        }
        for format in ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"] {
            if let Ok(parsed) = NaiveDate::parse_from_str(input, format) {
                let midnight = parsed.and_hms_opt(0, 0, 0)?;
                return Some(Self(midnight.and_utc()));
            }
        }
        None
    }

    /// Epoch milliseconds.
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The underlying UTC datetime.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for EpochMillis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.millis())
    }
}

impl<'de> Deserialize<'de> for EpochMillis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EpochMillisVisitor)
    }
}

struct EpochMillisVisitor;

impl<'de> Visitor<'de> for EpochMillisVisitor {
    type Value = EpochMillis;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an epoch millisecond timestamp or a date string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        EpochMillis::from_millis(value)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {value}")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let millis = i64::try_from(value)
            .map_err(|_| E::custom(format!("timestamp out of range: {value}")))?;
        self.visit_i64(millis)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        self.visit_i64(value as i64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        EpochMillis::parse(value).ok_or_else(|| E::custom(format!("unparseable date: {value:?}")))
    }
}
