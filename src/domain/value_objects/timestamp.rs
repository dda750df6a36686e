//! # Timestamp Value Object
//!
//! UTC point in time with the wire formatting the authority expects.
//!
//! # Examples
//!
//! ```
//! use aade_digital_client::domain::value_objects::Timestamp;
//!
//! let ts = Timestamp::parse("2024-06-01T09:00:00Z").unwrap();
//! assert_eq!(ts.to_iso_string(), "2024-06-01T09:00:00.000Z");
//! ```

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// # Invariants
///
/// - Always in UTC timezone
/// - Rendered on the wire with millisecond precision and a `Z` suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use aade_digital_client::domain::value_objects::Timestamp;
    ///
    /// let ts = Timestamp::from_millis(1717232400000).unwrap();
    /// assert_eq!(ts.to_iso_string(), "2024-06-01T09:00:00.000Z");
    /// ```
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Parses an RFC 3339 / ISO-8601 string with any offset, normalizing to UTC.
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error if the string is not RFC 3339.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value.trim()).map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Formats as `YYYY-MM-DDTHH:MM:SS.sssZ`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns the inner chrono value.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn iso_string_keeps_milliseconds() {
        let ts = Timestamp::from_millis(1_717_232_400_123).unwrap();
        assert_eq!(ts.to_iso_string(), "2024-06-01T09:00:00.123Z");
    }

    #[test]
    fn parse_normalizes_offset_to_utc() {
        let ts = Timestamp::parse("2024-06-01T12:00:00+03:00").unwrap();
        assert_eq!(ts.to_iso_string(), "2024-06-01T09:00:00.000Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn display_matches_wire_format() {
        let ts = Timestamp::parse("2024-01-02T03:04:05.006Z").unwrap();
        assert_eq!(ts.to_string(), "2024-01-02T03:04:05.006Z");
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::from_millis(1_000).unwrap();
        let b = Timestamp::from_millis(2_000).unwrap();
        assert!(a < b);
    }
}
