//! Request timestamp value object
//!
//! Clients send the `Date` header in RFC 2822 form (what HTTP clients and
//! `email.utils.formatdate` produce). RFC 3339 is accepted as well.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an RFC 2822 or RFC 3339 date: {0}")]
pub struct TimestampError(pub String);

/// A parsed `Date` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTimestamp(DateTime<Utc>);

impl RequestTimestamp {
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let raw = raw.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|ts| Self(ts.with_timezone(&Utc)))
            .map_err(|_| TimestampError(raw.to_string()))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Signed distance from `now`, positive when the timestamp lies in the past.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.0
    }

    /// `true` when `|now - timestamp| <= max_skew`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_skew: Duration) -> bool {
        self.age(now).abs() <= max_skew
    }
}

impl From<DateTime<Utc>> for RequestTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}
