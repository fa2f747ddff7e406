//! Domain Value Objects
//!
//! Immutable value types for the farmer registry.

use crate::error::{FarmerError, FarmerResult};
use std::fmt;

/// Highest height a farmer may report by default
pub const DEFAULT_MAX_HEIGHT: u64 = 200_000;

/// Reported storage progress of a farmer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height(u64);

impl Height {
    pub const ZERO: Height = Height(0);

    /// Parse a height path argument, bounded by `max`.
    ///
    /// Negative, non-numeric and too-large values are all out of range.
    pub fn parse(raw: &str, max: u64) -> FarmerResult<Self> {
        let out_of_range = || FarmerError::HeightOutOfRange {
            height: raw.to_string(),
            max,
        };

        let value = raw.trim().parse::<u64>().map_err(|_| out_of_range())?;
        if value > max {
            return Err(out_of_range());
        }
        Ok(Self(value))
    }

    /// Restore from database (no limit check)
    pub fn from_db(value: i64) -> Self {
        Self(value.max(0) as u64)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Lossless for any height accepted under a `HEIGHT_LIMIT` that fits BIGINT
    pub fn to_db(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audit response: a SHA-256 shaped hex digest, kept lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseHash(String);

impl ResponseHash {
    pub const LENGTH: usize = 64;

    pub fn parse(raw: &str) -> FarmerResult<Self> {
        let raw = raw.trim();
        if raw.len() != Self::LENGTH || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FarmerError::InvalidHash);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
