//! # Identifiers
//!
//! Identity types for declarations.
//!
//! - [`ContractId`]: caller-owned rental contract identifier
//! - [`RemoteId`]: authority-assigned declaration identifier (the "DCL ID")

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the rental contract that owns a declaration.
///
/// Contract ids are assigned by the contract store, not by this crate, so
/// any non-empty string is accepted.
///
/// # Examples
///
/// ```
/// use aade_digital_client::domain::value_objects::ContractId;
///
/// let id = ContractId::new("contract-42");
/// assert_eq!(id.as_str(), "contract-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    /// Creates a contract id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContractId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContractId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Declaration identifier assigned by the authority on acceptance.
///
/// # Examples
///
/// ```
/// use aade_digital_client::domain::value_objects::RemoteId;
///
/// let id: RemoteId = "555".parse().unwrap();
/// assert_eq!(id.get(), 555);
/// assert_eq!(id.to_string(), "555");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(u64);

impl RemoteId {
    /// Wraps a raw DCL id.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RemoteId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for RemoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}
