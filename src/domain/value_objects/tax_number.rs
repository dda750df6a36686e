//! # Tax Number
//!
//! Greek tax identification number (AFM) used for both the reporting entity
//! and the customer of a declaration.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a tax number.
pub const TAX_NUMBER_LEN: usize = 9;

/// Returns true if `value` is exactly nine ASCII digits.
///
/// No checksum is applied; the authority performs its own validation.
///
/// # Examples
///
/// ```
/// use aade_digital_client::domain::value_objects::is_valid_tax_number;
///
/// assert!(is_valid_tax_number("123456789"));
/// assert!(!is_valid_tax_number("1234567890"));
/// assert!(!is_valid_tax_number("12345678a"));
/// ```
#[must_use]
pub fn is_valid_tax_number(value: &str) -> bool {
    value.len() == TAX_NUMBER_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// A validated nine-digit tax number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxNumber(String);

impl TaxNumber {
    /// Validates and wraps a tax number.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTaxNumber`] unless the value is nine digits.
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if is_valid_tax_number(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidTaxNumber(value))
        }
    }

    /// Returns the digits as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaxNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TaxNumber> for String {
    fn from(value: TaxNumber) -> Self {
        value.0
    }
}
