//! # Domain Enums
//!
//! Enumeration types shared by the codec and the orchestrator:
//!
//! - [`ServiceType`] - kind of service being declared
//! - [`InvoiceKind`] - document that closes out a completed declaration
//! - [`AadeStatusCode`] - status reported in the authority's response envelope
//!
//! The numeric enums carry their wire codes as `#[repr(u8)]` discriminants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Service category of a declaration.
///
/// # Examples
///
/// ```
/// use aade_digital_client::domain::value_objects::ServiceType;
///
/// assert_eq!(ServiceType::Rental.code(), 1);
/// assert_eq!(ServiceType::from_code(3), Some(ServiceType::Garage));
/// assert_eq!(ServiceType::Rental.to_string(), "RENTAL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ServiceType {
    /// Vehicle rental.
    #[default]
    Rental = 1,
    /// Parking or car wash.
    ParkingOrWash = 2,
    /// Garage or repair shop.
    Garage = 3,
}

impl ServiceType {
    /// Returns the wire code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a wire code back to a service type.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Rental),
            2 => Some(Self::ParkingOrWash),
            3 => Some(Self::Garage),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rental => write!(f, "RENTAL"),
            Self::ParkingOrWash => write!(f, "PARKING_OR_WASH"),
            Self::Garage => write!(f, "GARAGE"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "1" | "RENTAL" => Ok(Self::Rental),
            "2" | "PARKING_OR_WASH" | "PARKING" | "WASH" => Ok(Self::ParkingOrWash),
            "3" | "GARAGE" => Ok(Self::Garage),
            _ => Err(ParseEnumError::InvalidValue("ServiceType", s.to_string())),
        }
    }
}

/// Fiscal document issued when a declaration is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum InvoiceKind {
    /// Retail receipt.
    Receipt = 1,
    /// Business invoice.
    Invoice = 2,
}

impl InvoiceKind {
    /// Returns the wire code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Receipt => write!(f, "RECEIPT"),
            Self::Invoice => write!(f, "INVOICE"),
        }
    }
}

impl FromStr for InvoiceKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1" | "RECEIPT" => Ok(Self::Receipt),
            "2" | "INVOICE" => Ok(Self::Invoice),
            _ => Err(ParseEnumError::InvalidValue("InvoiceKind", s.to_string())),
        }
    }
}

/// Status code of a response envelope.
///
/// Parsing is exact: the authority sends these names verbatim.
///
/// # Examples
///
/// ```
/// use aade_digital_client::domain::value_objects::AadeStatusCode;
///
/// let code: AadeStatusCode = "ValidationError".parse().unwrap();
/// assert!(!code.is_success());
/// assert_eq!(code.as_str(), "ValidationError");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AadeStatusCode {
    /// The document was accepted.
    Success,
    /// The request body was not well-formed XML.
    #[serde(rename = "XMLSyntaxError")]
    XmlSyntaxError,
    /// The document failed business validation.
    ValidationError,
    /// The authority failed internally.
    TechnicalError,
}

impl AadeStatusCode {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::XmlSyntaxError => "XMLSyntaxError",
            Self::ValidationError => "ValidationError",
            Self::TechnicalError => "TechnicalError",
        }
    }

    /// Returns true for [`AadeStatusCode::Success`].
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for AadeStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AadeStatusCode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Success" => Ok(Self::Success),
            "XMLSyntaxError" => Ok(Self::XmlSyntaxError),
            "ValidationError" => Ok(Self::ValidationError),
            "TechnicalError" => Ok(Self::TechnicalError),
            _ => Err(ParseEnumError::InvalidValue("AadeStatusCode", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
