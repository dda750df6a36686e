//! # Declaration
//!
//! Input for a new declaration and the fully-resolved document sent to the
//! authority.
//!
//! [`DeclarationInput`] is what callers supply per contract. It is stored as a
//! snapshot on the submission record so a later resync can replay it.
//! [`NewDeclaration`] adds the reporting entity's tax number from
//! configuration and carries validated tax numbers.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{ServiceType, TaxNumber, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle and timing details of a rental.
///
/// # Examples
///
/// ```
/// use aade_digital_client::domain::entities::RentalDetails;
/// use aade_digital_client::domain::value_objects::Timestamp;
///
/// let start = Timestamp::parse("2024-06-01T09:00:00Z").unwrap();
/// let rental = RentalDetails::new("ABC-1234", start)
///     .with_brand("Toyota")
///     .with_start_odometer(12_500);
/// assert_eq!(rental.vehicle_reg_number(), "ABC-1234");
/// assert_eq!(rental.vehicle_model(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDetails {
    vehicle_reg_number: String,
    vehicle_brand: Option<String>,
    vehicle_model: Option<String>,
    vehicle_year: Option<u16>,
    start_time: Timestamp,
    estimated_end_time: Option<Timestamp>,
    start_odometer: Option<u32>,
    estimated_amount: Option<Decimal>,
}

impl RentalDetails {
    /// Creates rental details with the required plate and start time.
    #[must_use]
    pub fn new(vehicle_reg_number: impl Into<String>, start_time: Timestamp) -> Self {
        Self {
            vehicle_reg_number: vehicle_reg_number.into(),
            vehicle_brand: None,
            vehicle_model: None,
            vehicle_year: None,
            start_time,
            estimated_end_time: None,
            start_odometer: None,
            estimated_amount: None,
        }
    }

    /// Sets the vehicle brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.vehicle_brand = non_blank(brand.into());
        self
    }

    /// Sets the vehicle model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.vehicle_model = non_blank(model.into());
        self
    }

    /// Sets the vehicle model year.
    #[must_use]
    pub fn with_year(mut self, year: u16) -> Self {
        self.vehicle_year = Some(year);
        self
    }

    /// Sets the estimated return time.
    #[must_use]
    pub fn with_estimated_end(mut self, end: Timestamp) -> Self {
        self.estimated_end_time = Some(end);
        self
    }

    /// Sets the odometer reading at pickup.
    #[must_use]
    pub fn with_start_odometer(mut self, km: u32) -> Self {
        self.start_odometer = Some(km);
        self
    }

    /// Sets the estimated total amount.
    #[must_use]
    pub fn with_estimated_amount(mut self, amount: Decimal) -> Self {
        self.estimated_amount = Some(amount);
        self
    }

    /// Returns the vehicle registration plate.
    #[inline]
    #[must_use]
    pub fn vehicle_reg_number(&self) -> &str {
        &self.vehicle_reg_number
    }

    /// Returns the vehicle brand.
    #[inline]
    #[must_use]
    pub fn vehicle_brand(&self) -> Option<&str> {
        self.vehicle_brand.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Returns the vehicle model.
    #[inline]
    #[must_use]
    pub fn vehicle_model(&self) -> Option<&str> {
        self.vehicle_model.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Returns the vehicle model year.
    #[inline]
    #[must_use]
    pub fn vehicle_year(&self) -> Option<u16> {
        self.vehicle_year
    }

    /// Returns the rental start.
    #[inline]
    #[must_use]
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Returns the estimated return time.
    #[inline]
    #[must_use]
    pub fn estimated_end_time(&self) -> Option<Timestamp> {
        self.estimated_end_time
    }

    /// Returns the odometer reading at pickup.
    #[inline]
    #[must_use]
    pub fn start_odometer(&self) -> Option<u32> {
        self.start_odometer
    }

    /// Returns the estimated total amount.
    #[inline]
    #[must_use]
    pub fn estimated_amount(&self) -> Option<Decimal> {
        self.estimated_amount
    }
}

/// Caller-supplied content of a declaration.
///
/// The customer tax number is kept as entered so that the orchestrator can
/// report the exact rejected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationInput {
    service_type: ServiceType,
    customer_vat_number: String,
    comments: Option<String>,
    branch: Option<u32>,
    rental: Option<RentalDetails>,
}

impl DeclarationInput {
    /// Creates an input for the given service type.
    #[must_use]
    pub fn new(service_type: ServiceType, customer_vat_number: impl Into<String>) -> Self {
        Self {
            service_type,
            customer_vat_number: customer_vat_number.into(),
            comments: None,
            branch: None,
            rental: None,
        }
    }

    /// Creates a rental declaration input.
    #[must_use]
    pub fn rental(customer_vat_number: impl Into<String>, rental: RentalDetails) -> Self {
        Self::new(ServiceType::Rental, customer_vat_number).with_rental(rental)
    }

    /// Sets a free-text comment.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = non_blank(comments.into());
        self
    }

    /// Sets the branch number of the reporting entity.
    #[must_use]
    pub fn with_branch(mut self, branch: u32) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Attaches rental details.
    #[must_use]
    pub fn with_rental(mut self, rental: RentalDetails) -> Self {
        self.rental = Some(rental);
        self
    }

    /// Returns the service type.
    #[inline]
    #[must_use]
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the customer tax number as entered.
    #[inline]
    #[must_use]
    pub fn customer_vat_number(&self) -> &str {
        &self.customer_vat_number
    }

    /// Returns the comment.
    #[inline]
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Returns the branch number.
    #[inline]
    #[must_use]
    pub fn branch(&self) -> Option<u32> {
        self.branch
    }

    /// Returns the rental details.
    #[inline]
    #[must_use]
    pub fn rental_details(&self) -> Option<&RentalDetails> {
        self.rental.as_ref()
    }

    /// Checks the local preconditions of a submission.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidTaxNumber`] if the customer tax number is not nine digits
    /// - [`DomainError::EmptyField`] if a rental declaration has a blank plate
    pub fn validate(&self) -> DomainResult<TaxNumber> {
        let customer = TaxNumber::parse(self.customer_vat_number.clone())?;
        let blank_plate = self.service_type == ServiceType::Rental
            && self
                .rental
                .as_ref()
                .is_some_and(|rental| rental.vehicle_reg_number.trim().is_empty());
        if blank_plate {
            return Err(DomainError::EmptyField("vehicle registration number"));
        }
        Ok(customer)
    }
}

/// A declaration ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeclaration {
    service_type: ServiceType,
    entity_vat_number: TaxNumber,
    customer_vat_number: TaxNumber,
    comments: Option<String>,
    branch: Option<u32>,
    rental: Option<RentalDetails>,
}

impl NewDeclaration {
    /// Resolves an input against the reporting entity.
    ///
    /// # Errors
    ///
    /// Propagates [`DeclarationInput::validate`] failures.
    pub fn from_input(entity_vat_number: TaxNumber, input: &DeclarationInput) -> DomainResult<Self> {
        let customer_vat_number = input.validate()?;
        Ok(Self {
            service_type: input.service_type,
            entity_vat_number,
            customer_vat_number,
            comments: input.comments.clone(),
            branch: input.branch,
            rental: input.rental.clone(),
        })
    }

    /// Returns the service type.
    #[inline]
    #[must_use]
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the reporting entity's tax number.
    #[inline]
    #[must_use]
    pub fn entity_vat_number(&self) -> &TaxNumber {
        &self.entity_vat_number
    }

    /// Returns the customer's tax number.
    #[inline]
    #[must_use]
    pub fn customer_vat_number(&self) -> &TaxNumber {
        &self.customer_vat_number
    }

    /// Returns the comment.
    #[inline]
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Returns the branch number.
    #[inline]
    #[must_use]
    pub fn branch(&self) -> Option<u32> {
        self.branch
    }

    /// Returns the rental block, only for rental declarations.
    ///
    /// Details attached to a non-rental service type are ignored.
    #[must_use]
    pub fn rental(&self) -> Option<&RentalDetails> {
        match self.service_type {
            ServiceType::Rental => self.rental.as_ref(),
            ServiceType::ParkingOrWash | ServiceType::Garage => None,
        }
    }
}

/// Blank optional text is stored as absent.
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}
