//! Request document encoding.
//!
//! Absent optional values are omitted entirely. The authority rejects empty
//! optional elements, so every `Option` field is `skip_serializing_if` and
//! blank text reaches this layer as `None`.

use crate::domain::entities::{CorrelationRequest, NewDeclaration, RentalDetails, UpdateRequest};
use crate::infrastructure::aade::codec::XML_DECLARATION;
use crate::infrastructure::aade::error::{AadeError, AadeResult};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename = "NewDigitalClientDoc", rename_all = "camelCase")]
struct NewDeclarationXml<'a> {
    client_service_type: u8,
    entity_vat_number: &'a str,
    customer_vat_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rental: Option<RentalXml<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RentalXml<'a> {
    vehicle_reg_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_year: Option<u16>,
    rental_start_date_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_end_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_kilometers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_amount: Option<Decimal>,
}

impl<'a> From<&'a RentalDetails> for RentalXml<'a> {
    fn from(rental: &'a RentalDetails) -> Self {
        Self {
            vehicle_reg_number: rental.vehicle_reg_number(),
            vehicle_brand: rental.vehicle_brand(),
            vehicle_model: rental.vehicle_model(),
            vehicle_year: rental.vehicle_year(),
            rental_start_date_time: rental.start_time().to_iso_string(),
            estimated_end_date_time: rental.estimated_end_time().map(|t| t.to_iso_string()),
            start_kilometers: rental.start_odometer(),
            estimated_amount: rental.estimated_amount(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "UpdateClientDoc", rename_all = "camelCase")]
struct UpdateXml<'a> {
    entity_vat_number: &'a str,
    initial_dcl_id: u64,
    amount: Decimal,
    completion_date_time: String,
    invoice_kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_kilometers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rental_end_date_time: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "ClientCorrelationsDoc", rename_all = "camelCase")]
struct CorrelationXml<'a> {
    entity_vat_number: &'a str,
    mark: &'a str,
    correlated_dcl_ids: String,
}

/// Encodes a new declaration as a `NewDigitalClientDoc`.
///
/// The `rental` block is emitted only for rental declarations that carry
/// rental details.
///
/// # Errors
///
/// Returns [`AadeError::Encoding`] if serialization fails.
pub fn encode_new_declaration(doc: &NewDeclaration) -> AadeResult<String> {
    let xml = NewDeclarationXml {
        client_service_type: doc.service_type().code(),
        entity_vat_number: doc.entity_vat_number().as_str(),
        customer_vat_number: doc.customer_vat_number().as_str(),
        comments: doc.comments(),
        branch: doc.branch(),
        rental: doc.rental().map(RentalXml::from),
    };
    serialize(&xml)
}

/// Encodes a completion as an `UpdateClientDoc`.
///
/// # Errors
///
/// Returns [`AadeError::Encoding`] if serialization fails.
pub fn encode_update(req: &UpdateRequest) -> AadeResult<String> {
    let xml = UpdateXml {
        entity_vat_number: req.entity_vat_number.as_str(),
        initial_dcl_id: req.remote_id.get(),
        amount: req.final_amount,
        completion_date_time: req.completion_time.to_iso_string(),
        invoice_kind: req.invoice_kind.code(),
        end_kilometers: req.end_odometer,
        rental_end_date_time: req.actual_end_time.map(|t| t.to_iso_string()),
    };
    serialize(&xml)
}

/// Encodes an invoice correlation as a `ClientCorrelationsDoc`.
///
/// The declaration ids are sent as one comma-joined list.
///
/// # Errors
///
/// Returns [`AadeError::Encoding`] if serialization fails.
pub fn encode_correlation(req: &CorrelationRequest) -> AadeResult<String> {
    let correlated_dcl_ids = req
        .remote_ids()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let xml = CorrelationXml {
        entity_vat_number: req.entity_vat_number().as_str(),
        mark: req.invoice_mark(),
        correlated_dcl_ids,
    };
    serialize(&xml)
}

fn serialize<T: Serialize>(value: &T) -> AadeResult<String> {
    let body = quick_xml::se::to_string(value).map_err(|e| AadeError::encoding(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}
