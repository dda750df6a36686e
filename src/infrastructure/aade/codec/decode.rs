//! Response document decoding.

use crate::domain::value_objects::{AadeStatusCode, RemoteId, ServiceType};
use crate::infrastructure::aade::codec::xml_tree::{XmlElement, parse_document, to_array};
use crate::infrastructure::aade::error::{AadeError, AadeResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `{code, message}` entry reported by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadeErrorDetail {
    /// Authority error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for AadeErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// The identifier a successful operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseId {
    /// `newClientDclID` from `SendClient`.
    NewDeclaration(RemoteId),
    /// `updatedClientDclID` from `UpdateClient`.
    Updated(RemoteId),
    /// `cancellationID` from `CancelClient`.
    Cancellation(u64),
}

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadeResponse {
    /// Envelope status code.
    pub status_code: AadeStatusCode,
    /// Reported errors, always a sequence.
    pub errors: Vec<AadeErrorDetail>,
    /// Identifier returned by the operation, if any.
    pub id: Option<ResponseId>,
}

impl AadeResponse {
    /// Returns true if the status code is `Success`.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    /// Returns the `newClientDclID`, if present.
    #[must_use]
    pub fn new_remote_id(&self) -> Option<RemoteId> {
        match self.id {
            Some(ResponseId::NewDeclaration(id)) => Some(id),
            _ => None,
        }
    }

    /// Returns the `updatedClientDclID`, if present.
    #[must_use]
    pub fn updated_remote_id(&self) -> Option<RemoteId> {
        match self.id {
            Some(ResponseId::Updated(id)) => Some(id),
            _ => None,
        }
    }

    /// Returns the `cancellationID`, if present.
    #[must_use]
    pub fn cancellation_id(&self) -> Option<u64> {
        match self.id {
            Some(ResponseId::Cancellation(id)) => Some(id),
            _ => None,
        }
    }

    /// Joins the error messages for display and persistence.
    ///
    /// Falls back to the status code when the authority sent no messages.
    #[must_use]
    pub fn error_message(&self) -> String {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
            .collect();
        if messages.is_empty() {
            format!("authority returned {}", self.status_code)
        } else {
            messages.join(", ")
        }
    }
}

/// One declaration as listed by `RequestClients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDeclaration {
    /// Authority-assigned id.
    pub remote_id: RemoteId,
    /// Service type, if reported.
    pub service_type: Option<ServiceType>,
    /// Customer tax number.
    pub customer_vat_number: Option<String>,
    /// Vehicle plate.
    pub vehicle_reg_number: Option<String>,
    /// Rental start as sent on the wire.
    pub rental_start: Option<String>,
    /// Final or estimated amount.
    pub amount: Option<Decimal>,
    /// Cancellation id, if the declaration was cancelled.
    pub cancellation_id: Option<u64>,
    /// Correlated invoice mark.
    pub invoice_mark: Option<String>,
}

impl ClientDeclaration {
    /// Returns true if the declaration was cancelled.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation_id.is_some()
    }
}

/// Decoded `RequestClients` page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientList {
    /// Entity the listing belongs to.
    pub entity_vat_number: Option<String>,
    /// Declarations on this page.
    pub declarations: Vec<ClientDeclaration>,
    /// Token for the next page, if more remain.
    pub continuation_token: Option<String>,
}

/// Decodes a `SendClient` / `UpdateClient` / `CancelClient` /
/// `ClientCorrelations` response envelope.
///
/// # Errors
///
/// Returns [`AadeError::Protocol`] if the document is malformed, the
/// `response` element or its `statusCode` is missing, the status code is
/// unknown, or more than one identifier kind is present.
pub fn decode_response(xml: &str) -> AadeResult<AadeResponse> {
    let root = parse_document(xml)?;
    let response = root
        .child("response")
        .ok_or_else(|| AadeError::protocol(format!("missing <response> in <{}>", root.name())))?;

    let status_text = response
        .child_text("statusCode")
        .ok_or_else(|| AadeError::protocol("missing <statusCode> in <response>"))?;
    let status_code = status_text
        .parse::<AadeStatusCode>()
        .map_err(|e| AadeError::protocol(e.to_string()))?;

    let errors = to_array(response, "errors", "error")
        .into_iter()
        .map(decode_error_detail)
        .collect();

    let ids = [
        response
            .child_parse::<RemoteId>("newClientDclID")?
            .map(ResponseId::NewDeclaration),
        response
            .child_parse::<RemoteId>("updatedClientDclID")?
            .map(ResponseId::Updated),
        response
            .child_parse::<u64>("cancellationID")?
            .map(ResponseId::Cancellation),
    ];
    let mut present = ids.into_iter().flatten();
    let id = present.next();
    if present.next().is_some() {
        return Err(AadeError::protocol("response carries more than one identifier"));
    }

    Ok(AadeResponse {
        status_code,
        errors,
        id,
    })
}

fn decode_error_detail(entry: &XmlElement) -> AadeErrorDetail {
    AadeErrorDetail {
        code: entry.child_text("code").unwrap_or_default().to_string(),
        message: entry.child_text("message").unwrap_or_default().to_string(),
    }
}

/// Decodes a `RequestClients` listing.
///
/// A single declaration may arrive unwrapped; see
/// [`to_array`](super::xml_tree::to_array).
///
/// # Errors
///
/// Returns [`AadeError::Protocol`] if the document is malformed or an entry
/// has no numeric `dclID`.
pub fn decode_client_list(xml: &str) -> AadeResult<ClientList> {
    let root = parse_document(xml)?;

    let declarations = to_array(&root, "clientsDoc", "client")
        .into_iter()
        .map(decode_client_declaration)
        .collect::<AadeResult<Vec<_>>>()?;

    Ok(ClientList {
        entity_vat_number: root.child_text("entityVatNumber").map(str::to_owned),
        declarations,
        continuation_token: root.child_text("continuationToken").map(str::to_owned),
    })
}

fn decode_client_declaration(entry: &XmlElement) -> AadeResult<ClientDeclaration> {
    let remote_id = entry
        .child_parse::<RemoteId>("dclID")?
        .ok_or_else(|| AadeError::protocol("client entry without <dclID>"))?;
    let service_type = entry
        .child_parse::<u8>("clientServiceType")?
        .map(|code| {
            ServiceType::from_code(code)
                .ok_or_else(|| AadeError::protocol(format!("unknown clientServiceType {code}")))
        })
        .transpose()?;

    Ok(ClientDeclaration {
        remote_id,
        service_type,
        customer_vat_number: entry.child_text("customerVatNumber").map(str::to_owned),
        vehicle_reg_number: entry.child_text("vehicleRegNumber").map(str::to_owned),
        rental_start: entry.child_text("rentalStartDateTime").map(str::to_owned),
        amount: entry.child_parse::<Decimal>("amount")?,
        cancellation_id: entry.child_parse::<u64>("cancellationID")?,
        invoice_mark: entry.child_text("invoiceMark").map(str::to_owned),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ResponseDoc xmlns="http://www.aade.gr/myDATA/response/v1.0">
  <response>
    <index>1</index>
    <newClientDclID>555</newClientDclID>
    <statusCode>Success</statusCode>
  </response>
</ResponseDoc>"#;

    #[test]
    fn success_with_new_id() {
        let response = decode_response(SUCCESS).unwrap();
        assert!(response.is_success());
        assert!(response.errors.is_empty());
        assert_eq!(response.new_remote_id(), Some(RemoteId::new(555)));
        assert_eq!(response.updated_remote_id(), None);
    }

    #[test]
    fn two_wrapped_errors() {
        let xml = r#"<ResponseDoc><response><statusCode>ValidationError</statusCode>
            <errors>
              <error><code>101</code><message>Invalid plate</message></error>
              <error><code>102</code><message>Invalid customer</message></error>
            </errors></response></ResponseDoc>"#;
        let response = decode_response(xml).unwrap();
        assert_eq!(response.status_code, AadeStatusCode::ValidationError);
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].code, "101");
        assert_eq!(response.errors[1].message, "Invalid customer");
        assert_eq!(response.error_message(), "Invalid plate, Invalid customer");
    }

    #[test]
    fn two_bare_errors_entries() {
        let xml = r#"<ResponseDoc><response><statusCode>ValidationError</statusCode>
            <errors><code>E1</code><message>first</message></errors>
            <errors><code>E2</code><message>second</message></errors>
            </response></ResponseDoc>"#;
        let response = decode_response(xml).unwrap();
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[1].code, "E2");
    }

    #[test]
    fn single_errors_entry_becomes_one_element_sequence() {
        let xml = r#"<ResponseDoc><response><statusCode>ValidationError</statusCode>
            <errors><code>E1</code><message>Invalid plate</message></errors>
            </response></ResponseDoc>"#;
        let response = decode_response(xml).unwrap();
        assert_eq!(
            response.errors,
            vec![AadeErrorDetail {
                code: "E1".to_string(),
                message: "Invalid plate".to_string(),
            }]
        );
        assert_eq!(response.error_message(), "Invalid plate");
    }

    #[test]
    fn missing_envelope_is_protocol_error() {
        let err = decode_response("<html><body>Gateway</body></html>").unwrap_err();
        assert!(matches!(err, AadeError::Protocol { .. }));
    }

    #[test]
    fn missing_status_code_is_protocol_error() {
        let err = decode_response("<ResponseDoc><response><index>1</index></response></ResponseDoc>")
            .unwrap_err();
        assert!(err.to_string().contains("statusCode"));
    }

    #[test]
    fn unknown_status_code_is_protocol_error() {
        let xml = "<ResponseDoc><response><statusCode>Maybe</statusCode></response></ResponseDoc>";
        assert!(decode_response(xml).is_err());
    }

    #[test]
    fn non_numeric_id_is_protocol_error() {
        let xml = "<ResponseDoc><response><statusCode>Success</statusCode>\
                   <newClientDclID>abc</newClientDclID></response></ResponseDoc>";
        assert!(decode_response(xml).is_err());
    }

    #[test]
    fn conflicting_ids_are_rejected() {
        let xml = "<ResponseDoc><response><statusCode>Success</statusCode>\
                   <newClientDclID>1</newClientDclID><cancellationID>2</cancellationID>\
                   </response></ResponseDoc>";
        assert!(decode_response(xml).is_err());
    }

    #[test]
    fn cancellation_and_update_ids() {
        let cancel = decode_response(
            "<ResponseDoc><response><statusCode>Success</statusCode>\
             <cancellationID>77</cancellationID></response></ResponseDoc>",
        )
        .unwrap();
        assert_eq!(cancel.cancellation_id(), Some(77));

        let update = decode_response(
            "<ResponseDoc><response><statusCode>Success</statusCode>\
             <updatedClientDclID>556</updatedClientDclID></response></ResponseDoc>",
        )
        .unwrap();
        assert_eq!(update.updated_remote_id(), Some(RemoteId::new(556)));
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let response = decode_response(
            "<ResponseDoc><response><statusCode>TechnicalError</statusCode></response></ResponseDoc>",
        )
        .unwrap();
        assert_eq!(response.error_message(), "authority returned TechnicalError");
    }

    #[test]
    fn client_list_with_wrapped_entries() {
        let xml = r#"<RequestedDoc>
            <entityVatNumber>999999999</entityVatNumber>
            <clientsDoc>
              <client><dclID>555</dclID><clientServiceType>1</clientServiceType>
                <customerVatNumber>123456789</customerVatNumber>
                <vehicleRegNumber>ABC-1234</vehicleRegNumber>
                <rentalStartDateTime>2024-06-01T09:00:00.000Z</rentalStartDateTime>
                <amount>150.50</amount></client>
              <client><dclID>556</dclID><cancellationID>9</cancellationID></client>
            </clientsDoc>
            <continuationToken>next-page</continuationToken>
          </RequestedDoc>"#;
        let list = decode_client_list(xml).unwrap();
        assert_eq!(list.entity_vat_number.as_deref(), Some("999999999"));
        assert_eq!(list.declarations.len(), 2);
        let first = &list.declarations[0];
        assert_eq!(first.remote_id, RemoteId::new(555));
        assert_eq!(first.service_type, Some(ServiceType::Rental));
        assert_eq!(first.amount, Some(Decimal::new(15050, 2)));
        assert!(!first.is_cancelled());
        assert!(list.declarations[1].is_cancelled());
        assert_eq!(list.continuation_token.as_deref(), Some("next-page"));
    }

    #[test]
    fn client_list_with_single_unwrapped_entry() {
        let xml = "<RequestedDoc><clientsDoc><dclID>555</dclID>\
                   <vehicleRegNumber>ABC-1234</vehicleRegNumber></clientsDoc></RequestedDoc>";
        let list = decode_client_list(xml).unwrap();
        assert_eq!(list.declarations.len(), 1);
        assert_eq!(list.declarations[0].vehicle_reg_number.as_deref(), Some("ABC-1234"));
        assert_eq!(list.continuation_token, None);
    }

    #[test]
    fn empty_client_list() {
        let list = decode_client_list("<RequestedDoc><clientsDoc/></RequestedDoc>").unwrap();
        assert!(list.declarations.is_empty());
    }

    #[test]
    fn client_entry_without_id_is_rejected() {
        let xml = "<RequestedDoc><clientsDoc><client><vehicleRegNumber>X</vehicleRegNumber>\
                   </client></clientsDoc></RequestedDoc>";
        assert!(decode_client_list(xml).is_err());
    }
}
