//! End-to-end workflow against a local mock of the authority.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use aade_digital_client::infrastructure::aade::{
    AadeConfig, AadeCredentials, AadeEnvironment, AadeHttpClient, AadeTransport, ClientListQuery,
};
use aade_digital_client::infrastructure::persistence::{InMemorySubmissionStore, SubmissionStore};
use aade_digital_client::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENTITY: &str = "999999999";

fn config() -> AadeConfig {
    AadeConfig::new()
        .with_credentials("rental-user", "sub-key-123")
        .with_environment(AadeEnvironment::Development)
        .with_entity_vat_number(ENTITY)
        .unwrap()
}

fn service_for(server: &MockServer, store: Arc<InMemorySubmissionStore>) -> SubmissionService {
    let config = config();
    let client =
        AadeHttpClient::with_base_url(server.uri(), config.credentials().cloned(), Some(5_000)).unwrap();
    SubmissionService::new(config, Arc::new(client), store)
}

fn declaration() -> DeclarationInput {
    DeclarationInput::rental(
        "123456789",
        RentalDetails::new("ABC-1234", Timestamp::parse("2024-06-01T09:00:00Z").unwrap()),
    )
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/xml")
        .set_body_string(body)
}

#[tokio::test]
async fn accepted_rental_is_stored_as_submitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SendClient"))
        .and(header("aade-user-id", "rental-user"))
        .and(header("ocp-apim-subscription-key", "sub-key-123"))
        .and(header("content-type", "application/xml; charset=UTF-8"))
        .and(body_string_contains("<vehicleRegNumber>ABC-1234</vehicleRegNumber>"))
        .and(body_string_contains(
            "<rentalStartDateTime>2024-06-01T09:00:00.000Z</rentalStartDateTime>",
        ))
        .respond_with(xml(
            r#"<?xml version="1.0" encoding="utf-8"?>
<ResponseDoc><response><index>1</index><newClientDclID>555</newClientDclID>
<statusCode>Success</statusCode></response></ResponseDoc>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySubmissionStore::new());
    let service = service_for(&server, store.clone());
    let contract_id = ContractId::new("contract-1");

    let outcome = service.submit(&contract_id, &declaration()).await;

    assert!(outcome.success);
    assert_eq!(outcome.remote_id, Some(RemoteId::new(555)));
    let record = store.get(&contract_id).await.unwrap().unwrap();
    assert_eq!(record.status(), SubmissionStatus::Submitted);
    assert_eq!(record.remote_id(), Some(RemoteId::new(555)));
}

#[tokio::test]
async fn validation_error_is_stored_with_authority_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SendClient"))
        .respond_with(xml(
            "<ResponseDoc><response><statusCode>ValidationError</statusCode>\
             <errors><error><code>E1</code><message>Invalid plate</message></error></errors>\
             </response></ResponseDoc>",
        ))
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySubmissionStore::new());
    let service = service_for(&server, store.clone());
    let contract_id = ContractId::new("contract-1");

    let outcome = service.submit(&contract_id, &declaration()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Invalid plate"));
    let record = store.get(&contract_id).await.unwrap().unwrap();
    assert_eq!(record.status(), SubmissionStatus::Error);
    assert_eq!(record.error_text(), Some("Invalid plate"));
}

#[tokio::test]
async fn non_2xx_is_a_transport_failure_and_body_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SendClient"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            "<ResponseDoc><response><statusCode>Success</statusCode></response></ResponseDoc>",
        ))
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySubmissionStore::new());
    let service = service_for(&server, store.clone());
    let contract_id = ContractId::new("contract-1");

    let outcome = service.submit(&contract_id, &declaration()).await;

    assert!(!outcome.success);
    let error = outcome.error.unwrap();
    assert!(error.contains("401"));
    let record = store.get(&contract_id).await.unwrap().unwrap();
    assert_eq!(record.status(), SubmissionStatus::Error);
    assert_eq!(record.error_text(), Some(error.as_str()));
}

#[tokio::test]
async fn full_lifecycle_submit_correlate_complete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SendClient"))
        .respond_with(xml(
            "<ResponseDoc><response><newClientDclID>555</newClientDclID>\
             <statusCode>Success</statusCode></response></ResponseDoc>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ClientCorrelations"))
        .and(body_string_contains("<mark>400001234567890</mark>"))
        .and(body_string_contains("<correlatedDclIds>555</correlatedDclIds>"))
        .respond_with(xml(
            "<ResponseDoc><response><statusCode>Success</statusCode></response></ResponseDoc>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/UpdateClient"))
        .and(body_string_contains("<initialDclId>555</initialDclId>"))
        .and(body_string_contains("<invoiceKind>1</invoiceKind>"))
        .respond_with(xml(
            "<ResponseDoc><response><updatedClientDclID>556</updatedClientDclID>\
             <statusCode>Success</statusCode></response></ResponseDoc>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySubmissionStore::new());
    let service = service_for(&server, store.clone());
    let contract_id = ContractId::new("contract-1");

    let submitted = service.submit(&contract_id, &declaration()).await;
    let remote_id = submitted.remote_id;
    assert!(submitted.success);

    let correlated = service
        .correlate_with_invoice(&contract_id, remote_id, "400001234567890")
        .await;
    assert!(correlated.success, "{:?}", correlated.error);

    let completion = CompletionInput::new(
        Decimal::new(18_000, 2),
        Timestamp::parse("2024-06-03T09:30:00Z").unwrap(),
        InvoiceKind::Receipt,
    );
    let completed = service.complete(&contract_id, remote_id, &completion).await;
    assert!(completed.success, "{:?}", completed.error);

    let record = service.status(&contract_id).await.unwrap().unwrap();
    assert_eq!(record.status(), SubmissionStatus::Completed);
    assert_eq!(record.invoice_mark(), Some("400001234567890"));
    assert_eq!(record.update_id(), Some(RemoteId::new(556)));
}

#[tokio::test]
async fn cancel_sends_query_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CancelClient"))
        .and(query_param("DCLID", "555"))
        .and(query_param("entityVatNumber", ENTITY))
        .respond_with(xml(
            "<ResponseDoc><response><cancellationID>42</cancellationID>\
             <statusCode>Success</statusCode></response></ResponseDoc>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemorySubmissionStore::new());
    let service = service_for(&server, store.clone());
    let contract_id = ContractId::new("contract-1");

    let outcome = service.cancel(&contract_id, Some(RemoteId::new(555))).await;

    assert!(outcome.success, "{:?}", outcome.error);
    let record = store.get(&contract_id).await.unwrap().unwrap();
    assert_eq!(record.status(), SubmissionStatus::Cancelled);
    assert_eq!(record.cancellation_id(), Some(42));
}

#[tokio::test]
async fn listing_normalizes_single_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/RequestClients"))
        .and(query_param("entityVatNumber", ENTITY))
        .and(query_param("continuationToken", "page-2"))
        .respond_with(xml(
            "<RequestedDoc><entityVatNumber>999999999</entityVatNumber>\
             <clientsDoc><dclID>555</dclID><amount>150.5</amount></clientsDoc>\
             </RequestedDoc>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, Arc::new(InMemorySubmissionStore::new()));

    let list = service
        .list_declarations(&ClientListQuery::new().with_continuation_token("page-2"))
        .await
        .unwrap();

    assert_eq!(list.declarations.len(), 1);
    assert_eq!(list.declarations[0].remote_id, RemoteId::new(555));
    assert_eq!(list.declarations[0].amount, Some(Decimal::new(1505, 1)));
    assert_eq!(list.continuation_token, None);
}

#[tokio::test]
async fn per_call_credentials_replace_configured_pair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/RequestClients"))
        .and(header("aade-user-id", "branch-user"))
        .and(header("ocp-apim-subscription-key", "branch-key"))
        .respond_with(xml("<RequestedDoc/>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AadeHttpClient::with_base_url(
        server.uri(),
        Some(AadeCredentials::new("rental-user", "sub-key-123")),
        Some(5_000),
    )
    .unwrap();
    let override_creds = AadeCredentials::new("branch-user", "branch-key");

    let body = client
        .get_with(
            "RequestClients",
            &[("entityVatNumber", ENTITY.to_string())],
            Some(&override_creds),
        )
        .await
        .unwrap();

    assert_eq!(body, "<RequestedDoc/>");
}

#[tokio::test]
async fn resync_replays_stored_declarations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/SendClient"))
        .respond_with(xml(
            "<ResponseDoc><response><newClientDclID>700</newClientDclID>\
             <statusCode>Success</statusCode></response></ResponseDoc>",
        ))
        .expect(2)
        .mount(&server)
        .await;
    // First attempts never reached the authority.
    let unreachable = AadeHttpClient::with_base_url("http://127.0.0.1:9/", None, Some(500)).unwrap();
    let store = Arc::new(InMemorySubmissionStore::new());
    let offline = SubmissionService::new(config(), Arc::new(unreachable), store.clone());
    for id in ["contract-a", "contract-b"] {
        let outcome = offline.submit(&ContractId::new(id), &declaration()).await;
        assert!(!outcome.success);
    }
    // Failed attempts are `error`, which resync leaves alone; reset them to pending.
    for id in ["contract-a", "contract-b"] {
        store
            .upsert(
                &ContractId::new(id),
                &aade_digital_client::domain::entities::SubmissionUpdate::pending(declaration()),
            )
            .await
            .unwrap();
    }

    let service = service_for(&server, store.clone());
    let summary = service.resync_pending().await.unwrap();

    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.error_count, 0);
    assert!(
        store
            .query_by_status(&[SubmissionStatus::Pending])
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn unauthenticated_transport_never_sends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = AadeHttpClient::with_base_url(server.uri(), None, Some(5_000)).unwrap();
    let err = client.post("SendClient", &[], Some("<x/>".into())).await.unwrap_err();

    assert!(err.is_configuration());
}
