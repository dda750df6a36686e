//! # Submission Orchestrator
//!
//! The only component callers use directly. Each operation checks its local
//! preconditions, calls the authority through [`DigitalClientApi`], then
//! writes the outcome to the [`SubmissionStore`].
//!
//! # Consistency
//!
//! The remote call and the store write are two sequential steps with no
//! transaction between them. If the write fails after the authority accepted
//! a request, the failure is logged at `error` level and the caller still
//! sees success. [`SubmissionService::resync_pending`] resubmits whatever is
//! left `none` or `pending`, so a declaration may reach the authority more
//! than once.
//!
//! # Concurrency
//!
//! Operations on different contracts never wait on each other. A second
//! operation on a contract that already has one in flight fails immediately
//! with [`ApplicationError::InProgress`] and sends nothing. Resync processes
//! records strictly one at a time.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::outcome::{OperationOutcome, ResyncSummary, SubmitOutcome};
use crate::domain::entities::{
    CompletionInput, CorrelationRequest, DeclarationInput, NewDeclaration, SubmissionRecord,
    SubmissionUpdate, UpdateRequest,
};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ContractId, RemoteId, SubmissionStatus, TaxNumber};
use crate::infrastructure::aade::{
    AadeConfig, AadeError, AadeHttpClient, AadeResponse, AadeResult, AadeTransport, ClientList,
    ClientListQuery, DigitalClientApi,
};
use crate::infrastructure::persistence::SubmissionStore;
use dashmap::DashSet;
use std::sync::Arc;
use tracing::Instrument;

/// Releases a contract's in-flight marker on drop.
struct InFlight {
    contracts: Arc<DashSet<ContractId>>,
    contract_id: ContractId,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.contracts.remove(&self.contract_id);
    }
}

/// Orchestrates declaration submission, completion, cancellation,
/// correlation and resync.
#[derive(Debug)]
pub struct SubmissionService {
    config: AadeConfig,
    api: Option<DigitalClientApi>,
    store: Arc<dyn SubmissionStore>,
    in_flight: Arc<DashSet<ContractId>>,
}

impl SubmissionService {
    /// Creates a service over an explicit transport.
    #[must_use]
    pub fn new(
        config: AadeConfig,
        transport: Arc<dyn AadeTransport>,
        store: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            config,
            api: Some(DigitalClientApi::new(transport)),
            store,
            in_flight: Arc::new(DashSet::new()),
        }
    }

    /// Creates a service that talks HTTP to the configured environment.
    ///
    /// An incomplete configuration is accepted. The service then runs in
    /// advisory mode: submissions succeed without being sent.
    ///
    /// # Errors
    ///
    /// Returns [`AadeError::Configuration`] if the HTTP client cannot be built.
    pub fn from_config(config: AadeConfig, store: Arc<dyn SubmissionStore>) -> AadeResult<Self> {
        let api = if config.is_configured() {
            let client: Arc<dyn AadeTransport> = Arc::new(AadeHttpClient::new(&config)?);
            Some(DigitalClientApi::new(client))
        } else {
            None
        };
        Ok(Self {
            config,
            api,
            store,
            in_flight: Arc::new(DashSet::new()),
        })
    }

    /// Returns true if calls will reach the authority.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.connection().is_ok()
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &AadeConfig {
        &self.config
    }

    /// Submits a new declaration.
    ///
    /// A malformed customer tax number is rejected before anything is sent.
    /// Without configuration, returns success with an advisory note.
    #[tracing::instrument(skip_all, fields(contract_id = %contract_id))]
    pub async fn submit(&self, contract_id: &ContractId, input: &DeclarationInput) -> SubmitOutcome {
        match self.try_submit(contract_id, input).await {
            Ok(outcome) => outcome,
            Err(err) => SubmitOutcome::failed(&err),
        }
    }

    async fn try_submit(
        &self,
        contract_id: &ContractId,
        input: &DeclarationInput,
    ) -> ApplicationResult<SubmitOutcome> {
        input.validate()?;
        let (api, entity) = match self.connection() {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(error = %err, "declaration not submitted");
                return Ok(SubmitOutcome::skipped(format!(
                    "{err}; declaration was not submitted"
                )));
            }
        };
        let _in_flight = self.begin(contract_id)?;
        self.check_transition(contract_id, SubmissionStatus::Submitted)
            .await?;
        let doc = NewDeclaration::from_input(entity.clone(), input)?;

        self.store
            .upsert(contract_id, &SubmissionUpdate::pending(input.clone()))
            .await?;

        let result = api.send_client(&doc).await;
        let remote_id = self
            .settle(
                contract_id,
                result,
                |text| SubmissionUpdate::failed(text),
                |response| {
                    let id = response.new_remote_id().ok_or_else(|| {
                        AadeError::protocol("success response without newClientDclID")
                    })?;
                    Ok((SubmissionUpdate::submitted(id), id))
                },
            )
            .await?;

        tracing::info!(remote_id = %remote_id, "declaration accepted");
        Ok(SubmitOutcome::accepted(remote_id))
    }

    /// Closes out an accepted declaration with its final amount.
    #[tracing::instrument(skip_all, fields(contract_id = %contract_id))]
    pub async fn complete(
        &self,
        contract_id: &ContractId,
        remote_id: Option<RemoteId>,
        completion: &CompletionInput,
    ) -> OperationOutcome {
        self.try_complete(contract_id, remote_id, completion)
            .await
            .into()
    }

    async fn try_complete(
        &self,
        contract_id: &ContractId,
        remote_id: Option<RemoteId>,
        completion: &CompletionInput,
    ) -> ApplicationResult<()> {
        let remote_id = remote_id.ok_or_else(|| DomainError::MissingRemoteId(contract_id.clone()))?;
        let (api, entity) = self.connection()?;
        let _in_flight = self.begin(contract_id)?;
        self.check_transition(contract_id, SubmissionStatus::Completed)
            .await?;

        let request = UpdateRequest::from_completion(entity.clone(), remote_id, completion);
        let result = api.update_client(&request).await;
        self.settle(
            contract_id,
            result,
            |text| SubmissionUpdate::failed(text),
            |response| {
                Ok((
                    SubmissionUpdate::completed(response.updated_remote_id()),
                    (),
                ))
            },
        )
        .await?;

        tracing::info!(remote_id = %remote_id, "declaration completed");
        Ok(())
    }

    /// Cancels an accepted declaration.
    ///
    /// Fails locally, without a network call, if `remote_id` is absent.
    #[tracing::instrument(skip_all, fields(contract_id = %contract_id))]
    pub async fn cancel(&self, contract_id: &ContractId, remote_id: Option<RemoteId>) -> OperationOutcome {
        self.try_cancel(contract_id, remote_id).await.into()
    }

    async fn try_cancel(
        &self,
        contract_id: &ContractId,
        remote_id: Option<RemoteId>,
    ) -> ApplicationResult<()> {
        let remote_id = remote_id.ok_or_else(|| DomainError::MissingRemoteId(contract_id.clone()))?;
        let (api, entity) = self.connection()?;
        let _in_flight = self.begin(contract_id)?;
        self.check_transition(contract_id, SubmissionStatus::Cancelled)
            .await?;

        let result = api.cancel_client(remote_id, entity).await;
        self.settle(
            contract_id,
            result,
            |text| SubmissionUpdate::failed(text),
            |response| Ok((SubmissionUpdate::cancelled(response.cancellation_id()), ())),
        )
        .await?;

        tracing::info!(remote_id = %remote_id, "declaration cancelled");
        Ok(())
    }

    /// Links a declaration to the mark of the invoice issued for it.
    ///
    /// The stored status never changes. Success records the mark; failure
    /// records only the error text.
    #[tracing::instrument(skip_all, fields(contract_id = %contract_id))]
    pub async fn correlate_with_invoice(
        &self,
        contract_id: &ContractId,
        remote_id: Option<RemoteId>,
        invoice_mark: &str,
    ) -> OperationOutcome {
        self.try_correlate(contract_id, remote_id, invoice_mark)
            .await
            .into()
    }

    async fn try_correlate(
        &self,
        contract_id: &ContractId,
        remote_id: Option<RemoteId>,
        invoice_mark: &str,
    ) -> ApplicationResult<()> {
        let remote_id = remote_id.ok_or_else(|| DomainError::MissingRemoteId(contract_id.clone()))?;
        let (api, entity) = self.connection()?;
        let request = CorrelationRequest::new(entity.clone(), vec![remote_id], invoice_mark)?;
        let _in_flight = self.begin(contract_id)?;

        let result = api.correlate(&request).await;
        self.settle(
            contract_id,
            result,
            |text| SubmissionUpdate::correlation_failed(text),
            |_| Ok((SubmissionUpdate::correlated(invoice_mark), ())),
        )
        .await?;

        tracing::info!(remote_id = %remote_id, "declaration correlated with invoice");
        Ok(())
    }

    /// Resubmits every `none` or `pending` record, one at a time.
    ///
    /// A failing record is counted and the scan moves on. Each failure says
    /// whether a later resync may succeed. Without configuration nothing is
    /// scanned.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Repository`] only if the initial scan of
    /// the store fails.
    #[tracing::instrument(skip_all)]
    pub async fn resync_pending(&self) -> ApplicationResult<ResyncSummary> {
        let mut summary = ResyncSummary::default();
        if let Err(err) = self.connection() {
            tracing::warn!(error = %err, "resync skipped");
            return Ok(summary);
        }

        let records = self
            .store
            .query_by_status(&SubmissionStatus::RESYNCABLE)
            .await?;
        tracing::info!(count = records.len(), "resyncing pending declarations");

        for record in records {
            let contract_id = record.contract_id().clone();
            let Some(declaration) = record.declaration() else {
                tracing::warn!(contract_id = %contract_id, "no declaration stored, cannot resubmit");
                summary.record_failure(contract_id, "no declaration stored for resubmission", false);
                continue;
            };
            let span = tracing::info_span!("resubmit", contract_id = %contract_id);
            match self.try_submit(&contract_id, declaration).instrument(span).await {
                Ok(_) => summary.record_success(),
                Err(err) => {
                    let retryable = err.is_retryable();
                    tracing::warn!(contract_id = %contract_id, error = %err, retryable, "resubmission failed");
                    summary.record_failure(contract_id, err.to_string(), retryable);
                }
            }
        }

        tracing::info!(
            succeeded = summary.success_count,
            failed = summary.error_count,
            "resync finished"
        );
        Ok(summary)
    }

    /// Lists the entity's declarations as the authority holds them.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::NotConfigured`] without configuration
    /// - [`ApplicationError::Aade`] on transport or protocol failure
    pub async fn list_declarations(&self, query: &ClientListQuery) -> ApplicationResult<ClientList> {
        let (api, entity) = self.connection()?;
        Ok(api.request_clients(entity, query).await?)
    }

    /// Returns the stored record for a contract.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Repository`] if the store fails.
    pub async fn status(&self, contract_id: &ContractId) -> ApplicationResult<Option<SubmissionRecord>> {
        Ok(self.store.get(contract_id).await?)
    }

    fn connection(&self) -> ApplicationResult<(&DigitalClientApi, &TaxNumber)> {
        match (&self.api, self.config.entity_vat_number()) {
            (Some(api), Some(entity)) if self.config.is_configured() => Ok((api, entity)),
            _ => {
                let mut missing = self.config.missing_fields();
                if self.api.is_none() && missing.is_empty() {
                    missing.push("transport");
                }
                Err(ApplicationError::not_configured(&missing))
            }
        }
    }

    fn begin(&self, contract_id: &ContractId) -> ApplicationResult<InFlight> {
        if self.in_flight.insert(contract_id.clone()) {
            Ok(InFlight {
                contracts: Arc::clone(&self.in_flight),
                contract_id: contract_id.clone(),
            })
        } else {
            tracing::warn!(contract_id = %contract_id, "operation already in progress");
            Err(ApplicationError::InProgress(contract_id.clone()))
        }
    }

    /// Rejects the operation if the stored status cannot move to `target`.
    /// A contract with no record is unconstrained.
    async fn check_transition(
        &self,
        contract_id: &ContractId,
        target: SubmissionStatus,
    ) -> ApplicationResult<()> {
        if let Some(record) = self.store.get(contract_id).await? {
            let current = record.status();
            if !current.can_transition_to(target) {
                return Err(DomainError::invalid_transition(contract_id.clone(), current, target).into());
            }
        }
        Ok(())
    }

    /// Persists the outcome of a remote call and maps it to a result.
    async fn settle<T>(
        &self,
        contract_id: &ContractId,
        result: AadeResult<AadeResponse>,
        on_failure: fn(String) -> SubmissionUpdate,
        on_success: impl FnOnce(&AadeResponse) -> AadeResult<(SubmissionUpdate, T)>,
    ) -> ApplicationResult<T> {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "digital client call failed");
                self.persist(contract_id, &on_failure(err.to_string())).await;
                return Err(err.into());
            }
        };

        if !response.is_success() {
            let message = response.error_message();
            tracing::warn!(status = %response.status_code, error = %message, "authority rejected request");
            self.persist(contract_id, &on_failure(message.clone())).await;
            return Err(ApplicationError::rejected(response.status_code, message));
        }

        match on_success(&response) {
            Ok((update, value)) => {
                self.persist(contract_id, &update).await;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, "unusable success response");
                self.persist(contract_id, &on_failure(err.to_string())).await;
                Err(err.into())
            }
        }
    }

    async fn persist(&self, contract_id: &ContractId, update: &SubmissionUpdate) {
        if let Err(err) = self.store.upsert(contract_id, update).await {
            tracing::error!(
                contract_id = %contract_id,
                status = ?update.status(),
                error = %err,
                "status write failed after remote call, record is out of sync with the authority"
            );
        }
    }
}
