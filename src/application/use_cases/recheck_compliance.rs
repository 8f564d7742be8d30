use crate::application::dto::{CompletedCheck, PendingCheck, RecheckOutcome};
use crate::application::state::{ComplianceStore, ErrorStatus};
use crate::compliance::services::ResultValidator;
use crate::ports::outbound::{ComplianceGateway, ProgressReporter};

/// Message shown in the error log when the check request fails
pub const RECHECK_FAILED_MESSAGE: &str = "Failed to recheck compliance with new policy.";

/// RecheckComplianceUseCase - Checks the loaded CBOM against the selected
/// policy and adopts the result when it is valid and still current
///
/// The work is split in three steps so that callers can keep the store
/// unborrowed while the request is in flight:
/// 1. `begin` issues a ticket from the store
/// 2. `fetch` performs the request
/// 3. `complete` validates the response and applies it
///
/// `execute` chains the three for the common case.
///
/// # Type Parameters
/// * `G` - ComplianceGateway implementation
/// * `PR` - ProgressReporter implementation
pub struct RecheckComplianceUseCase<G, PR> {
    gateway: G,
    progress_reporter: PR,
}

impl<G, PR> RecheckComplianceUseCase<G, PR>
where
    G: ComplianceGateway,
    PR: ProgressReporter,
{
    pub fn new(gateway: G, progress_reporter: PR) -> Self {
        Self {
            gateway,
            progress_reporter,
        }
    }

    pub async fn execute(&self, store: &mut ComplianceStore) -> RecheckOutcome {
        let Some(pending) = self.begin(store) else {
            return RecheckOutcome::Skipped;
        };
        let completed = self.fetch(pending).await;
        self.complete(store, completed)
    }

    /// Issues a ticket for the selected policy, superseding any request in
    /// flight. Returns `None` when no CBOM is loaded or no policy is selected.
    pub fn begin(&self, store: &mut ComplianceStore) -> Option<PendingCheck> {
        let cbom = store.cbom()?.document().clone();
        let policy_id = store.selected_policy().to_string();
        if policy_id.is_empty() {
            return None;
        }

        let ticket = store.begin_check();
        Some(PendingCheck {
            ticket,
            policy_id,
            cbom,
        })
    }

    pub async fn fetch(&self, pending: PendingCheck) -> CompletedCheck {
        self.progress_reporter.report(&format!(
            "🔍 Checking compliance against policy '{}'...",
            pending.policy_id
        ));

        let response = self
            .gateway
            .check_cbom(&pending.policy_id, &pending.cbom)
            .await;

        CompletedCheck {
            ticket: pending.ticket,
            policy_id: pending.policy_id,
            response,
        }
    }

    /// Applies a finished request to the store.
    ///
    /// A superseded request is dropped before anything else, whatever its
    /// response. Transport failures go to the error log. Invalid documents
    /// are rejected as a whole and the previous snapshot stays active.
    pub fn complete(&self, store: &mut ComplianceStore, completed: CompletedCheck) -> RecheckOutcome {
        if !store.is_current(completed.ticket) {
            tracing::debug!(
                policy = %completed.policy_id,
                failed = completed.response.is_err(),
                "discarding superseded compliance check"
            );
            return RecheckOutcome::Stale;
        }

        let document = match completed.response {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(policy = %completed.policy_id, error = %e, "compliance check failed");
                self.progress_reporter
                    .report_error(&format!("❌ {} {}", RECHECK_FAILED_MESSAGE, e));
                store.add_error(ErrorStatus::ScanError, RECHECK_FAILED_MESSAGE);
                return RecheckOutcome::TransportFailed;
            }
        };

        let result = match ResultValidator::parse(document) {
            Ok(result) => result,
            Err(report) => {
                let reason = report
                    .first()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                self.progress_reporter.report_error(&format!(
                    "❌ The compliance service returned an invalid result ({}); keeping the previous result",
                    reason
                ));
                return RecheckOutcome::Rejected(report);
            }
        };

        if store.finish_check(completed.ticket, result) {
            self.progress_reporter.report_completion(&format!(
                "✅ Compliance checked against policy '{}'",
                completed.policy_id
            ));
            RecheckOutcome::Applied
        } else {
            RecheckOutcome::Stale
        }
    }
}
