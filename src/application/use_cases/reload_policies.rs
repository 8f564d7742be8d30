use crate::application::dto::PolicyReloadOutcome;
use crate::application::state::{ComplianceStore, ErrorStatus};
use crate::ports::outbound::{ComplianceGateway, ProgressReporter};

/// Message shown in the error log when the listing cannot be fetched
pub const POLICY_LOAD_FAILED_MESSAGE: &str = "Could not load compliance policies";

/// ReloadPoliciesUseCase - Refreshes the list of selectable policies
///
/// # Type Parameters
/// * `G` - ComplianceGateway implementation
/// * `PR` - ProgressReporter implementation
pub struct ReloadPoliciesUseCase<G, PR> {
    gateway: G,
    progress_reporter: PR,
}

impl<G, PR> ReloadPoliciesUseCase<G, PR>
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

    /// Fetches the policy listing and stores it.
    ///
    /// A failure is recorded in the store's error log as `NoConnection`; the
    /// previous listing and selection are kept.
    pub async fn execute(&self, store: &mut ComplianceStore) -> PolicyReloadOutcome {
        self.progress_reporter
            .report("📋 Loading available compliance policies...");

        match self.gateway.list_policies().await {
            Ok(policies) => {
                let count = policies.len();
                store.set_available_policies(policies);
                self.progress_reporter.report_completion(&format!(
                    "✅ {} compliance policies available (selected: {})",
                    count,
                    store.policy_name()
                ));
                PolicyReloadOutcome::Reloaded { policies: count }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load compliance policies");
                self.progress_reporter
                    .report_error(&format!("⚠️  {}: {}", POLICY_LOAD_FAILED_MESSAGE, e));
                store.add_error(ErrorStatus::NoConnection, POLICY_LOAD_FAILED_MESSAGE);
                PolicyReloadOutcome::Failed
            }
        }
    }
}
