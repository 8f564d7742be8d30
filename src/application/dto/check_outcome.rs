use crate::application::state::RequestTicket;
use crate::compliance::domain::ValidationReport;
use crate::shared::Result;
use serde_json::Value;

/// A compliance check that has been started but not sent yet
#[derive(Debug, Clone)]
pub struct PendingCheck {
    pub ticket: RequestTicket,
    pub policy_id: String,
    /// CBOM document sent as the request body
    pub cbom: Value,
}

/// A compliance check whose transport round-trip has finished
#[derive(Debug)]
pub struct CompletedCheck {
    pub ticket: RequestTicket,
    pub policy_id: String,
    pub response: Result<Value>,
}

/// What happened to a compliance recheck
#[derive(Debug, Clone, PartialEq)]
pub enum RecheckOutcome {
    /// No CBOM loaded or no policy selected
    Skipped,
    /// The new result is now the active snapshot
    Applied,
    /// A newer request was started; this result was discarded
    Stale,
    /// The document failed validation; the previous snapshot stays active
    Rejected(ValidationReport),
    /// The request failed; the error log has a new entry
    TransportFailed,
}

/// What happened to a policy listing reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyReloadOutcome {
    Reloaded { policies: usize },
    Failed,
}
