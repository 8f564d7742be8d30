use super::error_log::{ErrorLog, ErrorStatus};
use crate::compliance::domain::{
    AssessmentLevel, Asset, Cbom, ComplianceCheckResult, ComplianceLevel, PolicyDescriptor,
};
use crate::compliance::services::ComplianceAggregator;
use crate::config::ViewerConfig;
use serde_json::Value;
use std::sync::Arc;

/// Notification sent to subscribers after a whole-state change
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    ResultReplaced(Arc<ComplianceCheckResult>),
    ResultCleared,
    CbomLoaded,
    CbomCleared,
    PoliciesReloaded,
    PolicySelected(String),
    ErrorsChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies one compliance check request. Only the most recently issued
/// ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// ComplianceStore holds the viewer state shared by every reader.
///
/// The active result is an immutable snapshot behind an `Arc` and is only
/// ever swapped as a whole, so readers see a complete document or none.
/// Subscribers are notified once per swap, never per field.
pub struct ComplianceStore {
    result: Option<Arc<ComplianceCheckResult>>,
    cbom: Option<Cbom>,
    available_policies: Vec<PolicyDescriptor>,
    selected_policy: String,
    errors: ErrorLog,
    local_compliance_service_name: Option<String>,
    latest_ticket: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl ComplianceStore {
    pub fn new(default_policy: impl Into<String>) -> Self {
        Self {
            result: None,
            cbom: None,
            available_policies: Vec::new(),
            selected_policy: default_policy.into(),
            errors: ErrorLog::new(),
            local_compliance_service_name: None,
            latest_ticket: 0,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        let mut store = Self::new(config.default_policy.clone());
        store.local_compliance_service_name = config.local_compliance_service_name.clone();
        store
    }

    // ========== observers ==========

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when the subscription was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }

    // ========== active result ==========

    pub fn active_result(&self) -> Option<&ComplianceCheckResult> {
        self.result.as_deref()
    }

    /// Shared handle on the active snapshot
    pub fn snapshot(&self) -> Option<Arc<ComplianceCheckResult>> {
        self.result.clone()
    }

    /// Swaps in a new snapshot
    pub fn replace_result(&mut self, result: ComplianceCheckResult) {
        let snapshot = Arc::new(result);
        self.result = Some(Arc::clone(&snapshot));
        self.notify(StoreEvent::ResultReplaced(snapshot));
    }

    pub fn clear_result(&mut self) {
        if self.result.take().is_some() {
            self.notify(StoreEvent::ResultCleared);
        }
    }

    /// Issues a ticket for a new compliance request, superseding every
    /// ticket issued before it
    pub fn begin_check(&mut self) -> RequestTicket {
        self.latest_ticket += 1;
        RequestTicket(self.latest_ticket)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Applies a completed request. Completions of superseded tickets are
    /// discarded and leave the active snapshot untouched.
    pub fn finish_check(&mut self, ticket: RequestTicket, result: ComplianceCheckResult) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding stale compliance result"
            );
            return false;
        }
        self.replace_result(result);
        true
    }

    // ========== CBOM ==========

    pub fn load_cbom(&mut self, document: Value) {
        self.cbom = Some(Cbom::new(document));
        self.notify(StoreEvent::CbomLoaded);
    }

    pub fn cbom(&self) -> Option<&Cbom> {
        self.cbom.as_ref()
    }

    /// Detected cryptographic assets of the loaded CBOM
    pub fn detections(&self) -> &[Asset] {
        self.cbom.as_ref().map(Cbom::detections).unwrap_or(&[])
    }

    /// Drops the loaded CBOM and the active result
    pub fn start_again(&mut self) {
        if self.cbom.take().is_some() {
            self.notify(StoreEvent::CbomCleared);
        }
        self.clear_result();
    }

    // ========== policies ==========

    /// Replaces the policy listing. When the selected policy is not listed,
    /// the first listed policy becomes selected.
    pub fn set_available_policies(&mut self, policies: Vec<PolicyDescriptor>) {
        let fallback = if policies.iter().any(|p| p.id == self.selected_policy) {
            None
        } else {
            policies.first().map(|p| p.id.clone())
        };
        self.available_policies = policies;
        self.notify(StoreEvent::PoliciesReloaded);

        if let Some(id) = fallback {
            self.select_policy(id);
        }
    }

    pub fn select_policy(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id != self.selected_policy {
            self.selected_policy = id.clone();
            self.notify(StoreEvent::PolicySelected(id));
        }
    }

    pub fn available_policies(&self) -> &[PolicyDescriptor] {
        &self.available_policies
    }

    pub fn selected_policy(&self) -> &str {
        &self.selected_policy
    }

    /// Display name of the selected policy: its label, else its id, else
    /// "Unknown" when it is not listed
    pub fn policy_name(&self) -> &str {
        self.available_policies
            .iter()
            .find(|p| p.id == self.selected_policy)
            .map(PolicyDescriptor::display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown")
    }

    // ========== errors ==========

    pub fn add_error(&mut self, status: ErrorStatus, message: impl Into<String>) {
        self.errors.push(status, message);
        self.notify(StoreEvent::ErrorsChanged);
    }

    pub fn close_error(&mut self, index: usize) {
        if self.errors.close(index).is_some() {
            self.notify(StoreEvent::ErrorsChanged);
        }
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    // ========== queries ==========

    /// True while no snapshot is active, distinct from "loaded but invalid"
    pub fn is_result_loading(&self) -> bool {
        self.result.is_none()
    }

    pub fn has_valid_result(&self) -> bool {
        self.active_result().is_some_and(ComplianceCheckResult::is_usable)
    }

    fn valid_result(&self) -> Option<&ComplianceCheckResult> {
        self.active_result().filter(|result| result.is_usable())
    }

    pub fn available_levels(&self) -> &[ComplianceLevel] {
        self.valid_result()
            .map(|result| result.compliance_levels.as_slice())
            .unwrap_or(&[])
    }

    pub fn available_assessment_levels(&self) -> &[AssessmentLevel] {
        self.valid_result()
            .and_then(|result| result.assessment_levels.as_deref())
            .unwrap_or(&[])
    }

    /// Service name of a valid result, empty otherwise
    pub fn compliance_service_name(&self) -> &str {
        self.valid_result()
            .map(|result| result.compliance_service_name.as_str())
            .unwrap_or("")
    }

    pub fn is_using_local_compliance_service(&self) -> bool {
        self.local_compliance_service_name
            .as_deref()
            .is_some_and(|local| local == self.compliance_service_name())
    }

    pub fn aggregator(&self) -> ComplianceAggregator<'_> {
        ComplianceAggregator::new(self.active_result())
    }
}
