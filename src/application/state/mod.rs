/// Viewer state shared between readers
mod compliance_store;
mod error_log;

pub use compliance_store::{ComplianceStore, RequestTicket, StoreEvent, SubscriptionId};
pub use error_log::{ErrorEntry, ErrorLog, ErrorStatus};
