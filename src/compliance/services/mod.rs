pub mod compliance_aggregator;
pub mod occurrence_counter;
pub mod result_validator;

pub use compliance_aggregator::ComplianceAggregator;
pub use occurrence_counter::{Occurrence, OccurrenceCounter, OccurrenceSummary};
pub use result_validator::ResultValidator;
