/// Mock implementations for testing
mod mock_compliance_gateway;
mod mock_progress_reporter;

#[allow(unused_imports)]
pub use mock_compliance_gateway::MockComplianceGateway;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
