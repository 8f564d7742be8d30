/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (compliance service, console).
pub mod compliance_gateway;
pub mod progress_reporter;

pub use compliance_gateway::ComplianceGateway;
pub use progress_reporter::ProgressReporter;
