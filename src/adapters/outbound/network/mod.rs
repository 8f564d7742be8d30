/// Network adapters for the compliance service API
mod http_compliance_gateway;

pub use http_compliance_gateway::HttpComplianceGateway;
