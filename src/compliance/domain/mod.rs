pub mod asset;
pub mod check_result;
pub mod compliance_level;
pub mod finding;
pub mod policy;
pub mod validation_report;

pub use asset::{Asset, Cbom};
pub use check_result::{AssessmentLevel, ComplianceCheckResult};
pub use compliance_level::{ComplianceIcon, ComplianceLevel, LevelId};
pub use finding::Finding;
pub use policy::PolicyDescriptor;
pub use validation_report::{ValidationReport, ValidationStage, Violation, ViolationKind};
