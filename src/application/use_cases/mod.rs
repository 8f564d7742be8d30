/// Use cases - Application business logic
mod recheck_compliance;
mod reload_policies;

pub use recheck_compliance::RecheckComplianceUseCase;
pub use reload_policies::ReloadPoliciesUseCase;
