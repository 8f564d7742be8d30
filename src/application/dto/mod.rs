/// Data Transfer Objects for the application layer
mod check_outcome;

pub use check_outcome::{CompletedCheck, PendingCheck, PolicyReloadOutcome, RecheckOutcome};
