/// Compliance domain layer
///
/// Pure data model, validation and aggregation logic. Nothing in here performs
/// I/O or keeps state between calls.
pub mod domain;
pub mod policies;
pub mod services;
