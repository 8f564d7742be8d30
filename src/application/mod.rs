/// Application layer - Use cases, viewer state and read models
///
/// This layer orchestrates the domain services and outbound ports. It owns
/// the active compliance snapshot and decides when a new one is adopted.
pub mod dto;
pub mod read_models;
pub mod state;
pub mod use_cases;
