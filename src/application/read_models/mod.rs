//! Read models for CQRS-lite pattern
//!
//! View-optimized structs that flatten a compliance snapshot into what a
//! presentation layer needs per detected asset.

pub mod asset_compliance_view;
pub mod compliance_view_builder;

pub use asset_compliance_view::{AssetComplianceView, ComplianceOverview, LevelShare};
pub use compliance_view_builder::ComplianceViewBuilder;
