//! cbom-compliance - Compliance result handling for CBOM viewers
//!
//! This library validates compliance check results returned by a compliance
//! service, keeps the active result snapshot, and answers per-asset and
//! aggregate compliance queries over the detected cryptographic assets of a
//! CBOM (cryptography bill of materials), following hexagonal architecture
//! and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`compliance`): Result model, validator and aggregator
//! - **Application Layer** (`application`): Result store, use cases and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cbom_compliance::prelude::*;
//!
//! # async fn run(cbom: serde_json::Value) -> Result<()> {
//! let config = ViewerConfig::default();
//! let mut store = ComplianceStore::from_config(&config);
//! store.load_cbom(cbom);
//!
//! // Create use cases
//! let reload = ReloadPoliciesUseCase::new(
//!     HttpComplianceGateway::new(&config)?,
//!     StderrProgressReporter::new(),
//! );
//! let recheck = RecheckComplianceUseCase::new(
//!     HttpComplianceGateway::new(&config)?,
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! reload.execute(&mut store).await;
//! recheck.execute(&mut store).await;
//!
//! for view in ComplianceViewBuilder::build(store.aggregator(), store.detections()) {
//!     println!("{:?}: {} ({})", view.bom_ref, view.label, view.color_hex);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod compliance;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::network::HttpComplianceGateway;
    pub use crate::application::dto::{PolicyReloadOutcome, RecheckOutcome};
    pub use crate::application::read_models::{
        AssetComplianceView, ComplianceOverview, ComplianceViewBuilder,
    };
    pub use crate::application::state::{ComplianceStore, ErrorLog, ErrorStatus, StoreEvent};
    pub use crate::application::use_cases::{RecheckComplianceUseCase, ReloadPoliciesUseCase};
    pub use crate::compliance::domain::{
        Asset, Cbom, ComplianceCheckResult, ComplianceIcon, ComplianceLevel, Finding, LevelId,
        PolicyDescriptor, ValidationReport,
    };
    pub use crate::compliance::policies::SeverityPrecedence;
    pub use crate::compliance::services::{ComplianceAggregator, OccurrenceCounter, ResultValidator};
    pub use crate::config::{discover_config, load_config_from_path, ViewerConfig};
    pub use crate::ports::outbound::{ComplianceGateway, ProgressReporter};
    pub use crate::shared::Result;
}
