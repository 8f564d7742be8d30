//! Asset compliance view structs for read model

use crate::compliance::domain::{ComplianceIcon, LevelId};

/// Compliance state of one detected cryptographic asset
#[derive(Debug, Clone, PartialEq)]
pub struct AssetComplianceView {
    /// BOM reference identifier, absent for assets without `bom-ref`
    pub bom_ref: Option<String>,
    /// Asset name from the CBOM component
    pub name: Option<String>,
    /// Resolved level, `None` while no usable result is active
    pub level_id: Option<LevelId>,
    pub label: String,
    pub color_hex: String,
    pub icon: ComplianceIcon,
    pub description: String,
    /// Non-empty finding messages, in finding order
    pub messages: Vec<String>,
}

/// One slice of the per-level distribution
#[derive(Debug, Clone, PartialEq)]
pub struct LevelShare {
    pub level_id: LevelId,
    pub label: String,
    pub color_hex: String,
    pub count: usize,
}

/// Whole-CBOM compliance summary
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceOverview {
    pub policy_name: String,
    pub compliance_service_name: String,
    pub assets: Vec<AssetComplianceView>,
    /// Counts per declared level, in ascending id order
    pub distribution: Vec<LevelShare>,
}

impl ComplianceOverview {
    /// Number of assets that resolved to a level
    pub fn assessed_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|asset| asset.level_id.is_some())
            .count()
    }
}
