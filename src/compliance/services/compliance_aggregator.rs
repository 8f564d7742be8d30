use crate::compliance::domain::{
    Asset, ComplianceCheckResult, ComplianceIcon, ComplianceLevel, Finding, LevelId,
};
use crate::compliance::policies::SeverityPrecedence;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// Colour used when an asset has no resolvable compliance level
pub const FALLBACK_COLOR: &str = "#999";
/// Label used when an asset has no resolvable compliance level
pub const FALLBACK_LABEL: &str = "Unknown";
/// Description used when neither a description nor a label is available
pub const FALLBACK_DESCRIPTION: &str = "No description";

/// ComplianceAggregator answers per-asset and aggregate compliance queries
/// over one result snapshot.
///
/// It borrows the snapshot and keeps no state of its own, so every query is a
/// pure function of the snapshot and its arguments. Queries that need a valid
/// result treat an absent or unusable snapshot as "no result".
///
/// An asset without a `bom-ref` matches no finding.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceAggregator<'a> {
    result: Option<&'a ComplianceCheckResult>,
}

impl<'a> ComplianceAggregator<'a> {
    pub fn new(result: Option<&'a ComplianceCheckResult>) -> Self {
        Self { result }
    }

    fn usable_result(&self) -> Option<&'a ComplianceCheckResult> {
        self.result.filter(|result| result.is_usable())
    }

    /// Compliance levels of the snapshot, empty when there is no usable result
    pub fn levels(&self) -> &'a [ComplianceLevel] {
        self.usable_result()
            .map(|result| result.compliance_levels.as_slice())
            .unwrap_or(&[])
    }

    /// Every finding whose `bomRef` equals the asset's `bom-ref`
    pub fn findings_for_asset(&self, asset: &Asset) -> Vec<&'a Finding> {
        match (self.result, asset.bom_ref()) {
            (Some(result), Some(bom_ref)) => result
                .findings
                .iter()
                .filter(|finding| finding.bom_ref == bom_ref)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Findings of the asset that carry a non-empty message
    pub fn findings_with_message(&self, asset: &Asset) -> Vec<&'a Finding> {
        if self.usable_result().is_none() {
            return Vec::new();
        }
        self.findings_for_asset(asset)
            .into_iter()
            .filter(|finding| finding.message().is_some())
            .collect()
    }

    /// Level that applies to the asset, `None` without a usable result.
    ///
    /// With matching findings this is the lowest finding level id, otherwise
    /// the result's default level.
    pub fn level_for_asset(&self, asset: &Asset) -> Option<LevelId> {
        let result = self.usable_result()?;
        let finding_levels = self
            .findings_for_asset(asset)
            .into_iter()
            .map(|finding| finding.level_id);
        Some(SeverityPrecedence::resolve(
            finding_levels,
            result.default_compliance_level,
        ))
    }

    /// Looks up the compliance level with the given id.
    ///
    /// Returns `None` and logs a warning when no level or more than one
    /// level carries the id.
    pub fn level_object(&self, id: LevelId) -> Option<&'a ComplianceLevel> {
        let mut matches = self.levels().iter().filter(|level| level.id == id);
        match (matches.next(), matches.next()) {
            (Some(level), None) => Some(level),
            (None, _) => {
                tracing::warn!(level_id = %id, "no compliance level found for id");
                None
            }
            (Some(_), Some(_)) => {
                tracing::warn!(
                    level_id = %id,
                    "duplicate compliance level id in active result, ignoring lookup"
                );
                None
            }
        }
    }

    fn level_object_for_asset(&self, asset: &Asset) -> Option<&'a ComplianceLevel> {
        self.level_for_asset(asset)
            .and_then(|id| self.level_object(id))
    }

    pub fn color_for_asset(&self, asset: &Asset) -> &'a str {
        self.level_object_for_asset(asset)
            .map(|level| level.color_hex.as_str())
            .filter(|color| !color.is_empty())
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn label_for_asset(&self, asset: &Asset) -> &'a str {
        self.level_object_for_asset(asset)
            .map(|level| level.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(FALLBACK_LABEL)
    }

    pub fn icon_for_asset(&self, asset: &Asset) -> ComplianceIcon {
        self.level_object_for_asset(asset)
            .map(|level| level.icon)
            .unwrap_or(ComplianceIcon::Unknown)
    }

    /// Description of the asset's level, falling back to its label
    pub fn description_for_asset(&self, asset: &Asset) -> &'a str {
        let level = self.level_object_for_asset(asset);
        level
            .and_then(|level| level.description.as_deref())
            .filter(|description| !description.is_empty())
            .or_else(|| {
                level
                    .map(|level| level.label.as_str())
                    .filter(|label| !label.is_empty())
            })
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Number of assets per compliance level.
    ///
    /// Every declared level starts at zero. Assets whose level is not a
    /// declared id are left out, so the counts may sum to less than
    /// `assets.len()`.
    pub fn repartition(&self, assets: &[Asset]) -> BTreeMap<LevelId, usize> {
        let mut counts: BTreeMap<LevelId, usize> =
            self.levels().iter().map(|level| (level.id, 0)).collect();

        for asset in assets {
            let Some(id) = self.level_for_asset(asset) else {
                continue;
            };
            if let Some(count) = counts.get_mut(&id) {
                *count += 1;
            }
        }

        counts
    }

    /// Label to colour mapping for chart legends, in ascending level id order.
    ///
    /// Levels sharing a label collapse into one entry holding the colour of
    /// the level with the highest id.
    pub fn color_scale(&self, assets: &[Asset]) -> IndexMap<String, String> {
        let by_id: HashMap<LevelId, &ComplianceLevel> = self
            .levels()
            .iter()
            .map(|level| (level.id, level))
            .collect();

        let mut scale = IndexMap::new();
        for id in self.repartition(assets).keys() {
            if let Some(level) = by_id.get(id) {
                scale.insert(level.label.clone(), level.color_hex.clone());
            }
        }
        scale
    }
}
