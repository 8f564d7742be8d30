//! Builder for constructing compliance views from the active snapshot

use super::asset_compliance_view::{AssetComplianceView, ComplianceOverview, LevelShare};
use crate::application::state::ComplianceStore;
use crate::compliance::domain::Asset;
use crate::compliance::services::ComplianceAggregator;

/// Builder for constructing compliance read models
///
/// Every value is taken from `ComplianceAggregator`, so views carry the same
/// fallbacks (`#999`, `Unknown`, `No description`) as the per-asset queries.
pub struct ComplianceViewBuilder;

impl ComplianceViewBuilder {
    /// Builds one view per asset, in input order
    pub fn build(aggregator: ComplianceAggregator<'_>, assets: &[Asset]) -> Vec<AssetComplianceView> {
        assets
            .iter()
            .map(|asset| Self::build_asset(aggregator, asset))
            .collect()
    }

    pub fn build_asset(aggregator: ComplianceAggregator<'_>, asset: &Asset) -> AssetComplianceView {
        let messages = aggregator
            .findings_with_message(asset)
            .into_iter()
            .filter_map(|finding| finding.message())
            .map(str::to_string)
            .collect();

        AssetComplianceView {
            bom_ref: asset.bom_ref().map(str::to_string),
            name: asset.name().map(str::to_string),
            level_id: aggregator.level_for_asset(asset),
            label: aggregator.label_for_asset(asset).to_string(),
            color_hex: aggregator.color_for_asset(asset).to_string(),
            icon: aggregator.icon_for_asset(asset),
            description: aggregator.description_for_asset(asset).to_string(),
            messages,
        }
    }

    /// Builds the summary of the store's detections against its active result
    pub fn build_overview(store: &ComplianceStore) -> ComplianceOverview {
        let aggregator = store.aggregator();
        let detections = store.detections();

        let distribution = aggregator
            .repartition(detections)
            .into_iter()
            .filter_map(|(level_id, count)| {
                aggregator.level_object(level_id).map(|level| LevelShare {
                    level_id,
                    label: level.label.clone(),
                    color_hex: level.color_hex.clone(),
                    count,
                })
            })
            .collect();

        ComplianceOverview {
            policy_name: store.policy_name().to_string(),
            compliance_service_name: store.compliance_service_name().to_string(),
            assets: Self::build(aggregator, detections),
            distribution,
        }
    }
}
