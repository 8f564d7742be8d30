use crate::compliance::domain::LevelId;

/// SeverityPrecedence policy for resolving the level of an asset
///
/// An asset may collect several findings from different rule evaluations.
/// The most severe applicable level wins, and a lower id is more severe:
/// the result is the numeric minimum of the finding level ids, independent
/// of finding order. Without findings the result's default level applies.
pub struct SeverityPrecedence;

impl SeverityPrecedence {
    /// Resolves the applicable level from the levels of an asset's findings
    ///
    /// # Arguments
    /// * `finding_levels` - Level ids of every finding matching the asset
    /// * `default_level` - The result's default compliance level
    pub fn resolve<I>(finding_levels: I, default_level: LevelId) -> LevelId
    where
        I: IntoIterator<Item = LevelId>,
    {
        finding_levels.into_iter().min().unwrap_or(default_level)
    }
}
