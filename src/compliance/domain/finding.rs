use super::compliance_level::LevelId;
use serde::Deserialize;

/// Association between a scanned asset and a compliance level
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// `bom-ref` of the asset; several findings may share one
    pub bom_ref: String,
    pub level_id: LevelId,
    #[serde(default)]
    pub message: Option<String>,
}

impl Finding {
    /// Returns the message when it is present and non-empty
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
