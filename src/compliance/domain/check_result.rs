use super::compliance_level::{ComplianceLevel, LevelId};
use super::finding::Finding;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Informational severity classification, independent of compliance levels
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssessmentLevel {
    pub id: i64,
    pub label: String,
}

/// Snapshot of one compliance check, as returned by the compliance service.
///
/// A snapshot is produced wholesale and never mutated afterwards; the store
/// replaces it as a whole.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheckResult {
    pub error: bool,
    pub policy_name: String,
    pub compliance_service_name: String,
    pub findings: Vec<Finding>,
    pub compliance_levels: Vec<ComplianceLevel>,
    pub default_compliance_level: LevelId,
    /// Opaque; only its presence as an object is ever checked
    pub assessment_level: Value,
    #[serde(default, deserialize_with = "lenient_assessment_levels")]
    pub assessment_levels: Option<Vec<AssessmentLevel>>,
}

impl ComplianceCheckResult {
    /// Cheap gate used by readers: not an error result and the assessment
    /// level is an object. This is not a full structural validation.
    pub fn is_usable(&self) -> bool {
        !self.error && self.assessment_level.is_object()
    }
}

/// A non-array `assessmentLevels` is treated as absent.
fn lenient_assessment_levels<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<AssessmentLevel>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
