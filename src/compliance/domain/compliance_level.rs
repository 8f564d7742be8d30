use serde::Deserialize;
use std::fmt;

/// Identifier of a compliance level within one result.
///
/// Ids are unique per result but carry no ordering semantics of their own;
/// the "lowest wins" rule lives in `SeverityPrecedence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct LevelId(i64);

impl LevelId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LevelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Icon attached to a compliance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceIcon {
    Checkmark,
    CheckmarkSecure,
    Warning,
    Error,
    NotApplicable,
    Unknown,
}

impl ComplianceIcon {
    pub const ALL: [ComplianceIcon; 6] = [
        ComplianceIcon::Checkmark,
        ComplianceIcon::CheckmarkSecure,
        ComplianceIcon::Warning,
        ComplianceIcon::Error,
        ComplianceIcon::NotApplicable,
        ComplianceIcon::Unknown,
    ];

    /// Wire name as it appears in compliance documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceIcon::Checkmark => "CHECKMARK",
            ComplianceIcon::CheckmarkSecure => "CHECKMARK_SECURE",
            ComplianceIcon::Warning => "WARNING",
            ComplianceIcon::Error => "ERROR",
            ComplianceIcon::NotApplicable => "NOT_APPLICABLE",
            ComplianceIcon::Unknown => "UNKNOWN",
        }
    }

    /// Parses a wire name. Matching is exact (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.as_str() == name)
    }

    /// Name of the glyph a renderer should draw for this icon
    pub fn glyph_name(&self) -> &'static str {
        match self {
            ComplianceIcon::Checkmark => "Checkmark24",
            ComplianceIcon::CheckmarkSecure => "Security24",
            ComplianceIcon::Warning => "WarningAlt24",
            ComplianceIcon::Error => "MisuseOutline24",
            ComplianceIcon::NotApplicable => "NotAvailable24",
            ComplianceIcon::Unknown => "WatsonHealthImageAvailabilityUnavailable24",
        }
    }

    /// Comma-separated list of every recognised wire name
    pub fn expected_names() -> String {
        Self::ALL
            .iter()
            .map(|icon| icon.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ComplianceIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A severity/status tier with its display metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceLevel {
    pub id: LevelId,
    pub label: String,
    pub color_hex: String,
    pub icon: ComplianceIcon,
    #[serde(default)]
    pub description: Option<String>,
}
