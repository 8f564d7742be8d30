use crate::shared::error::ComplianceError;
use std::fmt;

/// Validation stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationStage {
    Existence,
    TopLevel,
    ComplianceLevels,
    Findings,
    AssessmentLevels,
}

impl ValidationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStage::Existence => "existence",
            ValidationStage::TopLevel => "top-level",
            ValidationStage::ComplianceLevels => "compliance levels",
            ValidationStage::Findings => "findings",
            ValidationStage::AssessmentLevels => "assessment levels",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural violations are wrong shapes or types; referential violations
/// are findings pointing at a compliance level that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    Structural,
    Referential,
}

/// One reason a candidate document was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub stage: ValidationStage,
    pub kind: ViolationKind,
    /// Dotted path to the offending field, e.g. `complianceLevels[1].icon`
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl Violation {
    pub fn structural(
        stage: ValidationStage,
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            kind: ViolationKind::Structural,
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn referential(
        stage: ValidationStage,
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            kind: ViolationKind::Referential,
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Outcome of validating a candidate compliance document.
///
/// Validation is fail-fast, so `violations` only describes the stage that
/// failed; an empty list means the document is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Stage that rejected the document, `None` when valid
    pub fn failed_stage(&self) -> Option<ValidationStage> {
        self.first().map(|v| v.stage)
    }

    pub fn has_referential_violation(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.kind == ViolationKind::Referential)
    }

    /// Converts a rejection into an error; `None` when the report is valid.
    pub fn to_error(&self) -> Option<ComplianceError> {
        self.first()
            .map(|first| ComplianceError::InvalidComplianceResult {
                violations: self.violations.len(),
                first: first.to_string(),
            })
    }
}
