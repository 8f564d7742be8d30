use crate::compliance::domain::{
    ComplianceCheckResult, ComplianceIcon, ValidationReport, ValidationStage, Violation,
};
use crate::shared::Result;
use serde_json::{Map, Value};
use std::collections::HashSet;

type StageResult<T> = std::result::Result<T, Vec<Violation>>;

/// ResultValidator checks that a compliance document received from the
/// compliance service has the expected shape before it is activated.
///
/// Stages run in order and stop at the first failing one:
/// 1. existence and `error === false`
/// 2. top-level field types
/// 3. compliance levels (types, icon, unique ids)
/// 4. findings (types, level id must reference a declared level)
/// 5. assessment levels, only when present as an array
pub struct ResultValidator;

impl ResultValidator {
    /// Runs every stage and returns the structured outcome
    pub fn check(candidate: &Value) -> ValidationReport {
        match Self::run_stages(candidate) {
            Ok(()) => ValidationReport::valid(),
            Err(violations) => ValidationReport::new(violations),
        }
    }

    /// Runs every stage, logs each violation, and returns whether the
    /// candidate is valid
    pub fn validate(candidate: &Value) -> bool {
        let report = Self::check(candidate);
        Self::log_report(&report);
        report.is_valid()
    }

    /// Validates the candidate and converts it into a typed snapshot,
    /// handing back the rejection report on failure
    pub fn parse(candidate: Value) -> std::result::Result<ComplianceCheckResult, ValidationReport> {
        let report = Self::check(&candidate);
        Self::log_report(&report);
        if !report.is_valid() {
            return Err(report);
        }

        serde_json::from_value(candidate).map_err(|e| {
            tracing::warn!(error = %e, "validated compliance result could not be converted");
            ValidationReport::new(vec![Violation::structural(
                ValidationStage::TopLevel,
                "$",
                "compliance result",
                e.to_string(),
            )])
        })
    }

    /// Validates the candidate and converts it into a typed snapshot
    ///
    /// # Errors
    /// Returns `ComplianceError::InvalidComplianceResult` when any stage fails
    pub fn accept(candidate: Value) -> Result<ComplianceCheckResult> {
        Self::parse(candidate).map_err(|report| match report.to_error() {
            Some(error) => error.into(),
            None => anyhow::anyhow!("compliance result rejected without violations"),
        })
    }

    fn log_report(report: &ValidationReport) {
        if report.is_valid() {
            tracing::debug!("compliance result passed validation");
            return;
        }
        for violation in report.violations() {
            tracing::warn!(
                stage = %violation.stage,
                path = %violation.path,
                expected = %violation.expected,
                actual = %violation.actual,
                "invalid compliance result"
            );
        }
    }

    fn run_stages(candidate: &Value) -> StageResult<()> {
        let document = Self::check_existence(candidate)?;
        Self::check_top_level(document)?;
        tracing::debug!("passed: top-level structure");

        let level_ids = Self::check_compliance_levels(array_field(document, "complianceLevels"))?;
        tracing::debug!(levels = level_ids.len(), "passed: compliance levels");

        Self::check_findings(array_field(document, "findings"), &level_ids)?;
        tracing::debug!("passed: findings");

        match document.get("assessmentLevels") {
            Some(Value::Array(levels)) => {
                Self::check_assessment_levels(levels)?;
                tracing::debug!("passed: assessment levels");
            }
            _ => tracing::debug!("no assessmentLevels array, skipping"),
        }

        Ok(())
    }

    /// Stage 1: the candidate is an object whose `error` is exactly `false`
    fn check_existence(candidate: &Value) -> StageResult<&Map<String, Value>> {
        let Some(document) = candidate.as_object() else {
            return Err(vec![Violation::structural(
                ValidationStage::Existence,
                "$",
                "object",
                type_name(Some(candidate)),
            )]);
        };

        match document.get("error") {
            Some(Value::Bool(false)) => Ok(document),
            other => Err(vec![Violation::structural(
                ValidationStage::Existence,
                "error",
                "false",
                describe_scalar(other),
            )]),
        }
    }

    /// Stage 2: every offending top-level field is reported
    fn check_top_level(document: &Map<String, Value>) -> StageResult<()> {
        let expectations: [(&str, &str, fn(&Value) -> bool); 6] = [
            ("policyName", "string", Value::is_string),
            ("complianceServiceName", "string", Value::is_string),
            ("findings", "array", Value::is_array),
            ("complianceLevels", "array", Value::is_array),
            ("defaultComplianceLevel", "integer", is_integer),
            ("assessmentLevel", "object", Value::is_object),
        ];

        let violations: Vec<Violation> = expectations
            .iter()
            .filter_map(|(field, expected, accepts)| {
                let value = document.get(*field);
                match value {
                    Some(v) if accepts(v) => None,
                    _ => Some(Violation::structural(
                        ValidationStage::TopLevel,
                        *field,
                        *expected,
                        type_name(value),
                    )),
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Stage 3: returns the set of declared level ids
    fn check_compliance_levels(levels: &[Value]) -> StageResult<HashSet<i64>> {
        const STAGE: ValidationStage = ValidationStage::ComplianceLevels;
        let mut seen = HashSet::new();

        for (index, level) in levels.iter().enumerate() {
            let path = format!("complianceLevels[{}]", index);
            let entry = as_entry(level, &path, STAGE)?;

            let mut violations = Vec::new();
            let id = require_integer(entry, "id", &path, STAGE, &mut violations);
            require_string(entry, "label", &path, STAGE, &mut violations);
            require_string(entry, "colorHex", &path, STAGE, &mut violations);
            let icon = require_string(entry, "icon", &path, STAGE, &mut violations);
            if !violations.is_empty() {
                return Err(violations);
            }

            if let Some(icon) = icon {
                if ComplianceIcon::from_name(icon).is_none() {
                    return Err(vec![Violation::structural(
                        STAGE,
                        format!("{}.icon", path),
                        format!("one of {}", ComplianceIcon::expected_names()),
                        format!("\"{}\"", icon),
                    )]);
                }
            }

            check_optional_string(entry, "description", &path, STAGE)?;

            if let Some(id) = id {
                if !seen.insert(id) {
                    return Err(vec![Violation::structural(
                        STAGE,
                        format!("{}.id", path),
                        "unique compliance level id",
                        format!("duplicate id {}", id),
                    )]);
                }
            }
        }

        Ok(seen)
    }

    /// Stage 4: findings must reference a level declared in stage 3
    fn check_findings(findings: &[Value], level_ids: &HashSet<i64>) -> StageResult<()> {
        const STAGE: ValidationStage = ValidationStage::Findings;

        for (index, finding) in findings.iter().enumerate() {
            let path = format!("findings[{}]", index);
            let entry = as_entry(finding, &path, STAGE)?;

            let mut violations = Vec::new();
            require_string(entry, "bomRef", &path, STAGE, &mut violations);
            if let Some(level_id) = require_integer(entry, "levelId", &path, STAGE, &mut violations)
            {
                if !level_ids.contains(&level_id) {
                    violations.push(Violation::referential(
                        STAGE,
                        format!("{}.levelId", path),
                        format!("one of the declared compliance level ids {}", sorted(level_ids)),
                        level_id.to_string(),
                    ));
                }
            }
            if !violations.is_empty() {
                return Err(violations);
            }

            check_optional_string(entry, "message", &path, STAGE)?;
        }

        Ok(())
    }

    /// Stage 5: informational levels, unique ids
    fn check_assessment_levels(levels: &[Value]) -> StageResult<()> {
        const STAGE: ValidationStage = ValidationStage::AssessmentLevels;
        let mut seen = HashSet::new();

        for (index, level) in levels.iter().enumerate() {
            let path = format!("assessmentLevels[{}]", index);
            let entry = as_entry(level, &path, STAGE)?;

            let mut violations = Vec::new();
            let id = require_integer(entry, "id", &path, STAGE, &mut violations);
            require_string(entry, "label", &path, STAGE, &mut violations);
            if !violations.is_empty() {
                return Err(violations);
            }

            if let Some(id) = id {
                if !seen.insert(id) {
                    return Err(vec![Violation::structural(
                        STAGE,
                        format!("{}.id", path),
                        "unique assessment level id",
                        format!("duplicate id {}", id),
                    )]);
                }
            }
        }

        Ok(())
    }
}

/// Array field already type-checked by stage 2
fn array_field<'a>(document: &'a Map<String, Value>, field: &str) -> &'a [Value] {
    document
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn as_entry<'a>(
    value: &'a Value,
    path: &str,
    stage: ValidationStage,
) -> StageResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        vec![Violation::structural(
            stage,
            path,
            "object",
            type_name(Some(value)),
        )]
    })
}

fn require_integer(
    entry: &Map<String, Value>,
    field: &str,
    path: &str,
    stage: ValidationStage,
    violations: &mut Vec<Violation>,
) -> Option<i64> {
    let value = entry.get(field);
    let id = value.and_then(Value::as_i64);
    if id.is_none() {
        violations.push(Violation::structural(
            stage,
            format!("{}.{}", path, field),
            "integer",
            type_name(value),
        ));
    }
    id
}

fn require_string<'a>(
    entry: &'a Map<String, Value>,
    field: &str,
    path: &str,
    stage: ValidationStage,
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    let value = entry.get(field);
    let text = value.and_then(Value::as_str);
    if text.is_none() {
        violations.push(Violation::structural(
            stage,
            format!("{}.{}", path, field),
            "string",
            type_name(value),
        ));
    }
    text
}

/// Absent and `null` both count as "not present"
fn check_optional_string(
    entry: &Map<String, Value>,
    field: &str,
    path: &str,
    stage: ValidationStage,
) -> StageResult<()> {
    match entry.get(field) {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        other => Err(vec![Violation::structural(
            stage,
            format!("{}.{}", path, field),
            "string (if present)",
            type_name(other),
        )]),
    }
}

fn is_integer(value: &Value) -> bool {
    value.as_i64().is_some()
}

fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(n)) if n.as_i64().is_some() => "integer",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn describe_scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(b)) => b.to_string(),
        other => type_name(other).to_string(),
    }
}

fn sorted(ids: &HashSet<i64>) -> String {
    let mut ids: Vec<i64> = ids.iter().copied().collect();
    ids.sort_unstable();
    format!("{:?}", ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{LevelId, ViolationKind};
    use serde_json::json;

    fn scenario_a() -> Value {
        json!({
            "error": false,
            "policyName": "P",
            "complianceServiceName": "S",
            "findings": [{"bomRef": "a", "levelId": 1}],
            "complianceLevels": [
                {"id": 1, "label": "OK", "colorHex": "#0f0", "icon": "CHECKMARK"},
                {"id": 2, "label": "Bad", "colorHex": "#f00", "icon": "ERROR"}
            ],
            "defaultComplianceLevel": 2,
            "assessmentLevel": {}
        })
    }

    fn with(mut doc: Value, field: &str, value: Value) -> Value {
        doc.as_object_mut().unwrap().insert(field.to_string(), value);
        doc
    }

    fn without(mut doc: Value, field: &str) -> Value {
        doc.as_object_mut().unwrap().remove(field);
        doc
    }

    // ========== stage 1 ==========

    #[test]
    fn test_scenario_a_is_valid() {
        assert!(ResultValidator::validate(&scenario_a()));
        assert!(ResultValidator::check(&scenario_a()).is_valid());
    }

    #[test]
    fn test_null_candidate_fails() {
        let report = ResultValidator::check(&Value::Null);
        assert_eq!(report.failed_stage(), Some(ValidationStage::Existence));
        assert_eq!(report.first().unwrap().actual, "null");
    }

    #[test]
    fn test_non_object_candidate_fails() {
        assert!(!ResultValidator::validate(&json!([1, 2])));
        assert!(!ResultValidator::validate(&json!("error")));
    }

    #[test]
    fn test_error_flag_must_be_false() {
        for error in [json!(true), json!("false"), json!(0), Value::Null] {
            let report = ResultValidator::check(&with(scenario_a(), "error", error));
            assert_eq!(report.failed_stage(), Some(ValidationStage::Existence));
            assert_eq!(report.first().unwrap().path, "error");
        }

        let report = ResultValidator::check(&without(scenario_a(), "error"));
        assert_eq!(report.first().unwrap().actual, "missing");
    }

    // ========== stage 2 ==========

    #[test]
    fn test_missing_required_top_level_fields_fail() {
        for field in [
            "policyName",
            "complianceServiceName",
            "findings",
            "complianceLevels",
            "defaultComplianceLevel",
            "assessmentLevel",
        ] {
            let report = ResultValidator::check(&without(scenario_a(), field));
            assert_eq!(report.failed_stage(), Some(ValidationStage::TopLevel), "{}", field);
            assert_eq!(report.first().unwrap().path, field);
            assert_eq!(report.first().unwrap().actual, "missing");
        }
    }

    #[test]
    fn test_wrong_typed_top_level_fields_fail() {
        let cases = [
            ("policyName", json!(5)),
            ("complianceServiceName", json!(null)),
            ("findings", json!({})),
            ("complianceLevels", json!("levels")),
            ("defaultComplianceLevel", json!("2")),
            ("defaultComplianceLevel", json!(2.5)),
            ("assessmentLevel", json!("Compliant")),
            ("assessmentLevel", json!(null)),
            ("assessmentLevel", json!([])),
        ];
        for (field, value) in cases {
            assert!(
                !ResultValidator::validate(&with(scenario_a(), field, value.clone())),
                "{} = {}",
                field,
                value
            );
        }
    }

    #[test]
    fn test_top_level_reports_every_offending_field() {
        let doc = with(with(scenario_a(), "policyName", json!(1)), "findings", json!(null));
        let report = ResultValidator::check(&doc);
        let paths: Vec<_> = report.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["policyName", "findings"]);
        assert_eq!(report.violations()[0].expected, "string");
        assert_eq!(report.violations()[0].actual, "integer");
    }

    #[test]
    fn test_assessment_level_contents_are_not_checked() {
        let doc = with(scenario_a(), "assessmentLevel", json!({"anything": [1, "x"]}));
        assert!(ResultValidator::validate(&doc));
    }

    // ========== stage 3 ==========

    #[test]
    fn test_scenario_d_duplicate_level_id_fails() {
        let doc = with(
            scenario_a(),
            "complianceLevels",
            json!([
                {"id": 1, "label": "OK", "colorHex": "#0f0", "icon": "CHECKMARK"},
                {"id": 1, "label": "Bad", "colorHex": "#f00", "icon": "ERROR"}
            ]),
        );
        let report = ResultValidator::check(&doc);
        assert_eq!(report.failed_stage(), Some(ValidationStage::ComplianceLevels));
        assert_eq!(report.first().unwrap().path, "complianceLevels[1].id");
        assert_eq!(report.first().unwrap().actual, "duplicate id 1");
    }

    #[test]
    fn test_unknown_icon_fails() {
        let doc = with(
            scenario_a(),
            "complianceLevels",
            json!([{"id": 1, "label": "OK", "colorHex": "#0f0", "icon": "TEST"}]),
        );
        let report = ResultValidator::check(&doc);
        let violation = report.first().unwrap();
        assert_eq!(violation.path, "complianceLevels[0].icon");
        assert!(violation.expected.contains("NOT_APPLICABLE"));
        assert_eq!(violation.actual, "\"TEST\"");
    }

    #[test]
    fn test_level_field_types() {
        let report = ResultValidator::check(&with(
            scenario_a(),
            "complianceLevels",
            json!([{"id": "1", "label": 2, "colorHex": "#0f0"}]),
        ));
        let paths: Vec<_> = report.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "complianceLevels[0].id",
                "complianceLevels[0].label",
                "complianceLevels[0].icon"
            ]
        );
    }

    #[test]
    fn test_level_entry_must_be_object() {
        let report = ResultValidator::check(&with(scenario_a(), "complianceLevels", json!([1])));
        assert_eq!(report.first().unwrap().path, "complianceLevels[0]");
    }

    #[test]
    fn test_level_description() {
        let level = |description: Value| {
            with(
                scenario_a(),
                "complianceLevels",
                json!([
                    {"id": 1, "label": "OK", "colorHex": "#0f0", "icon": "CHECKMARK", "description": description},
                    {"id": 2, "label": "Bad", "colorHex": "#f00", "icon": "ERROR"}
                ]),
            )
        };
        assert!(ResultValidator::validate(&level(json!("all good"))));
        assert!(ResultValidator::validate(&level(Value::Null)));
        assert!(!ResultValidator::validate(&level(json!(42))));
        assert!(!ResultValidator::validate(&level(json!(["a"]))));
    }

    // ========== stage 4 ==========

    #[test]
    fn test_scenario_c_unknown_level_reference_fails() {
        let doc = with(scenario_a(), "findings", json!([{"bomRef": "a", "levelId": 99}]));
        let report = ResultValidator::check(&doc);
        assert!(!report.is_valid());
        assert!(report.has_referential_violation());
        let violation = report.first().unwrap();
        assert_eq!(violation.kind, ViolationKind::Referential);
        assert_eq!(violation.path, "findings[0].levelId");
        assert_eq!(violation.actual, "99");
        assert!(violation.expected.contains("[1, 2]"));
    }

    #[test]
    fn test_finding_field_types() {
        let cases = [
            json!([{"levelId": 1}]),
            json!([{"bomRef": 3, "levelId": 1}]),
            json!([{"bomRef": "a", "levelId": "1"}]),
            json!([{"bomRef": "a"}]),
            json!([{"bomRef": "a", "levelId": 1, "message": 7}]),
            json!(["a"]),
        ];
        for findings in cases {
            let report = ResultValidator::check(&with(scenario_a(), "findings", findings.clone()));
            assert_eq!(
                report.failed_stage(),
                Some(ValidationStage::Findings),
                "{}",
                findings
            );
        }
    }

    #[test]
    fn test_finding_message_optional() {
        let doc = with(
            scenario_a(),
            "findings",
            json!([
                {"bomRef": "a", "levelId": 1, "message": "uses RSA"},
                {"bomRef": "b", "levelId": 2, "message": null}
            ]),
        );
        assert!(ResultValidator::validate(&doc));
    }

    #[test]
    fn test_empty_findings_and_levels_are_valid() {
        let doc = with(with(scenario_a(), "findings", json!([])), "complianceLevels", json!([]));
        assert!(ResultValidator::validate(&doc));
    }

    #[test]
    fn test_fail_fast_stops_at_levels_before_findings() {
        let doc = with(
            with(scenario_a(), "complianceLevels", json!([{"id": 1}])),
            "findings",
            json!([{"bomRef": 1}]),
        );
        let report = ResultValidator::check(&doc);
        assert!(report
            .violations()
            .iter()
            .all(|v| v.stage == ValidationStage::ComplianceLevels));
    }

    // ========== stage 5 ==========

    #[test]
    fn test_assessment_levels_validated_when_array() {
        let valid = with(
            scenario_a(),
            "assessmentLevels",
            json!([{"id": 1, "label": "Compliant"}, {"id": 2, "label": "Not Compliant"}]),
        );
        assert!(ResultValidator::validate(&valid));

        let malformed = with(scenario_a(), "assessmentLevels", json!([{"id": 1}]));
        assert_eq!(
            ResultValidator::check(&malformed).failed_stage(),
            Some(ValidationStage::AssessmentLevels)
        );

        let duplicate = with(
            scenario_a(),
            "assessmentLevels",
            json!([{"id": 1, "label": "A"}, {"id": 1, "label": "B"}]),
        );
        assert_eq!(
            ResultValidator::check(&duplicate).first().unwrap().actual,
            "duplicate id 1"
        );
    }

    #[test]
    fn test_non_array_assessment_levels_skipped() {
        assert!(ResultValidator::validate(&with(
            scenario_a(),
            "assessmentLevels",
            json!("n/a")
        )));
        assert!(ResultValidator::validate(&with(scenario_a(), "assessmentLevels", json!({}))));
    }

    // ========== accept() ==========

    #[test]
    fn test_accept_returns_typed_snapshot() {
        let result = ResultValidator::accept(scenario_a()).unwrap();
        assert_eq!(result.policy_name, "P");
        assert_eq!(result.default_compliance_level, LevelId::new(2));
        assert_eq!(result.compliance_levels.len(), 2);
    }

    #[test]
    fn test_parse_hands_back_report() {
        let doc = with(scenario_a(), "policyName", json!(null));
        let report = ResultValidator::parse(doc).unwrap_err();
        assert_eq!(report.failed_stage(), Some(ValidationStage::TopLevel));
        assert!(ResultValidator::parse(scenario_a()).is_ok());
    }

    #[test]
    fn test_accept_rejects_invalid_document() {
        let doc = with(scenario_a(), "findings", json!([{"bomRef": "a", "levelId": 99}]));
        let err = ResultValidator::accept(doc).unwrap_err().to_string();
        assert!(err.contains("Compliance result rejected"));
        assert!(err.contains("findings[0].levelId"));
    }
}
