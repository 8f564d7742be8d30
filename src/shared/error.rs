use std::path::PathBuf;
use thiserror::Error;

/// Domain errors raised by the compliance viewer core.
///
/// Validation rejections are normally carried as a `ValidationReport`; this
/// enum is what callers get when they ask for an `Err` instead.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("Compliance result rejected with {violations} violation(s): {first}\n\n💡 Hint: The previous compliance result stays active. Check the compliance service response")]
    InvalidComplianceResult { violations: usize, first: String },

    #[error("Compliance service request failed: {endpoint}\nDetails: {details}\n\n💡 Hint: Please check that the compliance service is reachable")]
    Transport { endpoint: String, details: String },

    #[error("Invalid config: {field}\nReason: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_compliance_result_display() {
        let error = ComplianceError::InvalidComplianceResult {
            violations: 2,
            first: "findings[0].levelId: expected known compliance level id, got 99".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("2 violation(s)"));
        assert!(display.contains("findings[0].levelId"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_transport_display() {
        let error = ComplianceError::Transport {
            endpoint: "/api/v1/compliance/policies".to_string(),
            details: "status 503".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Compliance service request failed"));
        assert!(display.contains("/api/v1/compliance/policies"));
        assert!(display.contains("status 503"));
    }

    #[test]
    fn test_invalid_config_display() {
        let error = ComplianceError::InvalidConfig {
            field: "request_timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("request_timeout_secs"));
        assert!(display.contains("must be greater than zero"));
    }

    #[test]
    fn test_file_read_error_display() {
        let error = ComplianceError::FileReadError {
            path: PathBuf::from("/test/cbom-compliance.config.yml"),
            details: "File not found".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to read file"));
        assert!(display.contains("/test/cbom-compliance.config.yml"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_security_error_display() {
        let error = ComplianceError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Symbolic links are not allowed"));
        assert!(display.contains("Use a regular file instead"));
    }
}
