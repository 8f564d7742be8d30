//! Configuration file support for cbom-compliance.
//!
//! Provides YAML-based configuration through `cbom-compliance.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::shared::error::ComplianceError;
use crate::shared::security::{validate_config_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cbom-compliance.config.yml";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";
const DEFAULT_POLICY: &str = "quantum_safe";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Top-level configuration file schema. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Base URL of the compliance service, without a trailing `/api/...`
    pub api_base_url: String,
    /// Policy selected before the policy listing has been loaded
    pub default_policy: String,
    /// Service name reported by the local (fallback) compliance service
    pub local_compliance_service_name: Option<String>,
    pub request_timeout_secs: u64,
    /// Attempts for the policy listing; compliance checks are never retried
    pub max_retries: u32,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_policy: DEFAULT_POLICY.to_string(),
            local_compliance_service_name: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            unknown_fields: HashMap::new(),
        }
    }
}

impl ViewerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ViewerConfig> {
    validate_config_file(path, MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).map_err(|e| ComplianceError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let config: ViewerConfig = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ViewerConfig>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ViewerConfig) -> Result<()> {
    let invalid = |field: &str, reason: &str| ComplianceError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let base_url = config.api_base_url.trim();
    if base_url.is_empty() {
        return Err(invalid("api_base_url", "must not be empty").into());
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(invalid("api_base_url", "must start with http:// or https://").into());
    }
    if config.default_policy.trim().is_empty() {
        return Err(invalid("default_policy", "must not be empty").into());
    }
    if config.request_timeout_secs == 0 {
        return Err(invalid("request_timeout_secs", "must be greater than zero").into());
    }
    if config.max_retries == 0 {
        return Err(invalid("max_retries", "must be at least 1").into());
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ViewerConfig) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}
