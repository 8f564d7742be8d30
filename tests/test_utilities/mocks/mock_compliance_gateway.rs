use async_trait::async_trait;
use cbom_compliance::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ComplianceGateway for testing
///
/// Answers checks from a per-policy table and records every request.
#[derive(Default, Clone)]
pub struct MockComplianceGateway {
    pub policies: Vec<PolicyDescriptor>,
    pub documents: HashMap<String, Value>,
    pub should_fail: bool,
    pub requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockComplianceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, id: &str, label: Option<&str>) -> Self {
        self.policies
            .push(PolicyDescriptor::new(id, label.map(str::to_string)));
        self
    }

    pub fn with_document(mut self, policy_id: &str, document: Value) -> Self {
        self.documents.insert(policy_id.to_string(), document);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl ComplianceGateway for MockComplianceGateway {
    async fn list_policies(&self) -> Result<Vec<PolicyDescriptor>> {
        self.record("policies".to_string());
        if self.should_fail {
            anyhow::bail!("Mock compliance gateway failure");
        }
        Ok(self.policies.clone())
    }

    async fn check_cbom(&self, policy_id: &str, _cbom: &Value) -> Result<Value> {
        self.record(format!("check:{}", policy_id));
        if self.should_fail {
            anyhow::bail!("Mock compliance gateway failure");
        }
        self.documents
            .get(policy_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown policy: {}", policy_id))
    }

    async fn check_stored(
        &self,
        policy_id: &str,
        git_url: &str,
        _commit: Option<&str>,
    ) -> Result<Value> {
        self.record(format!("stored:{}:{}", policy_id, git_url));
        if self.should_fail {
            anyhow::bail!("Mock compliance gateway failure");
        }
        self.documents
            .get(policy_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown policy: {}", policy_id))
    }

    async fn upload_policy(&self, _policy_toml: &str) -> Result<String> {
        self.record("upload".to_string());
        if self.should_fail {
            anyhow::bail!("Mock compliance gateway failure");
        }
        Ok("Policy registered.".to_string())
    }

    async fn delete_policy(&self, policy_id: &str) -> Result<()> {
        self.record(format!("delete:{}", policy_id));
        if self.should_fail {
            anyhow::bail!("Mock compliance gateway failure");
        }
        Ok(())
    }
}
