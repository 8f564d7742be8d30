use crate::compliance::domain::PolicyDescriptor;
use crate::config::ViewerConfig;
use crate::ports::outbound::ComplianceGateway;
use crate::shared::error::ComplianceError;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const POLICIES_PATH: &str = "/api/v1/compliance/policies";
const CHECK_PATH: &str = "/api/v1/compliance/check";
const UPLOAD_POLICY_PATH: &str = "/api/v1/compliance/upload-policy";
const CUSTOM_POLICY_PATH: &str = "/api/v1/compliance/custom-policy";

/// HttpComplianceGateway adapter for the compliance service REST API
///
/// This adapter implements the ComplianceGateway port over async reqwest.
/// Only the policy listing is retried; a compliance check is sent once and
/// its failure is left to the caller.
pub struct HttpComplianceGateway {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HttpComplianceGateway {
    /// Creates a gateway from the viewer configuration
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("cbom-compliance/{}", version);
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
            max_retries: config.max_retries.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn policies_url(&self) -> String {
        format!("{}{}", self.base_url, POLICIES_PATH)
    }

    fn check_url(&self, policy_id: &str) -> String {
        format!(
            "{}{}?policyIdentifier={}",
            self.base_url,
            CHECK_PATH,
            urlencoding::encode(policy_id)
        )
    }

    fn stored_check_url(&self, policy_id: &str, git_url: &str, commit: Option<&str>) -> String {
        let mut url = format!(
            "{}&gitUrl={}",
            self.check_url(policy_id),
            urlencoding::encode(git_url)
        );
        if let Some(commit) = commit.filter(|commit| !commit.is_empty()) {
            url.push_str("&commit=");
            url.push_str(&urlencoding::encode(commit));
        }
        url
    }

    fn custom_policy_url(&self, policy_id: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            CUSTOM_POLICY_PATH,
            urlencoding::encode(policy_id)
        )
    }

    /// Fetches the policy listing with retry logic
    async fn fetch_policies_with_retry(&self) -> Result<Vec<PolicyDescriptor>> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_policies().await {
                Ok(policies) => return Ok(policies),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "policy listing attempt failed");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("policy listing was never attempted")))
    }

    async fn fetch_policies(&self) -> Result<Vec<PolicyDescriptor>> {
        let response = self.send(self.client.get(self.policies_url()), POLICIES_PATH).await?;
        let policies = response.json().await.map_err(|e| ComplianceError::Transport {
            endpoint: POLICIES_PATH.to_string(),
            details: format!("Unreadable policy listing: {}", e),
        })?;
        Ok(policies)
    }

    async fn fetch_document(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = self.send(request, CHECK_PATH).await?;
        let document = response.json().await.map_err(|e| ComplianceError::Transport {
            endpoint: CHECK_PATH.to_string(),
            details: format!("Response is not JSON: {}", e),
        })?;
        Ok(document)
    }

    /// Sends the request and maps connection failures and non-success
    /// statuses to `ComplianceError::Transport`
    async fn send(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| ComplianceError::Transport {
            endpoint: endpoint.to_string(),
            details: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let details = if body.trim().is_empty() {
                format!("Compliance service returned status code {}", status)
            } else {
                format!(
                    "Compliance service returned status code {}: {}",
                    status,
                    body.trim()
                )
            };
            return Err(ComplianceError::Transport {
                endpoint: endpoint.to_string(),
                details,
            }
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl ComplianceGateway for HttpComplianceGateway {
    async fn list_policies(&self) -> Result<Vec<PolicyDescriptor>> {
        self.fetch_policies_with_retry().await
    }

    async fn check_cbom(&self, policy_id: &str, cbom: &Value) -> Result<Value> {
        tracing::debug!(policy = policy_id, "posting CBOM for compliance check");
        self.fetch_document(self.client.post(self.check_url(policy_id)).json(cbom))
            .await
    }

    async fn check_stored(
        &self,
        policy_id: &str,
        git_url: &str,
        commit: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!(policy = policy_id, git_url, "checking stored CBOM");
        self.fetch_document(
            self.client
                .get(self.stored_check_url(policy_id, git_url, commit)),
        )
        .await
    }

    async fn upload_policy(&self, policy_toml: &str) -> Result<String> {
        let part = reqwest::multipart::Part::text(policy_toml.to_string())
            .file_name("policy.toml")
            .mime_str("application/toml")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let url = format!("{}{}", self.base_url, UPLOAD_POLICY_PATH);

        let response = self
            .send(self.client.post(url).multipart(form), UPLOAD_POLICY_PATH)
            .await?;
        let message = response.text().await.map_err(|e| ComplianceError::Transport {
            endpoint: UPLOAD_POLICY_PATH.to_string(),
            details: e.to_string(),
        })?;
        tracing::debug!(%message, "custom policy uploaded");
        Ok(message)
    }

    async fn delete_policy(&self, policy_id: &str) -> Result<()> {
        self.send(
            self.client.delete(self.custom_policy_url(policy_id)),
            CUSTOM_POLICY_PATH,
        )
        .await?;
        tracing::debug!(policy = policy_id, "custom policy deleted");
        Ok(())
    }
}
