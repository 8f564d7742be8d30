use crate::compliance::domain::PolicyDescriptor;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// ComplianceGateway port for talking to the compliance service
///
/// Check operations return the raw JSON document exactly as received.
/// Structural validation is the caller's job, so a gateway never rejects a
/// document for its shape, only for transport failures.
#[async_trait]
pub trait ComplianceGateway: Send + Sync {
    /// Lists the policies the compliance service can evaluate
    ///
    /// # Errors
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the listing cannot be parsed
    async fn list_policies(&self) -> Result<Vec<PolicyDescriptor>>;

    /// Checks a CBOM document against a policy
    ///
    /// # Arguments
    /// * `policy_id` - Identifier of the policy to evaluate
    /// * `cbom` - The CBOM document, sent as the request body
    ///
    /// # Returns
    /// The compliance result document, unvalidated
    async fn check_cbom(&self, policy_id: &str, cbom: &Value) -> Result<Value>;

    /// Checks a CBOM already stored by the service for a scanned repository
    ///
    /// # Arguments
    /// * `policy_id` - Identifier of the policy to evaluate
    /// * `git_url` - URL of the scanned repository
    /// * `commit` - Optional commit the scan was made at
    async fn check_stored(
        &self,
        policy_id: &str,
        git_url: &str,
        commit: Option<&str>,
    ) -> Result<Value>;

    /// Registers a custom policy from its TOML definition
    ///
    /// # Returns
    /// The confirmation message sent back by the service
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// definition
    async fn upload_policy(&self, policy_toml: &str) -> Result<String>;

    /// Removes a previously uploaded custom policy
    ///
    /// # Errors
    /// Returns an error if the request fails or no such policy exists
    async fn delete_policy(&self, policy_id: &str) -> Result<()>;
}
