use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{PoliciesResponse, PolicyMode};

use super::error::ApiError;

/// Outcome of a single rule-mode update.
///
/// Returned for every completed request regardless of status; callers
/// decide what a non-success status means.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResponse {
    pub status: u16,

    /// Parsed JSON body, or the raw text as a JSON string if it was not JSON
    pub body: Value,
}

impl UpdateResponse {
    /// Returns true for a 2xx status.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Id of the first policy named exactly `policy_name`.
pub(crate) fn select_policy_id(
    policies: &PoliciesResponse,
    policy_name: &str,
) -> Result<String, ApiError> {
    let policy = policies
        .find_by_name(policy_name)
        .ok_or_else(|| ApiError::PolicyNotFound(policy_name.to_string()))?;

    policy
        .id
        .clone()
        .ok_or_else(|| ApiError::PolicyWithoutId(policy_name.to_string()))
}

/// Remote policy service operations.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    /// Resolve the deployment the token belongs to.
    async fn get_deployment_id(&self) -> Result<String, ApiError>;

    /// Resolve the id of the policy named exactly `policy_name`.
    async fn get_policy_id(&self, deployment_id: &str, policy_name: &str)
        -> Result<String, ApiError>;

    /// Set the mode of one rule within a policy.
    async fn update_policy(
        &self,
        deployment_id: &str,
        policy_id: &str,
        mode: PolicyMode,
        rule_id: &str,
    ) -> Result<UpdateResponse, ApiError>;
}
