// src/api/mock.rs
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;

use crate::domain::{Deployment, DeploymentsResponse, PoliciesResponse, Policy, PolicyMode};

use super::error::ApiError;
use super::traits::{select_policy_id, PolicyApi, UpdateResponse};

/// An update request captured by [`MockPolicyApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub deployment_id: String,
    pub policy_id: String,
    pub mode: PolicyMode,
    pub rule_id: String,
}

/// In-memory policy API for testing.
#[derive(Debug, Default)]
pub struct MockPolicyApi {
    deployments: Mutex<Vec<Deployment>>,
    policies: Mutex<Vec<Policy>>,
    list_failure: Mutex<Option<u16>>,
    update_statuses: Mutex<HashMap<String, u16>>,
    recorded_updates: Mutex<Vec<RecordedUpdate>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockPolicyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with one deployment and one policy (for testing).
    pub fn with_policy(deployment_id: &str, policy_id: &str, policy_name: &str) -> Self {
        let mock = Self::new();
        mock.add_deployment(deployment_id);
        mock.add_policy(policy_id, policy_name);
        mock
    }

    /// Add a deployment (for testing).
    pub fn add_deployment(&self, id: &str) {
        self.deployments.lock().push(Deployment {
            id: id.to_string(),
            name: None,
            slug: None,
        });
    }

    /// Add a policy (for testing).
    pub fn add_policy(&self, id: &str, name: &str) {
        self.policies.lock().push(Policy {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
        });
    }

    /// Make both listing calls fail with the given status (for testing).
    pub fn fail_listing_with(&self, status: u16) {
        *self.list_failure.lock() = Some(status);
    }

    /// Respond to updates of `rule_id` with `status` (for testing).
    pub fn set_update_status(&self, rule_id: &str, status: u16) {
        self.update_statuses.lock().insert(rule_id.to_string(), status);
    }

    /// Get recorded updates (for assertions).
    pub fn get_recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.recorded_updates.lock().clone()
    }

    /// Get the sequence of API calls made (for assertions).
    pub fn get_calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn check_listing(&self, url: &str) -> Result<(), ApiError> {
        match *self.list_failure.lock() {
            Some(status) => Err(ApiError::Status {
                status,
                url: url.to_string(),
                body: json!({"error": "mock failure"}).to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PolicyApi for MockPolicyApi {
    async fn get_deployment_id(&self) -> Result<String, ApiError> {
        self.calls.lock().push("get_deployment_id");
        self.check_listing("/deployments")?;

        let response = DeploymentsResponse {
            deployments: self.deployments.lock().clone(),
        };
        response
            .first()
            .map(|d| d.id.clone())
            .ok_or(ApiError::NoDeployments)
    }

    async fn get_policy_id(
        &self,
        deployment_id: &str,
        policy_name: &str,
    ) -> Result<String, ApiError> {
        self.calls.lock().push("get_policy_id");
        self.check_listing(&format!("/deployments/{deployment_id}/policies"))?;

        let response = PoliciesResponse {
            policies: self.policies.lock().clone(),
        };
        select_policy_id(&response, policy_name)
    }

    async fn update_policy(
        &self,
        deployment_id: &str,
        policy_id: &str,
        mode: PolicyMode,
        rule_id: &str,
    ) -> Result<UpdateResponse, ApiError> {
        self.calls.lock().push("update_policy");
        self.recorded_updates.lock().push(RecordedUpdate {
            deployment_id: deployment_id.to_string(),
            policy_id: policy_id.to_string(),
            mode,
            rule_id: rule_id.to_string(),
        });

        let status = self
            .update_statuses
            .lock()
            .get(rule_id)
            .copied()
            .unwrap_or(200);

        Ok(UpdateResponse {
            status,
            body: json!({"policy": {"id": policy_id}}),
        })
    }
}
