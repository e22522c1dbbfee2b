//! HTTP client for the Semgrep deployments API.
//!
//! All calls are issued one at a time; the client holds a single
//! connection pool and the bearer token applied to every request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::{DeploymentsResponse, PoliciesResponse, PolicyMode};

use super::error::ApiError;
use super::traits::{select_policy_id, PolicyApi, UpdateResponse};

/// Client for the deployments, policies and policy-update endpoints.
#[derive(Debug, Clone)]
pub struct SemgrepClient {
    base_url: String,
    token: String,
    http: Client,
}

impl SemgrepClient {
    /// Create a new client.
    ///
    /// `base_url` is the deployments collection endpoint. Without a
    /// `timeout` requests wait for the server indefinitely.
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(SemgrepClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            http: builder.build()?,
        })
    }

    /// Get the deployments collection URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policies_url(&self, deployment_id: &str) -> String {
        format!("{}/{}/policies", self.base_url, deployment_id)
    }

    /// Build the update URL; `rulePath` carries the rule id, not a file path.
    pub fn update_url(
        &self,
        deployment_id: &str,
        policy_id: &str,
        rule_id: &str,
        mode: PolicyMode,
    ) -> Result<Url, ApiError> {
        let path = format!("{}/{}/policies/{}", self.base_url, deployment_id, policy_id);
        Url::parse_with_params(&path, &[("rulePath", rule_id), ("policyMode", mode.as_str())])
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// List the deployments visible to the token.
    pub async fn list_deployments(&self) -> Result<DeploymentsResponse, ApiError> {
        self.get_json(&self.base_url).await
    }

    /// List the policies of a deployment.
    pub async fn list_policies(&self, deployment_id: &str) -> Result<PoliciesResponse, ApiError> {
        self.get_json(&self.policies_url(deployment_id)).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.token)
    }

    /// GET a JSON document, treating anything but 200 as an error.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let parsed = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
        let resp = self.request(Method::GET, parsed).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        debug!(url, body = %body, "GET succeeded");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PolicyApi for SemgrepClient {
    async fn get_deployment_id(&self) -> Result<String, ApiError> {
        let deployments = self.list_deployments().await?;
        let deployment = deployments.first().ok_or(ApiError::NoDeployments)?;

        info!(
            deployment_id = %deployment.id,
            name = deployment.name.as_deref().unwrap_or(""),
            slug = deployment.slug.as_deref().unwrap_or(""),
            "Accessing org"
        );
        Ok(deployment.id.clone())
    }

    async fn get_policy_id(
        &self,
        deployment_id: &str,
        policy_name: &str,
    ) -> Result<String, ApiError> {
        let policies = self.list_policies(deployment_id).await?;
        select_policy_id(&policies, policy_name)
    }

    async fn update_policy(
        &self,
        deployment_id: &str,
        policy_id: &str,
        mode: PolicyMode,
        rule_id: &str,
    ) -> Result<UpdateResponse, ApiError> {
        let url = self.update_url(deployment_id, policy_id, rule_id, mode)?;
        info!(url = %url, "Updating policy");

        let resp = self.request(Method::PUT, url).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text));

        info!(status, body = %body, "Policy update response");
        Ok(UpdateResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SemgrepClient {
        SemgrepClient::new("https://semgrep.dev/api/v1/deployments/", "token", None).unwrap()
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(client().base_url(), "https://semgrep.dev/api/v1/deployments");
    }

    #[test]
    fn test_policies_url() {
        assert_eq!(
            client().policies_url("d1"),
            "https://semgrep.dev/api/v1/deployments/d1/policies"
        );
    }

    #[test]
    fn test_update_url() {
        let url = client()
            .update_url("d1", "p9", "no-eval", PolicyMode::Monitor)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://semgrep.dev/api/v1/deployments/d1/policies/p9?rulePath=no-eval&policyMode=MODE_MONITOR"
        );
    }

    #[test]
    fn test_update_url_encodes_rule_id() {
        let url = client()
            .update_url("d1", "p9", "a b&c", PolicyMode::Block)
            .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("rulePath".to_string(), "a b&c".to_string()),
                ("policyMode".to_string(), "MODE_BLOCK".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = SemgrepClient::new("not a url", "token", None).unwrap();
        let result = client.update_url("d1", "p1", "r", PolicyMode::Monitor);

        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }
}
