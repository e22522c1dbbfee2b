use serde::{Deserialize, Serialize};

use super::string_or_number;

/// The caller's organizational scope within the policy service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Deployment identifier used in every subsequent URL
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// URL slug of the organization
    #[serde(default)]
    pub slug: Option<String>,
}

/// Body of `GET /deployments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentsResponse {
    #[serde(default)]
    pub deployments: Vec<Deployment>,
}

impl DeploymentsResponse {
    /// API tokens are scoped to a single deployment, so the first entry
    /// is the caller's. Returns `None` for an empty list.
    pub fn first(&self) -> Option<&Deployment> {
        self.deployments.first()
    }
}
