use serde::{Deserialize, Serialize};

use super::{lenient_id, lenient_string};

/// Name of the policy this tool targets unless configured otherwise.
pub const GLOBAL_POLICY_NAME: &str = "Global Policy";

/// A named collection of rule-mode assignments within a deployment.
///
/// Both fields are optional so one malformed entry never hides the rest
/// of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// Body of `GET /deployments/{id}/policies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoliciesResponse {
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl PoliciesResponse {
    /// First policy whose name matches exactly (case-sensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Policy> {
        self.policies
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> PoliciesResponse {
        serde_json::from_str(
            r#"{"policies": [
                {"id": "p1", "name": "Default"},
                {"id": "p9", "name": "Global Policy"},
                {"id": "p10", "name": "Global Policy"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_global_policy() {
        let resp = response();
        let policy = resp.find_by_name(GLOBAL_POLICY_NAME).unwrap();

        assert_eq!(policy.id.as_deref(), Some("p9"));
    }

    #[test]
    fn test_name_match_is_exact() {
        let resp = response();

        assert!(resp.find_by_name("global policy").is_none());
        assert!(resp.find_by_name("Global Policy ").is_none());
        assert!(resp.find_by_name("Global").is_none());
    }

    #[test]
    fn test_policy_without_name_never_matches() {
        let resp: PoliciesResponse =
            serde_json::from_str(r#"{"policies": [{"id": 7}]}"#).unwrap();

        assert_eq!(resp.policies[0].id.as_deref(), Some("7"));
        assert!(resp.find_by_name(GLOBAL_POLICY_NAME).is_none());
    }

    #[test]
    fn test_null_name_does_not_break_listing() {
        let resp: PoliciesResponse = serde_json::from_str(
            r#"{"policies": [{"id": "p1", "name": null}, {"id": "p9", "name": "Global Policy"}]}"#,
        )
        .unwrap();

        assert_eq!(resp.policies[0].name, None);
        let policy = resp.find_by_name(GLOBAL_POLICY_NAME).unwrap();
        assert_eq!(policy.id.as_deref(), Some("p9"));
    }

    #[test]
    fn test_missing_id_does_not_break_listing() {
        let resp: PoliciesResponse = serde_json::from_str(
            r#"{"policies": [{"name": "Draft"}, {"id": "p9", "name": "Global Policy"}]}"#,
        )
        .unwrap();

        assert_eq!(resp.policies[0].id, None);
        let policy = resp.find_by_name(GLOBAL_POLICY_NAME).unwrap();
        assert_eq!(policy.id.as_deref(), Some("p9"));
    }

    #[test]
    fn test_odd_field_types_are_tolerated() {
        let resp: PoliciesResponse = serde_json::from_str(
            r#"{"policies": [{"id": null, "name": 12}, {"id": [1], "name": "Global Policy"}]}"#,
        )
        .unwrap();

        assert_eq!(resp.policies[0], Policy { id: None, name: None });
        assert_eq!(resp.find_by_name(GLOBAL_POLICY_NAME).unwrap().id, None);
    }
}
