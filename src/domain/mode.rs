use serde::{Deserialize, Serialize};
use std::fmt;

/// Enforcement level of a rule within a policy.
///
/// The wire representation is the `MODE_*` string the policy API expects
/// in the `policyMode` query parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum PolicyMode {
    /// Findings are recorded but never surfaced to developers
    #[default]
    #[serde(rename = "MODE_MONITOR")]
    Monitor,
    /// Findings are posted as review comments
    #[serde(rename = "MODE_COMMENT")]
    Comment,
    /// Findings block the scan
    #[serde(rename = "MODE_BLOCK")]
    Block,
    /// Rule is switched off
    #[serde(rename = "MODE_DISABLED")]
    Disabled,
}

impl PolicyMode {
    /// Wire string sent as `policyMode`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyMode::Monitor => "MODE_MONITOR",
            PolicyMode::Comment => "MODE_COMMENT",
            PolicyMode::Block => "MODE_BLOCK",
            PolicyMode::Disabled => "MODE_DISABLED",
        }
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_monitor() {
        assert_eq!(PolicyMode::default(), PolicyMode::Monitor);
        assert_eq!(PolicyMode::default().as_str(), "MODE_MONITOR");
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&PolicyMode::Block).unwrap();
        assert_eq!(json, "\"MODE_BLOCK\"");

        let parsed: PolicyMode = serde_json::from_str("\"MODE_COMMENT\"").unwrap();
        assert_eq!(parsed, PolicyMode::Comment);
    }

    #[test]
    fn test_cli_value_names() {
        use clap::ValueEnum;

        let parsed = PolicyMode::from_str("monitor", false).unwrap();
        assert_eq!(parsed, PolicyMode::Monitor);
        assert!(PolicyMode::from_str("MODE_MONITOR", false).is_err());
    }
}
