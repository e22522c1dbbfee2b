use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::domain::{PolicyMode, GLOBAL_POLICY_NAME};
use crate::sync::SyncOptions;

/// Default endpoint of the deployments collection.
pub const DEFAULT_BASE_URL: &str = "https://semgrep.dev/api/v1/deployments";

/// Errors raised while validating configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please set the environment variable SEMGREP_APP_TOKEN")]
    MissingToken,
}

/// Policy sync configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "policy-sync")]
#[command(about = "Set every locally defined rule to a fixed mode in a remote policy")]
pub struct Config {
    /// API bearer token
    #[arg(long, env = "SEMGREP_APP_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Deployments collection endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "SEMGREP_BASE_URL")]
    pub base_url: String,

    /// Name of the policy to update
    #[arg(long, default_value = GLOBAL_POLICY_NAME, env = "SEMGREP_POLICY_NAME")]
    pub policy_name: String,

    /// Mode assigned to every rule found
    #[arg(long, value_enum, default_value_t = PolicyMode::Monitor, env = "SEMGREP_POLICY_MODE")]
    pub mode: PolicyMode,

    /// Directory scanned recursively for rule files
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Per-request timeout in seconds (unbounded if not set)
    #[arg(long, env = "SEMGREP_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Resolve and scan, but do not send any update
    #[arg(long)]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

impl Config {
    /// Get the API token, rejecting a missing or blank value.
    pub fn auth_token(&self) -> Result<&str, ConfigError> {
        match self.api_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ConfigError::MissingToken),
        }
    }

    /// Get request timeout as Duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Options for the synchronizer.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            policy_name: self.policy_name.clone(),
            mode: self.mode,
            dry_run: self.dry_run,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            policy_name: GLOBAL_POLICY_NAME.to_string(),
            mode: PolicyMode::Monitor,
            directory: PathBuf::from("."),
            request_timeout_secs: None,
            dry_run: false,
            log_level: "info".to_string(),
        }
    }
}
