//! Orchestration of one synchronization run.
//!
//! Resolution happens first and any failure there aborts the run before a
//! single rule file is read. After that every file and every update is
//! best-effort: a bad file or a rejected update is logged and the run
//! moves on to the next one.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, PolicyApi};
use crate::domain::{PolicyMode, GLOBAL_POLICY_NAME};
use crate::observability::SyncReport;
use crate::rules::{extract_rule_refs, find_yaml_files, ScanError};

/// Errors that abort a synchronization run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// What to update and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Exact name of the target policy
    pub policy_name: String,

    /// Mode assigned to every rule
    pub mode: PolicyMode,

    /// Skip the update calls
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            policy_name: GLOBAL_POLICY_NAME.to_string(),
            mode: PolicyMode::Monitor,
            dry_run: false,
        }
    }
}

/// Applies a mode to every rule found under a directory.
pub struct Synchronizer<A: PolicyApi> {
    api: A,
    options: SyncOptions,
}

impl<A: PolicyApi> Synchronizer<A> {
    /// Create a new synchronizer.
    pub fn new(api: A, options: SyncOptions) -> Self {
        Synchronizer { api, options }
    }

    /// Get the underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the full sequence: deployment, policy, scan, then one update
    /// per rule id, strictly in order.
    pub async fn run(&self, directory: impl AsRef<Path>) -> Result<SyncReport, SyncError> {
        let directory = directory.as_ref();

        let deployment_id = self.api.get_deployment_id().await?;
        let policy_id = self
            .api
            .get_policy_id(&deployment_id, &self.options.policy_name)
            .await?;
        info!(
            policy = %self.options.policy_name,
            policy_id = %policy_id,
            mode = %self.options.mode,
            "Resolved target policy"
        );

        let files = find_yaml_files(directory)?;
        let mut report = SyncReport::new();

        for file in &files {
            let rules = extract_rule_refs(file);
            report.record_file(rules.len());

            if rules.is_empty() {
                continue;
            }

            info!(file = %file.display(), "File");
            for rule in &rules {
                info!(rule_id = %rule.id, "ID");

                if self.options.dry_run {
                    info!(rule_id = %rule.id, mode = %self.options.mode, "Dry run, update skipped");
                    report.record_skipped();
                    continue;
                }

                let success = self.apply(&deployment_id, &policy_id, &rule.id).await;
                report.record_update(success);
            }
        }

        info!(summary = %report, "Sync finished");
        Ok(report)
    }

    /// Issue one update; failures are reported but never abort the run.
    async fn apply(&self, deployment_id: &str, policy_id: &str, rule_id: &str) -> bool {
        match self
            .api
            .update_policy(deployment_id, policy_id, self.options.mode, rule_id)
            .await
        {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                warn!(
                    rule_id,
                    status = response.status,
                    body = %response.body,
                    "Policy update was not accepted"
                );
                false
            }
            Err(e) => {
                warn!(rule_id, error = %e, "Policy update failed");
                false
            }
        }
    }
}
