use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use policy_sync::config::Config;
use policy_sync::observability::init_tracing;
use policy_sync::{SemgrepClient, SyncReport, Synchronizer};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        dir = %config.directory.display(),
        "Starting policy sync"
    );

    match run(&config).await {
        Ok(report) => {
            if !report.is_clean() {
                warn!(failed = report.updates_failed, "Some rule updates were not applied");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> anyhow::Result<SyncReport> {
    let token = config.auth_token()?;

    let client = SemgrepClient::new(&config.base_url, token, config.request_timeout())
        .context("Failed to build HTTP client")?;

    let synchronizer = Synchronizer::new(client, config.sync_options());

    let report = synchronizer
        .run(&config.directory)
        .await
        .with_context(|| format!("Sync of {} aborted", config.directory.display()))?;

    Ok(report)
}
