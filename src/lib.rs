pub mod api;
pub mod config;
pub mod domain;
pub mod observability;
pub mod rules;
pub mod sync;

pub use api::{PolicyApi, SemgrepClient};
pub use config::Config;
pub use domain::{PolicyMode, RuleRef};
pub use observability::SyncReport;
pub use sync::{SyncError, SyncOptions, Synchronizer};
