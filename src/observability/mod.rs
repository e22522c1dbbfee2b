pub mod report;
pub mod tracing;

pub use report::SyncReport;
pub use tracing::init_tracing;
