pub mod loader;
pub mod scan;

pub use loader::{extract_ids, extract_rule_refs, try_extract_ids, RuleFileError};
pub use scan::{find_yaml_files, ScanError};
