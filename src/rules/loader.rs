use std::fs;
use std::path::Path;

use serde_yaml::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::RuleRef;

/// Errors that can occur while reading a rule file.
#[derive(Error, Debug)]
pub enum RuleFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse a rule file and return the `id` of every entry under `rules`.
///
/// Only a top-level mapping with a `rules` sequence contributes ids; any
/// other shape yields an empty list. Entries that are not mappings or lack
/// an `id` are skipped. A mapping that repeats a key anywhere in the file
/// is a parse error.
pub fn try_extract_ids(path: impl AsRef<Path>) -> Result<Vec<String>, RuleFileError> {
    let content = fs::read_to_string(path)?;
    let document: Value = serde_yaml::from_str(&content)?;

    Ok(ids_from_document(&document))
}

/// Like [`try_extract_ids`], but read and parse failures are logged and
/// produce an empty list.
pub fn extract_ids(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match try_extract_ids(path) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Error reading rule file");
            Vec::new()
        }
    }
}

/// Extract ids from a file, tagging each with its source path.
pub fn extract_rule_refs(path: impl AsRef<Path>) -> Vec<RuleRef> {
    let path = path.as_ref();
    extract_ids(path)
        .into_iter()
        .map(|id| RuleRef::new(id, path))
        .collect()
}

fn ids_from_document(document: &Value) -> Vec<String> {
    let Some(rules) = document
        .as_mapping()
        .and_then(|m| m.get("rules"))
        .and_then(Value::as_sequence)
    else {
        return Vec::new();
    };

    rules
        .iter()
        .filter_map(|rule| rule.as_mapping()?.get("id"))
        .filter_map(scalar_to_string)
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            debug!(value = ?other, "Ignoring non-scalar rule id");
            None
        }
    }
}
