use std::path::PathBuf;

/// A rule identifier together with the file it was declared in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRef {
    pub id: String,
    pub source_path: PathBuf,
}

impl RuleRef {
    pub fn new(id: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        RuleRef {
            id: id.into(),
            source_path: source_path.into(),
        }
    }
}
