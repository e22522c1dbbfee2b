use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File name suffixes recognised as rule files (case-sensitive).
pub const RULE_FILE_SUFFIXES: [&str; 2] = [".yaml", ".yml"];

/// Errors that can occur while scanning for rule files.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot scan {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Returns true if the file name ends in `.yaml` or `.yml`.
pub fn is_rule_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            RULE_FILE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
        .unwrap_or(false)
}

/// Recursively collect every rule file under `directory`.
///
/// Entries are visited in file-name order so repeated runs see the same
/// sequence. Symlinks to files are included; symlinked directories are
/// not descended into. Unreadable entries below the root are logged and
/// skipped, while an unreadable root is an error.
pub fn find_yaml_files(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, ScanError> {
    let directory = directory.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::Root {
                    path: directory.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let file_type = entry.file_type();
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file || !is_rule_file(entry.path()) {
            continue;
        }

        files.push(entry.into_path());
    }

    debug!(dir = %directory.display(), count = files.len(), "Scanned for rule files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "rules: []\n").unwrap();
        path
    }

    #[test]
    fn test_find_yaml_files_recursive() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        let expected: HashSet<PathBuf> = [
            touch(root, "a.yaml"),
            touch(root, "nested/b.yml"),
            touch(root, "nested/deeper/c.yaml"),
            touch(root, ".hidden/d.yml"),
        ]
        .into_iter()
        .collect();

        touch(root, "readme.md");
        touch(root, "upper.YAML");
        touch(root, "nested/backup.yaml.bak");
        touch(root, "nested/deeper/yaml");
        fs::create_dir_all(root.join("dir.yaml")).unwrap();

        let found: HashSet<PathBuf> = find_yaml_files(root).unwrap().into_iter().collect();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_yaml_files_is_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        touch(root, "b.yaml");
        touch(root, "a.yml");
        touch(root, "c.yaml");

        let names: Vec<String> = find_yaml_files(root)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.yml", "b.yaml", "c.yaml"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(find_yaml_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let result = find_yaml_files(dir.path().join("does-not-exist"));

        assert!(matches!(result, Err(ScanError::Root { .. })));
    }

    #[test]
    fn test_is_rule_file() {
        assert!(is_rule_file(Path::new("rules/x.yaml")));
        assert!(is_rule_file(Path::new("x.yml")));
        assert!(is_rule_file(Path::new(".yaml")));
        assert!(!is_rule_file(Path::new("x.YML")));
        assert!(!is_rule_file(Path::new("x.json")));
    }
}
