use std::fmt;

/// Counters describing one synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Rule files found by the scan
    pub files_scanned: usize,

    /// Files that contributed at least one rule id
    pub files_with_rules: usize,

    /// Rule ids extracted across all files
    pub rules_found: usize,

    /// Updates answered with a 2xx status
    pub updates_succeeded: usize,

    /// Updates answered with another status or not answered at all
    pub updates_failed: usize,

    /// Updates not sent because of a dry run
    pub updates_skipped: usize,
}

impl SyncReport {
    /// Create an empty report.
    pub fn new() -> Self {
        SyncReport::default()
    }

    /// Record the rule ids extracted from one file.
    pub fn record_file(&mut self, rule_count: usize) {
        self.files_scanned += 1;
        if rule_count > 0 {
            self.files_with_rules += 1;
            self.rules_found += rule_count;
        }
    }

    /// Record an update outcome.
    pub fn record_update(&mut self, success: bool) {
        if success {
            self.updates_succeeded += 1;
        } else {
            self.updates_failed += 1;
        }
    }

    pub fn record_skipped(&mut self) {
        self.updates_skipped += 1;
    }

    /// Total updates attempted.
    pub fn updates_attempted(&self) -> usize {
        self.updates_succeeded + self.updates_failed
    }

    /// Returns true if no attempted update failed.
    pub fn is_clean(&self) -> bool {
        self.updates_failed == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files scanned, {} with rules, {} rule ids; updates: {} ok, {} failed, {} skipped",
            self.files_scanned,
            self.files_with_rules,
            self.rules_found,
            self.updates_succeeded,
            self.updates_failed,
            self.updates_skipped,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_file() {
        let mut report = SyncReport::new();

        report.record_file(2);
        report.record_file(0);
        report.record_file(3);

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_with_rules, 2);
        assert_eq!(report.rules_found, 5);
    }

    #[test]
    fn test_record_update() {
        let mut report = SyncReport::new();

        report.record_update(true);
        report.record_update(false);
        report.record_update(true);

        assert_eq!(report.updates_attempted(), 3);
        assert_eq!(report.updates_failed, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_summary_format() {
        let mut report = SyncReport::new();
        report.record_file(1);
        report.record_update(true);

        let output = report.to_string();

        assert!(output.contains("1 files scanned"));
        assert!(output.contains("1 ok, 0 failed"));
    }
}
