use std::path::{Path, PathBuf};

use crate::results::ScanResult;

/// Running totals across every scan a [`Scanner`](crate::Scanner) performs.
///
/// Counters only grow until [`reset`](Self::reset). A scan that returns an
/// error is not recorded.
#[derive(Debug, Default, Clone)]
pub struct ScanStatistics {
    directories_scanned: u64,
    files_count: u64,
    folders_count: u64,
    total_bytes: u64,
    errors_encountered: u64,
    history: Vec<PathBuf>,
}

impl ScanStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed scan call into the totals.
    pub fn record(&mut self, result: &ScanResult, error_count: usize, dir: &Path) {
        self.directories_scanned += 1;
        self.files_count += result.files.len() as u64;
        self.folders_count += result.folders.len() as u64;
        self.total_bytes += result.total_bytes();
        self.errors_encountered += error_count as u64;
        self.history.push(dir.to_path_buf());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            directories_scanned: self.directories_scanned,
            files_count: self.files_count,
            folders_count: self.folders_count,
            total_bytes: self.total_bytes,
            errors_encountered: self.errors_encountered,
            history: self.history.clone(),
        }
    }
}

/// A read-only copy of [`ScanStatistics`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Number of scan calls recorded (single or recursive).
    pub directories_scanned: u64,

    pub files_count: u64,

    pub folders_count: u64,

    /// Sum of the sizes of every file returned.
    pub total_bytes: u64,

    /// Recoverable errors swallowed during scans. Non-zero means at least one
    /// result was partial.
    pub errors_encountered: u64,

    /// Directories passed to each scan call, oldest first.
    pub history: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{FileEntry, FolderEntry};

    fn result() -> ScanResult {
        ScanResult {
            files: vec![FileEntry::new("/d/a", 500), FileEntry::new("/d/b", 2000)],
            folders: vec![FolderEntry::new("/d/sub")],
        }
    }

    #[test]
    fn starts_empty() {
        assert_eq!(ScanStatistics::new().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn record_accumulates() {
        let mut stats = ScanStatistics::new();
        stats.record(&result(), 0, Path::new("/d"));
        stats.record(&result(), 2, Path::new("/e"));

        let snap = stats.snapshot();
        assert_eq!(snap.directories_scanned, 2);
        assert_eq!(snap.files_count, 4);
        assert_eq!(snap.folders_count, 2);
        assert_eq!(snap.total_bytes, 5000);
        assert_eq!(snap.errors_encountered, 2);
        assert_eq!(snap.history, vec![PathBuf::from("/d"), PathBuf::from("/e")]);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut stats = ScanStatistics::new();
        stats.record(&result(), 0, Path::new("/d"));
        let before = stats.snapshot();
        stats.record(&result(), 0, Path::new("/d"));
        assert_eq!(before.directories_scanned, 1);
    }

    #[test]
    fn reset_clears_counters_and_history() {
        let mut stats = ScanStatistics::new();
        stats.record(&result(), 1, Path::new("/d"));
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
