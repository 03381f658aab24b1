use crate::entry::{normalize_extension, FileEntry, FolderEntry};
use crate::error::ScanError;

/// The files and folders produced by one scan call.
///
/// Entries appear in the order the platform listed them. Call
/// [`sort`](ScanResult::sort) when a stable order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub files: Vec<FileEntry>,
    pub folders: Vec<FolderEntry>,
}

impl ScanResult {
    /// Sort files and folders by path.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
        self.folders.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Keep only files whose extension is one of `extensions`.
    ///
    /// Extensions are normalised the same way the extension filter does it.
    /// An empty list keeps everything.
    pub fn retain_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: Vec<String> = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        if wanted.is_empty() {
            return;
        }
        self.files.retain(|f| wanted.contains(&f.extension));
    }

    /// Sum of all file sizes, in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Number of files plus folders.
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    pub(crate) fn extend(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        self.folders.extend(other.folders);
    }
}

/// A [`ScanResult`] together with the recoverable errors hit while building it.
///
/// A non-empty `errors` means the result is partial: some entries or subtrees
/// could not be read and were skipped.
#[derive(Debug, Default)]
pub struct Listing {
    pub result: ScanResult,
    pub errors: Vec<ScanError>,
}

impl Listing {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn absorb(&mut self, other: Listing) {
        self.result.extend(other.result);
        self.errors.extend(other.errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScanResult {
        ScanResult {
            files: vec![
                FileEntry::new("/d/z.py", 7),
                FileEntry::new("/d/a.TXT", 3),
                FileEntry::new("/d/m.rs", 5),
            ],
            folders: vec![FolderEntry::new("/d/sub"), FolderEntry::new("/d/bin")],
        }
    }

    #[test]
    fn sort_orders_by_path() {
        let mut r = sample();
        r.sort();
        let names: Vec<_> = r.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.TXT", "m.rs", "z.py"]);
        assert_eq!(r.folders[0].name, "bin");
    }

    #[test]
    fn retain_extensions_matches_case_insensitively() {
        let mut r = sample();
        r.retain_extensions(["txt", ".PY"]);
        assert_eq!(r.files.len(), 2);
        assert_eq!(r.folders.len(), 2, "folders are untouched");
    }

    #[test]
    fn retain_with_no_extensions_is_a_no_op() {
        let mut r = sample();
        r.retain_extensions(Vec::<&str>::new());
        assert_eq!(r.files.len(), 3);
    }

    #[test]
    fn totals() {
        let r = sample();
        assert_eq!(r.total_bytes(), 15);
        assert_eq!(r.len(), 5);
        assert!(!r.is_empty());
        assert!(ScanResult::default().is_empty());
    }
}
