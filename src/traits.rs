use std::path::Path;

use crate::entry::RawEntry;
use crate::error::Result;
use crate::reader::ScanOptions;

/// The filesystem boundary: lists the immediate children of one directory.
///
/// [`FsSource`](crate::FsSource) is the real implementation. Anything that
/// can answer "what is in this directory" can stand in for it, which is how
/// tests observe whether a cached scan touched the filesystem.
///
/// # Contract
///
/// - Return `Err(ScanError::InvalidPath)` when `dir` is missing or is not a
///   directory, and `Err(ScanError::PermissionDenied)` when it cannot be
///   opened.
/// - Skip hidden children unless `options.include_hidden` is set.
/// - Canonicalise each child's path when `options.resolve_paths` is set.
/// - Report per-child failures as `Err` items in the returned list instead of
///   failing the whole listing; the reader counts and skips them.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use pathscan::{EntryKind, RawEntry, Result, ScanOptions, Source};
///
/// struct Fixed;
///
/// impl Source for Fixed {
///     fn list(&self, dir: &Path, _options: &ScanOptions) -> Result<Vec<Result<RawEntry>>> {
///         Ok(vec![Ok(RawEntry::new(dir.join("a.txt"), EntryKind::File { size: 3 }))])
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    fn list(&self, dir: &Path, options: &ScanOptions) -> Result<Vec<Result<RawEntry>>>;
}

/// Receives progress notifications while a directory is being listed.
///
/// The reader calls [`begin`](Progress::begin) once per directory,
/// [`advance`](Progress::advance) once per child processed and
/// [`finish`](Progress::finish) when the directory is done. None of these
/// are called unless the scanner was built with `show_progress(true)`.
pub trait Progress: Send + Sync {
    /// A directory listing with `total` children (when known) is starting.
    fn begin(&self, dir: &Path, total: Option<u64>);

    /// One child of the current directory has been processed.
    fn advance(&self, entry: &Path);

    /// The current directory is done.
    fn finish(&self);
}
