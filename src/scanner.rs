use std::path::Path;

use crate::builder::ScannerBuilder;
use crate::cache::{CacheKey, ScanCache, ScanMode};
use crate::entry::FileEntry;
use crate::error::Result;
use crate::filter::FilterChain;
use crate::reader::{DirectoryReader, ScanOptions};
use crate::results::ScanResult;
use crate::stats::{ScanStatistics, StatsSnapshot};
use crate::traits::{Progress, Source};
use crate::walker::RecursiveWalker;

/// Extensions matched by [`find_files`] for Python sources.
pub const PYTHON_EXTENSIONS: &[&str] = &[".py"];

/// Extensions matched by [`find_files`] for plain-text documents.
pub const TEXT_EXTENSIONS: &[&str] = &[".txt", ".md", ".rst"];

/// Scans directories with a fixed configuration, a mutable filter chain, a
/// result cache and running statistics.
///
/// Single-threaded: every scan blocks the caller until the result is fully
/// built. Share a scanner between threads only behind a lock.
///
/// # Example
///
/// ```rust
/// use pathscan::Scanner;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("main.py"), "print()").unwrap();
/// std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
///
/// let mut scanner = Scanner::new();
/// scanner.add_extension_filter(["py"]);
///
/// let result = scanner.scan_directory(dir.path()).unwrap();
/// assert_eq!(result.files.len(), 1);
/// assert_eq!(scanner.statistics().directories_scanned, 1);
/// ```
pub struct Scanner {
    pub(crate) options:       ScanOptions,
    pub(crate) cache_enabled: bool,
    pub(crate) filters:       FilterChain,
    pub(crate) cache:         ScanCache,
    pub(crate) stats:         ScanStatistics,
    pub(crate) source:        Box<dyn Source>,
    pub(crate) progress:      Box<dyn Progress>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// A scanner with default settings: hidden entries skipped, paths as
    /// listed, cache on, no progress.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::default()
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    // ── Filters ───────────────────────────────────────────────────────────
    //
    // Filters change what a scan returns, so every mutation drops the cache.

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// See [`FilterChain::add_extension_filter`].
    pub fn add_extension_filter<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.add_extension_filter(extensions);
        self.cache.clear();
    }

    /// See [`FilterChain::add_size_filter`].
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `min > max`; the chain is left unchanged.
    pub fn add_size_filter(&mut self, min: Option<u64>, max: Option<u64>) -> Result<()> {
        self.filters.add_size_filter(min, max)?;
        self.cache.clear();
        Ok(())
    }

    /// See [`FilterChain::add_custom_filter`].
    pub fn add_custom_filter<F>(&mut self, predicate: F)
    where
        F: Fn(&FileEntry) -> bool + Send + Sync + 'static,
    {
        self.filters.add_custom_filter(predicate);
        self.cache.clear();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.cache.clear();
    }

    // ── Cache & statistics ────────────────────────────────────────────────

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Drop cached results for `dir` only.
    pub fn invalidate(&mut self, dir: impl AsRef<Path>) {
        self.cache.invalidate_dir(dir.as_ref());
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub fn statistics(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }

    // ── Scans ─────────────────────────────────────────────────────────────

    /// List the immediate children of `dir`.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `dir` is missing or not a directory, `PermissionDenied`
    /// if it cannot be read. Unreadable children are skipped and counted in
    /// [`StatsSnapshot::errors_encountered`].
    pub fn scan_directory(&mut self, dir: impl AsRef<Path>) -> Result<ScanResult> {
        self.scan(dir.as_ref(), ScanMode::Single)
    }

    /// Walk `dir` and its subdirectories down to `max_depth` (`None` for the
    /// whole tree). `Some(0)` returns the same entries as
    /// [`scan_directory`](Self::scan_directory).
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `dir` is missing or not a directory. Unreadable
    /// subtrees, including an unreadable `dir`, are skipped and counted in
    /// [`StatsSnapshot::errors_encountered`].
    pub fn scan_recursive(&mut self, dir: impl AsRef<Path>, max_depth: Option<usize>) -> Result<ScanResult> {
        self.scan(dir.as_ref(), ScanMode::Recursive { max_depth })
    }

    /// Total size in bytes of every file under `dir` that passes the filters.
    pub fn directory_size(&mut self, dir: impl AsRef<Path>) -> Result<u64> {
        Ok(self.scan_recursive(dir, None)?.total_bytes())
    }

    fn scan(&mut self, dir: &Path, mode: ScanMode) -> Result<ScanResult> {
        let key = CacheKey::new(dir, &self.options, mode)?;

        if self.cache_enabled {
            if let Some(hit) = self.cache.get(&key) {
                tracing::debug!(dir = %dir.display(), ?mode, "cache hit");
                let result = hit.clone();
                self.stats.record(&result, 0, dir);
                return Ok(result);
            }
        }

        let reader = DirectoryReader::new(self.source.as_ref(), &self.filters, self.progress.as_ref());
        let listing = match mode {
            ScanMode::Single => reader.list_once(dir, &self.options)?,
            ScanMode::Recursive { max_depth } => {
                RecursiveWalker::new(reader).walk(dir, max_depth, &self.options)?
            }
        };

        tracing::info!(
            dir = %dir.display(),
            ?mode,
            files = listing.result.files.len(),
            folders = listing.result.folders.len(),
            errors = listing.error_count(),
            "scan complete"
        );
        self.stats.record(&listing.result, listing.error_count(), dir);

        // Partial results are not memoised so a later scan can recover.
        if self.cache_enabled && !listing.is_partial() {
            self.cache.put(key, listing.result.clone());
        }
        Ok(listing.result)
    }
}

// ---------------------------------------------------------------------------
// Convenience helpers
// ---------------------------------------------------------------------------

fn one_shot() -> Scanner {
    Scanner::builder().include_hidden(true).cache(false).build()
}

/// Files in `dir` (and below it when `recursive`) with one of `extensions`.
///
/// Hidden entries are included.
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("README.md"), "# hi").unwrap();
/// std::fs::write(dir.path().join("lib.rs"), "").unwrap();
///
/// let docs = pathscan::find_files(dir.path(), pathscan::TEXT_EXTENSIONS, false).unwrap();
/// assert_eq!(docs.len(), 1);
/// ```
pub fn find_files<I, S>(dir: impl AsRef<Path>, extensions: I, recursive: bool) -> Result<Vec<FileEntry>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = one_shot();
    scanner.add_extension_filter(extensions);
    let result = if recursive {
        scanner.scan_recursive(dir, None)?
    } else {
        scanner.scan_directory(dir)?
    };
    Ok(result.files)
}

/// Total size in bytes of every file under `dir`, hidden files included.
pub fn directory_size(dir: impl AsRef<Path>) -> Result<u64> {
    one_shot().directory_size(dir)
}
