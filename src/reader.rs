use std::path::Path;

use crate::entry::{EntryKind, FileEntry, FolderEntry, RawEntry};
use crate::error::Result;
use crate::filter::FilterChain;
use crate::progress::NoProgress;
use crate::results::{Listing, ScanResult};
use crate::traits::{Progress, Source};

/// Options that shape a single scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScanOptions {
    /// Keep entries whose name starts with `.` (and, on Windows, entries
    /// carrying the hidden attribute).
    pub include_hidden: bool,

    /// Report canonical absolute paths instead of `dir.join(name)`.
    pub resolve_paths: bool,

    /// Drive the progress reporter while listing.
    pub show_progress: bool,
}

/// Lists one directory and turns its children into a [`ScanResult`].
///
/// Borrows everything it needs from the owning scanner; building one is free.
pub struct DirectoryReader<'a> {
    source: &'a dyn Source,
    filters: &'a FilterChain,
    progress: &'a dyn Progress,
}

impl<'a> DirectoryReader<'a> {
    pub fn new(source: &'a dyn Source, filters: &'a FilterChain, progress: &'a dyn Progress) -> Self {
        Self {
            source,
            filters,
            progress,
        }
    }

    /// One pass over the immediate children of `dir`.
    ///
    /// Files pass through the filter chain; folders are always kept. Children
    /// that could not be stat'ed are skipped and reported in
    /// [`Listing::errors`].
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `dir` is missing or not a directory, `PermissionDenied`
    /// if it cannot be opened.
    pub fn list_once(&self, dir: &Path, options: &ScanOptions) -> Result<Listing> {
        let children = self.source.list(dir, options)?;
        tracing::debug!(dir = %dir.display(), children = children.len(), "listed directory");

        let noop = NoProgress;
        let progress: &dyn Progress = if options.show_progress {
            self.progress
        } else {
            &noop
        };
        progress.begin(dir, Some(children.len() as u64));

        let mut listing = Listing::default();
        for child in children {
            match child {
                Ok(raw) => {
                    progress.advance(&raw.path);
                    self.classify(raw, options, &mut listing.result);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping entry");
                    progress.advance(e.path().unwrap_or(dir));
                    listing.errors.push(e);
                }
            }
        }

        progress.finish();
        Ok(listing)
    }

    fn classify(&self, raw: RawEntry, options: &ScanOptions, out: &mut ScanResult) {
        if !options.include_hidden && raw.name.starts_with('.') {
            return;
        }
        match raw.kind {
            EntryKind::Dir => out.folders.push(FolderEntry::named(raw.name, raw.path)),
            EntryKind::File { size } => {
                let file = FileEntry::named(raw.name, raw.path, size);
                if self.filters.apply(&file) {
                    out.files.push(file);
                }
            }
            EntryKind::Symlink | EntryKind::Other => {}
        }
    }
}
