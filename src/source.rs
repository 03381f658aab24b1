use std::fs;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::entry::{EntryKind, RawEntry};
use crate::error::{Result, ScanError};
use crate::reader::ScanOptions;
use crate::traits::Source;

/// Check that `path` exists and is a directory.
///
/// # Errors
///
/// [`ScanError::InvalidPath`] when the path is missing or is not a directory,
/// [`ScanError::PermissionDenied`] when it cannot even be stat'ed.
pub fn validate_directory(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
    if !meta.is_dir() {
        return Err(ScanError::not_a_directory(path));
    }
    Ok(path.to_path_buf())
}

// ---------------------------------------------------------------------------
// FsSource
// ---------------------------------------------------------------------------

/// Lists directories on the local filesystem.
///
/// One `ignore` walk restricted to depth 1, with every ignore-file filter off.
/// Hidden entries are dropped by `ignore` itself, so on Windows the hidden
/// attribute is honoured as well as the leading dot.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl Source for FsSource {
    fn list(&self, dir: &Path, options: &ScanOptions) -> Result<Vec<Result<RawEntry>>> {
        validate_directory(dir)?;

        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .follow_links(false)
            .max_depth(Some(1));

        let mut children = Vec::new();
        for res in builder.build() {
            let entry = match res {
                Ok(e) => e,
                // Failing to open `dir` itself fails the listing; anything
                // else is a single bad child.
                Err(e) if is_root_failure(&e, dir) => return Err(ScanError::from(e)),
                Err(e) => {
                    children.push(Err(ScanError::from(e)));
                    continue;
                }
            };

            // Skip the root itself
            if entry.depth() == 0 {
                continue;
            }

            children.push(raw_entry(&entry, options.resolve_paths));
        }
        Ok(children)
    }
}

/// Build a [`RawEntry`] from an `ignore` entry, stat'ing files for their size.
fn raw_entry(entry: &DirEntry, resolve: bool) -> Result<RawEntry> {
    let path = entry.path();
    // Taken before any resolution so a link keeps the name it was listed under.
    let name = entry.file_name().to_string_lossy().into_owned();
    let Some(ft) = entry.file_type() else {
        return Ok(RawEntry {
            name,
            path: path.to_path_buf(),
            kind: EntryKind::Other,
        });
    };

    let kind = if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_file() {
        let meta = fs::metadata(path).map_err(|source| ScanError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        EntryKind::File { size: meta.len() }
    } else if ft.is_symlink() {
        // Links count as files only when they land on a regular file.
        // Dangling links and links to directories are never followed.
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => EntryKind::File { size: meta.len() },
            _ => EntryKind::Symlink,
        }
    } else {
        EntryKind::Other
    };

    let path = if resolve {
        dunce::canonicalize(path).map_err(|source| ScanError::Stat {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        path.to_path_buf()
    };

    Ok(RawEntry { name, path, kind })
}

fn is_root_failure(err: &ignore::Error, root: &Path) -> bool {
    match err {
        ignore::Error::WithDepth { depth, err } => *depth == 0 || is_root_failure(err, root),
        ignore::Error::WithPath { path, .. } => path == root,
        _ => false,
    }
}
