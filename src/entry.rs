use std::path::{Path, PathBuf};

/// A file found during a scan.
///
/// Built by the directory reader from a [`RawEntry`] and owned by the caller
/// once the scan returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// The file's name, without its parent directory.
    pub name: String,

    /// Full path, canonical when the scan resolves paths.
    pub path: PathBuf,

    /// Size in bytes. Zero when the size could not be determined.
    pub size: u64,

    /// Lowercase extension with a leading dot (`".py"`), or empty.
    pub extension: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        Self::named(file_name(&path), path, size)
    }

    /// Build an entry whose name (and extension) come from `name` rather
    /// than from `path`, e.g. a symlink listed under its own name but
    /// reported at its resolved location.
    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        let name = name.into();
        let extension = Path::new(&name)
            .extension()
            .map(|e| normalize_extension(&e.to_string_lossy()))
            .unwrap_or_default();
        Self {
            name,
            path: path.into(),
            size,
            extension,
        }
    }
}

/// A subdirectory found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderEntry {
    pub name: String,
    pub path: PathBuf,
}

impl FolderEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::named(file_name(&path), path)
    }

    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A single child produced by a [`Source`](crate::traits::Source) listing.
///
/// Sources resolve symlinks before handing entries over: a link to a regular
/// file arrives as [`EntryKind::File`], anything else it points at arrives as
/// [`EntryKind::Symlink`] and is skipped by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// The name the entry was listed under. Hidden checks and reported
    /// names use this, never the resolved path.
    pub name: String,

    /// Path as it should appear in results (already canonical if requested).
    pub path: PathBuf,

    /// What kind of entry this is.
    pub kind: EntryKind,
}

impl RawEntry {
    /// An entry named after the last component of `path`.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        Self {
            name: file_name(&path),
            path,
            kind,
        }
    }
}

/// The kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file, or a link to one, with its size in bytes.
    File { size: u64 },

    /// A directory.
    Dir,

    /// A symbolic link that does not resolve to a regular file.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

/// Lowercase `ext` and make sure it carries a single leading dot.
///
/// An empty input stays empty so that extension-less files never match `"."`.
pub(crate) fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() {
        return String::new();
    }
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
