use std::path::{Path, PathBuf};
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = ScanError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ScanError {
    // Target
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: &'static str },

    #[error("permission denied: {}", _0.display())]
    PermissionDenied(PathBuf),

    // Config
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Per-entry
    #[error("could not stat {}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink loop at {}", _0.display())]
    SymlinkLoop(PathBuf),

    // Runtime
    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),
}

impl ScanError {
    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: "does not exist",
        }
    }

    pub(crate) fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: "not a directory",
        }
    }

    /// Classify an I/O failure on a directory as permission or generic I/O.
    pub(crate) fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::not_found(path),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidPath { path: p, .. }
            | Self::PermissionDenied(p)
            | Self::Stat { path: p, .. }
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. } => Some(p.as_path()),
            Self::InvalidConfiguration(_) | Self::Walk(_) => None,
        }
    }

    /// Whether a recursive walk can continue past this error.
    ///
    /// `InvalidPath` is recoverable only below the walk root; callers of a
    /// top-level scan see it as fatal regardless of this flag.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_) | Self::Stat { .. } | Self::SymlinkLoop(_) | Self::Io { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to ScanError
// ---------------------------------------------------------------------------

impl From<ignore::Error> for ScanError {
    fn from(e: ignore::Error) -> Self {
        match e {
            ignore::Error::WithDepth { err, .. } => Self::from(*err),
            ignore::Error::WithPath { path, err } => match *err {
                ignore::Error::Io(io_err) => Self::from_io(&path, io_err),
                other => Self::Walk(format!("{}: {}", path.display(), other)),
            },
            ignore::Error::Loop { child, .. } => Self::SymlinkLoop(child),
            ignore::Error::Io(io_err) => Self::Io {
                path: PathBuf::new(),
                source: io_err,
            },
            other => Self::Walk(other.to_string()),
        }
    }
}
