//! # pathscan
//!
//! Directory scanning with filters, memoised results and running statistics.
//!
//! A [`Scanner`] lists a directory ([`Scanner::scan_directory`]) or walks a
//! tree down to a depth limit ([`Scanner::scan_recursive`]), splitting what
//! it finds into files and folders. Files pass through a [`FilterChain`]
//! (extensions, size bounds, custom predicates). Results are cached per
//! directory and options until the cache is cleared, and every scan feeds
//! the scanner's [`StatsSnapshot`].
//!
//! Everything runs on the calling thread. Unreadable subtrees never abort a
//! recursive walk; they are skipped and counted in
//! [`StatsSnapshot::errors_encountered`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//! use pathscan::Scanner;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), vec![0u8; 500]).unwrap();
//! fs::write(dir.path().join("b.py"), vec![0u8; 2000]).unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("sub").join("c.py"), vec![0u8; 10]).unwrap();
//!
//! let mut scanner = Scanner::new();
//! scanner.add_extension_filter([".py"]);
//!
//! let result = scanner.scan_recursive(dir.path(), Some(1)).unwrap();
//! assert_eq!(result.files.len(), 2);
//! assert_eq!(result.folders.len(), 1);
//!
//! let stats = scanner.statistics();
//! assert_eq!(stats.total_bytes, 2010);
//! ```
//!
//! # Custom Sources and Filters
//!
//! Implement [`Source`] to scan something other than the local disk, or to
//! observe how often the disk is touched:
//!
//! ```rust
//! use std::path::Path;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use pathscan::{FsSource, RawEntry, Result, ScanOptions, Scanner, Source};
//!
//! struct Counting(Arc<AtomicUsize>);
//!
//! impl Source for Counting {
//!     fn list(&self, dir: &Path, options: &ScanOptions) -> Result<Vec<Result<RawEntry>>> {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         FsSource.list(dir, options)
//!     }
//! }
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let dir = tempfile::tempdir().unwrap();
//! let mut scanner = Scanner::builder().source(Counting(calls.clone())).build();
//!
//! scanner.scan_directory(dir.path()).unwrap();
//! scanner.scan_directory(dir.path()).unwrap();
//! assert_eq!(calls.load(Ordering::Relaxed), 1);
//! ```
//!
//! Arbitrary predicates go through [`Scanner::add_custom_filter`]:
//!
//! ```rust
//! let mut scanner = pathscan::Scanner::new();
//! scanner.add_custom_filter(|file| !file.name.starts_with("tmp_"));
//! ```

#![forbid(unsafe_code)]

mod builder;
mod cache;
mod entry;
mod error;
mod filter;
mod progress;
mod reader;
mod results;
mod scanner;
mod source;
mod stats;
mod traits;
mod walker;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::ScannerBuilder;
pub use cache::{CacheKey, ScanCache, ScanMode};
pub use entry::{EntryKind, FileEntry, FolderEntry, RawEntry};
pub use error::{Result, ScanError};
pub use filter::{Filter, FilterChain};
pub use progress::NoProgress;
#[cfg(feature = "progress-bar")]
pub use progress::BarProgress;
pub use reader::{DirectoryReader, ScanOptions};
pub use results::{Listing, ScanResult};
pub use scanner::{directory_size, find_files, Scanner, PYTHON_EXTENSIONS, TEXT_EXTENSIONS};
pub use source::{validate_directory, FsSource};
pub use stats::{ScanStatistics, StatsSnapshot};
pub use traits::{Progress, Source};
pub use walker::RecursiveWalker;
