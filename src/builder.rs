use crate::cache::ScanCache;
use crate::filter::FilterChain;
use crate::progress::NoProgress;
use crate::reader::ScanOptions;
use crate::scanner::Scanner;
use crate::source::FsSource;
use crate::stats::ScanStatistics;
use crate::traits::{Progress, Source};

// ---------------------------------------------------------------------------
// ScannerBuilder
// ---------------------------------------------------------------------------

/// Configures a [`Scanner`].
///
/// Created via [`Scanner::builder()`]. Every setting here is fixed for the
/// lifetime of the scanner; filters are the only thing that can change later.
///
/// # Example
///
/// ```rust
/// let scanner = pathscan::Scanner::builder()
///     .include_hidden(true)
///     .resolve_paths(true)
///     .cache(false)
///     .build();
///
/// assert!(scanner.options().include_hidden);
/// ```
pub struct ScannerBuilder {
    show_progress:  bool,
    resolve_paths:  bool,
    include_hidden: bool,
    cache_enabled:  bool,
    source:         Option<Box<dyn Source>>,
    progress:       Option<Box<dyn Progress>>,
}

impl Default for ScannerBuilder {
    fn default() -> Self {
        Self {
            show_progress:  false,
            resolve_paths:  false,
            include_hidden: false,
            cache_enabled:  true,
            source:         None,
            progress:       None,
        }
    }
}

impl ScannerBuilder {
    // ── Options ───────────────────────────────────────────────────────────

    /// Report progress while listing directories. Off by default.
    ///
    /// Uses the reporter given to [`progress()`](Self::progress). Without
    /// one, falls back to a terminal bar when the `progress-bar` feature is
    /// enabled and to nothing otherwise.
    pub fn show_progress(mut self, yes: bool) -> Self {
        self.show_progress = yes;
        self
    }

    /// Return canonical absolute paths. Off by default.
    pub fn resolve_paths(mut self, yes: bool) -> Self {
        self.resolve_paths = yes;
        self
    }

    /// Keep hidden entries. Off by default.
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }

    /// Memoise results per directory and options. On by default.
    pub fn cache(mut self, yes: bool) -> Self {
        self.cache_enabled = yes;
        self
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    /// Read directories through `source` instead of the local filesystem.
    pub fn source(mut self, source: impl Source + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Report progress through `progress`. Only used with `show_progress(true)`.
    pub fn progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    pub fn build(self) -> Scanner {
        let progress = match self.progress {
            Some(p) => p,
            None => default_progress(self.show_progress),
        };

        Scanner {
            options: ScanOptions {
                include_hidden: self.include_hidden,
                resolve_paths:  self.resolve_paths,
                show_progress:  self.show_progress,
            },
            cache_enabled: self.cache_enabled,
            filters:       FilterChain::new(),
            cache:         ScanCache::new(),
            stats:         ScanStatistics::new(),
            source:        self.source.unwrap_or_else(|| Box::new(FsSource)),
            progress,
        }
    }
}

#[cfg(feature = "progress-bar")]
fn default_progress(show: bool) -> Box<dyn Progress> {
    if show {
        Box::new(crate::progress::BarProgress::new())
    } else {
        Box::new(NoProgress)
    }
}

#[cfg(not(feature = "progress-bar"))]
fn default_progress(show: bool) -> Box<dyn Progress> {
    if show {
        tracing::warn!("no progress reporter available, progress display disabled");
    }
    Box::new(NoProgress)
}
