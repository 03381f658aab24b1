use std::path::Path;

use crate::traits::Progress;

/// A [`Progress`] that does nothing. Used whenever progress is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&self, _dir: &Path, _total: Option<u64>) {}
    fn advance(&self, _entry: &Path) {}
    fn finish(&self) {}
}

#[cfg(feature = "progress-bar")]
pub use bar::BarProgress;

#[cfg(feature = "progress-bar")]
mod bar {
    use std::path::Path;

    use indicatif::{ProgressBar, ProgressStyle};

    use crate::traits::Progress;

    const TEMPLATE: &str = "{spinner:.green} Scanning {msg} [{bar:40.cyan/blue}] {pos}/{len} items";

    /// Terminal progress bar backed by `indicatif`, one bar per directory.
    #[derive(Debug, Clone)]
    pub struct BarProgress {
        bar: ProgressBar,
    }

    impl Default for BarProgress {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BarProgress {
        pub fn new() -> Self {
            let bar = ProgressBar::hidden();
            // Static template; a bad template only loses styling.
            if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
                bar.set_style(style.progress_chars("█▓░"));
            }
            Self { bar }
        }
    }

    impl Progress for BarProgress {
        fn begin(&self, dir: &Path, total: Option<u64>) {
            self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            self.bar.reset();
            if let Some(n) = total {
                self.bar.set_length(n);
            }
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string());
            self.bar.set_message(name);
        }

        fn advance(&self, _entry: &Path) {
            self.bar.inc(1);
        }

        fn finish(&self) {
            self.bar.finish_and_clear();
        }
    }
}
