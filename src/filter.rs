use std::collections::BTreeSet;
use std::fmt;

use crate::entry::{normalize_extension, FileEntry};
use crate::error::{Result, ScanError};

type CustomFn = Box<dyn Fn(&FileEntry) -> bool + Send + Sync>;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// One predicate in a [`FilterChain`].
pub enum Filter {
    /// Passes files whose normalised extension is in the set.
    Extensions(BTreeSet<String>),

    /// Passes files whose size lies within the inclusive bounds.
    Size { min: Option<u64>, max: Option<u64> },

    /// Passes files for which the caller's function returns `true`.
    Custom(CustomFn),
}

impl Filter {
    pub fn evaluate(&self, file: &FileEntry) -> bool {
        match self {
            Self::Extensions(set) => set.contains(&file.extension),
            Self::Size { min, max } => {
                min.map_or(true, |m| file.size >= m) && max.map_or(true, |m| file.size <= m)
            }
            Self::Custom(f) => f(file),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extensions(set) => f.debug_tuple("Extensions").field(set).finish(),
            Self::Size { min, max } => f
                .debug_struct("Size")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterChain
// ---------------------------------------------------------------------------

/// An ordered set of [`Filter`]s combined with logical AND.
///
/// Extension filters accumulate into a single set: adding `.rs` after `.py`
/// passes both. Size and custom filters stack, each one narrowing the result.
#[derive(Debug, Default)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict files to the given extensions, merged with any earlier set.
    ///
    /// Extensions are matched case-insensitively, with or without a leading dot.
    pub fn add_extension_filter<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty());

        let existing = self.filters.iter_mut().find_map(|f| match f {
            Filter::Extensions(set) => Some(set),
            _ => None,
        });
        match existing {
            Some(set) => set.extend(normalized),
            None => self.filters.push(Filter::Extensions(normalized.collect())),
        }
    }

    /// Restrict files to `min..=max` bytes. `None` leaves that side open.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConfiguration`] when `min > max`.
    pub fn add_size_filter(&mut self, min: Option<u64>, max: Option<u64>) -> Result<()> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(ScanError::InvalidConfiguration(format!(
                    "minimum size {lo} exceeds maximum size {hi}"
                )));
            }
        }
        self.filters.push(Filter::Size { min, max });
        Ok(())
    }

    /// Require `predicate` to hold for every file.
    pub fn add_custom_filter<F>(&mut self, predicate: F)
    where
        F: Fn(&FileEntry) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Filter::Custom(Box::new(predicate)));
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// `true` iff every filter passes. An empty chain passes everything.
    pub fn apply(&self, file: &FileEntry) -> bool {
        self.filters.iter().all(|f| f.evaluate(file))
    }
}
