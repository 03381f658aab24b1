use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};
use crate::reader::ScanOptions;
use crate::results::ScanResult;

/// Which kind of scan produced a cached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanMode {
    /// Immediate children only.
    Single,

    /// Recursive walk, `None` meaning no depth limit.
    Recursive { max_depth: Option<usize> },
}

/// Identifies one scan: the absolute directory plus every option that can
/// change what the scan returns.
///
/// Unresolved results carry paths spelled the way the caller spelled `dir`,
/// so without `resolve_paths` the spelling is part of the key too.
/// `show_progress` never changes the result and is left out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    dir: PathBuf,
    spelled: Option<PathBuf>,
    include_hidden: bool,
    resolve_paths: bool,
    mode: ScanMode,
}

impl CacheKey {
    /// Build a key for `dir`, made absolute against the current directory.
    ///
    /// Does not touch the filesystem.
    pub fn new(dir: &Path, options: &ScanOptions, mode: ScanMode) -> Result<Self> {
        let spelled = (!options.resolve_paths).then(|| dir.to_path_buf());
        let dir = std::path::absolute(dir).map_err(|_| ScanError::not_found(dir))?;
        Ok(Self {
            dir,
            spelled,
            include_hidden: options.include_hidden,
            resolve_paths: options.resolve_paths,
            mode,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }
}

/// Unbounded memo of previous scan results.
///
/// No eviction and no expiry: entries live until [`invalidate`](Self::invalidate)
/// or [`clear`](Self::clear). Not synchronised; wrap it in a lock to share it.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: HashMap<CacheKey, ScanResult>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&ScanResult> {
        self.entries.get(key)
    }

    /// Store `result` under `key`, replacing any previous entry.
    pub fn put(&mut self, key: CacheKey, result: ScanResult) {
        self.entries.insert(key, result);
    }

    /// Remove one entry. Returns the removed result, if there was one.
    pub fn invalidate(&mut self, key: &CacheKey) -> Option<ScanResult> {
        self.entries.remove(key)
    }

    /// Remove every entry cached for `dir`, whatever options produced it.
    pub fn invalidate_dir(&mut self, dir: &Path) {
        if let Ok(dir) = std::path::absolute(dir) {
            self.entries.retain(|k, _| k.dir != dir);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FileEntry;

    fn result_with(name: &str) -> ScanResult {
        ScanResult {
            files: vec![FileEntry::new(name, 1)],
            folders: Vec::new(),
        }
    }

    fn key(dir: &str, options: ScanOptions, mode: ScanMode) -> CacheKey {
        CacheKey::new(Path::new(dir), &options, mode).unwrap()
    }

    #[test]
    fn put_then_get() {
        let mut cache = ScanCache::new();
        let k = key("/data", ScanOptions::default(), ScanMode::Single);
        assert!(cache.get(&k).is_none());
        cache.put(k.clone(), result_with("/data/a"));
        assert_eq!(cache.get(&k), Some(&result_with("/data/a")));
    }

    #[test]
    fn put_overwrites() {
        let mut cache = ScanCache::new();
        let k = key("/data", ScanOptions::default(), ScanMode::Single);
        cache.put(k.clone(), result_with("/data/a"));
        cache.put(k.clone(), result_with("/data/b"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&k), Some(&result_with("/data/b")));
    }

    #[test]
    fn options_that_change_output_change_the_key() {
        let base = ScanOptions::default();
        let hidden = ScanOptions {
            include_hidden: true,
            ..base
        };
        let resolved = ScanOptions {
            resolve_paths: true,
            ..base
        };
        let k = key("/data", base, ScanMode::Single);
        assert_ne!(k, key("/data", hidden, ScanMode::Single));
        assert_ne!(k, key("/data", resolved, ScanMode::Single));
        assert_ne!(k, key("/data", base, ScanMode::Recursive { max_depth: Some(0) }));
        assert_ne!(
            key("/data", base, ScanMode::Recursive { max_depth: Some(1) }),
            key("/data", base, ScanMode::Recursive { max_depth: None }),
        );
    }

    #[test]
    fn progress_flag_does_not_change_the_key() {
        let base = ScanOptions::default();
        let noisy = ScanOptions {
            show_progress: true,
            ..base
        };
        assert_eq!(
            key("/data", base, ScanMode::Single),
            key("/data", noisy, ScanMode::Single)
        );
    }

    #[test]
    fn relative_dirs_are_made_absolute() {
        let k = key("some/dir", ScanOptions::default(), ScanMode::Single);
        assert!(k.dir().is_absolute());
    }

    #[test]
    fn unresolved_keys_keep_the_callers_spelling() {
        let rel = Path::new("data/sub");
        let abs = std::path::absolute(rel).unwrap();
        let base = ScanOptions::default();
        let resolved = ScanOptions {
            resolve_paths: true,
            ..base
        };

        let k_rel = CacheKey::new(rel, &base, ScanMode::Single).unwrap();
        let k_abs = CacheKey::new(&abs, &base, ScanMode::Single).unwrap();
        assert_ne!(k_rel, k_abs);
        assert_eq!(k_rel.dir(), k_abs.dir());

        assert_eq!(
            CacheKey::new(rel, &resolved, ScanMode::Single).unwrap(),
            CacheKey::new(&abs, &resolved, ScanMode::Single).unwrap(),
        );
    }

    #[test]
    fn invalidate_dir_drops_every_spelling() {
        let mut cache = ScanCache::new();
        let rel = Path::new("data/sub");
        let abs = std::path::absolute(rel).unwrap();
        let k_rel = CacheKey::new(rel, &ScanOptions::default(), ScanMode::Single).unwrap();
        let k_abs = CacheKey::new(&abs, &ScanOptions::default(), ScanMode::Single).unwrap();
        cache.put(k_rel, result_with("data/sub/a"));
        cache.put(k_abs, result_with("/x/data/sub/a"));

        cache.invalidate_dir(rel);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = ScanCache::new();
        let a = key("/a", ScanOptions::default(), ScanMode::Single);
        let a_rec = key("/a", ScanOptions::default(), ScanMode::Recursive { max_depth: None });
        let b = key("/b", ScanOptions::default(), ScanMode::Single);
        cache.put(a.clone(), result_with("/a/x"));
        cache.put(a_rec.clone(), result_with("/a/x"));
        cache.put(b.clone(), result_with("/b/y"));

        assert!(cache.invalidate(&a).is_some());
        assert!(cache.get(&a).is_none());
        assert_eq!(cache.len(), 2);

        cache.invalidate_dir(Path::new("/a"));
        assert!(cache.get(&a_rec).is_none());
        assert!(cache.get(&b).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
