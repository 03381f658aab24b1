use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::reader::{DirectoryReader, ScanOptions};
use crate::results::Listing;

/// Applies a [`DirectoryReader`] across a directory tree.
///
/// Depth-first and pre-order: a directory's own entries come first, followed
/// by each of its subdirectories in listing order. Symlinked directories are
/// never listed as folders, so they are never descended into.
pub struct RecursiveWalker<'a> {
    reader: DirectoryReader<'a>,
}

impl<'a> RecursiveWalker<'a> {
    pub fn new(reader: DirectoryReader<'a>) -> Self {
        Self { reader }
    }

    /// Collect every file and folder under `root`, down to `max_depth`.
    ///
    /// Depth 0 lists `root` only, exactly like
    /// [`DirectoryReader::list_once`]. A folder found while listing depth `d`
    /// is itself listed only when `d < max_depth`. `None` walks the whole tree.
    ///
    /// Directories that fail to list (permissions, removed mid-walk, I/O)
    /// are skipped and reported in [`Listing::errors`]; the walk carries on
    /// with the rest of the tree. That includes `root` being unreadable.
    ///
    /// # Errors
    ///
    /// Only non-recoverable failures on `root` itself, i.e. `InvalidPath`.
    pub fn walk(&self, root: &Path, max_depth: Option<usize>, options: &ScanOptions) -> Result<Listing> {
        let mut out = Listing::default();
        let mut stack: Vec<(PathBuf, usize)> = vec![(root.to_path_buf(), 0)];

        while let Some((dir, depth)) = stack.pop() {
            let listing = match self.reader.list_once(&dir, options) {
                Ok(l) => l,
                Err(e) if depth == 0 && !e.is_recoverable() => return Err(e),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping subtree");
                    out.errors.push(e);
                    continue;
                }
            };

            if max_depth.map_or(true, |max| depth < max) {
                // Reversed so the first listed folder is popped first.
                for folder in listing.result.folders.iter().rev() {
                    stack.push((folder.path.clone(), depth + 1));
                }
            }
            out.absorb(listing);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::entry::{EntryKind, RawEntry};
    use crate::error::ScanError;
    use crate::filter::FilterChain;
    use crate::progress::NoProgress;
    use crate::traits::Source;

    /// In-memory tree: directory path -> children. `locked` directories
    /// answer with `PermissionDenied`.
    struct Tree {
        dirs: HashMap<PathBuf, Vec<(&'static str, EntryKind)>>,
        locked: Vec<PathBuf>,
    }

    impl Source for Tree {
        fn list(&self, dir: &Path, _options: &ScanOptions) -> Result<Vec<Result<RawEntry>>> {
            if self.locked.iter().any(|l| l == dir) {
                return Err(ScanError::PermissionDenied(dir.to_path_buf()));
            }
            let children = self.dirs.get(dir).ok_or_else(|| ScanError::not_found(dir))?;
            Ok(children
                .iter()
                .map(|(name, kind)| Ok(RawEntry::new(dir.join(name), *kind)))
                .collect())
        }
    }

    fn file(size: u64) -> EntryKind {
        EntryKind::File { size }
    }

    /// /r
    ///   top.txt
    ///   a/
    ///     a1.txt
    ///     deep/
    ///       d1.txt
    ///   b/
    ///     b1.txt
    fn tree() -> Tree {
        let mut dirs = HashMap::new();
        dirs.insert(
            PathBuf::from("/r"),
            vec![("top.txt", file(1)), ("a", EntryKind::Dir), ("b", EntryKind::Dir)],
        );
        dirs.insert(PathBuf::from("/r/a"), vec![("a1.txt", file(2)), ("deep", EntryKind::Dir)]);
        dirs.insert(PathBuf::from("/r/a/deep"), vec![("d1.txt", file(3))]);
        dirs.insert(PathBuf::from("/r/b"), vec![("b1.txt", file(4))]);
        Tree {
            dirs,
            locked: Vec::new(),
        }
    }

    fn walk(tree: &Tree, max_depth: Option<usize>) -> Result<Listing> {
        let filters = FilterChain::new();
        let reader = DirectoryReader::new(tree, &filters, &NoProgress);
        RecursiveWalker::new(reader).walk(Path::new("/r"), max_depth, &ScanOptions::default())
    }

    fn file_names(listing: &Listing) -> Vec<&str> {
        listing.result.files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn depth_zero_matches_a_single_listing() {
        let tree = tree();
        let filters = FilterChain::new();
        let reader = DirectoryReader::new(&tree, &filters, &NoProgress);
        let single = reader.list_once(Path::new("/r"), &ScanOptions::default()).unwrap();

        let walked = walk(&tree, Some(0)).unwrap();
        assert_eq!(walked.result, single.result);
    }

    #[test]
    fn visits_depth_first_in_pre_order() {
        let listing = walk(&tree(), None).unwrap();
        assert_eq!(file_names(&listing), vec!["top.txt", "a1.txt", "d1.txt", "b1.txt"]);
        let folders: Vec<_> = listing.result.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(folders, vec!["a", "b", "deep"]);
    }

    #[test]
    fn max_depth_limits_descent() {
        let listing = walk(&tree(), Some(1)).unwrap();
        assert_eq!(file_names(&listing), vec!["top.txt", "a1.txt", "b1.txt"]);
        // `deep` is reported as a folder but not listed.
        assert!(listing.result.folders.iter().any(|f| f.name == "deep"));
    }

    #[test]
    fn deeper_walks_are_supersets() {
        let tree = tree();
        let mut previous = walk(&tree, Some(0)).unwrap().result;
        for depth in 1..4 {
            let next = walk(&tree, Some(depth)).unwrap().result;
            assert!(previous.files.iter().all(|f| next.files.contains(f)));
            assert!(previous.folders.iter().all(|f| next.folders.contains(f)));
            previous = next;
        }
        assert_eq!(previous, walk(&tree, None).unwrap().result);
    }

    #[test]
    fn locked_subtree_is_skipped_not_fatal() {
        let mut tree = tree();
        tree.locked.push(PathBuf::from("/r/a"));

        let listing = walk(&tree, None).unwrap();
        assert_eq!(file_names(&listing), vec!["top.txt", "b1.txt"]);
        assert_eq!(listing.error_count(), 1);
        assert!(matches!(listing.errors[0], ScanError::PermissionDenied(_)));
    }

    #[test]
    fn locked_root_yields_empty_partial_result() {
        let mut tree = tree();
        tree.locked.push(PathBuf::from("/r"));

        let listing = walk(&tree, None).unwrap();
        assert!(listing.result.is_empty());
        assert!(listing.is_partial());
    }

    #[test]
    fn missing_root_is_fatal() {
        let tree = Tree {
            dirs: HashMap::new(),
            locked: Vec::new(),
        };
        assert!(matches!(walk(&tree, None), Err(ScanError::InvalidPath { .. })));
    }

    #[test]
    fn vanished_subdirectory_is_counted() {
        let mut tree = tree();
        tree.dirs.remove(&PathBuf::from("/r/b"));

        let listing = walk(&tree, None).unwrap();
        assert_eq!(file_names(&listing), vec!["top.txt", "a1.txt", "d1.txt"]);
        assert_eq!(listing.error_count(), 1);
    }
}
