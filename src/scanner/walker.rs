//! Directory traversal over the configured scan roots.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which enumerates
//! filesystem entries under each configured root using [`walkdir`].
//! Traversal is lazy, single-pass, and single-threaded. A root that is
//! missing or not a directory is reported as a warning and skipped; the
//! walk continues with the remaining roots.
//!
//! Traversal order is filesystem-dependent and not guaranteed stable
//! across runs or platforms; downstream grouping does not depend on it.
//!
//! # Example
//!
//! ```no_run
//! use blockdupe::config::ScanDepth;
//! use blockdupe::scanner::Walker;
//! use std::path::PathBuf;
//!
//! let walker = Walker::new(vec![PathBuf::from("/data")], ScanDepth::Recursive);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(e) => println!("{}", e.path().display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::iter;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::ScanError;
use crate::config::ScanDepth;

/// Lazy traversal driver over one or more scan roots.
#[derive(Debug)]
pub struct Walker {
    /// Root directories to enumerate, in order
    roots: Vec<PathBuf>,
    /// Shallow (direct children) or recursive (full subtree)
    depth: ScanDepth,
}

impl Walker {
    /// Create a walker for the given roots and depth.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, depth: ScanDepth) -> Self {
        Self { roots, depth }
    }

    /// Walk all roots, yielding entries and recoverable errors.
    ///
    /// Returns a lazy iterator over [`DirEntry`] results. A missing or
    /// non-directory root yields a single [`ScanError`] item after a
    /// warning; per-entry traversal errors are yielded as [`ScanError`]
    /// values rather than stopping iteration. The root entries
    /// themselves are not yielded.
    pub fn walk(&self) -> impl Iterator<Item = Result<DirEntry, ScanError>> + '_ {
        self.roots.iter().flat_map(move |root| self.walk_root(root))
    }

    /// Walk a single root, validating it first.
    fn walk_root<'a>(
        &'a self,
        root: &'a Path,
    ) -> Box<dyn Iterator<Item = Result<DirEntry, ScanError>> + 'a> {
        if !root.exists() {
            log::warn!("Skipping scan root (not found): {}", root.display());
            return Box::new(iter::once(Err(ScanError::RootNotFound(root.to_path_buf()))));
        }
        if !root.is_dir() {
            log::warn!("Skipping scan root (not a directory): {}", root.display());
            return Box::new(iter::once(Err(ScanError::RootNotADirectory(
                root.to_path_buf(),
            ))));
        }

        let mut walk = WalkDir::new(root).follow_links(false).min_depth(1);
        if self.depth == ScanDepth::Shallow {
            walk = walk.max_depth(1);
        }

        log::debug!(
            "Walking {} ({:?} depth)",
            root.display(),
            self.depth
        );

        Box::new(walk.into_iter().map(move |result| {
            result.map_err(|e| {
                let path = e
                    .path()
                    .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                log::warn!("Traversal error for {}: {}", path.display(), e);
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                ScanError::Io { path, source }
            })
        }))
    }
}
