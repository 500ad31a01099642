//! File selection rules applied to traversal entries.
//!
//! The [`Selector`] decides which filesystem entries qualify for
//! fingerprint hashing. It applies four rules in a fixed order, stopping
//! at the first failure:
//!
//! 1. the entry is a regular file; a symlink qualifies only if it
//!    resolves to a regular file, and directories and special files
//!    never qualify;
//! 2. its parent directory is not in the exclusion set (exact path
//!    match, so an excluded directory does not shadow its subtree);
//! 3. its size is at least the configured minimum;
//! 4. its filename matches the configured mask.
//!
//! Selection never fails: any disqualifying condition, including a
//! failed metadata query, simply yields `false`.

use std::fs::Metadata;
use std::path::Path;

use walkdir::DirEntry;

use crate::config::ScanConfig;

/// Filtering stage deciding which entries are eligible for hashing.
///
/// Borrows the scan configuration; holds no other state.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a> {
    config: &'a ScanConfig,
}

impl<'a> Selector<'a> {
    /// Create a selector over the given configuration.
    #[must_use]
    pub fn new(config: &'a ScanConfig) -> Self {
        Self { config }
    }

    /// Decide whether `entry` qualifies for hashing.
    ///
    /// Applies the four selection rules in order with short-circuit
    /// evaluation. Performs no I/O beyond a single metadata (size)
    /// query, and never returns an error.
    #[must_use]
    pub fn should_include(&self, entry: &DirEntry) -> bool {
        let Some(metadata) = self.regular_file_metadata(entry) else {
            return false;
        };

        if self.is_parent_excluded(entry.path()) {
            log::trace!("Excluded by parent directory: {}", entry.path().display());
            return false;
        }

        if metadata.len() < self.config.min_size {
            log::trace!(
                "Below minimum size ({} < {}): {}",
                metadata.len(),
                self.config.min_size,
                entry.path().display()
            );
            return false;
        }

        if !self.matches_mask(entry.path()) {
            log::trace!("Filename mask mismatch: {}", entry.path().display());
            return false;
        }

        true
    }

    /// The entry's metadata if it is a regular file, `None` otherwise.
    ///
    /// A symlink is resolved to its target; it qualifies only when the
    /// target is a regular file. The returned metadata (and hence the
    /// size checked against the minimum) is the target's.
    fn regular_file_metadata(&self, entry: &DirEntry) -> Option<Metadata> {
        let file_type = entry.file_type();
        if file_type.is_file() {
            match entry.metadata() {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    log::debug!("Metadata query failed for {}: {}", entry.path().display(), e);
                    None
                }
            }
        } else if file_type.is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => Some(metadata),
                Ok(_) => None,
                Err(e) => {
                    log::debug!("Unresolvable symlink {}: {}", entry.path().display(), e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Check whether the entry's direct parent is an excluded directory.
    ///
    /// Matching is by exact path equality; children of subdirectories of
    /// an excluded directory are not affected.
    fn is_parent_excluded(&self, path: &Path) -> bool {
        path.parent()
            .is_some_and(|parent| self.config.exclusions.contains(parent))
    }

    /// Check the filename against the configured mask, if any.
    fn matches_mask(&self, path: &Path) -> bool {
        let Some(pattern) = &self.config.name_pattern else {
            return true;
        };
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        pattern.is_match(&filename)
    }
}
