//! Scan configuration and filename mask translation.
//!
//! A [`ScanConfig`] is the finalized, immutable parameter object the
//! scan pipeline consumes. It is constructed once by the CLI layer (or
//! directly by library callers) before the scan runs; the core never
//! reads interactive input.
//!
//! The filename mask is a small glob dialect: `*` matches any run of
//! zero or more characters and `?` matches exactly one character. The
//! mask is translated verbatim into an anchored, case-insensitive
//! regular expression (`*` → `.*`, `?` → `.`); other characters pass
//! through unmodified, so a mask containing regex syntax that fails to
//! compile is rejected with [`ConfigError`].

use std::collections::HashSet;
use std::path::PathBuf;

use clap::ValueEnum;
use regex::{Regex, RegexBuilder};

pub use crate::scanner::hasher::DEFAULT_BLOCK_SIZE;

/// Default minimum file size in bytes (empty files are skipped).
pub const DEFAULT_MIN_SIZE: u64 = 1;

/// Traversal depth for each scan root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScanDepth {
    /// Enumerate only the direct children of each root.
    Shallow,
    /// Enumerate the full subtree under each root.
    #[default]
    Recursive,
}

/// Errors raised while building a configuration.
///
/// Configuration errors are fatal: the scan never starts.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The filename mask translated to a pattern that does not compile.
    #[error("Invalid filename mask '{mask}': {source}")]
    InvalidMask {
        /// The user-supplied mask
        mask: String,
        /// The underlying pattern compilation error
        #[source]
        source: Box<regex::Error>,
    },
}

/// Finalized parameters for one duplicate scan.
///
/// Immutable for the scan's duration. Built with [`ScanConfig::new`]
/// plus the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directories to scan, in order.
    pub roots: Vec<PathBuf>,

    /// Directories whose direct children are excluded. Matching is by
    /// exact parent-path equality, not by subtree prefix.
    pub exclusions: HashSet<PathBuf>,

    /// Inclusive lower bound on file size in bytes. Zero admits empty
    /// files.
    pub min_size: u64,

    /// Compiled filename pattern; `None` admits every filename.
    pub name_pattern: Option<Regex>,

    /// Block size in bytes for fingerprint hashing.
    pub block_size: usize,

    /// Traversal depth for each root.
    pub depth: ScanDepth,
}

impl ScanConfig {
    /// Create a configuration for the given roots with default filters:
    /// no exclusions, minimum size 1 byte, every filename admitted,
    /// 4096-byte blocks, recursive depth.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            exclusions: HashSet::new(),
            min_size: DEFAULT_MIN_SIZE,
            name_pattern: None,
            block_size: DEFAULT_BLOCK_SIZE,
            depth: ScanDepth::default(),
        }
    }

    /// Set the exclusion directories.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: impl IntoIterator<Item = PathBuf>) -> Self {
        self.exclusions = exclusions.into_iter().collect();
        self
    }

    /// Set the minimum file size in bytes. Zero admits empty files.
    #[must_use]
    pub fn with_min_size(mut self, min_size: u64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Set the hashing block size in bytes. A zero size falls back to
    /// the default.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = if block_size == 0 {
            log::debug!(
                "Non-positive block size requested, using default of {} bytes",
                DEFAULT_BLOCK_SIZE
            );
            DEFAULT_BLOCK_SIZE
        } else {
            block_size
        };
        self
    }

    /// Set the traversal depth.
    #[must_use]
    pub fn with_depth(mut self, depth: ScanDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the filename mask, translating it to an anchored
    /// case-insensitive pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMask`] if the translated pattern
    /// fails to compile.
    pub fn with_mask(mut self, mask: &str) -> Result<Self, ConfigError> {
        self.name_pattern = Some(glob_to_regex(mask)?);
        Ok(self)
    }
}

/// Translate a filename mask into an anchored, case-insensitive regex.
///
/// `*` becomes `.*`, `?` becomes `.`; all other characters are carried
/// through verbatim, matching the historical mask dialect (a literal
/// `.` in the mask therefore also matches any single character).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMask`] if the resulting pattern does
/// not compile (e.g. an unbalanced `[` in the mask).
pub fn glob_to_regex(mask: &str) -> Result<Regex, ConfigError> {
    let mut pattern = String::with_capacity(mask.len() + 4);
    pattern.push('^');
    for ch in mask.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push(other),
        }
    }
    pattern.push('$');

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidMask {
            mask: mask.to_string(),
            source: Box::new(source),
        })
}
