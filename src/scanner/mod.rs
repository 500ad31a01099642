//! Scanner module for directory traversal, file selection, and block
//! hashing.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: per-root directory traversal (shallow or recursive)
//! - [`selector`]: inclusion rules deciding which entries are hashed
//! - [`hasher`]: CRC-32 block hashing producing [`Fingerprint`]s
//!
//! # Example
//!
//! ```no_run
//! use blockdupe::config::ScanConfig;
//! use blockdupe::scanner::{BlockHasher, Selector, Walker};
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(vec![PathBuf::from(".")]);
//! let walker = Walker::new(config.roots.clone(), config.depth);
//! let selector = Selector::new(&config);
//! let hasher = BlockHasher::new(config.block_size);
//!
//! for entry in walker.walk().filter_map(Result::ok) {
//!     if selector.should_include(&entry) {
//!         let fp = hasher.fingerprint(entry.path()).unwrap();
//!         println!("{}: {} blocks", entry.path().display(), fp.len());
//!     }
//! }
//! ```

pub mod hasher;
pub mod selector;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{BlockHasher, Fingerprint};
pub use selector::Selector;
pub use walker::Walker;

/// A qualifying file paired with its content fingerprint.
///
/// Created once per file that passes selection and hashing; never
/// mutated; lives only for the duration of one scan.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path to the file as yielded by traversal
    pub path: PathBuf,
    /// File size in bytes at selection time
    pub size: u64,
    /// Block-wise content fingerprint
    pub fingerprint: Fingerprint,
}

impl FileRecord {
    /// Create a new record for a fingerprinted file.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, fingerprint: Fingerprint) -> Self {
        Self {
            path,
            size,
            fingerprint,
        }
    }
}

/// Errors that can occur during directory traversal.
///
/// All variants are recoverable: the affected root or entry is skipped
/// with a warning and the scan continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// A configured scan root does not exist.
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    /// A configured scan root is not a directory.
    #[error("Scan root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    /// An I/O error occurred while traversing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file failed to hash and was skipped.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors that can occur while hashing a file's content.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (may have been deleted mid-scan).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
