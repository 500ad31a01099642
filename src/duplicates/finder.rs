//! Duplicate finder pipeline orchestrator.
//!
//! # Overview
//!
//! This module runs the complete scan as one sequential pass:
//!
//! 1. **Walk**: enumerate entries under every configured root
//! 2. **Select**: apply the inclusion rules to each entry
//! 3. **Hash**: fingerprint each qualifying file block by block
//! 4. **Group**: bucket equal fingerprints into duplicate groups
//!
//! Missing or non-directory roots are skipped with a warning and
//! recorded in the summary. A file that fails to read during hashing
//! aborts the scan by default; with [`DuplicateFinder::with_skip_errors`]
//! it is dropped with a warning instead and the run is reported as a
//! partial success.
//!
//! # Example
//!
//! ```no_run
//! use blockdupe::config::ScanConfig;
//! use blockdupe::duplicates::DuplicateFinder;
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(vec![PathBuf::from("/data")]);
//! let finder = DuplicateFinder::new(config);
//!
//! let (groups, summary) = finder.find_duplicates().unwrap();
//! println!(
//!     "{} duplicate groups, {} reclaimable",
//!     groups.len(),
//!     summary.reclaimable_display()
//! );
//! ```

use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::groups::{group_by_fingerprint, DuplicateGroup};
use crate::config::ScanConfig;
use crate::scanner::{BlockHasher, FileRecord, HashError, ScanError, Selector, Walker};

/// Errors that abort the whole scan.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// A qualifying file could not be read during hashing.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Summary statistics from one duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Qualifying files that entered hashing (hashed + failed)
    pub total_files: usize,
    /// Total size in bytes of successfully hashed files
    pub total_size: u64,
    /// Files successfully fingerprinted
    pub hashed_files: usize,
    /// Files skipped due to hashing errors (skip-errors mode only)
    pub failed_files: usize,
    /// Configured roots skipped as missing or non-directories
    pub skipped_roots: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Total members across all duplicate groups
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one member per group
    pub reclaimable_space: u64,
    /// Wall-clock duration of the scan
    pub scan_duration: Duration,
    /// Non-fatal errors collected during the scan
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Whether any non-fatal errors were recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty()
    }

    /// Percentage of scanned bytes occupied by redundant copies.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize(self.reclaimable_space).to_string()
    }

    /// Total scanned size as a human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize(self.total_size).to_string()
    }
}

/// Orchestrates the walk → select → hash → group pipeline.
pub struct DuplicateFinder {
    config: ScanConfig,
    skip_errors: bool,
}

impl DuplicateFinder {
    /// Create a finder over a finalized configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            skip_errors: false,
        }
    }

    /// Treat per-file hashing errors as non-fatal skips instead of
    /// aborting the scan.
    #[must_use]
    pub fn with_skip_errors(mut self, skip_errors: bool) -> Self {
        self.skip_errors = skip_errors;
        self
    }

    /// Run the scan and return duplicate groups plus summary statistics.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Hash`] when a qualifying file cannot be
    /// read and skip-errors mode is off. Root-level problems are never
    /// fatal; they are recorded in [`ScanSummary::scan_errors`].
    pub fn find_duplicates(&self) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start = Instant::now();
        let mut summary = ScanSummary::default();

        log::info!(
            "Starting duplicate scan of {} root(s), block size {} bytes",
            self.config.roots.len(),
            self.config.block_size
        );

        let walker = Walker::new(self.config.roots.clone(), self.config.depth);
        let selector = Selector::new(&self.config);
        let hasher = BlockHasher::new(self.config.block_size);

        let mut records: Vec<FileRecord> = Vec::new();

        for result in walker.walk() {
            match result {
                Ok(entry) => {
                    if !selector.should_include(&entry) {
                        continue;
                    }
                    // Resolves symlinks, so the size matches the bytes hashed.
                    let size = match std::fs::metadata(entry.path()) {
                        Ok(metadata) => metadata.len(),
                        Err(e) => {
                            // File vanished between selection and here.
                            log::debug!(
                                "Metadata lost for {}: {}",
                                entry.path().display(),
                                e
                            );
                            continue;
                        }
                    };
                    match hasher.fingerprint(entry.path()) {
                        Ok(fingerprint) => {
                            summary.hashed_files += 1;
                            summary.total_size += size;
                            records.push(FileRecord::new(
                                entry.path().to_path_buf(),
                                size,
                                fingerprint,
                            ));
                        }
                        Err(e) if self.skip_errors => {
                            log::warn!("Skipping unreadable file: {}", e);
                            summary.failed_files += 1;
                            summary.scan_errors.push(ScanError::Hash(e));
                        }
                        Err(e) => return Err(FinderError::Hash(e)),
                    }
                }
                Err(e) => {
                    if matches!(
                        e,
                        ScanError::RootNotFound(_) | ScanError::RootNotADirectory(_)
                    ) {
                        summary.skipped_roots += 1;
                    }
                    summary.scan_errors.push(e);
                }
            }
        }

        summary.total_files = summary.hashed_files + summary.failed_files;

        log::info!(
            "Fingerprinted {} files ({})",
            summary.hashed_files,
            summary.total_size_display()
        );

        let (groups, _grouping_stats) = group_by_fingerprint(records);

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::len).sum();
        summary.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        summary.scan_duration = start.elapsed();

        log::info!(
            "Scan complete in {:.2?}: {} duplicate groups, {} duplicate files, {} reclaimable",
            summary.scan_duration,
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((groups, summary))
    }
}
