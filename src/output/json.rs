//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "fingerprint": "abc12345",
//!       "size": 1024,
//!       "files": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "skipped_roots": 0,
//!     "failed_files": 0,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 1234,
//!     "exit_code": 0,
//!     "exit_code_name": "BD000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Serialized fingerprint as a hexadecimal string (8 digits per block)
    pub fingerprint: String,
    /// Member file size in bytes
    pub size: u64,
    /// Member paths, sorted
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Convert a [`DuplicateGroup`] into its JSON form.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            fingerprint: group.key_hex(),
            size: group.size,
            files: group
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

/// Summary statistics in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Qualifying files that entered hashing
    pub total_files: usize,
    /// Total size of hashed files in bytes
    pub total_size: u64,
    /// Configured roots skipped as missing or non-directories
    pub skipped_roots: usize,
    /// Files skipped due to hashing errors
    pub failed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Total members across all duplicate groups
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one member per group (bytes)
    pub reclaimable_space: u64,
    /// Scan duration in milliseconds
    pub scan_duration_ms: u64,
    /// Numeric process exit code
    pub exit_code: i32,
    /// Machine-readable exit code name (e.g. "BD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Convert a [`ScanSummary`] plus the chosen exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            skipped_roots: summary.skipped_roots,
            failed_files: summary.failed_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON report over a scan result.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// All duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan statistics and exit code
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON report from a scan result and its exit code.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the pretty-printed report to an arbitrary writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let json = self.to_json_pretty()?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}
