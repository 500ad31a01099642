//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the blockdupe binary.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (invalid configuration or unexpected failure)
/// - 2: No duplicates found (completed normally, no duplicates)
/// - 3: Partial success (completed with some non-fatal scan errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: scan completed and duplicates were found.
    Success = 0,
    /// General error: configuration or I/O failure aborted the run.
    GeneralError = 1,
    /// No duplicates: scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: scan completed but some roots or files were skipped.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "BD000",
            Self::GeneralError => "BD001",
            Self::NoDuplicates => "BD002",
            Self::PartialSuccess => "BD003",
        }
    }
}

/// Structured error information for JSON error output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "BD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
