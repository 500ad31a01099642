//! BlockDupe - Block-Hashing Duplicate File Finder
//!
//! A cross-platform CLI tool and library for finding byte-identical
//! files. Every qualifying file is fingerprinted as an ordered sequence
//! of per-block CRC-32 checksums; files with equal fingerprints are
//! reported grouped into duplicate sets.
//!
//! The scan runs as a single sequential pass: traversal → selection →
//! block hashing → grouping → reporting.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::config::{ScanConfig, DEFAULT_MIN_SIZE};
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};

/// Run the application with parsed CLI arguments.
///
/// Initializes logging, builds the scan configuration, runs the finder,
/// renders the report, and selects the process exit code.
///
/// # Errors
///
/// Returns an error for an invalid filename mask or a fatal scan
/// failure; the caller maps it to a non-zero exit status.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let finder = DuplicateFinder::new(config).with_skip_errors(cli.skip_errors);

    let (groups, summary) = finder
        .find_duplicates()
        .context("duplicate scan failed")?;

    let exit_code = if summary.has_errors() {
        ExitCode::PartialSuccess
    } else if groups.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    };

    match cli.output {
        OutputFormat::Text => TextOutput::new(&groups, &summary)
            .print()
            .context("failed to write report")?,
        OutputFormat::Json => {
            let mut stdout = std::io::stdout().lock();
            JsonOutput::new(&groups, &summary, exit_code)
                .write_to(&mut stdout)
                .context("failed to write report")?;
        }
    }

    Ok(exit_code)
}

/// Translate CLI arguments into a finalized [`ScanConfig`].
///
/// Non-positive sizes fall back to their defaults; the filename mask is
/// compiled into an anchored case-insensitive pattern.
fn build_config(cli: &Cli) -> anyhow::Result<ScanConfig> {
    let min_size = if cli.min_size == 0 {
        log::debug!(
            "Non-positive minimum size requested, using default of {} byte(s)",
            DEFAULT_MIN_SIZE
        );
        DEFAULT_MIN_SIZE
    } else {
        cli.min_size
    };

    let config = ScanConfig::new(cli.roots.clone())
        .with_exclusions(cli.exclusions.iter().cloned())
        .with_min_size(min_size)
        .with_block_size(cli.block_size as usize)
        .with_depth(cli.depth)
        .with_mask(&cli.mask)?;

    Ok(config)
}
