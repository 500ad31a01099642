//! Command-line interface definitions.
//!
//! All CLI arguments are declared with the clap derive API. The CLI is
//! the external collaborator that assembles a finalized
//! [`crate::config::ScanConfig`] for the core: it gathers roots and
//! exclusions, translates the filename mask, and substitutes defaults
//! for absent or non-positive sizes.
//!
//! # Example
//!
//! ```bash
//! # Recursive scan of two trees, text report
//! blockdupe ~/Downloads ~/Documents
//!
//! # Shallow scan of .txt files of at least 1 KiB, JSON report
//! blockdupe --depth shallow --mask '*.txt' --min-size 1KiB -o json ~/data
//!
//! # Exclude a directory's direct children, keep going past unreadable files
//! blockdupe -e ~/data/tmp --skip-errors ~/data
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ScanDepth;

/// Block-hashing duplicate file finder.
///
/// Scans one or more directory trees, fingerprints every qualifying
/// file as a sequence of per-block CRC-32 checksums, and reports files
/// with identical fingerprints grouped into duplicate sets.
#[derive(Debug, Parser)]
#[command(name = "blockdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to scan, in order
    #[arg(value_name = "ROOT", required = true)]
    pub roots: Vec<PathBuf>,

    /// Directory whose direct children are excluded (repeatable)
    ///
    /// Matching is by exact parent path: subdirectories of an excluded
    /// directory are still scanned.
    #[arg(short, long = "exclude", value_name = "PATH")]
    pub exclusions: Vec<PathBuf>,

    /// Filename mask: `*` matches any run of characters, `?` exactly one
    ///
    /// Matching is case-insensitive and anchored to the whole filename.
    #[arg(short, long, value_name = "GLOB", default_value = "*")]
    pub mask: String,

    /// Minimum file size to consider (e.g., 512, 1KB, 1MiB)
    ///
    /// Zero falls back to the default of 1 byte.
    #[arg(long, value_name = "SIZE", value_parser = parse_size, default_value = "1")]
    pub min_size: u64,

    /// Block size used for fingerprint hashing (e.g., 4096, 64KiB)
    ///
    /// Zero falls back to the default of 4096 bytes.
    #[arg(long, value_name = "SIZE", value_parser = parse_size, default_value = "4096")]
    pub block_size: u64,

    /// Traversal depth for each root
    #[arg(long, value_enum, default_value = "recursive")]
    pub depth: ScanDepth,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Skip files that fail to read during hashing instead of aborting
    #[arg(long)]
    pub skip_errors: bool,

    /// Render fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report itself
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text blocks, one group per block
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB. Case-insensitive;
/// bare numbers are bytes.
///
/// # Errors
///
/// Returns an error for an empty string, an invalid or negative number,
/// or an unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;
    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_bytes_and_suffixes() {
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert_eq!(parse_size("4096B").unwrap(), 4096);
        assert_eq!(parse_size("1KB").unwrap(), 1_000);
        assert_eq!(parse_size("1KiB").unwrap(), 1_024);
        assert_eq!(parse_size("1mib").unwrap(), 1_048_576);
        assert_eq!(parse_size("0.5GB").unwrap(), 500_000_000);
        assert_eq!(parse_size("  2 KiB ").unwrap(), 2_048);
    }

    #[test]
    fn test_parse_size_errors() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1XB").is_err());
        assert!(parse_size("-1MB").is_err());
    }

    #[test]
    fn test_cli_requires_a_root() {
        assert!(Cli::try_parse_from(["blockdupe"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["blockdupe", "/scan"]).unwrap();

        assert_eq!(cli.roots, vec![PathBuf::from("/scan")]);
        assert!(cli.exclusions.is_empty());
        assert_eq!(cli.mask, "*");
        assert_eq!(cli.min_size, 1);
        assert_eq!(cli.block_size, 4096);
        assert_eq!(cli.depth, ScanDepth::Recursive);
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(!cli.skip_errors);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_full_invocation() {
        let cli = Cli::try_parse_from([
            "blockdupe",
            "-e",
            "/scan/tmp",
            "--exclude",
            "/scan/cache",
            "--mask",
            "*.txt",
            "--min-size",
            "1KiB",
            "--block-size",
            "8KiB",
            "--depth",
            "shallow",
            "-o",
            "json",
            "--skip-errors",
            "-v",
            "/scan/a",
            "/scan/b",
        ])
        .unwrap();

        assert_eq!(cli.roots.len(), 2);
        assert_eq!(cli.exclusions.len(), 2);
        assert_eq!(cli.mask, "*.txt");
        assert_eq!(cli.min_size, 1024);
        assert_eq!(cli.block_size, 8192);
        assert_eq!(cli.depth, ScanDepth::Shallow);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.skip_errors);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["blockdupe", "-q", "-v", "/scan"]).is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
