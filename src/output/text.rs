//! Plain-text reporter for duplicate scan results.
//!
//! Each duplicate group is rendered as one block: a header line, one
//! member path per line, and a trailing blank line. A short summary
//! footer follows the groups. Output order is deterministic for a given
//! scan result (groups in key order, paths sorted).

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Text formatter over a scan result.
#[derive(Debug)]
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
}

impl<'a> TextOutput<'a> {
    /// Create a text formatter for the given groups and summary.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self { groups, summary }
    }

    /// Render the report to an arbitrary writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for group in self.groups {
            writeln!(
                writer,
                "Duplicates ({} files, {} each):",
                group.len(),
                ByteSize(group.size)
            )?;
            for path in &group.paths {
                writeln!(writer, "{}", path.display())?;
            }
            writeln!(writer)?;
        }

        if self.groups.is_empty() {
            writeln!(writer, "No duplicates found.")?;
        } else {
            writeln!(
                writer,
                "{} duplicate group(s), {} file(s), {} reclaimable",
                self.summary.duplicate_groups,
                self.summary.duplicate_files,
                self.summary.reclaimable_display()
            )?;
        }

        if self.summary.skipped_roots > 0 || self.summary.failed_files > 0 {
            writeln!(
                writer,
                "Warning: {} root(s) skipped, {} file(s) unreadable",
                self.summary.skipped_roots, self.summary.failed_files
            )?;
        }

        Ok(())
    }

    /// Render the report to standard output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while writing to stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)
    }
}
