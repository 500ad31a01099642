//! Fingerprint-keyed duplicate grouping.
//!
//! # Overview
//!
//! This module buckets fingerprinted files into duplicate groups. The
//! grouping key is the byte-exact serialization of the fingerprint
//! ([`Fingerprint::to_key`]), so two files land in the same bucket iff
//! their fingerprints are equal. A single pass over the records replaces
//! any pairwise comparison: fingerprint equality is a true equivalence
//! relation, so bucketing by the full serialized fingerprint partitions
//! the records into exactly the same groups.
//!
//! Group membership is a sorted set of distinct paths, and buckets are
//! kept in key order, so output is deterministic for a given set of
//! records regardless of traversal order.
//!
//! # Example
//!
//! ```
//! use blockdupe::duplicates::group_by_fingerprint;
//! use blockdupe::scanner::{FileRecord, Fingerprint};
//! use std::path::PathBuf;
//!
//! let records = vec![
//!     FileRecord::new(PathBuf::from("/a.txt"), 6, Fingerprint::from_checksums(vec![1])),
//!     FileRecord::new(PathBuf::from("/b.txt"), 6, Fingerprint::from_checksums(vec![1])),
//!     FileRecord::new(PathBuf::from("/c.txt"), 6, Fingerprint::from_checksums(vec![2])),
//! ];
//!
//! let (groups, stats) = group_by_fingerprint(records);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].len(), 2);
//! assert_eq!(stats.eliminated_unique, 1);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::scanner::FileRecord;

/// A set of distinct file paths sharing one content fingerprint.
///
/// Groups with fewer than two members are never materialized. Member
/// iteration is in sorted path order.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// Serialized fingerprint shared by every member (4 bytes per block)
    pub key: Vec<u8>,
    /// Size in bytes of the first member recorded for this group
    pub size: u64,
    /// Distinct member paths, sorted
    pub paths: BTreeSet<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The grouping key as a hexadecimal string.
    #[must_use]
    pub fn key_hex(&self) -> String {
        self.key.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Number of redundant copies (total members minus one original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Space reclaimable by keeping a single member.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size.saturating_mul(self.duplicate_count() as u64)
    }
}

/// Statistics from the grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total records that entered grouping
    pub total_records: usize,
    /// Number of distinct fingerprints observed
    pub distinct_fingerprints: usize,
    /// Number of emitted groups (2+ members)
    pub duplicate_groups: usize,
    /// Total members across all emitted groups
    pub duplicate_files: usize,
    /// Buckets discarded for having a single member
    pub eliminated_unique: usize,
}

impl GroupingStats {
    /// Percentage of records eliminated as unique.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Bucket fingerprinted files into duplicate groups.
///
/// Performs a single pass: each record's path is inserted into the
/// bucket keyed by its serialized fingerprint, then buckets with two or
/// more distinct paths are emitted in key order. Performs no I/O and
/// cannot fail.
#[must_use]
pub fn group_by_fingerprint(
    records: impl IntoIterator<Item = FileRecord>,
) -> (Vec<DuplicateGroup>, GroupingStats) {
    let mut stats = GroupingStats::default();
    let mut buckets: BTreeMap<Vec<u8>, DuplicateGroup> = BTreeMap::new();

    for record in records {
        stats.total_records += 1;
        let key = record.fingerprint.to_key();
        buckets
            .entry(key.clone())
            .or_insert_with(|| DuplicateGroup {
                key,
                size: record.size,
                paths: BTreeSet::new(),
            })
            .paths
            .insert(record.path);
    }

    stats.distinct_fingerprints = buckets.len();

    let groups: Vec<DuplicateGroup> = buckets
        .into_values()
        .filter(|group| {
            if group.len() < 2 {
                stats.eliminated_unique += 1;
                false
            } else {
                stats.duplicate_groups += 1;
                stats.duplicate_files += group.len();
                log::debug!(
                    "Duplicate group {}: {} files of {} bytes",
                    group.key_hex(),
                    group.len(),
                    group.size
                );
                true
            }
        })
        .collect();

    log::info!(
        "Grouping complete: {} records → {} duplicate groups ({:.1}% unique)",
        stats.total_records,
        stats.duplicate_groups,
        stats.elimination_rate()
    );

    (groups, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Fingerprint;

    fn record(path: &str, size: u64, checksums: Vec<u32>) -> FileRecord {
        FileRecord::new(
            PathBuf::from(path),
            size,
            Fingerprint::from_checksums(checksums),
        )
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let (groups, stats) = group_by_fingerprint(Vec::new());

        assert!(groups.is_empty());
        assert_eq!(stats, GroupingStats::default());
    }

    #[test]
    fn test_matching_fingerprints_share_a_group() {
        let (groups, stats) = group_by_fingerprint(vec![
            record("/a.txt", 6, vec![0xAA, 0xBB]),
            record("/b.txt", 6, vec![0xAA, 0xBB]),
            record("/c.txt", 6, vec![0xAA, 0xCC]),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert!(groups[0].paths.contains(&PathBuf::from("/a.txt")));
        assert!(groups[0].paths.contains(&PathBuf::from("/b.txt")));
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.distinct_fingerprints, 2);
        assert_eq!(stats.eliminated_unique, 1);
    }

    #[test]
    fn test_singleton_buckets_are_never_materialized() {
        let (groups, stats) = group_by_fingerprint(vec![
            record("/a.txt", 10, vec![1]),
            record("/b.txt", 10, vec![2]),
            record("/c.txt", 10, vec![3]),
        ]);

        assert!(groups.is_empty());
        assert_eq!(stats.eliminated_unique, 3);
        assert_eq!(stats.duplicate_files, 0);
    }

    #[test]
    fn test_same_path_seen_twice_counts_once() {
        // Overlapping roots can yield the same file twice; group
        // membership is a set of distinct paths.
        let (groups, _) = group_by_fingerprint(vec![
            record("/a.txt", 6, vec![7]),
            record("/a.txt", 6, vec![7]),
        ]);

        assert!(groups.is_empty());
    }

    #[test]
    fn test_empty_fingerprints_group_together() {
        // Two empty files share the zero-length fingerprint.
        let (groups, _) = group_by_fingerprint(vec![
            record("/e1", 0, Vec::new()),
            record("/e2", 0, Vec::new()),
        ]);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].key.is_empty());
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_fingerprint_length_distinguishes_buckets() {
        // [1] and [1, 1] serialize to different-length keys.
        let (groups, stats) = group_by_fingerprint(vec![
            record("/short", 4, vec![1]),
            record("/long", 8, vec![1, 1]),
        ]);

        assert!(groups.is_empty());
        assert_eq!(stats.distinct_fingerprints, 2);
    }

    #[test]
    fn test_groups_and_members_are_deterministically_ordered() {
        let forward = vec![
            record("/x.txt", 6, vec![9]),
            record("/y.txt", 6, vec![9]),
            record("/p.txt", 6, vec![3]),
            record("/q.txt", 6, vec![3]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let (groups_a, _) = group_by_fingerprint(forward);
        let (groups_b, _) = group_by_fingerprint(reversed);

        let flatten = |groups: &[DuplicateGroup]| -> Vec<PathBuf> {
            groups
                .iter()
                .flat_map(|g| g.paths.iter().cloned())
                .collect()
        };
        assert_eq!(flatten(&groups_a), flatten(&groups_b));
    }

    #[test]
    fn test_wasted_space_and_duplicate_count() {
        let (groups, _) = group_by_fingerprint(vec![
            record("/a", 1000, vec![5]),
            record("/b", 1000, vec![5]),
            record("/c", 1000, vec![5]),
        ]);

        assert_eq!(groups[0].duplicate_count(), 2);
        assert_eq!(groups[0].wasted_space(), 2000);
    }

    #[test]
    fn test_key_hex_formatting() {
        let (groups, _) = group_by_fingerprint(vec![
            record("/a", 4, vec![0x0102_0304]),
            record("/b", 4, vec![0x0102_0304]),
        ]);

        // Little-endian serialization: 04 03 02 01.
        assert_eq!(groups[0].key_hex(), "04030201");
    }
}
