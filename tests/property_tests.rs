//! Property-based tests for fingerprint semantics.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use blockdupe::scanner::{BlockHasher, Fingerprint};
use proptest::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content).unwrap();
    path
}

proptest! {
    /// Identical bytes always produce identical fingerprints, for any
    /// block size.
    #[test]
    fn identical_bytes_identical_fingerprints(
        content in proptest::collection::vec(any::<u8>(), 0..4096),
        block_size in 1usize..512,
    ) {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a", &content);
        let b = write_file(&dir, "b", &content);

        let hasher = BlockHasher::new(block_size);
        let fp_a = hasher.fingerprint(&a).unwrap();
        let fp_b = hasher.fingerprint(&b).unwrap();

        prop_assert_eq!(&fp_a, &fp_b);
        prop_assert_eq!(fp_a.to_key(), fp_b.to_key());
    }

    /// The fingerprint covers ceil(len / block_size) blocks.
    #[test]
    fn block_count_matches_content_length(
        content in proptest::collection::vec(any::<u8>(), 0..4096),
        block_size in 1usize..512,
    ) {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "f", &content);

        let fp = BlockHasher::new(block_size).fingerprint(&path).unwrap();

        prop_assert_eq!(fp.len(), content.len().div_ceil(block_size));
        prop_assert_eq!(fp.to_key().len(), fp.len() * 4);
    }

    /// Flipping any single byte changes the fingerprint (a non-zero xor
    /// keeps the length identical, so only the affected checksum moves).
    #[test]
    fn single_byte_flip_changes_fingerprint(
        content in proptest::collection::vec(any::<u8>(), 1..2048),
        flip_index in any::<proptest::sample::Index>(),
        block_size in 1usize..256,
    ) {
        let idx = flip_index.index(content.len());
        let mut mutated = content.clone();
        mutated[idx] ^= 0x01;

        let dir = TempDir::new().unwrap();
        let original = write_file(&dir, "orig", &content);
        let flipped = write_file(&dir, "flip", &mutated);

        let hasher = BlockHasher::new(block_size);
        prop_assert_ne!(
            hasher.fingerprint(&original).unwrap(),
            hasher.fingerprint(&flipped).unwrap()
        );
    }

    /// Fingerprint equality is reflexive, and the key serialization is
    /// injective: equal keys imply equal fingerprints and vice versa.
    #[test]
    fn equality_and_key_agree(
        a in proptest::collection::vec(any::<u32>(), 0..64),
        b in proptest::collection::vec(any::<u32>(), 0..64),
    ) {
        let fp_a = Fingerprint::from_checksums(a);
        let fp_b = Fingerprint::from_checksums(b);

        prop_assert_eq!(&fp_a, &fp_a);
        prop_assert_eq!(fp_a == fp_b, fp_b == fp_a);
        prop_assert_eq!(fp_a == fp_b, fp_a.to_key() == fp_b.to_key());
    }
}
