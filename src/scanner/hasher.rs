//! CRC32 block hasher producing per-file fingerprints.
//!
//! # Overview
//!
//! This module provides the [`BlockHasher`] struct, which reads a file in
//! fixed-size blocks and computes an IEEE CRC-32 checksum for each block.
//! The ordered checksum sequence is the file's [`Fingerprint`]: two files
//! are considered duplicates exactly when their fingerprints are equal.
//!
//! A final block shorter than the configured block size is zero-padded to
//! the full block size before checksumming. This keeps fingerprints
//! compatible with the historical on-disk comparison behavior; callers
//! that need exact-length semantics must not rely on the last block
//! distinguishing trailing zero bytes.
//!
//! # Example
//!
//! ```no_run
//! use blockdupe::scanner::BlockHasher;
//! use std::path::Path;
//!
//! let hasher = BlockHasher::new(4096);
//! let fingerprint = hasher.fingerprint(Path::new("/some/file.bin")).unwrap();
//! println!("{} blocks: {}", fingerprint.len(), fingerprint.key_hex());
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// Default block size in bytes when none is configured.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Ordered sequence of per-block CRC-32 checksums representing one file's
/// content.
///
/// Two fingerprints are equal iff they have the same length and
/// pairwise-equal checksums in order. An empty file yields an empty
/// fingerprint, which still participates in comparison (two empty files
/// are duplicates of each other).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(Vec<u32>);

impl Fingerprint {
    /// Wrap a checksum sequence produced by a [`BlockHasher`].
    #[must_use]
    pub fn from_checksums(checksums: Vec<u32>) -> Self {
        Self(checksums)
    }

    /// Number of blocks in this fingerprint.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this fingerprint covers zero blocks (empty file).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw checksum sequence, in block order.
    #[must_use]
    pub fn checksums(&self) -> &[u32] {
        &self.0
    }

    /// Serialize the checksum sequence into a byte-exact grouping key.
    ///
    /// Each checksum contributes its 4 little-endian bytes, concatenated
    /// in block order. The encoding is pinned to little-endian so that
    /// the same file bytes produce the same key on every platform.
    #[must_use]
    pub fn to_key(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.0.len() * 4);
        for checksum in &self.0 {
            key.extend_from_slice(&checksum.to_le_bytes());
        }
        key
    }

    /// The grouping key as a hexadecimal string (8 hex digits per block).
    #[must_use]
    pub fn key_hex(&self) -> String {
        self.0.iter().map(|c| format!("{c:08x}")).collect()
    }
}

/// Block-wise CRC-32 file hasher.
///
/// Reads files in consecutive chunks of exactly `block_size` bytes and
/// checksums each chunk. The hasher holds no per-file state and can be
/// reused across any number of files.
#[derive(Debug, Clone)]
pub struct BlockHasher {
    block_size: usize,
}

impl BlockHasher {
    /// Create a hasher with the given block size in bytes.
    ///
    /// A zero block size is clamped to 1; callers are expected to supply
    /// a validated size from the scan configuration.
    #[must_use]
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    /// The configured block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Compute the fingerprint of the file at `path`.
    ///
    /// Reads the file in `block_size` chunks and appends one CRC-32
    /// checksum per chunk, in read order. A short final chunk is
    /// zero-padded to the full block size before checksumming. An empty
    /// file yields an empty fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let mut file = File::open(path).map_err(|e| classify_io_error(path, e))?;

        let mut buf = vec![0u8; self.block_size];
        let mut checksums = Vec::new();

        loop {
            let read = read_block(&mut file, &mut buf).map_err(|e| classify_io_error(path, e))?;
            if read == 0 {
                break;
            }
            if read < self.block_size {
                // Short final block: pad with zeros up to the block size.
                buf[read..].fill(0);
            }
            let mut crc = crc32fast::Hasher::new();
            crc.update(&buf);
            checksums.push(crc.finalize());
            if read < self.block_size {
                break;
            }
        }

        log::trace!(
            "Fingerprinted {} ({} blocks of {} bytes)",
            path.display(),
            checksums.len(),
            self.block_size
        );

        Ok(Fingerprint::from_checksums(checksums))
    }
}

impl Default for BlockHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

/// Fill `buf` from `reader`, retrying short reads until the buffer is
/// full or EOF is reached. Returns the number of bytes read.
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Map an I/O error to the matching [`HashError`] variant.
fn classify_io_error(path: &Path, error: std::io::Error) -> HashError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
