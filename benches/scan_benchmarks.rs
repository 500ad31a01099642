//! Criterion benchmarks for block hashing and fingerprint grouping.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use blockdupe::duplicates::group_by_fingerprint;
use blockdupe::scanner::{BlockHasher, FileRecord, Fingerprint};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

fn bench_block_hashing(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payload.bin");
    let content: Vec<u8> = (0..1_048_576u32).map(|i| (i % 251) as u8).collect();
    let mut f = File::create(&path).unwrap();
    f.write_all(&content).unwrap();

    let mut group = c.benchmark_group("block_hashing_1mib");
    for block_size in [1024usize, 4096, 65536] {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &block_size| {
                let hasher = BlockHasher::new(block_size);
                b.iter(|| black_box(hasher.fingerprint(&path).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint_grouping");
    for count in [100usize, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            // Records pair up two by two, so every bucket is a group.
            let records: Vec<FileRecord> = (0..count)
                .map(|i| {
                    let checksum = (i / 2) as u32;
                    FileRecord::new(
                        PathBuf::from(format!("/bench/file{i}.bin")),
                        4096,
                        Fingerprint::from_checksums(vec![checksum, checksum ^ 0xFFFF]),
                    )
                })
                .collect();
            b.iter(|| black_box(group_by_fingerprint(records.clone())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block_hashing, bench_grouping);
criterion_main!(benches);
