use std::fs;

use block_marker::{MarkConfig, Method};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FILE_LEN: usize = 1 << 20;

pub fn mark_bench(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("1m.dat");
    fs::write(&path, vec![0u8; FILE_LEN]).unwrap();

    for (name, method) in [
        ("mark_seek", Method::Seek),
        ("mark_pwrite", Method::Pwrite),
        ("mark_mmap", Method::Mmap),
    ] {
        let config = MarkConfig::new(&path).with_method(method);
        c.bench_function(name, |b| {
            b.iter(|| black_box(block_marker::mark(&config).unwrap()))
        });
    }
}

criterion_group!(benches, mark_bench);
criterion_main!(benches);
