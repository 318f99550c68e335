use octopoly::poly1305::compute;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const KEY: [u8; 32] = [0x42; 32];

pub fn bench_poly1305(c: &mut Criterion) {
    let mut tag = [0u8; 16];

    c.bench_function("poly1305 16 bytes", |b| {
        b.iter(|| compute(&mut tag, black_box(&[0u8; 16]), &KEY))
    });

    c.bench_function("poly1305 one superblock (128 bytes)", |b| {
        b.iter(|| compute(&mut tag, black_box(&[0u8; 128]), &KEY))
    });

    c.bench_function("poly1305 1 KiB", |b| {
        b.iter(|| compute(&mut tag, black_box(&[0u8; 1024]), &KEY))
    });

    c.bench_function("poly1305 64 KiB", |b| {
        b.iter(|| compute(&mut tag, black_box(&[0u8; 65536]), &KEY))
    });
}

criterion_group!(benches, bench_poly1305);
criterion_main!(benches);
