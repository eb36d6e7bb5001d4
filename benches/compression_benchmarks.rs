use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use huffproc::Compressor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample_text(len: usize) -> Vec<u8> {
    b"It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn sample_random(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_compress(c: &mut Criterion) {
    let compressor = Compressor::default();
    let mut group = c.benchmark_group("compress");
    for (name, data) in [("text_64k", sample_text(64 * 1024)), ("random_64k", sample_random(64 * 1024))] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| b.iter(|| compressor.compress_bytes(black_box(&data)).unwrap()));
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let compressor = Compressor::default();
    let mut group = c.benchmark_group("decompress");
    for (name, data) in [("text_64k", sample_text(64 * 1024)), ("random_64k", sample_random(64 * 1024))] {
        let compressed = compressor.compress_bytes(&data).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| compressor.decompress_bytes(black_box(&compressed)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
