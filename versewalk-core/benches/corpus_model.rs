//! Benchmarks for corpus loading and backward walks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use versewalk_core::{walk_line, BoundaryPolicy, CorpusModel};

/// Generate corpus text of specified size
fn generate_text(size_kb: usize) -> String {
    let base_text = "Shall I compare thee to a summer's day?\n\
                     Thou art more lovely and more temperate:\n\
                     Rough winds do shake the darling buds of May,\n\
                     And summer's lease hath all too short a date.\n\n";
    let target_size = size_kb * 1024;
    let repeat_count = target_size / base_text.len() + 1;
    base_text.repeat(repeat_count)
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus_load");

    for size_kb in [10, 100, 1000] {
        let text = generate_text(size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("load", format!("{}KB", size_kb)),
            &text,
            |b, text| b.iter(|| CorpusModel::load(black_box(text))),
        );
    }

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("backward_walk");
    let model = CorpusModel::load(&generate_text(100)).expect("benchmark corpus loads");

    for target in [4, 8, 16] {
        group.bench_with_input(BenchmarkId::new("restart", target), &target, |b, &target| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            b.iter(|| walk_line(&model, "day", target, BoundaryPolicy::Restart, &mut rng))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_walk);
criterion_main!(benches);
