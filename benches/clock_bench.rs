use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vclock_core::{ClockEntry, NodeId, VectorClock};

// Nodes `start, start + step, ..` below `end`, each at `version`.
fn clock(start: u16, end: u16, step: usize, version: u64) -> VectorClock {
    VectorClock::from_entries(
        (start..end)
            .step_by(step)
            .map(|n| ClockEntry::new(NodeId(n), version).expect("version >= 1")),
    )
    .expect("distinct nodes")
}

fn clock_benchmarks(c: &mut Criterion) {
    let evens = clock(0, 512, 2, 3);
    let odds = clock(1, 512, 2, 5);
    let overlapping = clock(0, 256, 1, 4);

    c.bench_function("merge_interleaved_256", |b| {
        b.iter(|| black_box(&evens).merge(black_box(&odds)))
    });

    c.bench_function("compare_concurrent_256", |b| {
        b.iter(|| VectorClock::compare(black_box(&evens), black_box(&overlapping)))
    });

    c.bench_function("incr_existing_node", |b| {
        b.iter(|| black_box(&overlapping).incr(NodeId(128)))
    });

    c.bench_function("codec_round_trip_256", |b| {
        b.iter(|| {
            let bytes = vclock_core::codec::encode(black_box(&overlapping))
                .expect("within capacity");
            vclock_core::codec::decode(&bytes)
        })
    });
}

criterion_group!(benches, clock_benchmarks);
criterion_main!(benches);
