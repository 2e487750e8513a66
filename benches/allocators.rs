use apportionment::apportion::{dhondt, proportional};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

fn district(parties: usize) -> BTreeMap<String, u64> {
    (0..parties)
        .map(|i| (format!("party-{:02}", i), 1_000_000 / (i as u64 + 1)))
        .collect()
}

fn bench_allocators(c: &mut Criterion) {
    let votes = district(20);

    c.bench_function("dhondt 20 parties 350 seats", |b| {
        b.iter(|| dhondt::allocate(black_box(&votes), black_box(350)))
    });
    c.bench_function("proportional 20 parties 350 seats", |b| {
        b.iter(|| proportional::allocate(black_box(&votes), black_box(350)))
    });
}

criterion_group!(benches, bench_allocators);
criterion_main!(benches);
