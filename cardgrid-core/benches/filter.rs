use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cardgrid_core::catalog::{matching_indices, paginate, Facet, FilterState, Record};

const COLORS: [&str; 5] = ["Red", "Blue", "Green", "Black", "White"];
const TYPES: [&str; 3] = ["Creature", "Spell", "Artifact"];

fn catalog(size: usize) -> Vec<Record> {
    (0..size)
        .map(|i| {
            Record::new(
                format!("Card {i}"),
                TYPES[i % TYPES.len()],
                COLORS[i % COLORS.len()],
                if i % 2 == 0 { "Wild" } else { "Tide" },
                format!("img/{i}.png"),
            )
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching_indices");
    let query = FilterState::with_query("card 1")
        .select(Facet::Color, "red")
        .select(Facet::Type, "creature");

    for size in [1_000, 10_000, 100_000] {
        let records = catalog(size);
        group.bench_with_input(BenchmarkId::new("query_and_facets", size), &records, |b, records| {
            b.iter(|| matching_indices(black_box(records), black_box(&query)))
        });
        group.bench_with_input(BenchmarkId::new("unset", size), &records, |b, records| {
            b.iter(|| matching_indices(black_box(records), black_box(&FilterState::default())))
        });
    }
    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let matches: Vec<usize> = (0..100_000).collect();
    c.bench_function("paginate_last_page", |b| {
        b.iter(|| paginate(black_box(&matches), black_box(2_000), 50).items.len())
    });
}

criterion_group!(benches, bench_filter, bench_paginate);
criterion_main!(benches);
