//! FILENAME: pivot-engine/benches/pivot_calculations.rs
//! Group-by and pivot throughput over a synthetic sales table.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pivot_engine::{group_by, pivot, AggregateFunction};
use records::{FieldValue, Record, Table};

const REGIONS: [&str; 8] = ["North", "South", "East", "West", "Central", "Coastal", "Mountain", "Plains"];
const PRODUCTS: [&str; 12] = [
    "Apples", "Oranges", "Pears", "Plums", "Grapes", "Lemons",
    "Limes", "Cherries", "Peaches", "Melons", "Kiwis", "Figs",
];

fn sales_table(rows: usize) -> Table {
    (0..rows)
        .map(|i| {
            let amount = if i % 17 == 0 {
                FieldValue::Null
            } else {
                FieldValue::Float((i % 1000) as f64 * 1.5)
            };
            Record::new()
                .with("region", REGIONS[i % REGIONS.len()])
                .with("product", PRODUCTS[(i * 7) % PRODUCTS.len()])
                .with("year", 2000 + (i % 20) as i64)
                .with("amount", amount)
        })
        .collect()
}

fn bench_group_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by");
    for rows in [1_000usize, 10_000, 100_000] {
        let table = sales_table(rows);
        group.bench_with_input(BenchmarkId::new("sum_region_product", rows), &table, |b, table| {
            b.iter(|| {
                let mut input = table.clone();
                black_box(group_by(&mut input, "amount", AggregateFunction::Sum, &["region", "product"]).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivot");
    for rows in [1_000usize, 10_000, 100_000] {
        let table = sales_table(rows);
        group.bench_with_input(BenchmarkId::new("avg_region_by_product", rows), &table, |b, table| {
            b.iter(|| {
                let mut input = table.clone();
                black_box(pivot(&mut input, "region", "product", "amount", AggregateFunction::Avg, 0).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_group_by, bench_pivot);
criterion_main!(benches);
