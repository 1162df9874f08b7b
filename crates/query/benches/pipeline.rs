use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use storefront_catalog::{Catalog, Product};
use storefront_core::{Money, ProductId};
use storefront_query::{QueryState, SortKey, run};

fn catalog_of(size: u64) -> Catalog {
    Catalog::from_products(
        (0..size)
            .map(|i| {
                Product::new(
                    ProductId::new(i),
                    format!("Product {}", size - i),
                    format!("Description for item number {i}"),
                    Money::from_cents((i * 7919) % 100_000),
                    format!("img/{i}.png"),
                )
            })
            .collect(),
    )
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_pipeline");

    for size in [100u64, 1_000, 10_000] {
        let catalog = catalog_of(size);

        group.bench_with_input(BenchmarkId::new("unfiltered", size), &catalog, |b, catalog| {
            let query = QueryState::new();
            b.iter(|| run(black_box(catalog), black_box(&query), 5).items.len())
        });

        group.bench_with_input(
            BenchmarkId::new("search_and_name_sort", size),
            &catalog,
            |b, catalog| {
                let query = QueryState::new()
                    .with_search("item number 1")
                    .with_sort(SortKey::NameAsc);
                b.iter(|| run(black_box(catalog), black_box(&query), 5).items.len())
            },
        );

        group.bench_with_input(BenchmarkId::new("price_desc_last_page", size), &catalog, |b, catalog| {
            let query = QueryState::new()
                .with_sort(SortKey::PriceDesc)
                .with_page(u32::MAX);
            b.iter(|| run(black_box(catalog), black_box(&query), 5).page)
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
