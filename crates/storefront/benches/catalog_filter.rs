use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use frostcart_catalog::{Catalog, Category, FilterPatch, Product, ProductId, Rating, seed};
use frostcart_core::Money;

/// Repeat the launch catalog until it holds `n` products with unique ids.
fn catalog_of(n: usize) -> Catalog {
    let base = seed::default_products();
    let products: Vec<Product> = (0..n)
        .map(|i| {
            let mut p = base[i % base.len()].clone();
            p.id = ProductId::new(format!("p-{i}"));
            p
        })
        .collect();
    Catalog::new(products)
}

fn bench_filtered_products(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_products");

    for size in [6usize, 600, 6_000] {
        let mut catalog = catalog_of(size);
        catalog.set_filters(
            FilterPatch::new()
                .category(Category::Ac)
                .price_range(Money::ZERO, Money::from_major(40_000))
                .min_rating(Rating::saturating(40)),
        );

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| black_box(catalog.filtered_products().len()));
        });
    }

    group.finish();
}

fn bench_filter_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_dispatch");

    group.bench_function("toggle_category", |b| {
        let mut catalog = catalog_of(600);
        b.iter(|| {
            black_box(catalog.set_filters(FilterPatch::new().category(Category::Fan)));
            black_box(catalog.clear_filters());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_filtered_products, bench_filter_dispatch);
criterion_main!(benches);
