//! Benchmarks for gallery layout.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use zenjustify::{Item, LayoutConfig, LayoutData, WidowLayoutStyle, compute_layout, compute_layout_once};

/// Deterministic mix of portrait, square, landscape and panorama ratios.
fn gallery(n: usize) -> Vec<Item> {
    const RATIOS: [f64; 8] = [1.5, 0.67, 1.0, 1.33, 2.4, 0.75, 1.77, 4.2];
    (0..n).map(|i| Item::new(RATIOS[(i * 5 + i / 8) % RATIOS.len()])).collect()
}

fn bench_single_call(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("compute_layout_once");
    for n in [10, 100, 1000] {
        let items = gallery(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| compute_layout_once(black_box(&config), black_box(items)))
        });
    }
    group.finish();
}

fn bench_breakout_rows(c: &mut Criterion) {
    let config = LayoutConfig::default()
        .breakout_cadence(3)
        .widow_layout_style(WidowLayoutStyle::Justified);
    let items = gallery(1000);
    c.bench_function("breakout_cadence_3_1000_items", |b| {
        b.iter(|| compute_layout_once(black_box(&config), black_box(&items)))
    });
}

fn bench_paged(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let items = gallery(1000);
    c.bench_function("paged_1000_items_by_50", |b| {
        b.iter(|| {
            let mut data = LayoutData::new();
            for page in items.chunks(50) {
                let _ = compute_layout(black_box(&config), &mut data, black_box(page));
            }
            data
        })
    });
}

criterion_group!(benches, bench_single_call, bench_breakout_rows, bench_paged);
criterion_main!(benches);
