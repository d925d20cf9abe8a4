// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use detent_dom::{ElementId, ElementSpec, ElementTree, QueryFilter, Selector};
use kurbo::{Point, Rect};

/// A grid of `n * n` cells, each holding a handle-like child.
fn grid(n: usize, cell: f64) -> (ElementTree, Vec<ElementId>) {
    let mut tree = ElementTree::new();
    let root = tree.insert(None, ElementSpec::new("div"));
    let mut leaves = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let (x0, y0) = (x as f64 * cell, y as f64 * cell);
            let cell_el = tree.insert(
                Some(root),
                ElementSpec::new("div")
                    .with_class("cell")
                    .with_bounds(Rect::new(x0, y0, x0 + cell, y0 + cell)),
            );
            leaves.push(tree.insert(
                Some(cell_el),
                ElementSpec::new("a")
                    .with_class("ui-slider-handle")
                    .with_bounds(Rect::new(x0 + 1.0, y0 + 1.0, x0 + 4.0, y0 + 4.0)),
            ));
        }
    }
    (tree, leaves)
}

fn bench_queries(c: &mut Criterion) {
    let (tree, leaves) = grid(32, 10.0);
    let mut group = c.benchmark_group("tree_queries");

    group.throughput(Throughput::Elements(64));
    group.bench_function("hit_test_point_grid32", |b| {
        b.iter(|| {
            for i in 0..64 {
                let p = Point::new((i * 5) as f64 + 2.0, (i * 3) as f64 + 2.0);
                black_box(tree.hit_test_point(p, QueryFilter::default()));
            }
        });
    });

    let sel = Selector::parse(".missing, div.cell").ok();
    group.throughput(Throughput::Elements(leaves.len() as u64));
    group.bench_function("closest_matching_grid32", |b| {
        b.iter(|| {
            let Some(sel) = sel.as_ref() else {
                return;
            };
            for &leaf in &leaves {
                black_box(tree.closest_matching(leaf, sel));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
