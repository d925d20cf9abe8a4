// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use detent_dom::{ElementId, ElementSpec, ElementTree};
use detent_slider::{Slider, SliderOption};
use detent_widget::{Factory, PointerEvent};
use kurbo::{Point, Rect};

fn setup(handles: usize) -> (ElementTree, Factory<Slider>, ElementId) {
    let mut tree = ElementTree::new();
    let el = tree.insert(
        None,
        ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 1000.0, 20.0)),
    );
    let mut sliders: Factory<Slider> = Factory::new();
    let values: Vec<f64> = (0..handles).map(|i| (i * 100 / handles) as f64).collect();
    let patch = if handles > 1 {
        vec![SliderOption::Values(Some(values))]
    } else {
        Vec::new()
    };
    sliders.create(&mut tree, &[el], &patch);
    (tree, sliders, el)
}

fn drag(tree: &mut ElementTree, sliders: &mut Factory<Slider>, el: ElementId, moves: usize) {
    let mut down = PointerEvent::new(el, Point::new(1.0, 10.0), Duration::ZERO);
    sliders.pointer_down(tree, &mut down);
    for i in 0..moves {
        let x = (i * 7 % 1000) as f64;
        let mut ev = PointerEvent::new(el, Point::new(x, 10.0), Duration::from_millis(i as u64));
        sliders.pointer_move(tree, &mut ev);
    }
    let up = PointerEvent::new(el, Point::new(500.0, 10.0), Duration::from_secs(1));
    sliders.pointer_up(tree, &up);
    black_box(sliders.get(el).map(Slider::values));
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("slider_drag");
    for &handles in &[1_usize, 2, 8] {
        group.bench_function(format!("{handles}_handles_500_moves"), |b| {
            b.iter_batched(
                || setup(handles),
                |(mut tree, mut sliders, el)| drag(&mut tree, &mut sliders, el, 500),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_invoke(c: &mut Criterion) {
    let (mut tree, mut sliders, el) = setup(1);
    let args = [serde_json::json!(42)];
    c.bench_function("invoke_value_setter", |b| {
        b.iter(|| {
            let r = sliders.invoke(&mut tree, &[el], "value", black_box(&args));
            let _ = black_box(r);
        });
    });
}

criterion_group!(benches, bench_drag, bench_invoke);
criterion_main!(benches);
