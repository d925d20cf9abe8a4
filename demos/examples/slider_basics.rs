// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a single-handle slider and print what it reports.
//!
//! The host resolves pointer positions with a hit test, then feeds presses,
//! moves and releases to the factory.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p detent_demos --example slider_basics`

use core::time::Duration;

use detent_dom::{ElementSpec, ElementTree, QueryFilter};
use detent_slider::{Slider, SliderEvent, SliderOption, SliderOptions, SliderUi};
use detent_widget::{Factory, Listeners, Outcome, PointerEvent};
use kurbo::{Point, Rect};

fn pointer(tree: &ElementTree, x: f64, y: f64, ms: u64) -> Option<PointerEvent> {
    let hit = tree.hit_test_point(Point::new(x, y), QueryFilter::default())?;
    Some(PointerEvent::new(
        hit.element,
        Point::new(x, y),
        Duration::from_millis(ms),
    ))
}

fn main() {
    env_logger::init();

    let mut tree = ElementTree::new();
    let track = tree.insert(
        None,
        ElementSpec::new("div").with_bounds(Rect::new(20.0, 40.0, 420.0, 56.0)),
    );

    let listeners = Listeners::<SliderEvent, SliderUi>::new().on(SliderEvent::Slide, |n| {
        println!("  {} proposes {}", n.name, n.payload.value);
        Outcome::Continue
    });
    let mut sliders = Factory::<Slider>::with_defaults(SliderOptions {
        listeners,
        ..SliderOptions::default()
    })
    .with_recording(true);
    sliders.create(&mut tree, &[track], &[SliderOption::Step(5.0)]);

    let path = [(120.0, 0), (180.0, 16), (260.0, 32), (500.0, 48)];
    let Some(mut down) = pointer(&tree, path[0].0, 48.0, path[0].1) else {
        return;
    };
    println!("press at x = {}", path[0].0);
    sliders.pointer_down(&mut tree, &mut down);
    for &(x, ms) in &path[1..] {
        // Moves keep going to the tracking slider even off the track.
        let mut ev = PointerEvent::new(track, Point::new(x, 48.0), Duration::from_millis(ms));
        println!("move to x = {x}");
        sliders.pointer_move(&mut tree, &mut ev);
    }
    sliders.pointer_up(
        &mut tree,
        &PointerEvent::new(track, Point::new(500.0, 48.0), Duration::from_millis(60)),
    );

    for n in sliders.drain_notifications() {
        println!("{:<12} {:?}", n.name, n.payload);
    }
    if let Some(slider) = sliders.get(track) {
        println!("final value: {}", slider.value());
    }

    let damage = tree.commit();
    println!("{} element(s) changed", damage.elements.len());
}
