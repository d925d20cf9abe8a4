// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A two-handle range slider driven by the keyboard.
//!
//! Shows how handles stop at each other and how the range element follows.
//!
//! Run:
//! - `cargo run -p detent_demos --example slider_range`

use detent_dom::{ElementSpec, ElementTree, Key};
use detent_slider::{Range, Slider, SliderOption};
use detent_widget::{Factory, KeyEvent};
use kurbo::Rect;

fn main() {
    env_logger::init();

    let mut tree = ElementTree::new();
    let track = tree.insert(
        None,
        ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 300.0, 12.0)),
    );

    let mut sliders: Factory<Slider> = Factory::new().with_recording(true);
    sliders.create(
        &mut tree,
        &[track],
        &[
            SliderOption::Range(Range::Both),
            SliderOption::Values(Some(vec![30.0, 40.0])),
            SliderOption::Step(4.0),
        ],
    );
    let Some(slider) = sliders.get(track) else {
        return;
    };
    let lower = slider.handles()[0];
    let range = slider.range_element();

    // Push the lower handle up into the upper one.
    for _ in 0..5 {
        let mut ev = KeyEvent::new(lower, Key::Right);
        sliders.key_down(&mut tree, &mut ev);
        if let Some(slider) = sliders.get(track) {
            println!("values: {:?}", slider.values());
        }
    }
    sliders.key_up(&mut tree, &mut KeyEvent::new(lower, Key::Right));

    if let Some(style) = range.and_then(|r| tree.style(r)) {
        println!(
            "range: left {:?}% width {:?}%",
            style.left.unwrap_or_default(),
            style.width.unwrap_or_default()
        );
    }
    for n in sliders.drain_notifications() {
        println!("{:<12} handle {:?} values {:?}", n.name, n.payload.handle, n.payload.values);
    }
}
