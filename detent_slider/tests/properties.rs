// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for slider invariants.
//!
//! Uses proptest to verify:
//! 1. Snapped pointer values stay in range and land on a step from `min`
//! 2. Handles never cross, whatever the drag
//! 3. Keyboard input never leaves `[min, max]`

use core::time::Duration;

use detent_dom::{ElementSpec, ElementTree, Key};
use detent_slider::value::{clamp, fraction, value_at_fraction};
use detent_slider::{Slider, SliderOption};
use detent_widget::{Factory, KeyEvent, PointerEvent};
use kurbo::{Point, Rect};
use proptest::prelude::*;

// ── Strategies ───────────────────────────────────────────────────────

fn arb_bounds() -> impl Strategy<Value = (f64, f64)> {
    (-500.0..500.0_f64, 1.0..1000.0_f64).prop_map(|(min, span)| (min.round(), (min + span).round()))
}

fn arb_step() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), Just(5.0), Just(10.0), Just(25.0)]
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Left),
        Just(Key::Right),
        Just(Key::Up),
        Just(Key::Down),
        Just(Key::Home),
        Just(Key::End),
    ]
}

fn arb_xs() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..300.0_f64, 1..20)
}

// ── 1. Snapping ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn snapped_values_stay_on_the_grid(
        (min, max) in arb_bounds(),
        step in arb_step(),
        x in -100.0..300.0_f64,
    ) {
        let f = fraction(x, 0.0, 200.0);
        prop_assert!((0.0..=1.0).contains(&f));
        let v = clamp(value_at_fraction(f, min, max, step), min, max);
        prop_assert!(v >= min && v <= max);
        let steps = (v - min) / step;
        prop_assert!(
            (steps - steps.round()).abs() < 1e-6 || v == max,
            "{v} is off the grid from {min} by {step}"
        );
    }
}

// ── 2. No crossing ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn handles_never_cross(start in 0.0..200.0_f64, xs in arb_xs()) {
        let mut tree = ElementTree::new();
        let el = tree.insert(
            None,
            ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 200.0, 20.0)),
        );
        let mut sliders: Factory<Slider> = Factory::new();
        sliders.create(&mut tree, &[el], &[SliderOption::Values(Some(vec![25.0, 50.0, 75.0]))]);

        let mut down = PointerEvent::new(el, Point::new(start, 10.0), Duration::ZERO);
        sliders.pointer_down(&mut tree, &mut down);
        for (i, x) in xs.iter().enumerate() {
            let at = Duration::from_millis(i as u64 + 1);
            let mut ev = PointerEvent::new(el, Point::new(*x, 10.0), at);
            sliders.pointer_move(&mut tree, &mut ev);
            let values = sliders.get(el).unwrap().values();
            prop_assert!(values.windows(2).all(|w| w[0] <= w[1]), "crossed: {values:?}");
        }
    }
}

// ── 3. Keyboard bounds ───────────────────────────────────────────────

proptest! {
    #[test]
    fn keys_stay_in_bounds(
        (min, max) in arb_bounds(),
        step in arb_step(),
        keys in prop::collection::vec(arb_key(), 1..40),
    ) {
        let mut tree = ElementTree::new();
        let el = tree.insert(
            None,
            ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 200.0, 20.0)),
        );
        let mut sliders: Factory<Slider> = Factory::new();
        sliders.create(
            &mut tree,
            &[el],
            &[SliderOption::Min(min), SliderOption::Max(max), SliderOption::Step(step)],
        );
        let h = sliders.get(el).unwrap().handles()[0];
        for key in keys {
            sliders.key_down(&mut tree, &mut KeyEvent::new(h, key));
            let v = sliders.get(el).unwrap().value();
            prop_assert!(v >= min && v <= max, "{v} outside [{min}, {max}]");
        }
    }
}
