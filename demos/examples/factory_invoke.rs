// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The string method boundary: construction from JSON, getters, setters and options.
//!
//! Run:
//! - `cargo run -p detent_demos --example factory_invoke`

use detent_dom::{ElementSpec, ElementTree};
use detent_slider::Slider;
use detent_widget::Factory;
use kurbo::Rect;
use serde_json::{Value, json};

fn main() {
    env_logger::init();

    let mut tree = ElementTree::new();
    let a = tree.insert(
        None,
        ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 200.0, 10.0)),
    );
    let b = tree.insert(
        None,
        ElementSpec::new("div").with_bounds(Rect::new(0.0, 20.0, 10.0, 220.0)),
    );
    let both = [a, b];

    let mut sliders: Factory<Slider> = Factory::new();
    match sliders.create_json(&mut tree, &both, &json!({"max": 50, "animate": "fast"})) {
        Ok(n) => println!("created {n} slider(s)"),
        Err(e) => {
            eprintln!("create failed: {e}");
            return;
        }
    }

    let calls: [(&str, Vec<Value>); 8] = [
        ("value", vec![json!(35)]),
        ("value", vec![]),
        ("option", vec![json!("orientation")]),
        ("option", vec![json!({"step": 5, "min": 10})]),
        ("values", vec![]),
        ("disable", vec![]),
        ("_refresh", vec![]),
        ("option", vec![json!("step"), json!("big")]),
    ];
    for (name, args) in calls {
        match sliders.invoke(&mut tree, &both, name, &args) {
            Ok(result) => println!("{name}({args:?}) -> {result:?}"),
            Err(e) => println!("{name}({args:?}) failed: {e}"),
        }
    }

    for el in both {
        println!("{el:?}: classes {:?}", tree.classes(el));
    }
}
