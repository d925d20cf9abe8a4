// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detent Slider: a headless slider widget.
//!
//! ## Overview
//!
//! A [`Slider`](crate::slider::Slider) turns an element of a [`detent_dom::ElementTree`] into
//! a track with one or more handles. It is managed by a [`detent_widget::Factory`], which
//! routes pointer and key input to it and exposes its options and methods.
//!
//! - Single-handle mode keeps one `value`. Setting `values` to a non-empty list switches to
//!   one handle per entry; handles never cross.
//! - `range` draws a track between two handles (`true`) or from one end to the handle
//!   (`"min"`/`"max"`).
//! - Pointer positions map to values through the element's bounds, snapped to `step` with
//!   half steps rounding up. Arrow keys step, Home and End jump to the bounds.
//! - Every move proposes a value through a cancelable `slide` notification. `slidestart`,
//!   `slidestop` and `slidechange` bracket interactions.
//!
//! Presentation is written as percentage styles on the handle and range elements; the
//! host renders them.
//!
//! ## Minimal usage
//!
//! ```
//! use core::time::Duration;
//! use detent_dom::{ElementSpec, ElementTree};
//! use detent_slider::{Slider, SliderOption};
//! use detent_widget::{Factory, Invoked, PointerEvent};
//! use kurbo::{Point, Rect};
//! use serde_json::json;
//!
//! let mut tree = ElementTree::new();
//! let track = tree.insert(
//!     None,
//!     ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 200.0, 20.0)),
//! );
//!
//! let mut sliders: Factory<Slider> = Factory::new();
//! sliders.create(&mut tree, &[track], &[SliderOption::Step(10.0)]);
//!
//! // Press a quarter of the way along the track.
//! let mut down = PointerEvent::new(track, Point::new(50.0, 10.0), Duration::ZERO);
//! sliders.pointer_down(&mut tree, &mut down);
//! let up = PointerEvent::new(track, Point::new(50.0, 10.0), Duration::from_millis(20));
//! sliders.pointer_up(&mut tree, &up);
//!
//! let read = sliders.invoke(&mut tree, &[track], "value", &[]).unwrap();
//! assert_eq!(read, Invoked::Read(Some(json!(30.0))));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod options;
pub mod slider;
pub mod value;

pub use event::{SliderEvent, SliderUi};
pub use options::{Animate, Axis, Orientation, Range, SliderOption, SliderOptionKey, SliderOptions};
pub use slider::{Slider, SliderAnswer, SliderGetter, SliderMethod};
