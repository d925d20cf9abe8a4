// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detent Widget: a headless widget factory for element trees.
//!
//! ## Overview
//!
//! Widgets are state machines bound to elements of a [`detent_dom::ElementTree`]. This crate
//! supplies the parts every widget type shares:
//!
//! - [`Factory`](crate::factory::Factory): the registry of instances for one widget type,
//!   with typed [`Command`](crate::factory::Command)s and [`Query`](crate::factory::Query)s
//!   and a string method boundary ([`Factory::invoke`](crate::factory::Factory::invoke)).
//! - [`MouseInteraction`](crate::mouse::MouseInteraction): press/drag/release handling with
//!   distance and delay thresholds, driven through the
//!   [`MouseHooks`](crate::mouse::MouseHooks) trait.
//! - [`Notifier`](crate::notify::Notifier): named notifications with cancelable outcomes.
//! - [`dispatch`]: routing of pointer, key, hover and focus input to instances.
//!
//! ## Input model
//!
//! The host owns the event loop. It resolves pointer positions to elements, stamps each
//! event with a monotonic time, and calls the factory's routing methods. Nothing in this
//! crate blocks, spawns, or schedules; delays are measured against event timestamps.
//!
//! ## Minimal usage
//!
//! ```
//! use detent_widget::hover::{HoverEvent, HoverState};
//! use detent_widget::notify::event_name;
//!
//! assert_eq!(event_name("slide", "start"), "slidestart");
//!
//! let mut hover = HoverState::new();
//! assert_eq!(hover.update_path(&[1_u32]), vec![HoverEvent::Enter(1)]);
//! ```
//!
//! See `detent_slider` for a complete widget.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod classes;
pub mod dispatch;
pub mod factory;
pub mod hover;
pub mod method;
pub mod mouse;
pub mod notify;
pub mod types;

pub use factory::{Command, Factory, Query, Reply, Widget, WidgetBase};
pub use method::{CallError, Invoked};
pub use mouse::{MouseHooks, MouseInteraction, MouseOptions};
pub use notify::{EventKind, Listeners, Notification, Notifier};
pub use types::{KeyEvent, Outcome, PointerButton, PointerEvent};
