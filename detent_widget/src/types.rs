// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core input types: pointer and keyboard events, and listener outcomes.
//!
//! ## Overview
//!
//! Hosts translate their native input into these values and feed them to a
//! [`Factory`](crate::factory::Factory). Events are passed by `&mut` so that the
//! first instance to claim a pointer-down can mark it handled for everyone else.

use core::time::Duration;

use detent_dom::{ElementId, Key};
use kurbo::{Point, Vec2};

/// Which pointer button changed state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PointerButton {
    /// Usually the left mouse button, or a touch contact.
    #[default]
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right mouse button.
    Secondary,
    /// Any other button, by index.
    Other(u8),
}

/// A pointer event in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Element the host's hit test resolved the pointer to.
    pub target: ElementId,
    /// World-space position.
    pub position: Point,
    /// Button that changed state (ignored for moves).
    pub button: PointerButton,
    /// Monotonic timestamp supplied by the host.
    pub time: Duration,
    /// Set once an instance has claimed this event.
    pub handled: bool,
    /// Set when the host should suppress the platform default action.
    pub default_prevented: bool,
}

impl PointerEvent {
    /// A primary-button event at `position` over `target`.
    pub fn new(target: ElementId, position: Point, time: Duration) -> Self {
        Self {
            target,
            position,
            button: PointerButton::Primary,
            time,
            handled: false,
            default_prevented: false,
        }
    }

    /// Replace the button.
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Suppress the platform default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Mark the event as claimed.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    /// Offset from `other` to this event.
    pub fn delta_from(&self, other: &Self) -> Vec2 {
        self.position - other.position
    }
}

/// A key-down or key-up event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Element holding focus when the key changed state.
    pub target: ElementId,
    /// The key.
    pub key: Key,
    /// Set when the host should suppress the platform default action.
    pub default_prevented: bool,
}

impl KeyEvent {
    /// A key event delivered to `target`.
    pub fn new(target: ElementId, key: Key) -> Self {
        Self {
            target,
            key,
            default_prevented: false,
        }
    }

    /// Suppress the platform default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// What a notification listener wants to happen next.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// Let the action proceed.
    #[default]
    Continue,
    /// Reject a cancelable action.
    Cancel,
}

impl Outcome {
    /// Returns true for [`Outcome::Cancel`].
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}
