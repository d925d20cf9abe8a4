// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse interaction: a press/drag/release state machine shared by draggable widgets.
//!
//! ## Overview
//!
//! A widget owns a [`MouseInteraction`] and implements [`MouseHooks`] on its remaining
//! state. The factory routes pointer events to [`MouseInteraction::pointer_down`] and,
//! while the instance is tracking, to [`MouseInteraction::pointer_move`] and
//! [`MouseInteraction::pointer_up`].
//!
//! ```text
//!   Idle --down (accepted)--> Armed --move (distance + delay met, start ok)--> Dragging
//!     ^                         |                                               |
//!     +---------- up -----------+---------------------- up (stop) -------------+
//! ```
//!
//! A press that already satisfies distance and delay starts dragging immediately.
//! Time is read from [`PointerEvent::time`]; there are no timers.

use core::time::Duration;

use detent_dom::{ElementTree, Selector};

use crate::types::{PointerButton, PointerEvent};

/// Tuning for [`MouseInteraction`].
#[derive(Clone, Debug, PartialEq)]
pub struct MouseOptions {
    /// Presses on elements matching this selector (or inside them) are ignored.
    pub cancel: Option<Selector>,
    /// Pixels the pointer must travel (on either axis) before dragging starts.
    pub distance: f64,
    /// Time that must pass after the press before dragging starts.
    pub delay: Duration,
}

impl Default for MouseOptions {
    fn default() -> Self {
        Self {
            cancel: None,
            distance: 1.0,
            delay: Duration::ZERO,
        }
    }
}

/// Widget callbacks driven by [`MouseInteraction`].
pub trait MouseHooks {
    /// Decide whether a primary press should be taken at all.
    fn mouse_capture(&mut self, _tree: &mut ElementTree, _event: &PointerEvent) -> bool {
        true
    }

    /// Dragging is about to begin. Return `false` to refuse it.
    ///
    /// `down` is the press; `current` is the event that met the thresholds
    /// (the press itself when it met them on its own).
    fn mouse_start(
        &mut self,
        _tree: &mut ElementTree,
        _down: &PointerEvent,
        _current: &PointerEvent,
    ) -> bool {
        true
    }

    /// The pointer moved while dragging.
    fn mouse_drag(&mut self, _tree: &mut ElementTree, _event: &PointerEvent) {}

    /// Dragging ended.
    fn mouse_stop(&mut self, _tree: &mut ElementTree, _event: &PointerEvent) {}
}

#[derive(Clone, Debug, Default, PartialEq)]
enum MouseState {
    #[default]
    Idle,
    Armed(PointerEvent),
    Dragging(PointerEvent),
}

/// Press/drag/release state for one widget instance.
#[derive(Clone, Debug, Default)]
pub struct MouseInteraction {
    options: MouseOptions,
    state: MouseState,
    tracking: bool,
    prevent_click: bool,
    deadline: Duration,
}

impl MouseInteraction {
    /// An idle state machine.
    pub fn new(options: MouseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current options.
    pub fn options(&self) -> &MouseOptions {
        &self.options
    }

    /// Replace the options. Takes effect from the next event.
    pub fn set_options(&mut self, options: MouseOptions) {
        self.options = options;
    }

    /// Returns true while move/up events should be routed here.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Returns true between an accepted start and the release.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, MouseState::Dragging(_))
    }

    /// Returns true after an accepted press while thresholds are still pending.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, MouseState::Armed(_))
    }

    /// The press that began the current interaction.
    pub fn down_event(&self) -> Option<&PointerEvent> {
        match &self.state {
            MouseState::Armed(down) | MouseState::Dragging(down) => Some(down),
            MouseState::Idle => None,
        }
    }

    /// Handle a press. Returns true if this instance claimed it.
    pub fn pointer_down<H: MouseHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        tree: &mut ElementTree,
        event: &mut PointerEvent,
    ) -> bool {
        if event.handled {
            return false;
        }
        // A release may have been lost (outside the host window).
        if self.is_dragging() {
            log::trace!("pointer down while dragging, finishing previous drag");
            self.pointer_up(hooks, tree, event);
        }
        self.state = MouseState::Idle;
        self.tracking = false;
        self.prevent_click = false;

        let cancelled = self
            .options
            .cancel
            .as_ref()
            .is_some_and(|sel| tree.closest_matching(event.target, sel).is_some());
        if event.button != PointerButton::Primary
            || cancelled
            || !hooks.mouse_capture(tree, event)
        {
            return false;
        }

        self.deadline = event.time + self.options.delay;
        let down = event.clone();
        if self.distance_met(&down, event) && self.delay_met(event) {
            if !hooks.mouse_start(tree, &down, event) {
                log::trace!("mouse start refused on press");
                event.prevent_default();
                return false;
            }
            log::trace!("mouse idle -> dragging");
            self.state = MouseState::Dragging(down);
        } else {
            log::trace!("mouse idle -> armed");
            self.state = MouseState::Armed(down);
        }

        self.tracking = true;
        event.prevent_default();
        event.mark_handled();
        true
    }

    /// Handle a pointer move while tracking.
    pub fn pointer_move<H: MouseHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        tree: &mut ElementTree,
        event: &mut PointerEvent,
    ) {
        if !self.tracking {
            return;
        }
        match &self.state {
            MouseState::Dragging(_) => {
                hooks.mouse_drag(tree, event);
                event.prevent_default();
            }
            MouseState::Armed(down) => {
                if !(self.distance_met(down, event) && self.delay_met(event)) {
                    return;
                }
                let down = down.clone();
                if hooks.mouse_start(tree, &down, event) {
                    log::trace!("mouse armed -> dragging");
                    self.state = MouseState::Dragging(down);
                    hooks.mouse_drag(tree, event);
                } else {
                    log::trace!("mouse start refused");
                    self.pointer_up(hooks, tree, event);
                }
            }
            MouseState::Idle => {}
        }
    }

    /// Handle a release while tracking.
    pub fn pointer_up<H: MouseHooks + ?Sized>(
        &mut self,
        hooks: &mut H,
        tree: &mut ElementTree,
        event: &PointerEvent,
    ) {
        self.tracking = false;
        let was_dragging = self.is_dragging();
        self.state = MouseState::Idle;
        if was_dragging {
            log::trace!("mouse dragging -> idle");
            self.prevent_click = true;
            hooks.mouse_stop(tree, event);
        }
    }

    /// Handle a click. Returns false if the click must be swallowed.
    pub fn click(&mut self, event: &mut PointerEvent) -> bool {
        if self.prevent_click {
            self.prevent_click = false;
            event.prevent_default();
            event.mark_handled();
            return false;
        }
        true
    }

    /// Drop all state without calling hooks.
    pub fn teardown(&mut self) {
        self.tracking = false;
        self.prevent_click = false;
        self.state = MouseState::Idle;
    }

    fn distance_met(&self, down: &PointerEvent, event: &PointerEvent) -> bool {
        let d = event.delta_from(down);
        d.x.abs().max(d.y.abs()) >= self.options.distance
    }

    fn delay_met(&self, event: &PointerEvent) -> bool {
        event.time >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use alloc::{format, vec};
    use detent_dom::{ElementId, ElementSpec};
    use kurbo::Point;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
        refuse_capture: bool,
        refuse_start: bool,
    }

    impl MouseHooks for Recorder {
        fn mouse_capture(&mut self, _tree: &mut ElementTree, _event: &PointerEvent) -> bool {
            self.log.push("capture".into());
            !self.refuse_capture
        }

        fn mouse_start(
            &mut self,
            _tree: &mut ElementTree,
            down: &PointerEvent,
            current: &PointerEvent,
        ) -> bool {
            self.log
                .push(format!("start {} {}", down.position.x, current.position.x));
            !self.refuse_start
        }

        fn mouse_drag(&mut self, _tree: &mut ElementTree, event: &PointerEvent) {
            self.log.push(format!("drag {}", event.position.x));
        }

        fn mouse_stop(&mut self, _tree: &mut ElementTree, event: &PointerEvent) {
            self.log.push(format!("stop {}", event.position.x));
        }
    }

    fn setup() -> (ElementTree, ElementId) {
        let mut tree = ElementTree::new();
        let el = tree.insert(None, ElementSpec::new("div"));
        (tree, el)
    }

    fn ev(el: ElementId, x: f64, ms: u64) -> PointerEvent {
        PointerEvent::new(el, Point::new(x, 0.0), Duration::from_millis(ms))
    }

    #[test]
    fn distance_gates_start() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::new(MouseOptions {
            distance: 5.0,
            ..MouseOptions::default()
        });

        let mut down = ev(el, 10.0, 0);
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut down));
        assert!(down.handled && down.default_prevented);
        assert!(mouse.is_armed());

        mouse.pointer_move(&mut hooks, &mut tree, &mut ev(el, 13.0, 1));
        assert!(mouse.is_armed(), "3px is below the threshold");

        mouse.pointer_move(&mut hooks, &mut tree, &mut ev(el, 15.0, 2));
        assert!(mouse.is_dragging());
        mouse.pointer_up(&mut hooks, &mut tree, &ev(el, 15.0, 3));
        assert!(!mouse.is_tracking());
        assert_eq!(hooks.log, vec!["capture", "start 10 15", "drag 15", "stop 15"]);
    }

    #[test]
    fn delay_gates_start() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::new(MouseOptions {
            distance: 0.0,
            delay: Duration::from_millis(100),
            ..MouseOptions::default()
        });

        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 0.0, 1000)));
        mouse.pointer_move(&mut hooks, &mut tree, &mut ev(el, 50.0, 1050));
        assert!(mouse.is_armed());
        mouse.pointer_move(&mut hooks, &mut tree, &mut ev(el, 60.0, 1100));
        assert!(mouse.is_dragging());
        assert_eq!(hooks.log, vec!["capture", "start 0 60", "drag 60"]);
    }

    #[test]
    fn zero_thresholds_start_on_press() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::new(MouseOptions {
            distance: 0.0,
            ..MouseOptions::default()
        });
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 4.0, 0)));
        assert!(mouse.is_dragging());
        assert_eq!(hooks.log, vec!["capture", "start 4 4"]);
    }

    #[test]
    fn handled_press_is_left_alone() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut first = MouseInteraction::default();
        let mut second = MouseInteraction::default();
        let mut down = ev(el, 0.0, 0);
        assert!(first.pointer_down(&mut hooks, &mut tree, &mut down));
        assert!(!second.pointer_down(&mut hooks, &mut tree, &mut down));
        assert!(!second.is_tracking());
        assert_eq!(hooks.log, vec!["capture"], "second instance never ran capture");
    }

    #[test]
    fn rejected_presses() {
        let (mut tree, el) = setup();
        let knob = tree.insert(Some(el), ElementSpec::new("span").with_class("no-drag"));
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::new(MouseOptions {
            cancel: Some(Selector::parse(".no-drag").unwrap()),
            ..MouseOptions::default()
        });

        let mut right = ev(el, 0.0, 0).with_button(PointerButton::Secondary);
        assert!(!mouse.pointer_down(&mut hooks, &mut tree, &mut right));
        assert!(!right.handled);

        let mut inside_cancel = ev(knob, 0.0, 0);
        assert!(!mouse.pointer_down(&mut hooks, &mut tree, &mut inside_cancel));

        hooks.refuse_capture = true;
        let mut refused = ev(el, 0.0, 0);
        assert!(!mouse.pointer_down(&mut hooks, &mut tree, &mut refused));
        assert!(!mouse.is_tracking());
        assert_eq!(hooks.log, vec!["capture"]);
    }

    #[test]
    fn refused_start_on_press_prevents_default_only() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder {
            refuse_start: true,
            ..Recorder::default()
        };
        let mut mouse = MouseInteraction::new(MouseOptions {
            distance: 0.0,
            ..MouseOptions::default()
        });
        let mut down = ev(el, 0.0, 0);
        assert!(!mouse.pointer_down(&mut hooks, &mut tree, &mut down));
        assert!(down.default_prevented);
        assert!(!down.handled);
        assert!(!mouse.is_tracking() && !mouse.is_dragging());
    }

    #[test]
    fn refused_start_on_move_releases() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder {
            refuse_start: true,
            ..Recorder::default()
        };
        let mut mouse = MouseInteraction::default();
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 0.0, 0)));
        mouse.pointer_move(&mut hooks, &mut tree, &mut ev(el, 9.0, 1));
        assert!(!mouse.is_tracking());
        assert_eq!(hooks.log, vec!["capture", "start 0 9"]);
    }

    #[test]
    fn click_after_drag_is_swallowed_once() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::default();
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 0.0, 0)));
        mouse.pointer_move(&mut hooks, &mut tree, &mut ev(el, 20.0, 1));
        mouse.pointer_up(&mut hooks, &mut tree, &ev(el, 20.0, 2));

        let mut click = ev(el, 20.0, 3);
        assert!(!mouse.click(&mut click));
        assert!(click.default_prevented);
        assert!(mouse.click(&mut ev(el, 20.0, 4)));
    }

    #[test]
    fn click_without_drag_survives() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::default();
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 0.0, 0)));
        mouse.pointer_up(&mut hooks, &mut tree, &ev(el, 0.0, 1));
        assert!(mouse.click(&mut ev(el, 0.0, 2)));
        assert_eq!(hooks.log, vec!["capture"]);
    }

    #[test]
    fn lost_release_is_finished_on_next_press() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::new(MouseOptions {
            distance: 0.0,
            ..MouseOptions::default()
        });
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 1.0, 0)));
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 2.0, 10)));
        assert_eq!(
            hooks.log,
            vec!["capture", "start 1 1", "stop 2", "capture", "start 2 2"]
        );
    }

    #[test]
    fn teardown_resets() {
        let (mut tree, el) = setup();
        let mut hooks = Recorder::default();
        let mut mouse = MouseInteraction::default();
        assert!(mouse.pointer_down(&mut hooks, &mut tree, &mut ev(el, 0.0, 0)));
        mouse.teardown();
        assert!(!mouse.is_tracking());
        assert!(mouse.down_event().is_none());
    }
}
