// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input routing from the host to widget instances.
//!
//! ## Overview
//!
//! The host resolves each pointer event to a target element (usually with
//! [`ElementTree::hit_test_point`](detent_dom::ElementTree::hit_test_point)) and hands it
//! to the factory of every widget type it uses:
//!
//! - Presses and clicks bubble from the target to the root. Each instance on the path
//!   gets a turn until the event is marked handled.
//! - Moves and releases skip the tree and go to instances that are tracking a drag.
//! - Keys go to the instance owning the focused element.
//! - Hover and focus changes are diffed against the previous state and delivered as
//!   enter/leave and focus/blur pairs to the owning instances.
//!
//! Sharing one `&mut PointerEvent` between factories keeps presses exclusive: an event
//! claimed by one widget is ignored by the rest.

use alloc::vec::Vec;

use detent_dom::{ElementId, ElementTree};

use crate::factory::{Factory, Widget};
use crate::hover::HoverEvent;
use crate::types::{KeyEvent, PointerEvent};

/// The bubble path: `target` followed by its ancestors.
pub fn bubble_path(tree: &ElementTree, target: ElementId) -> Vec<ElementId> {
    tree.ancestors_and_self(target).collect()
}

impl<W: Widget> Factory<W> {
    /// Offer a press to instances along the bubble path. Returns true once handled.
    pub fn pointer_down(&mut self, tree: &mut ElementTree, event: &mut PointerEvent) -> bool {
        for element in bubble_path(tree, event.target) {
            if event.handled {
                break;
            }
            if let Some(w) = self.instances.get_mut(&element) {
                w.pointer_down(tree, event);
            }
        }
        event.handled
    }

    /// Deliver a move to every tracking instance.
    pub fn pointer_move(&mut self, tree: &mut ElementTree, event: &mut PointerEvent) {
        for w in self.instances.values_mut().filter(|w| w.is_tracking()) {
            w.pointer_move(tree, event);
        }
    }

    /// Deliver a release to every tracking instance.
    pub fn pointer_up(&mut self, tree: &mut ElementTree, event: &PointerEvent) {
        for w in self.instances.values_mut().filter(|w| w.is_tracking()) {
            w.pointer_up(tree, event);
        }
    }

    /// Offer a click along the bubble path. Returns false if an instance swallowed it.
    pub fn click(&mut self, tree: &mut ElementTree, event: &mut PointerEvent) -> bool {
        for element in bubble_path(tree, event.target) {
            if let Some(w) = self.instances.get_mut(&element)
                && !w.click(tree, event)
            {
                return false;
            }
        }
        true
    }

    /// Deliver a key press to the instance owning the target.
    pub fn key_down(&mut self, tree: &mut ElementTree, event: &mut KeyEvent) {
        if let Some(owner) = self.owner_of(tree, event.target)
            && let Some(w) = self.instances.get_mut(&owner)
        {
            w.key_down(tree, event);
        }
    }

    /// Deliver a key release to the instance owning the target.
    pub fn key_up(&mut self, tree: &mut ElementTree, event: &mut KeyEvent) {
        if let Some(owner) = self.owner_of(tree, event.target)
            && let Some(w) = self.instances.get_mut(&owner)
        {
            w.key_up(tree, event);
        }
    }

    /// The pointer is now over `target` (or over nothing).
    pub fn pointer_over(&mut self, tree: &mut ElementTree, target: Option<ElementId>) {
        let path = target.map(|t| tree.path_to_root(t)).unwrap_or_default();
        for transition in self.hover.update_path(&path) {
            let element = transition.element();
            let Some(owner) = self.owner_of(tree, element) else {
                continue;
            };
            if let Some(w) = self.instances.get_mut(&owner) {
                w.hover(tree, element, matches!(transition, HoverEvent::Enter(_)));
            }
        }
    }

    /// Move keyboard focus to `target` (or clear it) and tell the affected owners.
    pub fn focus(&mut self, tree: &mut ElementTree, target: Option<ElementId>) {
        let previous = tree.focused();
        if previous == target {
            return;
        }
        match target {
            Some(t) => {
                if !tree.is_alive(t) {
                    log::debug!("focus on stale element {t:?} ignored");
                    return;
                }
                tree.focus(t);
            }
            None => {
                tree.blur();
            }
        }
        if let Some(p) = previous {
            self.notify_focus(tree, p, false);
        }
        if let Some(t) = target {
            self.notify_focus(tree, t, true);
        }
    }

    fn notify_focus(&mut self, tree: &mut ElementTree, element: ElementId, focused: bool) {
        if let Some(owner) = self.owner_of(tree, element)
            && let Some(w) = self.instances.get_mut(&owner)
        {
            w.focus(tree, element, focused);
        }
    }
}
