// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget notifications: named events delivered to listeners and kept in a drainable log.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use detent_dom::ElementId;

use crate::types::Outcome;

/// A family of notifications a widget can emit.
pub trait EventKind: Copy + Eq + fmt::Debug {
    /// Short name, before the widget prefix is applied (`"start"`, `"slide"`, ...).
    fn as_str(self) -> &'static str;
}

/// Full event name for `kind` under `prefix`.
///
/// The prefix is prepended unless the kind already equals it, so a `slide` widget
/// emits `slide`, `slidestart`, `slidestop`, `slidechange`.
pub fn event_name(prefix: &str, kind: &str) -> String {
    if kind == prefix {
        kind.into()
    } else {
        let mut name = String::with_capacity(prefix.len() + kind.len());
        name.push_str(prefix);
        name.push_str(kind);
        name
    }
}

/// One emitted notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification<K, P> {
    /// Element the widget is bound to.
    pub element: ElementId,
    /// What happened.
    pub kind: K,
    /// Prefixed event name.
    pub name: String,
    /// Widget-specific data.
    pub payload: P,
    /// Whether a listener rejected it.
    pub outcome: Outcome,
}

type Callback<K, P> = Rc<dyn Fn(&Notification<K, P>) -> Outcome>;

/// Listeners registered per notification kind.
///
/// Cloning shares the callbacks.
pub struct Listeners<K, P> {
    entries: Vec<(K, Callback<K, P>)>,
}

impl<K, P> Default for Listeners<K, P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Clone, P> Clone for Listeners<K, P> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K: fmt::Debug, P> fmt::Debug for Listeners<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(k, _)| k))
            .finish()
    }
}

impl<K: EventKind, P> Listeners<K, P> {
    /// No listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener for `kind`.
    pub fn on(mut self, kind: K, f: impl Fn(&Notification<K, P>) -> Outcome + 'static) -> Self {
        self.entries.push((kind, Rc::new(f)));
        self
    }

    /// Add a listener for `kind` in place.
    pub fn add(&mut self, kind: K, f: impl Fn(&Notification<K, P>) -> Outcome + 'static) {
        self.entries.push((kind, Rc::new(f)));
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every listener for the notification's kind. Any `Cancel` cancels.
    fn deliver(&self, n: &Notification<K, P>) -> Outcome {
        let mut outcome = Outcome::Continue;
        for (kind, f) in &self.entries {
            if *kind == n.kind && f(n).is_cancel() {
                outcome = Outcome::Cancel;
            }
        }
        outcome
    }
}

/// Emits notifications for one widget instance.
pub struct Notifier<K, P> {
    element: ElementId,
    prefix: &'static str,
    listeners: Listeners<K, P>,
    recording: bool,
    log: Vec<Notification<K, P>>,
}

impl<K: fmt::Debug, P> fmt::Debug for Notifier<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("element", &self.element)
            .field("prefix", &self.prefix)
            .field("listeners", &self.listeners)
            .field("recording", &self.recording)
            .field("pending", &self.log.len())
            .finish()
    }
}

impl<K: EventKind, P: Clone> Notifier<K, P> {
    /// A notifier for `element` with the widget's event prefix.
    ///
    /// Emitted notifications go to the listeners only; nothing is kept for [`Self::drain`]
    /// until recording is switched on.
    pub fn new(element: ElementId, prefix: &'static str, listeners: Listeners<K, P>) -> Self {
        Self {
            element,
            prefix,
            listeners,
            recording: false,
            log: Vec::new(),
        }
    }

    /// Keep emitted notifications for [`Self::drain`]. Switching off drops anything pending.
    pub fn set_recording(&mut self, on: bool) {
        self.recording = on;
        if !on {
            self.log.clear();
        }
    }

    /// Whether emitted notifications are kept.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Replace the listeners.
    pub fn set_listeners(&mut self, listeners: Listeners<K, P>) {
        self.listeners = listeners;
    }

    /// Emit a notification. Returns `Cancel` if any listener rejected it.
    pub fn emit(&mut self, kind: K, payload: P) -> Outcome {
        let mut n = Notification {
            element: self.element,
            kind,
            name: event_name(self.prefix, kind.as_str()),
            payload,
            outcome: Outcome::Continue,
        };
        n.outcome = self.listeners.deliver(&n);
        log::trace!("{} on {:?}: {:?}", n.name, n.element, n.outcome);
        let outcome = n.outcome;
        if self.recording {
            self.log.push(n);
        }
        outcome
    }

    /// Take everything emitted so far.
    pub fn drain(&mut self) -> Vec<Notification<K, P>> {
        core::mem::take(&mut self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::cell::Cell;
    use detent_dom::{ElementSpec, ElementTree};

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum Ev {
        Start,
        Spin,
    }

    impl EventKind for Ev {
        fn as_str(self) -> &'static str {
            match self {
                Self::Start => "start",
                Self::Spin => "spin",
            }
        }
    }

    #[test]
    fn names_use_the_prefix_unless_equal() {
        assert_eq!(event_name("slide", "slide"), "slide");
        assert_eq!(event_name("slide", "start"), "slidestart");
        assert_eq!(event_name("spin", "change"), "spinchange");
    }

    #[test]
    fn any_cancel_rejects_but_every_listener_runs() {
        let mut tree = ElementTree::new();
        let el = tree.insert(None, ElementSpec::new("div"));
        let calls = Rc::new(Cell::new(0));
        let c1 = calls.clone();
        let c2 = calls.clone();
        let listeners = Listeners::new()
            .on(Ev::Spin, move |_: &Notification<Ev, u32>| {
                c1.set(c1.get() + 1);
                Outcome::Cancel
            })
            .on(Ev::Spin, move |n| {
                c2.set(c2.get() + n.payload);
                Outcome::Continue
            });
        let mut notifier = Notifier::new(el, "spin", listeners);
        notifier.set_recording(true);

        assert_eq!(notifier.emit(Ev::Start, 5), Outcome::Continue);
        assert_eq!(notifier.emit(Ev::Spin, 10), Outcome::Cancel);
        assert_eq!(calls.get(), 11);

        let log = notifier.drain();
        let names: Vec<_> = log.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["spinstart", "spin"]);
        assert_eq!(log[1].outcome, Outcome::Cancel);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn listeners_run_without_recording() {
        let mut tree = ElementTree::new();
        let el = tree.insert(None, ElementSpec::new("div"));
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let listeners = Listeners::new().on(Ev::Spin, move |_: &Notification<Ev, u32>| {
            c.set(c.get() + 1);
            Outcome::Continue
        });
        let mut notifier = Notifier::new(el, "spin", listeners);
        assert!(!notifier.is_recording());

        for i in 0..1000 {
            notifier.emit(Ev::Spin, i);
        }
        assert_eq!(calls.get(), 1000);
        assert!(notifier.drain().is_empty());

        notifier.set_recording(true);
        notifier.emit(Ev::Start, 0);
        notifier.set_recording(false);
        assert!(notifier.drain().is_empty(), "switching off drops pending");
    }
}
