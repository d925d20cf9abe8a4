// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget factory: one registry of instances per widget type.
//!
//! ## Overview
//!
//! A [`Factory<W>`] maps elements to instances of `W`. Callers construct instances over
//! a selection of elements, send them typed [`Command`]s, read them with [`Query`], or go
//! through the string boundary with [`Factory::invoke`].
//!
//! - Construction skips elements that already have an instance.
//! - Commands apply to every initialized element of the selection.
//! - Queries read only the first element of the selection.
//!
//! Input routing lives in [`dispatch`](crate::dispatch).

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use detent_dom::{ElementId, ElementTree};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::hover::HoverState;
use crate::method::{self, CallError, Invoked};
use crate::notify::{EventKind, Notification};
use crate::types::{KeyEvent, PointerEvent};

/// State every widget instance carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetBase {
    element: ElementId,
    namespace: &'static str,
    name: &'static str,
    disabled: bool,
}

impl WidgetBase {
    /// Base state for a `namespace`/`name` widget on `element`.
    pub fn new(element: ElementId, namespace: &'static str, name: &'static str) -> Self {
        Self {
            element,
            namespace,
            name,
            disabled: false,
        }
    }

    /// The element this instance is bound to.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Widget namespace (`ui`).
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Widget name (`slider`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `{namespace}-{name}`, the prefix of every widget-specific class.
    pub fn base_class(&self) -> String {
        format!("{}-{}", self.namespace, self.name)
    }

    /// Returns true while disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn disabled_classes(&self) -> String {
        format!(
            "{}-{}-disabled {}-state-disabled",
            self.namespace, self.name, self.namespace
        )
    }

    /// Record the disabled state and reflect it in classes and `aria-disabled`.
    pub fn set_disabled(&mut self, tree: &mut ElementTree, disabled: bool) {
        self.disabled = disabled;
        let classes = self.disabled_classes();
        tree.toggle_class(self.element, &classes, disabled);
        tree.set_attr(self.element, "aria-disabled", if disabled { "true" } else { "false" });
    }

    /// Undo everything [`WidgetBase::set_disabled`] added.
    pub fn destroy(&mut self, tree: &mut ElementTree) {
        let classes = self.disabled_classes();
        tree.remove_class(self.element, &classes);
        tree.remove_attr(self.element, "aria-disabled");
    }
}

/// A widget type the factory can manage.
///
/// Interaction methods default to ignoring input, so display-only widgets implement
/// just the construction, option, and method parts.
pub trait Widget: Sized {
    /// Widget name, used for classes (`ui-slider`).
    const NAME: &'static str;
    /// Namespace, used for classes.
    const NAMESPACE: &'static str = "ui";
    /// Prefix for notification names.
    const EVENT_PREFIX: &'static str;
    /// Method names that read rather than write.
    const GETTERS: &'static [&'static str] = &[];

    /// Full option set.
    type Options: Clone + Default + fmt::Debug + Serialize + DeserializeOwned;
    /// A single option assignment, adjacently tagged as `{"key", "value"}`.
    type Opt: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned;
    /// An option name.
    type OptKey: Copy + fmt::Debug + DeserializeOwned;
    /// Widget-specific commands.
    type Method: Clone + fmt::Debug;
    /// Widget-specific reads.
    type Getter: Clone + fmt::Debug;
    /// Result of a [`Widget::Getter`].
    type Answer: Clone + fmt::Debug + PartialEq + Serialize;
    /// Notification kinds.
    type Event: EventKind;
    /// Notification payload.
    type Payload: Clone + fmt::Debug;

    /// Write one assignment into an option set (used to build construction options).
    fn merge_option(options: &mut Self::Options, opt: Self::Opt);

    /// The assignment that enables or disables the widget.
    fn disabled_option(disabled: bool) -> Self::Opt;

    /// Build and initialize an instance on `element`.
    fn create(tree: &mut ElementTree, element: ElementId, options: Self::Options) -> Self;

    /// Shared base state.
    fn base(&self) -> &WidgetBase;

    /// Shared base state, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Current options.
    fn options(&self) -> &Self::Options;

    /// Read one option.
    fn option(&self, key: Self::OptKey) -> Self::Opt;

    /// Change one option and react to it.
    fn set_option(&mut self, tree: &mut ElementTree, opt: Self::Opt);

    /// Run a widget-specific command.
    fn call(&mut self, tree: &mut ElementTree, method: Self::Method);

    /// Run a widget-specific read.
    fn get(&self, getter: Self::Getter) -> Self::Answer;

    /// Undo widget-specific changes to the tree. The base state is undone afterwards.
    fn destroy(&mut self, tree: &mut ElementTree);

    /// Take pending notifications.
    fn drain_notifications(&mut self) -> Vec<Notification<Self::Event, Self::Payload>>;

    /// Keep emitted notifications for [`Widget::drain_notifications`], or stop and drop
    /// anything pending.
    fn set_recording(&mut self, on: bool);

    /// Map a string call to a widget-specific command.
    fn parse_method(name: &str, _args: &[Value]) -> Result<Self::Method, CallError> {
        Err(CallError::UnknownMethod(name.into()))
    }

    /// Map a getter name and its arguments to a read, if they form one.
    fn parse_getter(_name: &str, _args: &[Value]) -> Option<Self::Getter> {
        None
    }

    /// A press on the element or a descendant. Returns true if claimed.
    fn pointer_down(&mut self, _tree: &mut ElementTree, _event: &mut PointerEvent) -> bool {
        false
    }

    /// A move while [`Widget::is_tracking`].
    fn pointer_move(&mut self, _tree: &mut ElementTree, _event: &mut PointerEvent) {}

    /// A release while [`Widget::is_tracking`].
    fn pointer_up(&mut self, _tree: &mut ElementTree, _event: &PointerEvent) {}

    /// A click on the element or a descendant. Returns false to swallow it.
    fn click(&mut self, _tree: &mut ElementTree, _event: &mut PointerEvent) -> bool {
        true
    }

    /// Returns true while the instance wants every move and release.
    fn is_tracking(&self) -> bool {
        false
    }

    /// Key pressed while the element or a descendant has focus.
    fn key_down(&mut self, _tree: &mut ElementTree, _event: &mut KeyEvent) {}

    /// Key released while the element or a descendant has focus.
    fn key_up(&mut self, _tree: &mut ElementTree, _event: &mut KeyEvent) {}

    /// The pointer entered (`true`) or left `element`, which is this instance's element or a
    /// descendant.
    fn hover(&mut self, _tree: &mut ElementTree, _element: ElementId, _entered: bool) {}

    /// `element` gained (`true`) or lost focus.
    fn focus(&mut self, _tree: &mut ElementTree, _element: ElementId, _focused: bool) {}
}

/// A typed write.
pub enum Command<W: Widget> {
    /// Clear the disabled state.
    Enable,
    /// Set the disabled state.
    Disable,
    /// Remove the instance and undo its changes.
    Destroy,
    /// Change one option.
    SetOption(W::Opt),
    /// Change several options, in order.
    SetOptions(Vec<W::Opt>),
    /// Widget-specific command.
    Method(W::Method),
}

impl<W: Widget> Clone for Command<W> {
    fn clone(&self) -> Self {
        match self {
            Self::Enable => Self::Enable,
            Self::Disable => Self::Disable,
            Self::Destroy => Self::Destroy,
            Self::SetOption(o) => Self::SetOption(o.clone()),
            Self::SetOptions(v) => Self::SetOptions(v.clone()),
            Self::Method(m) => Self::Method(m.clone()),
        }
    }
}

impl<W: Widget> fmt::Debug for Command<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable => f.write_str("Enable"),
            Self::Disable => f.write_str("Disable"),
            Self::Destroy => f.write_str("Destroy"),
            Self::SetOption(o) => f.debug_tuple("SetOption").field(o).finish(),
            Self::SetOptions(v) => f.debug_tuple("SetOptions").field(v).finish(),
            Self::Method(m) => f.debug_tuple("Method").field(m).finish(),
        }
    }
}

/// A typed read.
pub enum Query<W: Widget> {
    /// Read one option.
    Option(W::OptKey),
    /// Widget-specific read.
    Method(W::Getter),
}

impl<W: Widget> fmt::Debug for Query<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option(k) => f.debug_tuple("Option").field(k).finish(),
            Self::Method(g) => f.debug_tuple("Method").field(g).finish(),
        }
    }
}

/// Result of a [`Query`].
pub enum Reply<W: Widget> {
    /// The option, as an assignment.
    Option(W::Opt),
    /// Result of a widget-specific read.
    Method(W::Answer),
}

impl<W: Widget> Clone for Reply<W> {
    fn clone(&self) -> Self {
        match self {
            Self::Option(o) => Self::Option(o.clone()),
            Self::Method(a) => Self::Method(a.clone()),
        }
    }
}

impl<W: Widget> PartialEq for Reply<W> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Option(a), Self::Option(b)) => a == b,
            (Self::Method(a), Self::Method(b)) => a == b,
            _ => false,
        }
    }
}

impl<W: Widget> fmt::Debug for Reply<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option(o) => f.debug_tuple("Option").field(o).finish(),
            Self::Method(a) => f.debug_tuple("Method").field(a).finish(),
        }
    }
}

/// Registry of `W` instances keyed by element.
pub struct Factory<W: Widget> {
    defaults: W::Options,
    pub(crate) instances: BTreeMap<ElementId, W>,
    pub(crate) hover: HoverState<ElementId>,
    recording: bool,
    retired: Vec<Notification<W::Event, W::Payload>>,
}

impl<W: Widget> fmt::Debug for Factory<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("widget", &W::NAME)
            .field("defaults", &self.defaults)
            .field("instances", &self.instances.keys().collect::<Vec<_>>())
            .field("hovered", &self.hover.current_path())
            .field("recording", &self.recording)
            .finish_non_exhaustive()
    }
}

impl<W: Widget> Default for Factory<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Widget> Factory<W> {
    /// A factory using the widget type's own defaults.
    pub fn new() -> Self {
        Self::with_defaults(W::Options::default())
    }

    /// A factory whose instances start from `defaults`.
    pub fn with_defaults(defaults: W::Options) -> Self {
        Self {
            defaults,
            instances: BTreeMap::new(),
            hover: HoverState::new(),
            recording: false,
            retired: Vec::new(),
        }
    }

    /// Builder form of [`Factory::set_recording`].
    pub fn with_recording(mut self, on: bool) -> Self {
        self.set_recording(on);
        self
    }

    /// Keep notifications for [`Factory::drain_notifications`].
    ///
    /// Off by default: listeners see every notification either way. Switching off drops
    /// anything pending, including notifications of destroyed instances.
    pub fn set_recording(&mut self, on: bool) {
        self.recording = on;
        for w in self.instances.values_mut() {
            w.set_recording(on);
        }
        if !on {
            self.retired.clear();
        }
    }

    /// Whether notifications are kept for draining.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Options new instances start from.
    pub fn defaults(&self) -> &W::Options {
        &self.defaults
    }

    /// Replace the defaults for instances created from now on.
    pub fn set_defaults(&mut self, defaults: W::Options) {
        self.defaults = defaults;
    }

    /// The instance on `element`.
    pub fn get(&self, element: ElementId) -> Option<&W> {
        self.instances.get(&element)
    }

    /// The instance on `element`, mutably.
    pub fn get_mut(&mut self, element: ElementId) -> Option<&mut W> {
        self.instances.get_mut(&element)
    }

    /// Returns true if `element` has an instance.
    pub fn contains(&self, element: ElementId) -> bool {
        self.instances.contains_key(&element)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if there are no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Elements that have instances, in id order.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.instances.keys().copied()
    }

    /// Construct instances on every uninitialized, live element of `selection`.
    ///
    /// Options are the factory defaults with `patch` applied in order. Returns the
    /// number of instances created.
    pub fn create(
        &mut self,
        tree: &mut ElementTree,
        selection: &[ElementId],
        patch: &[W::Opt],
    ) -> usize {
        let mut options = self.defaults.clone();
        for opt in patch {
            W::merge_option(&mut options, opt.clone());
        }
        self.create_with(tree, selection, options)
    }

    /// Like [`Factory::create`], with the patch given as a JSON object of options.
    pub fn create_json(
        &mut self,
        tree: &mut ElementTree,
        selection: &[ElementId],
        patch: &Value,
    ) -> Result<usize, CallError> {
        let patch = match patch {
            Value::Null => Vec::new(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| method::parse_option::<W::Opt>(k, v))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(CallError::bad_args(W::NAME, "options must be an object")),
        };
        Ok(self.create(tree, selection, &patch))
    }

    fn create_with(
        &mut self,
        tree: &mut ElementTree,
        selection: &[ElementId],
        options: W::Options,
    ) -> usize {
        let mut created = 0;
        for &element in selection {
            if !tree.is_alive(element) {
                log::debug!("{}: skipping stale element {element:?}", W::NAME);
                continue;
            }
            if self.instances.contains_key(&element) {
                continue;
            }
            log::debug!("{}: creating instance on {element:?}", W::NAME);
            let mut instance = W::create(tree, element, options.clone());
            instance.set_recording(self.recording);
            self.instances.insert(element, instance);
            created += 1;
        }
        created
    }

    /// Apply `command` to every initialized element of `selection`.
    ///
    /// Returns the number of instances the command reached.
    pub fn command(
        &mut self,
        tree: &mut ElementTree,
        selection: &[ElementId],
        command: Command<W>,
    ) -> usize {
        let mut reached = 0;
        for &element in selection {
            if !self.instances.contains_key(&element) {
                log::debug!("{}: {command:?} ignored on {element:?}, no instance", W::NAME);
                continue;
            }
            reached += 1;
            self.apply(tree, element, command.clone());
        }
        reached
    }

    fn apply(&mut self, tree: &mut ElementTree, element: ElementId, command: Command<W>) {
        if let Command::Destroy = command {
            self.destroy_instance(tree, element);
            return;
        }
        let Some(w) = self.instances.get_mut(&element) else {
            return;
        };
        match command {
            Command::Enable => w.set_option(tree, W::disabled_option(false)),
            Command::Disable => w.set_option(tree, W::disabled_option(true)),
            Command::SetOption(opt) => w.set_option(tree, opt),
            Command::SetOptions(opts) => {
                for opt in opts {
                    w.set_option(tree, opt);
                }
            }
            Command::Method(m) => w.call(tree, m),
            Command::Destroy => {}
        }
    }

    fn destroy_instance(&mut self, tree: &mut ElementTree, element: ElementId) {
        let Some(mut w) = self.instances.remove(&element) else {
            return;
        };
        log::debug!("{}: destroying instance on {element:?}", W::NAME);
        w.destroy(tree);
        w.base_mut().destroy(tree);
        self.retired.extend(w.drain_notifications());
    }

    /// Read from the first element of `selection`.
    pub fn query(&self, selection: &[ElementId], query: Query<W>) -> Option<Reply<W>> {
        let w = self.instances.get(selection.first()?)?;
        Some(match query {
            Query::Option(key) => Reply::Option(w.option(key)),
            Query::Method(g) => Reply::Method(w.get(g)),
        })
    }

    /// Call a method by name with JSON arguments.
    ///
    /// Getter names (with arguments the widget accepts as a read) and `option` with a
    /// single string key read from the first element. Everything else is a command for
    /// every initialized element. `option` also accepts `(key, value)` and `(map)`.
    pub fn invoke(
        &mut self,
        tree: &mut ElementTree,
        selection: &[ElementId],
        name: &str,
        args: &[Value],
    ) -> Result<Invoked, CallError> {
        if name.starts_with('_') {
            return Err(CallError::Internal(name.into()));
        }

        if name == "option"
            && let [Value::String(key)] = args
        {
            let key = method::parse_option_key::<W::OptKey>(key)?;
            return match self.query(selection, Query::Option(key)) {
                Some(Reply::Option(opt)) => Ok(Invoked::Read(Some(method::option_value(&opt)?))),
                _ => Ok(Invoked::Read(None)),
            };
        }

        if W::GETTERS.contains(&name)
            && let Some(getter) = W::parse_getter(name, args)
        {
            return match self.query(selection, Query::Method(getter)) {
                Some(Reply::Method(answer)) => Ok(Invoked::Read(Some(method::to_json(&answer)?))),
                _ => Ok(Invoked::Read(None)),
            };
        }

        let command = match name {
            "enable" => Command::Enable,
            "disable" => Command::Disable,
            "destroy" => Command::Destroy,
            "option" => match args {
                [Value::String(key), value] => {
                    Command::SetOption(method::parse_option(key, value)?)
                }
                [Value::Object(map)] => Command::SetOptions(
                    map.iter()
                        .map(|(k, v)| method::parse_option(k, v))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                _ => return Err(CallError::bad_args(name, "expected (key), (key, value) or (map)")),
            },
            _ => Command::Method(W::parse_method(name, args)?),
        };
        Ok(Invoked::Applied(self.command(tree, selection, command)))
    }

    /// Destroy instances on `element` and its subtree, then remove it from the tree.
    pub fn remove_element(&mut self, tree: &mut ElementTree, element: ElementId) {
        let doomed: Vec<ElementId> = self
            .instances
            .keys()
            .copied()
            .filter(|&e| e == element || tree.contains(element, e))
            .collect();
        for e in doomed {
            self.destroy_instance(tree, e);
        }
        self.hover.forget(element);
        tree.remove(element);
    }

    /// Take every pending notification, destroyed instances first, then by element.
    pub fn drain_notifications(&mut self) -> Vec<Notification<W::Event, W::Payload>> {
        let mut out = core::mem::take(&mut self.retired);
        for w in self.instances.values_mut() {
            out.extend(w.drain_notifications());
        }
        out
    }

    /// The instance whose element is `element` or its nearest ancestor.
    pub fn owner_of(&self, tree: &ElementTree, element: ElementId) -> Option<ElementId> {
        tree.ancestors_and_self(element)
            .find(|e| self.instances.contains_key(e))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::notify::{Listeners, Notifier};
    use alloc::vec;
    use detent_dom::ElementSpec;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub(crate) struct CounterOptions {
        pub(crate) disabled: bool,
        pub(crate) step: i32,
        pub(crate) start: i32,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "key", content = "value", rename_all = "camelCase")]
    pub(crate) enum CounterOpt {
        Disabled(bool),
        Step(i32),
        Start(i32),
    }

    #[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(crate) enum CounterKey {
        Disabled,
        Step,
        Start,
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) enum CounterEvent {
        Bump,
    }

    impl EventKind for CounterEvent {
        fn as_str(self) -> &'static str {
            "bump"
        }
    }

    /// Minimal widget: a number that `bump` increases by `step`.
    #[derive(Debug)]
    pub(crate) struct Counter {
        base: WidgetBase,
        options: CounterOptions,
        count: i32,
        pub(crate) seen: Vec<&'static str>,
        notifier: Notifier<CounterEvent, i32>,
    }

    impl Widget for Counter {
        const NAME: &'static str = "counter";
        const EVENT_PREFIX: &'static str = "count";
        const GETTERS: &'static [&'static str] = &["count"];

        type Options = CounterOptions;
        type Opt = CounterOpt;
        type OptKey = CounterKey;
        type Method = i32;
        type Getter = ();
        type Answer = i32;
        type Event = CounterEvent;
        type Payload = i32;

        fn merge_option(options: &mut CounterOptions, opt: CounterOpt) {
            match opt {
                CounterOpt::Disabled(v) => options.disabled = v,
                CounterOpt::Step(v) => options.step = v,
                CounterOpt::Start(v) => options.start = v,
            }
        }

        fn disabled_option(disabled: bool) -> CounterOpt {
            CounterOpt::Disabled(disabled)
        }

        fn create(tree: &mut ElementTree, element: ElementId, options: CounterOptions) -> Self {
            let mut base = WidgetBase::new(element, Self::NAMESPACE, Self::NAME);
            tree.add_class(element, "ui-counter");
            if options.disabled {
                base.set_disabled(tree, true);
            }
            Self {
                base,
                count: options.start,
                options,
                seen: Vec::new(),
                notifier: Notifier::new(element, Self::EVENT_PREFIX, Listeners::new()),
            }
        }

        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn options(&self) -> &CounterOptions {
            &self.options
        }

        fn option(&self, key: CounterKey) -> CounterOpt {
            match key {
                CounterKey::Disabled => CounterOpt::Disabled(self.options.disabled),
                CounterKey::Step => CounterOpt::Step(self.options.step),
                CounterKey::Start => CounterOpt::Start(self.options.start),
            }
        }

        fn set_option(&mut self, tree: &mut ElementTree, opt: CounterOpt) {
            if let CounterOpt::Disabled(d) = opt {
                self.base.set_disabled(tree, d);
            }
            Self::merge_option(&mut self.options, opt);
        }

        fn call(&mut self, _tree: &mut ElementTree, times: i32) {
            self.count += times * self.options.step;
            self.notifier.emit(CounterEvent::Bump, self.count);
        }

        fn get(&self, _getter: ()) -> i32 {
            self.count
        }

        fn destroy(&mut self, tree: &mut ElementTree) {
            tree.remove_class(self.base.element(), "ui-counter");
        }

        fn drain_notifications(&mut self) -> Vec<Notification<CounterEvent, i32>> {
            self.notifier.drain()
        }

        fn set_recording(&mut self, on: bool) {
            self.notifier.set_recording(on);
        }

        fn parse_method(name: &str, args: &[Value]) -> Result<i32, CallError> {
            match name {
                "bump" => {
                    let n = method::arg_f64(name, args, 0)?;
                    #[allow(clippy::cast_possible_truncation, reason = "small test counts")]
                    let n = n as i32;
                    Ok(n)
                }
                _ => Err(CallError::UnknownMethod(name.into())),
            }
        }

        fn parse_getter(name: &str, args: &[Value]) -> Option<()> {
            (name == "count" && args.is_empty()).then_some(())
        }

        fn hover(&mut self, _tree: &mut ElementTree, _element: ElementId, entered: bool) {
            self.seen.push(if entered { "enter" } else { "leave" });
        }

        fn focus(&mut self, _tree: &mut ElementTree, _element: ElementId, focused: bool) {
            self.seen.push(if focused { "focus" } else { "blur" });
        }
    }

    fn two_elements() -> (ElementTree, ElementId, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, ElementSpec::new("div"));
        let a = tree.insert(Some(root), ElementSpec::new("div"));
        let b = tree.insert(Some(root), ElementSpec::new("div"));
        (tree, a, b)
    }

    #[test]
    fn options_layer_defaults_then_patch() {
        let (mut tree, a, b) = two_elements();
        let mut f = Factory::<Counter>::with_defaults(CounterOptions {
            step: 2,
            start: 5,
            ..CounterOptions::default()
        });
        assert_eq!(f.create(&mut tree, &[a], &[CounterOpt::Start(10)]), 1);
        assert_eq!(f.create_json(&mut tree, &[a, b], &json!({ "step": 3 })), Ok(1));

        let ca = f.get(a).unwrap().options();
        assert_eq!((ca.step, ca.start), (2, 10));
        let cb = f.get(b).unwrap().options();
        assert_eq!((cb.step, cb.start), (3, 5));
    }

    #[test]
    fn construction_is_idempotent() {
        let (mut tree, a, _) = two_elements();
        let mut f = Factory::<Counter>::new();
        assert_eq!(f.create(&mut tree, &[a], &[CounterOpt::Step(1)]), 1);
        f.command(&mut tree, &[a], Command::Method(4));
        assert_eq!(f.create(&mut tree, &[a], &[CounterOpt::Step(100)]), 0);
        assert_eq!(f.query(&[a], Query::Method(())), Some(Reply::Method(4)));
    }

    #[test]
    fn commands_reach_all_queries_read_first() {
        let (mut tree, a, b) = two_elements();
        let mut f = Factory::<Counter>::new().with_recording(true);
        f.create(&mut tree, &[a], &[CounterOpt::Step(1)]);
        f.create(&mut tree, &[b], &[CounterOpt::Step(1), CounterOpt::Start(50)]);

        assert_eq!(f.command(&mut tree, &[a, b], Command::Method(1)), 2);
        assert_eq!(f.query(&[b, a], Query::Method(())), Some(Reply::Method(51)));
        assert_eq!(
            f.invoke(&mut tree, &[a, b], "count", &[]),
            Ok(Invoked::Read(Some(json!(1))))
        );
        let names: Vec<_> = f.drain_notifications().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["countbump", "countbump"]);
    }

    #[test]
    fn disable_and_destroy_reverse_base_state() {
        let (mut tree, a, _) = two_elements();
        let mut f = Factory::<Counter>::new();
        f.create(&mut tree, &[a], &[]);
        f.command(&mut tree, &[a], Command::Disable);
        assert!(tree.has_class(a, "ui-counter-disabled"));
        assert!(tree.has_class(a, "ui-state-disabled"));
        assert_eq!(tree.attr(a, "aria-disabled"), Some("true"));
        assert!(f.get(a).unwrap().base().is_disabled());

        f.command(&mut tree, &[a], Command::Enable);
        assert!(!tree.has_class(a, "ui-state-disabled"));
        assert_eq!(tree.attr(a, "aria-disabled"), Some("false"));

        f.command(&mut tree, &[a], Command::Disable);
        f.command(&mut tree, &[a], Command::Destroy);
        assert!(!f.contains(a));
        assert!(tree.classes(a).is_empty());
        assert_eq!(tree.attr(a, "aria-disabled"), None);

        // A fresh instance starts from defaults again.
        f.create(&mut tree, &[a], &[]);
        assert!(!f.get(a).unwrap().base().is_disabled());
    }

    #[test]
    fn string_boundary() {
        let (mut tree, a, b) = two_elements();
        let mut f = Factory::<Counter>::new();
        f.create(&mut tree, &[a, b], &[CounterOpt::Step(2)]);

        assert_eq!(
            f.invoke(&mut tree, &[a], "_secret", &[]),
            Err(CallError::Internal("_secret".into()))
        );
        assert_eq!(
            f.invoke(&mut tree, &[a], "explode", &[]),
            Err(CallError::UnknownMethod("explode".into()))
        );
        assert!(matches!(
            f.invoke(&mut tree, &[a], "bump", &[json!("x")]),
            Err(CallError::BadArguments { .. })
        ));
        assert_eq!(
            f.query(&[a], Query::Method(())),
            Some(Reply::Method(0)),
            "failed calls change nothing"
        );

        assert_eq!(f.invoke(&mut tree, &[a, b], "bump", &[json!(3)]), Ok(Invoked::Applied(2)));
        assert_eq!(
            f.invoke(&mut tree, &[b], "option", &[json!("step")]),
            Ok(Invoked::Read(Some(json!(2))))
        );
        assert_eq!(
            f.invoke(&mut tree, &[a, b], "option", &[json!("step"), json!(7)]),
            Ok(Invoked::Applied(2))
        );
        assert_eq!(
            f.invoke(&mut tree, &[a], "option", &[json!({ "step": 1, "start": 9 })]),
            Ok(Invoked::Applied(1))
        );
        assert_eq!(f.get(b).unwrap().options().step, 7);
        assert_eq!(f.get(a).unwrap().options().start, 9);
        assert!(matches!(
            f.invoke(&mut tree, &[a], "option", &[json!("nope")]),
            Err(CallError::BadOption { .. })
        ));
        assert!(matches!(
            f.invoke(&mut tree, &[a], "option", &[]),
            Err(CallError::BadArguments { .. })
        ));

        assert_eq!(f.invoke(&mut tree, &[a], "disable", &[]), Ok(Invoked::Applied(1)));
        assert_eq!(
            f.invoke(&mut tree, &[a], "option", &[json!("disabled")]),
            Ok(Invoked::Read(Some(json!(true))))
        );
    }

    #[test]
    fn uninitialized_elements_are_skipped() {
        let (mut tree, a, b) = two_elements();
        let mut f = Factory::<Counter>::new();
        f.create(&mut tree, &[a], &[]);
        assert_eq!(f.command(&mut tree, &[b], Command::Method(1)), 0);
        assert_eq!(f.query(&[b, a], Query::Method(())), None);
        assert_eq!(f.invoke(&mut tree, &[b], "count", &[]), Ok(Invoked::Read(None)));
        assert_eq!(f.query(&[], Query::Method(())), None);
    }

    #[test]
    fn removing_an_element_destroys_its_subtree() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None, ElementSpec::new("div"));
        let inner = tree.insert(Some(root), ElementSpec::new("div"));
        let other = tree.insert(None, ElementSpec::new("div"));
        let mut f = Factory::<Counter>::new().with_recording(true);
        f.create(&mut tree, &[root, inner, other], &[CounterOpt::Step(1)]);
        f.command(&mut tree, &[inner], Command::Method(1));

        f.remove_element(&mut tree, root);
        assert!(!tree.is_alive(inner));
        assert_eq!(f.elements().collect::<Vec<_>>(), vec![other]);
        assert_eq!(f.drain_notifications().len(), 1, "notifications survive destroy");
    }

    #[test]
    fn nothing_is_kept_unless_recording() {
        let (mut tree, a, b) = two_elements();
        let mut f = Factory::<Counter>::new();
        f.create(&mut tree, &[a, b], &[CounterOpt::Step(1)]);
        for _ in 0..500 {
            f.command(&mut tree, &[a, b], Command::Method(1));
        }
        f.command(&mut tree, &[b], Command::Destroy);
        assert!(f.drain_notifications().is_empty());

        f.set_recording(true);
        f.command(&mut tree, &[a], Command::Method(1));
        assert_eq!(f.drain_notifications().len(), 1);

        f.create(&mut tree, &[b], &[]);
        f.command(&mut tree, &[a, b], Command::Method(1));
        f.command(&mut tree, &[b], Command::Destroy);
        f.set_recording(false);
        assert!(f.drain_notifications().is_empty(), "switching off drops pending");
    }
}
