// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slider widget.

use alloc::format;
use alloc::vec::Vec;
use core::time::Duration;

use detent_dom::{ElementId, ElementSpec, ElementTree, Key, Selector, Style, Transition};
use detent_widget::classes::{
    CORNER_ALL, STATE_ACTIVE, STATE_DEFAULT, STATE_FOCUS, STATE_HOVER, WIDGET, WIDGET_CONTENT,
    WIDGET_HEADER,
};
use detent_widget::{
    CallError, KeyEvent, MouseHooks, MouseInteraction, MouseOptions, Notification, Notifier,
    Outcome, PointerEvent, Widget, WidgetBase, method,
};
use kurbo::{Point, Rect, Vec2};
use serde::Serialize;
use serde_json::Value;

use crate::event::{SliderEvent, SliderUi};
use crate::options::{Axis, Orientation, Range, SliderOption, SliderOptionKey, SliderOptions};
use crate::value;

/// Class marking handle elements.
pub const HANDLE_CLASS: &str = "ui-slider-handle";
/// Class marking the range element.
pub const RANGE_CLASS: &str = "ui-slider-range";

const ORIENTATION_CLASSES: &str = "ui-slider-horizontal ui-slider-vertical";

/// Slider-specific commands.
#[derive(Clone, Debug, PartialEq)]
pub enum SliderMethod {
    /// Store a new single value, refresh, and report a change.
    SetValue(f64),
    /// Store a new value for one handle, refresh, and report a change.
    SetValues {
        /// Handle index. In single-handle mode only `0` is accepted.
        index: usize,
        /// New value, stored as given and clamped on read.
        value: f64,
        /// Animate the move if the `animate` option allows it.
        animate: bool,
    },
}

/// Slider-specific reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SliderGetter {
    /// The single value.
    Value,
    /// All values, or one handle's value.
    Values(Option<usize>),
}

/// Result of a [`SliderGetter`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SliderAnswer {
    /// One value.
    Value(f64),
    /// One value per handle.
    Values(Vec<f64>),
    /// The requested handle does not exist.
    Missing,
}

/// A slider bound to one element.
///
/// Owns the press/drag state machine; everything else lives in the inner state that the
/// machine calls back into.
#[derive(Debug)]
pub struct Slider {
    mouse: MouseInteraction,
    core: SliderCore,
}

#[derive(Debug)]
struct SliderCore {
    base: WidgetBase,
    options: SliderOptions,
    axis: Axis,
    handles: Vec<ElementId>,
    range: Option<ElementId>,
    handle_index: Option<usize>,
    click_offset: Vec2,
    element_rect: Rect,
    key_sliding: bool,
    notifier: Notifier<SliderEvent, SliderUi>,
}

/// Pick horizontal or vertical for `orientation` on an element of the given bounds.
pub fn resolve_axis(orientation: Orientation, bounds: Rect) -> Axis {
    match orientation {
        Orientation::Horizontal => Axis::Horizontal,
        Orientation::Vertical => Axis::Vertical,
        Orientation::Auto => {
            let (w, h) = (bounds.width(), bounds.height());
            let wide = if h > 0.0 { w / h > 1.0 } else { w > 0.0 };
            if wide { Axis::Horizontal } else { Axis::Vertical }
        }
    }
}

fn mouse_options(options: &SliderOptions) -> MouseOptions {
    let cancel = match options.cancel.as_deref() {
        None => None,
        Some(text) => match Selector::parse(text) {
            Ok(sel) => Some(sel),
            Err(e) => {
                log::warn!("ignoring slider cancel selector: {e}");
                None
            }
        },
    };
    MouseOptions {
        cancel,
        distance: options.distance,
        delay: Duration::from_millis(options.delay),
    }
}

fn position_style(axis: Axis, percent: f64) -> Style {
    match axis {
        Axis::Horizontal => Style {
            left: Some(percent),
            ..Style::default()
        },
        Axis::Vertical => Style {
            bottom: Some(percent),
            ..Style::default()
        },
    }
}

impl SliderCore {
    fn element(&self) -> ElementId {
        self.base.element()
    }

    fn is_multi(&self) -> bool {
        self.options.is_multi()
    }

    fn clamp(&self, v: f64) -> f64 {
        value::clamp(v, self.options.min, self.options.max)
    }

    fn value(&self) -> f64 {
        self.clamp(self.options.value)
    }

    fn values(&self) -> Vec<f64> {
        match &self.options.values {
            Some(vs) if !vs.is_empty() => vs.iter().map(|&v| self.clamp(v)).collect(),
            _ => alloc::vec![self.value()],
        }
    }

    /// Value of handle `index`. Single-handle mode answers the value for any index.
    fn value_of(&self, index: usize) -> Option<f64> {
        match &self.options.values {
            Some(vs) if !vs.is_empty() => vs.get(index).map(|&v| self.clamp(v)),
            _ => Some(self.value()),
        }
    }

    /// Handles that carry a value.
    fn active_handles(&self) -> usize {
        let wanted = match &self.options.values {
            Some(vs) if !vs.is_empty() => vs.len(),
            _ => 1,
        };
        wanted.min(self.handles.len())
    }

    fn handle_index_of(&self, element: ElementId) -> Option<usize> {
        self.handles
            .iter()
            .take(self.active_handles())
            .position(|&h| h == element)
    }

    fn over_handle(&self, tree: &ElementTree, target: ElementId) -> bool {
        self.handles
            .iter()
            .any(|&h| h == target || tree.contains(h, target))
    }

    fn ui(&self, handle: Option<usize>) -> SliderUi {
        SliderUi {
            handle,
            value: handle
                .and_then(|i| self.value_of(i))
                .unwrap_or_else(|| self.value()),
            values: self.is_multi().then(|| self.values()),
        }
    }

    fn emit(&mut self, kind: SliderEvent, ui: SliderUi) -> Outcome {
        self.notifier.emit(kind, ui)
    }

    fn transition(&self, animate: bool) -> Transition {
        match self.options.animate.duration() {
            Some(d) if animate => Transition::Animated(d),
            _ => Transition::Immediate,
        }
    }

    fn set_focus_class(&self, tree: &mut ElementTree, handle: ElementId) {
        for &h in &self.handles {
            tree.remove_class(h, STATE_FOCUS);
        }
        tree.add_class(handle, STATE_FOCUS);
    }

    /// With a range between two handles, make sure there are exactly two values.
    fn normalize_values(&mut self) {
        if self.options.range != Range::Both {
            return;
        }
        let min = self.options.min;
        match &mut self.options.values {
            None => self.options.values = Some(alloc::vec![min, min]),
            Some(vs) if !vs.is_empty() && vs.len() != 2 => {
                let first = vs[0];
                *vs = alloc::vec![first, first];
            }
            Some(_) => {}
        }
    }

    fn build_range(&mut self, tree: &mut ElementTree) {
        if !self.options.range.is_enabled() {
            return;
        }
        let range = tree.insert(
            Some(self.element()),
            ElementSpec::new("div").with_class(RANGE_CLASS).with_class(WIDGET_HEADER),
        );
        let pin = match (self.options.range, self.axis) {
            (Range::Min, Axis::Horizontal) => Style {
                left: Some(0.0),
                ..Style::default()
            },
            (Range::Max, Axis::Horizontal) => Style {
                right: Some(0.0),
                ..Style::default()
            },
            (Range::Min, Axis::Vertical) => Style {
                bottom: Some(0.0),
                ..Style::default()
            },
            (Range::Max, Axis::Vertical) => Style {
                top: Some(0.0),
                ..Style::default()
            },
            _ => Style::default(),
        };
        tree.apply_style(range, pin, Transition::Immediate);
        self.range = Some(range);
    }

    fn remove_range(&mut self, tree: &mut ElementTree) {
        if let Some(range) = self.range.take() {
            tree.remove(range);
        }
    }

    /// Adopt existing handles, then add handles until every value has one.
    fn sync_handles(&mut self, tree: &mut ElementTree) {
        let element = self.element();
        if self.handles.is_empty() {
            self.handles = tree.descendants_with_class(element, HANDLE_CLASS);
        }
        let wanted = match &self.options.values {
            Some(vs) => vs.len().max(1),
            None => 1,
        };
        while self.handles.len() < wanted {
            let handle = tree.insert(
                Some(element),
                ElementSpec::new("a").with_attr("href", "#").with_class(HANDLE_CLASS),
            );
            self.handles.push(handle);
        }
        for &h in &self.handles {
            tree.add_class(h, STATE_DEFAULT);
            tree.add_class(h, CORNER_ALL);
        }
    }

    fn reorient(&mut self, tree: &mut ElementTree) {
        let element = self.element();
        let axis = resolve_axis(
            self.options.orientation,
            tree.bounds(element).unwrap_or(Rect::ZERO),
        );
        tree.remove_class(element, ORIENTATION_CLASSES);
        tree.add_class(element, &format!("ui-slider-{}", axis.as_str()));
        if axis != self.axis {
            self.axis = axis;
            for &h in &self.handles {
                tree.clear_style(h);
            }
            self.remove_range(tree);
            self.build_range(tree);
        }
        self.refresh(tree, false);
    }

    /// Write handle and range styles for the current values.
    fn refresh(&self, tree: &mut ElementTree, animate: bool) {
        let t = self.transition(animate);
        let (min, max) = (self.options.min, self.options.max);
        let horizontal = self.axis == Axis::Horizontal;

        if self.is_multi() {
            let values = self.values();
            let mut last = 0.0;
            for (i, (&h, &v)) in self.handles.iter().zip(&values).enumerate() {
                let p = value::percent(v, min, max);
                tree.apply_style(h, position_style(self.axis, p), t);
                if self.options.range == Range::Both
                    && let Some(range) = self.range
                {
                    let style = match (i, horizontal) {
                        (0, true) => Style {
                            left: Some(p),
                            ..Style::default()
                        },
                        (0, false) => Style {
                            bottom: Some(p),
                            ..Style::default()
                        },
                        (1, true) => Style {
                            width: Some(p - last),
                            ..Style::default()
                        },
                        (1, false) => Style {
                            height: Some(p - last),
                            ..Style::default()
                        },
                        _ => Style::default(),
                    };
                    tree.apply_style(range, style, t);
                }
                last = p;
            }
            return;
        }

        let p = value::percent(self.value(), min, max);
        if let Some(&h) = self.handles.first() {
            tree.apply_style(h, position_style(self.axis, p), t);
        }
        let Some(range) = self.range else {
            return;
        };
        let style = match (self.options.range, horizontal) {
            (Range::Min, true) => Style {
                left: Some(0.0),
                width: Some(p),
                ..Style::default()
            },
            (Range::Max, true) => Style {
                left: Some(p),
                width: Some(100.0 - p),
                ..Style::default()
            },
            (Range::Min, false) => Style {
                top: Some(100.0 - p),
                height: Some(p),
                ..Style::default()
            },
            (Range::Max, false) => Style {
                bottom: Some(p),
                height: Some(100.0 - p),
                ..Style::default()
            },
            _ => return,
        };
        tree.apply_style(range, style, t);
    }

    /// Propose `candidate` for handle `index`; commit unless a listener cancels.
    fn slide(&mut self, tree: &mut ElementTree, index: usize, candidate: f64, animate: bool) {
        let Some(current) = self.value_of(index) else {
            log::debug!("slide to missing handle {index} ignored");
            return;
        };
        let mut v = self.clamp(candidate);
        let mut proposed = None;
        if self.is_multi() {
            let mut values = self.values();
            if index > 0 {
                v = v.max(values[index - 1]);
            }
            if index + 1 < values.len() {
                v = v.min(values[index + 1]);
            }
            values[index] = v;
            proposed = Some(values);
        }
        if v == current {
            return;
        }

        let ui = SliderUi {
            handle: Some(index),
            value: v,
            values: proposed,
        };
        if self.emit(SliderEvent::Slide, ui).is_cancel() {
            log::trace!("slide of handle {index} to {v} cancelled");
            return;
        }
        log::trace!("handle {index}: {current} -> {v}");
        match self.options.values.as_mut() {
            Some(vs) if !vs.is_empty() => vs[index] = v,
            _ => self.options.value = v,
        }
        self.refresh(tree, animate);
    }

    fn value_from_pointer(&self, position: Point) -> f64 {
        let rect = self.element_rect;
        let p = position - self.click_offset;
        let f = match self.axis {
            Axis::Horizontal => value::fraction(p.x, rect.x0, rect.width()),
            Axis::Vertical if rect.height() <= 0.0 => 0.0,
            Axis::Vertical => 1.0 - value::fraction(p.y, rect.y0, rect.height()),
        };
        value::value_at_fraction(f, self.options.min, self.options.max, self.options.step)
    }

    fn set_value(&mut self, tree: &mut ElementTree, v: f64) {
        self.options.value = v;
        self.refresh(tree, false);
        let ui = self.ui(None);
        self.emit(SliderEvent::Change, ui);
    }

    fn set_values(&mut self, tree: &mut ElementTree, index: usize, v: f64, animate: bool) {
        match self.options.values.as_mut() {
            Some(vs) if !vs.is_empty() => {
                let Some(slot) = vs.get_mut(index) else {
                    log::debug!("values({index}) out of range ignored");
                    return;
                };
                *slot = v;
            }
            _ if index == 0 => self.options.value = v,
            _ => {
                log::debug!("values({index}) on a single-handle slider ignored");
                return;
            }
        }
        self.refresh(tree, animate);
        let ui = self.ui(Some(index));
        self.emit(SliderEvent::Change, ui);
    }

    fn key_down(&mut self, tree: &mut ElementTree, event: &mut KeyEvent) {
        if self.base.is_disabled() {
            return;
        }
        let Some(index) = self.handle_index_of(event.target) else {
            return;
        };
        if !matches!(
            event.key,
            Key::Home | Key::End | Key::Up | Key::Right | Key::Down | Key::Left
        ) {
            return;
        }
        let Some(current) = self.value_of(index) else {
            return;
        };
        let (min, max, step) = (self.options.min, self.options.max, self.options.step);
        let next = match event.key {
            Key::Home => min,
            Key::End => max,
            Key::Up | Key::Right => {
                if current == max {
                    return;
                }
                current + step
            }
            _ => {
                if current == min {
                    return;
                }
                current - step
            }
        };
        event.prevent_default();
        if !self.key_sliding {
            self.key_sliding = true;
            tree.add_class(self.handles[index], STATE_ACTIVE);
            let ui = self.ui(Some(index));
            self.emit(SliderEvent::Start, ui);
        }
        self.slide(tree, index, next, false);
    }

    fn key_up(&mut self, tree: &mut ElementTree, event: &mut KeyEvent) {
        if !self.key_sliding {
            return;
        }
        let ui = self.ui(self.handle_index_of(event.target));
        self.emit(SliderEvent::Stop, ui.clone());
        self.emit(SliderEvent::Change, ui);
        self.key_sliding = false;
        tree.remove_class(event.target, STATE_ACTIVE);
    }
}

impl MouseHooks for SliderCore {
    fn mouse_capture(&mut self, tree: &mut ElementTree, event: &PointerEvent) -> bool {
        if self.base.is_disabled() {
            return false;
        }
        self.element_rect = tree.bounds(self.element()).unwrap_or(Rect::ZERO);
        self.click_offset = Vec2::ZERO;

        let at = self.value_from_pointer(event.position);
        let current: Vec<f64> = (0..self.active_handles())
            .filter_map(|i| self.value_of(i))
            .collect();
        let Some(mut index) = value::nearest(&current, at) else {
            return false;
        };
        // Two range handles parked at the minimum: only the upper one can move.
        if self.options.range == Range::Both
            && let [a, b] = current[..]
            && a == self.options.min
            && b == self.options.min
        {
            index = 1;
        }

        let handle = self.handles[index];
        self.handle_index = Some(index);
        tree.add_class(handle, STATE_ACTIVE);
        tree.focus(handle);
        self.set_focus_class(tree, handle);

        if self.over_handle(tree, event.target) {
            let origin = tree.bounds(handle).map(|r| r.origin()).unwrap_or(Point::ZERO);
            self.click_offset = event.position - origin + tree.margin(handle);
        }

        let ui = self.ui(Some(index));
        self.emit(SliderEvent::Start, ui);
        let v = self.value_from_pointer(event.position);
        self.slide(tree, index, v, true);
        true
    }

    fn mouse_drag(&mut self, tree: &mut ElementTree, event: &PointerEvent) {
        let Some(index) = self.handle_index else {
            return;
        };
        let v = self.value_from_pointer(event.position);
        self.slide(tree, index, v, false);
    }

    fn mouse_stop(&mut self, tree: &mut ElementTree, _event: &PointerEvent) {
        for &h in &self.handles {
            tree.remove_class(h, STATE_ACTIVE);
        }
        let ui = self.ui(self.handle_index);
        self.emit(SliderEvent::Stop, ui.clone());
        self.emit(SliderEvent::Change, ui);
        self.handle_index = None;
        self.click_offset = Vec2::ZERO;
    }
}

impl Slider {
    /// The single value, clamped.
    pub fn value(&self) -> f64 {
        self.core.value()
    }

    /// Every handle's value, clamped. Single-handle mode gives `[value]`.
    pub fn values(&self) -> Vec<f64> {
        self.core.values()
    }

    /// Handle elements, in index order.
    pub fn handles(&self) -> &[ElementId] {
        &self.core.handles
    }

    /// The range element, if a range is shown.
    pub fn range_element(&self) -> Option<ElementId> {
        self.core.range
    }

    /// The resolved orientation.
    pub fn axis(&self) -> Axis {
        self.core.axis
    }

    /// Handle being dragged.
    pub fn active_handle(&self) -> Option<usize> {
        self.core.handle_index
    }

    /// Returns true between the first accepted key press and the key release.
    pub fn is_key_sliding(&self) -> bool {
        self.core.key_sliding
    }

    /// The press/drag state machine.
    pub fn mouse(&self) -> &MouseInteraction {
        &self.mouse
    }
}

impl Widget for Slider {
    const NAME: &'static str = "slider";
    const EVENT_PREFIX: &'static str = "slide";
    const GETTERS: &'static [&'static str] = &["value", "values"];

    type Options = SliderOptions;
    type Opt = SliderOption;
    type OptKey = SliderOptionKey;
    type Method = SliderMethod;
    type Getter = SliderGetter;
    type Answer = SliderAnswer;
    type Event = SliderEvent;
    type Payload = SliderUi;

    fn merge_option(options: &mut SliderOptions, opt: SliderOption) {
        options.apply(opt);
    }

    fn disabled_option(disabled: bool) -> SliderOption {
        SliderOption::Disabled(disabled)
    }

    fn create(tree: &mut ElementTree, element: ElementId, options: SliderOptions) -> Self {
        options.check();
        let axis = resolve_axis(
            options.orientation,
            tree.bounds(element).unwrap_or(Rect::ZERO),
        );
        let mouse = MouseInteraction::new(mouse_options(&options));
        let notifier = Notifier::new(element, Self::EVENT_PREFIX, options.listeners.clone());
        let mut core = SliderCore {
            base: WidgetBase::new(element, Self::NAMESPACE, Self::NAME),
            options,
            axis,
            handles: Vec::new(),
            range: None,
            handle_index: None,
            click_offset: Vec2::ZERO,
            element_rect: Rect::ZERO,
            key_sliding: false,
            notifier,
        };

        tree.add_class(
            element,
            &format!(
                "ui-slider ui-slider-{} {WIDGET} {WIDGET_CONTENT} {CORNER_ALL}",
                axis.as_str()
            ),
        );
        core.normalize_values();
        core.build_range(tree);
        core.sync_handles(tree);
        if core.options.disabled {
            core.base.set_disabled(tree, true);
        }
        core.refresh(tree, false);
        log::debug!(
            "slider on {element:?}: {} handle(s), {}",
            core.handles.len(),
            axis.as_str()
        );
        Self { mouse, core }
    }

    fn base(&self) -> &WidgetBase {
        &self.core.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.core.base
    }

    fn options(&self) -> &SliderOptions {
        &self.core.options
    }

    fn option(&self, key: SliderOptionKey) -> SliderOption {
        self.core.options.get(key)
    }

    fn set_option(&mut self, tree: &mut ElementTree, opt: SliderOption) {
        let key = opt.key();
        let core = &mut self.core;
        core.options.apply(opt);
        match key {
            SliderOptionKey::Disabled => {
                let disabled = core.options.disabled;
                core.base.set_disabled(tree, disabled);
            }
            SliderOptionKey::Orientation => core.reorient(tree),
            SliderOptionKey::Range => {
                core.normalize_values();
                core.remove_range(tree);
                core.build_range(tree);
                core.sync_handles(tree);
                core.refresh(tree, false);
            }
            SliderOptionKey::Values => {
                core.sync_handles(tree);
                core.refresh(tree, false);
            }
            SliderOptionKey::Min | SliderOptionKey::Max | SliderOptionKey::Step => {
                core.options.check();
                core.refresh(tree, false);
            }
            SliderOptionKey::Value => core.refresh(tree, false),
            SliderOptionKey::Delay | SliderOptionKey::Distance | SliderOptionKey::Cancel => {
                self.mouse.set_options(mouse_options(&core.options));
            }
            SliderOptionKey::Animate => {}
        }
    }

    fn call(&mut self, tree: &mut ElementTree, method: SliderMethod) {
        match method {
            SliderMethod::SetValue(v) => self.core.set_value(tree, v),
            SliderMethod::SetValues {
                index,
                value,
                animate,
            } => self.core.set_values(tree, index, value, animate),
        }
    }

    fn get(&self, getter: SliderGetter) -> SliderAnswer {
        match getter {
            SliderGetter::Value => SliderAnswer::Value(self.core.value()),
            SliderGetter::Values(None) => SliderAnswer::Values(self.core.values()),
            SliderGetter::Values(Some(i)) => self
                .core
                .value_of(i)
                .map_or(SliderAnswer::Missing, SliderAnswer::Value),
        }
    }

    fn destroy(&mut self, tree: &mut ElementTree) {
        for h in self.core.handles.drain(..) {
            tree.remove(h);
        }
        self.core.remove_range(tree);
        let element = self.core.element();
        tree.remove_class(element, &format!("ui-slider {ORIENTATION_CLASSES} ui-slider-disabled"));
        tree.remove_class(element, &format!("{WIDGET} {WIDGET_CONTENT} {CORNER_ALL}"));
        self.mouse.teardown();
        self.core.key_sliding = false;
        self.core.handle_index = None;
    }

    fn drain_notifications(&mut self) -> Vec<Notification<SliderEvent, SliderUi>> {
        self.core.notifier.drain()
    }

    fn set_recording(&mut self, on: bool) {
        self.core.notifier.set_recording(on);
    }

    fn parse_method(name: &str, args: &[Value]) -> Result<SliderMethod, CallError> {
        match name {
            "value" => Ok(SliderMethod::SetValue(method::arg_f64(name, args, 0)?)),
            "values" => {
                if args.len() < 2 {
                    return Err(CallError::bad_args(name, "expected (index, value[, animate])"));
                }
                Ok(SliderMethod::SetValues {
                    index: method::arg_index(name, args, 0)?,
                    value: method::arg_f64(name, args, 1)?,
                    animate: method::arg_bool_or(name, args, 2, true)?,
                })
            }
            _ => Err(CallError::UnknownMethod(name.into())),
        }
    }

    fn parse_getter(name: &str, args: &[Value]) -> Option<SliderGetter> {
        match (name, args) {
            ("value", []) => Some(SliderGetter::Value),
            ("values", []) => Some(SliderGetter::Values(None)),
            ("values", [i]) => i
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(|i| SliderGetter::Values(Some(i))),
            _ => None,
        }
    }

    fn pointer_down(&mut self, tree: &mut ElementTree, event: &mut PointerEvent) -> bool {
        self.mouse.pointer_down(&mut self.core, tree, event)
    }

    fn pointer_move(&mut self, tree: &mut ElementTree, event: &mut PointerEvent) {
        self.mouse.pointer_move(&mut self.core, tree, event);
    }

    fn pointer_up(&mut self, tree: &mut ElementTree, event: &PointerEvent) {
        self.mouse.pointer_up(&mut self.core, tree, event);
    }

    fn click(&mut self, tree: &mut ElementTree, event: &mut PointerEvent) -> bool {
        if !self.mouse.click(event) {
            return false;
        }
        if self.core.over_handle(tree, event.target) {
            event.prevent_default();
        }
        true
    }

    fn is_tracking(&self) -> bool {
        self.mouse.is_tracking()
    }

    fn key_down(&mut self, tree: &mut ElementTree, event: &mut KeyEvent) {
        self.core.key_down(tree, event);
    }

    fn key_up(&mut self, tree: &mut ElementTree, event: &mut KeyEvent) {
        self.core.key_up(tree, event);
    }

    fn hover(&mut self, tree: &mut ElementTree, element: ElementId, entered: bool) {
        if self.core.handles.contains(&element) {
            tree.toggle_class(element, STATE_HOVER, entered);
        }
    }

    fn focus(&mut self, tree: &mut ElementTree, element: ElementId, focused: bool) {
        if !self.core.handles.contains(&element) {
            return;
        }
        if focused {
            self.core.set_focus_class(tree, element);
        } else {
            tree.remove_class(element, STATE_FOCUS);
        }
    }
}
