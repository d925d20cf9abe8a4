// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider configuration.
//!
//! [`SliderOptions`] deserializes from the same JSON shape the classic slider accepted,
//! for example `{"range": true, "values": [20, 80], "animate": "fast"}`.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use detent_widget::Listeners;
use serde::{Deserialize, Serialize};

use crate::event::{SliderEvent, SliderUi};

/// Requested orientation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Decide from the element's aspect ratio.
    #[default]
    Auto,
    /// Values grow left to right.
    Horizontal,
    /// Values grow bottom to top.
    Vertical,
}

/// The orientation a slider actually uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Values grow left to right.
    Horizontal,
    /// Values grow bottom to top.
    Vertical,
}

impl Axis {
    /// `horizontal` or `vertical`, as used in class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Range track display.
///
/// Serialized as `false`, `true`, `"min"` or `"max"`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RangeRepr", into = "RangeRepr")]
pub enum Range {
    /// No range element.
    #[default]
    None,
    /// Two handles with the track between them.
    Both,
    /// Track from the minimum to the handle.
    Min,
    /// Track from the handle to the maximum.
    Max,
}

impl Range {
    /// Returns true if a range element is shown.
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RangeEnd {
    Min,
    Max,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Flag(bool),
    End(RangeEnd),
}

impl From<RangeRepr> for Range {
    fn from(r: RangeRepr) -> Self {
        match r {
            RangeRepr::Flag(false) => Self::None,
            RangeRepr::Flag(true) => Self::Both,
            RangeRepr::End(RangeEnd::Min) => Self::Min,
            RangeRepr::End(RangeEnd::Max) => Self::Max,
        }
    }
}

impl From<Range> for RangeRepr {
    fn from(r: Range) -> Self {
        match r {
            Range::None => Self::Flag(false),
            Range::Both => Self::Flag(true),
            Range::Min => Self::End(RangeEnd::Min),
            Range::Max => Self::End(RangeEnd::Max),
        }
    }
}

/// Whether pointer jumps and `values` writes animate, and for how long.
///
/// Serialized as `false`, `true`, `"fast"`, `"slow"` or a number of milliseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AnimateRepr", into = "AnimateRepr")]
pub enum Animate {
    /// Never animate.
    #[default]
    Off,
    /// 400 ms.
    Normal,
    /// 200 ms.
    Fast,
    /// 600 ms.
    Slow,
    /// A custom duration.
    Millis(u64),
}

impl Animate {
    /// Duration of an animated change, or `None` if changes are immediate.
    pub fn duration(self) -> Option<Duration> {
        let ms = match self {
            Self::Off | Self::Millis(0) => return None,
            Self::Normal => 400,
            Self::Fast => 200,
            Self::Slow => 600,
            Self::Millis(ms) => ms,
        };
        Some(Duration::from_millis(ms))
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Speed {
    Fast,
    Slow,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum AnimateRepr {
    Flag(bool),
    Speed(Speed),
    Millis(u64),
}

impl From<AnimateRepr> for Animate {
    fn from(r: AnimateRepr) -> Self {
        match r {
            AnimateRepr::Flag(false) => Self::Off,
            AnimateRepr::Flag(true) => Self::Normal,
            AnimateRepr::Speed(Speed::Fast) => Self::Fast,
            AnimateRepr::Speed(Speed::Slow) => Self::Slow,
            AnimateRepr::Millis(ms) => Self::Millis(ms),
        }
    }
}

impl From<Animate> for AnimateRepr {
    fn from(a: Animate) -> Self {
        match a {
            Animate::Off => Self::Flag(false),
            Animate::Normal => Self::Flag(true),
            Animate::Fast => Self::Speed(Speed::Fast),
            Animate::Slow => Self::Speed(Speed::Slow),
            Animate::Millis(ms) => Self::Millis(ms),
        }
    }
}

/// Slider configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderOptions {
    /// Animation of pointer jumps and `values` writes.
    pub animate: Animate,
    /// Selector for elements inside the slider that never start a drag.
    pub cancel: Option<String>,
    /// Milliseconds between press and drag start.
    pub delay: u64,
    /// Start disabled.
    pub disabled: bool,
    /// Pixels the pointer must travel before a drag starts.
    pub distance: f64,
    /// Largest value.
    pub max: f64,
    /// Smallest value.
    pub min: f64,
    /// Orientation, or `auto` to decide from the element's shape.
    pub orientation: Orientation,
    /// Range track display.
    pub range: Range,
    /// Distance between selectable values.
    pub step: f64,
    /// The value in single-handle mode.
    pub value: f64,
    /// One value per handle; non-empty selects multi-handle mode.
    pub values: Option<Vec<f64>>,
    /// Notification listeners. Not part of the serialized form.
    #[serde(skip)]
    pub listeners: Listeners<SliderEvent, SliderUi>,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            animate: Animate::Off,
            cancel: None,
            delay: 0,
            disabled: false,
            distance: 0.0,
            max: 100.0,
            min: 0.0,
            orientation: Orientation::Auto,
            range: Range::None,
            step: 1.0,
            value: 0.0,
            values: None,
            listeners: Listeners::new(),
        }
    }
}

impl SliderOptions {
    /// Returns true when `values` selects multi-handle mode.
    pub fn is_multi(&self) -> bool {
        self.values.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Warn about settings that make the slider degenerate.
    pub(crate) fn check(&self) {
        if self.min > self.max {
            log::warn!("slider min {} is greater than max {}", self.min, self.max);
        }
        if self.step <= 0.0 {
            log::warn!("slider step {} is not positive; values will not snap", self.step);
        }
    }

    /// Apply one assignment.
    pub fn apply(&mut self, opt: SliderOption) {
        match opt {
            SliderOption::Animate(v) => self.animate = v,
            SliderOption::Cancel(v) => self.cancel = v,
            SliderOption::Delay(v) => self.delay = v,
            SliderOption::Disabled(v) => self.disabled = v,
            SliderOption::Distance(v) => self.distance = v,
            SliderOption::Max(v) => self.max = v,
            SliderOption::Min(v) => self.min = v,
            SliderOption::Orientation(v) => self.orientation = v,
            SliderOption::Range(v) => self.range = v,
            SliderOption::Step(v) => self.step = v,
            SliderOption::Value(v) => self.value = v,
            SliderOption::Values(v) => self.values = v,
        }
    }

    /// Read one option as an assignment.
    pub fn get(&self, key: SliderOptionKey) -> SliderOption {
        match key {
            SliderOptionKey::Animate => SliderOption::Animate(self.animate),
            SliderOptionKey::Cancel => SliderOption::Cancel(self.cancel.clone()),
            SliderOptionKey::Delay => SliderOption::Delay(self.delay),
            SliderOptionKey::Disabled => SliderOption::Disabled(self.disabled),
            SliderOptionKey::Distance => SliderOption::Distance(self.distance),
            SliderOptionKey::Max => SliderOption::Max(self.max),
            SliderOptionKey::Min => SliderOption::Min(self.min),
            SliderOptionKey::Orientation => SliderOption::Orientation(self.orientation),
            SliderOptionKey::Range => SliderOption::Range(self.range),
            SliderOptionKey::Step => SliderOption::Step(self.step),
            SliderOptionKey::Value => SliderOption::Value(self.value),
            SliderOptionKey::Values => SliderOption::Values(self.values.clone()),
        }
    }
}

/// One option assignment, serialized as `{"key": .., "value": ..}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum SliderOption {
    /// See [`SliderOptions::animate`].
    Animate(Animate),
    /// See [`SliderOptions::cancel`].
    Cancel(Option<String>),
    /// See [`SliderOptions::delay`].
    Delay(u64),
    /// See [`SliderOptions::disabled`].
    Disabled(bool),
    /// See [`SliderOptions::distance`].
    Distance(f64),
    /// See [`SliderOptions::max`].
    Max(f64),
    /// See [`SliderOptions::min`].
    Min(f64),
    /// See [`SliderOptions::orientation`].
    Orientation(Orientation),
    /// See [`SliderOptions::range`].
    Range(Range),
    /// See [`SliderOptions::step`].
    Step(f64),
    /// See [`SliderOptions::value`].
    Value(f64),
    /// See [`SliderOptions::values`].
    Values(Option<Vec<f64>>),
}

impl SliderOption {
    /// The option this assignment writes.
    pub fn key(&self) -> SliderOptionKey {
        match self {
            Self::Animate(_) => SliderOptionKey::Animate,
            Self::Cancel(_) => SliderOptionKey::Cancel,
            Self::Delay(_) => SliderOptionKey::Delay,
            Self::Disabled(_) => SliderOptionKey::Disabled,
            Self::Distance(_) => SliderOptionKey::Distance,
            Self::Max(_) => SliderOptionKey::Max,
            Self::Min(_) => SliderOptionKey::Min,
            Self::Orientation(_) => SliderOptionKey::Orientation,
            Self::Range(_) => SliderOptionKey::Range,
            Self::Step(_) => SliderOptionKey::Step,
            Self::Value(_) => SliderOptionKey::Value,
            Self::Values(_) => SliderOptionKey::Values,
        }
    }
}

/// An option name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SliderOptionKey {
    /// `animate`
    Animate,
    /// `cancel`
    Cancel,
    /// `delay`
    Delay,
    /// `disabled`
    Disabled,
    /// `distance`
    Distance,
    /// `max`
    Max,
    /// `min`
    Min,
    /// `orientation`
    Orientation,
    /// `range`
    Range,
    /// `step`
    Step,
    /// `value`
    Value,
    /// `values`
    Values,
}
