// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slider notifications.

use alloc::vec::Vec;

use detent_widget::EventKind;
use serde::Serialize;

/// What a slider reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SliderEvent {
    /// A pointer or keyboard interaction began (`slidestart`).
    Start,
    /// A handle is about to move (`slide`). Listeners may cancel it.
    Slide,
    /// An interaction ended (`slidestop`).
    Stop,
    /// A value was committed (`slidechange`).
    Change,
}

impl EventKind for SliderEvent {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Slide => "slide",
            Self::Stop => "stop",
            Self::Change => "change",
        }
    }
}

/// Payload of every slider notification.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SliderUi {
    /// Index of the handle involved, when there is one.
    pub handle: Option<usize>,
    /// The handle's value (the proposed value for `slide`).
    pub value: f64,
    /// Every handle's value in multi-handle mode (proposed values for `slide`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
}
