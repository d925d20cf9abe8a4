// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared theme class names.

/// Outer element of every widget.
pub const WIDGET: &str = "ui-widget";
/// Content container.
pub const WIDGET_CONTENT: &str = "ui-widget-content";
/// Header or emphasized region.
pub const WIDGET_HEADER: &str = "ui-widget-header";
/// Rounded corners on all sides.
pub const CORNER_ALL: &str = "ui-corner-all";

/// Clickable element at rest.
pub const STATE_DEFAULT: &str = "ui-state-default";
/// Pointer is over the element.
pub const STATE_HOVER: &str = "ui-state-hover";
/// Element has keyboard focus.
pub const STATE_FOCUS: &str = "ui-state-focus";
/// Element is being pressed or dragged.
pub const STATE_ACTIVE: &str = "ui-state-active";
