// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, flags, element specs, and styles.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Rect, Vec2};

/// Identifier for an element in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct
///   `ElementId`.
///
/// ### Newer
///
/// An `ElementId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This order is used only for deterministic tie-breaks in
/// [hit testing](crate::ElementTree::hit_test_point).
///
/// ### Liveness
///
/// Use [`ElementTree::is_alive`](crate::ElementTree::is_alive) to check whether an `ElementId`
/// still refers to a live element. Stale ids never alias a different live element because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Element is visible (rendered, focusable).
        const VISIBLE  = 0b0000_0001;
        /// Element is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Everything needed to insert an element.
///
/// Bounds are in world space; the host's layout pass owns them and pushes
/// updates with [`ElementTree::set_bounds`](crate::ElementTree::set_bounds).
#[derive(Clone, Debug)]
pub struct ElementSpec {
    /// Lowercase tag name (`div`, `a`, `input`, ...).
    pub tag: String,
    /// World-space border box.
    pub bounds: Rect,
    /// Offset between the border box origin and the point percentage styles position.
    ///
    /// A handle centered on its position typically has a negative margin of half its size.
    pub margin: Vec2,
    /// Stacking order among overlapping elements. Higher is on top.
    pub z_index: i32,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
    /// Initial classes, in order.
    pub classes: Vec<String>,
    /// Initial attributes.
    pub attributes: Vec<(String, String)>,
}

impl ElementSpec {
    /// A visible, pickable element with the given tag and no geometry.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            bounds: Rect::ZERO,
            margin: Vec2::ZERO,
            z_index: 0,
            flags: NodeFlags::default(),
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the world-space bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the positioning margin.
    pub fn with_margin(mut self, margin: Vec2) -> Self {
        self.margin = margin;
        self
    }

    /// Set the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add one or more whitespace-separated classes.
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.into());
            }
        }
        self
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self::new("div")
    }
}

/// Percentage-based inline style.
///
/// Every field is a percentage of the containing element. `None` means unset.
/// When used as a patch (see [`ElementTree::apply_style`](crate::ElementTree::apply_style)),
/// only the `Some` fields are written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    /// Offset from the left edge.
    pub left: Option<f64>,
    /// Offset from the right edge.
    pub right: Option<f64>,
    /// Offset from the top edge.
    pub top: Option<f64>,
    /// Offset from the bottom edge.
    pub bottom: Option<f64>,
    /// Extent along the horizontal axis.
    pub width: Option<f64>,
    /// Extent along the vertical axis.
    pub height: Option<f64>,
}

impl Style {
    /// Merge the `Some` fields of `patch` into `self`.
    pub fn merge(&mut self, patch: &Self) {
        fn take(dst: &mut Option<f64>, src: Option<f64>) {
            if src.is_some() {
                *dst = src;
            }
        }
        take(&mut self.left, patch.left);
        take(&mut self.right, patch.right);
        take(&mut self.top, patch.top);
        take(&mut self.bottom, patch.bottom);
        take(&mut self.width, patch.width);
        take(&mut self.height, patch.height);
    }
}

/// How a style change should be presented.
///
/// The tree records the last transition applied to each element; the renderer
/// decides how to animate. Nothing in this workspace waits on a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    /// Apply the new style at once.
    #[default]
    Immediate,
    /// Animate toward the new style over the given duration.
    Animated(Duration),
}

impl Transition {
    /// Returns true for [`Transition::Animated`].
    pub fn is_animated(self) -> bool {
        matches!(self, Self::Animated(_))
    }
}
