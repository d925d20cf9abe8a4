// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detent DOM: a headless element tree for widgets.
//!
//! Widgets in the Detent workspace never touch a real document. They read and write this tree
//! instead, and the host mirrors it into whatever it renders with.
//!
//! - Elements carry a tag, an ordered class list, attributes, a percentage [`Style`], and
//!   world-space bounds supplied by the host's layout pass.
//! - [`ElementTree::apply_style`] records a [`Transition`] next to each style change so the host
//!   can animate it.
//! - [`ElementTree::commit`] reports which elements changed since the last commit.
//! - [`Selector`] parses simple selectors (`a.handle`, `#id`, lists) for
//!   [`ElementTree::closest_matching`].
//! - [`Key`] names the keyboard keys widgets care about.
//!
//! ## Not a layout engine
//!
//! Nothing here measures or arranges. Bounds come from the host and stay as given until
//! [`ElementTree::set_bounds`] changes them.
//!
//! ## Minimal usage
//!
//! ```
//! use detent_dom::{ElementSpec, ElementTree, QueryFilter, Selector};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = ElementTree::new();
//! let track = tree.insert(
//!     None,
//!     ElementSpec::new("div").with_bounds(Rect::new(0.0, 0.0, 200.0, 20.0)),
//! );
//! let handle = tree.insert(
//!     Some(track),
//!     ElementSpec::new("a")
//!         .with_class("handle")
//!         .with_bounds(Rect::new(95.0, 0.0, 105.0, 20.0))
//!         .with_z_index(1),
//! );
//!
//! let hit = tree.hit_test_point(Point::new(100.0, 10.0), QueryFilter::default()).unwrap();
//! assert_eq!(hit.element, handle);
//! assert_eq!(hit.path, vec![track, handle]);
//!
//! let sel = Selector::parse("a.handle").unwrap();
//! assert_eq!(tree.closest_matching(handle, &sel), Some(handle));
//!
//! tree.add_class(handle, "active");
//! let damage = tree.commit();
//! assert!(damage.elements.contains(&handle));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Rect};

mod key;
mod selector;
mod tree;
mod types;

pub use key::Key;
pub use selector::{Compound, Selector, SelectorError};
pub use tree::{Damage, ElementTree, Hit, QueryFilter};
pub use types::{ElementId, ElementSpec, NodeFlags, Style, Transition};

/// Returns true if `coord` lies strictly between `origin` and `origin + extent`.
pub fn is_over_axis(coord: f64, origin: f64, extent: f64) -> bool {
    coord > origin && coord < origin + extent
}

/// Returns true if `pt` lies strictly inside `rect`.
pub fn is_over(pt: Point, rect: Rect) -> bool {
    is_over_axis(pt.y, rect.y0, rect.height()) && is_over_axis(pt.x, rect.x0, rect.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_over_excludes_edges() {
        assert!(is_over_axis(0.5, 0.0, 10.0));
        assert!(!is_over_axis(0.0, 0.0, 10.0));
        assert!(!is_over_axis(10.0, 0.0, 10.0));
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(is_over(Point::new(5.0, 5.0), r));
        assert!(!is_over(Point::new(5.0, 10.0), r));
        assert!(!is_over(Point::new(0.0, 5.0), r));
    }
}
