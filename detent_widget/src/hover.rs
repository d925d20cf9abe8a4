// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: turn successive pointer-over paths into enter/leave transitions.
//!
//! The factory feeds [`HoverState`] the root→target path of each pointer-over target
//! (see [`ElementTree::path_to_root`](detent_dom::ElementTree::path_to_root)) and forwards
//! the resulting transitions to the instances that own the affected elements.
//!
//! ```
//! use detent_widget::hover::{HoverState, HoverEvent};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
//! ```

use alloc::vec::Vec;

/// The hovered root→target path and the transitions needed to move off it.
///
/// Leaves are reported inner-most first, enters outer-most first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Vec<K>,
}

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer is now over this element or one of its descendants.
    Enter(K),
    /// The pointer is no longer over this element or any descendant.
    Leave(K),
}

impl<K: Copy + Eq> HoverEvent<K> {
    /// The element the transition applies to.
    pub fn element(self) -> K {
        match self {
            Self::Enter(k) | Self::Leave(k) => k,
        }
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The hovered path, root first.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// Returns true if `k` is on the hovered path.
    pub fn is_hovered(&self, k: K) -> bool {
        self.current.contains(&k)
    }

    /// Leave everything, inner-most first.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        let out = self.current.iter().rev().map(|&k| HoverEvent::Leave(k)).collect();
        self.current.clear();
        out
    }

    /// Drop `k` and everything below it from the hovered path without reporting leaves.
    ///
    /// Used when elements disappear while hovered.
    pub fn forget(&mut self, k: K) {
        if let Some(pos) = self.current.iter().position(|c| *c == k) {
            self.current.truncate(pos);
        }
    }

    /// Move the hover to `new_path` and report the transitions.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out: Vec<HoverEvent<K>> = self.current[shared..]
            .iter()
            .rev()
            .map(|&k| HoverEvent::Leave(k))
            .collect();
        out.extend(new_path[shared..].iter().map(|&k| HoverEvent::Enter(k)));

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn moving_between_sibling_handles() {
        // 1 = slider, 2 and 3 = handles.
        let mut h: HoverState<u32> = HoverState::new();
        assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
        assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
        assert!(h.is_hovered(3) && !h.is_hovered(2));
    }

    #[test]
    fn leaving_the_widget_entirely() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2, 3]);
        assert_eq!(
            h.update_path(&[9]),
            vec![
                HoverEvent::Leave(3),
                HoverEvent::Leave(2),
                HoverEvent::Leave(1),
                HoverEvent::Enter(9),
            ]
        );
        assert_eq!(h.clear(), vec![HoverEvent::Leave(9)]);
        assert!(h.current_path().is_empty());
    }

    #[test]
    fn same_path_is_quiet() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[7, 8]);
        assert!(h.update_path(&[7, 8]).is_empty());
        assert_eq!(h.update_path(&[7]), vec![HoverEvent::Leave(8)]);
    }

    #[test]
    fn forgetting_truncates_silently() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_path(&[1, 2, 3]);
        h.forget(2);
        assert_eq!(h.current_path(), &[1]);
        assert_eq!(h.update_path(&[1, 4]), vec![HoverEvent::Enter(4)]);
        assert_eq!(HoverEvent::Leave(5_u32).element(), 5);
    }
}
