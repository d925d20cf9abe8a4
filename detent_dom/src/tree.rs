// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::selector::Selector;
use crate::types::{ElementId, ElementSpec, NodeFlags, Style, Transition};

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level element tree.
pub struct ElementTree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    focused: Option<ElementId>,
    dirty: Vec<ElementId>,
    removed_rects: Vec<Rect>,
    epoch: u64,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("ElementTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("focused", &self.focused)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from root to element (inclusive).
    pub path: Vec<ElementId>,
}

/// Filters applied during hit testing.
///
/// Used by [`ElementTree::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider elements marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider elements marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

/// Elements changed since the previous [`ElementTree::commit`].
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Live elements whose classes, attributes, style, or geometry changed.
    pub elements: Vec<ElementId>,
    /// World-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Returns true when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.dirty_rects.is_empty()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    tag: String,
    bounds: Rect,
    margin: Vec2,
    z_index: i32,
    flags: NodeFlags,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: Style,
    transition: Transition,
    dirty: bool,
}

impl Node {
    fn new(generation: u32, spec: ElementSpec) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag: spec.tag.to_ascii_lowercase(),
            bounds: spec.bounds,
            margin: spec.margin,
            z_index: spec.z_index,
            flags: spec.flags,
            classes: spec.classes,
            attributes: spec.attributes.into_iter().collect(),
            style: Style::default(),
            transition: Transition::Immediate,
            dirty: false,
        }
    }
}

impl ElementTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            focused: None,
            dirty: Vec::new(),
            removed_rects: Vec::new(),
            epoch: 0,
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts a root.
    pub fn insert(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, spec));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId indices are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, spec)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId indices are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        self.mark_dirty(id);
        id
    }

    /// Remove an element (and its subtree) from the tree.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        let bounds = self.node(id).bounds;
        if bounds.width() > 0.0 && bounds.height() > 0.0 {
            self.removed_rects.push(bounds);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.generation())
            .unwrap_or(false)
    }

    /// Parent of a live element.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id)?.parent
    }

    /// Children of an element in insertion order; empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Tag name of an element.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.node_opt(id).map(|n| n.tag.as_str())
    }

    /// World-space border box of an element.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.bounds)
    }

    /// Update world-space bounds (the host's layout result).
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            if n.bounds != bounds {
                let old = n.bounds;
                n.bounds = bounds;
                if old.width() > 0.0 && old.height() > 0.0 {
                    self.removed_rects.push(old);
                }
                self.mark_dirty(id);
            }
        }
    }

    /// Positioning margin of an element; zero for stale ids.
    pub fn margin(&self, id: ElementId) -> Vec2 {
        self.node_opt(id).map(|n| n.margin).unwrap_or(Vec2::ZERO)
    }

    /// Update the positioning margin.
    pub fn set_margin(&mut self, id: ElementId, margin: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.margin = margin;
        }
    }

    /// Returns the z-index of an element if the identifier is live.
    pub fn z_index(&self, id: ElementId) -> Option<i32> {
        self.node_opt(id).map(|n| n.z_index)
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.z_index = z;
        }
    }

    /// Flags of an element.
    pub fn flags(&self, id: ElementId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Update element flags.
    pub fn set_flags(&mut self, id: ElementId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
            self.mark_dirty(id);
        }
    }

    // --- classes ---

    /// Classes of an element, in the order they were added.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.node_opt(id).map(|n| n.classes.as_slice()).unwrap_or(&[])
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node_opt(id)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add one or more whitespace-separated classes. Classes already present are kept in place.
    pub fn add_class(&mut self, id: ElementId, classes: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let mut changed = false;
        for class in classes.split_whitespace() {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.into());
                changed = true;
            }
        }
        if changed {
            self.mark_dirty(id);
        }
    }

    /// Remove one or more whitespace-separated classes.
    pub fn remove_class(&mut self, id: ElementId, classes: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let before = n.classes.len();
        n.classes
            .retain(|c| !classes.split_whitespace().any(|r| r == c));
        if n.classes.len() != before {
            self.mark_dirty(id);
        }
    }

    /// Add or remove classes depending on `on`.
    pub fn toggle_class(&mut self, id: ElementId, classes: &str, on: bool) {
        if on {
            self.add_class(id, classes);
        } else {
            self.remove_class(id, classes);
        }
    }

    // --- attributes ---

    /// Attribute value of an element.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node_opt(id)?.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        if n.attributes.get(name) != Some(&value) {
            n.attributes.insert(name.into(), value);
            self.mark_dirty(id);
        }
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        if n.attributes.remove(name).is_some() {
            self.mark_dirty(id);
        }
    }

    /// Mark an element and its subtree as not text-selectable.
    pub fn disable_selection(&mut self, id: ElementId) {
        self.set_attr(id, "unselectable", "on");
    }

    /// Undo [`ElementTree::disable_selection`].
    pub fn enable_selection(&mut self, id: ElementId) {
        self.set_attr(id, "unselectable", "off");
    }

    // --- style ---

    /// Inline style of an element.
    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.node_opt(id).map(|n| &n.style)
    }

    /// Last transition applied to an element's style.
    pub fn transition(&self, id: ElementId) -> Option<Transition> {
        self.node_opt(id).map(|n| n.transition)
    }

    /// Merge a style patch into the element and record how to present it.
    pub fn apply_style(&mut self, id: ElementId, patch: Style, transition: Transition) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style.merge(&patch);
            n.transition = transition;
            self.mark_dirty(id);
        }
    }

    /// Replace the inline style entirely.
    pub fn clear_style(&mut self, id: ElementId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style = Style::default();
            n.transition = Transition::Immediate;
            self.mark_dirty(id);
        }
    }

    // --- focus ---

    /// The element holding keyboard focus.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused.filter(|id| self.is_alive(*id))
    }

    /// Move focus to `id`, returning the element that lost it (if different).
    ///
    /// Stale ids leave focus unchanged and return `None`.
    pub fn focus(&mut self, id: ElementId) -> Option<ElementId> {
        if !self.is_alive(id) {
            return None;
        }
        let previous = self.focused();
        self.focused = Some(id);
        previous.filter(|p| *p != id)
    }

    /// Clear focus, returning the element that lost it.
    pub fn blur(&mut self) -> Option<ElementId> {
        let previous = self.focused();
        self.focused = None;
        previous
    }

    /// Returns true if the element can receive focus.
    ///
    /// Form controls are focusable unless `disabled`; `a` and `area` need an `href`
    /// or a numeric `tabindex`; anything else needs a numeric `tabindex`. The element
    /// and all of its ancestors must be visible.
    pub fn is_focusable(&self, id: ElementId) -> bool {
        let Some(n) = self.node_opt(id) else {
            return false;
        };
        let tab_index = n.attributes.get("tabindex").and_then(|t| t.parse::<i32>().ok());
        let candidate = match n.tag.as_str() {
            "input" | "select" | "textarea" | "button" | "object" => {
                !n.attributes.contains_key("disabled")
            }
            "a" | "area" => n.attributes.contains_key("href") || tab_index.is_some(),
            _ => tab_index.is_some(),
        };
        candidate
            && self
                .ancestors_and_self(id)
                .all(|a| self.node(a).flags.contains(NodeFlags::VISIBLE))
    }

    /// Returns true if the element is focusable and reachable with Tab.
    pub fn is_tabbable(&self, id: ElementId) -> bool {
        let tab_index = self.attr(id, "tabindex").and_then(|t| t.parse::<i32>().ok());
        tab_index.is_none_or(|t| t >= 0) && self.is_focusable(id)
    }

    // --- structure queries ---

    /// Iterate from `id` up to its root (inclusive on both ends).
    pub fn ancestors_and_self(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut cur = self.is_alive(id).then_some(id);
        core::iter::from_fn(move || {
            let out = cur?;
            cur = self.node(out).parent;
            Some(out)
        })
    }

    /// Path from the root to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        let mut out: Vec<ElementId> = self.ancestors_and_self(id).collect();
        out.reverse();
        out
    }

    /// Returns true if `descendant` lies strictly inside `ancestor`'s subtree.
    pub fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        ancestor != descendant && self.ancestors_and_self(descendant).any(|a| a == ancestor)
    }

    /// Descendants of `root` (excluding `root`) carrying `class`, in document order.
    pub fn descendants_with_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_with_class(root, class, &mut out);
        out
    }

    fn collect_with_class(&self, id: ElementId, class: &str, out: &mut Vec<ElementId>) {
        for &child in self.children(id) {
            if self.has_class(child, class) {
                out.push(child);
            }
            self.collect_with_class(child, class, out);
        }
    }

    /// Returns true if the element matches the selector.
    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        let Some(n) = self.node_opt(id) else {
            return false;
        };
        selector.matches_parts(
            &n.tag,
            n.attributes.get("id").map(String::as_str),
            n.classes.iter().map(String::as_str),
        )
    }

    /// The element itself or its nearest ancestor matching the selector.
    pub fn closest_matching(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        self.ancestors_and_self(id).find(|a| self.matches(*a, selector))
    }

    /// Hit test a world-space point. Returns the topmost element.
    ///
    /// If multiple elements overlap with the same `z_index`, the newer [`ElementId`] wins.
    /// Invisible ancestors do not hide their children here; use [`NodeFlags`] on each element.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        // Naive scan; element counts for widget surfaces are small.
        let mut best: Option<(ElementId, i32)> = None;
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot.as_ref() else {
                continue;
            };
            if filter.visible_only && !node.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            if filter.pickable_only && !node.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            if !node.bounds.contains(pt) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId indices are 32-bit."
            )]
            let id = ElementId::new(i as u32, node.generation);
            match best {
                None => best = Some((id, node.z_index)),
                Some((best_id, z_best)) => {
                    let z = node.z_index;
                    if z > z_best || (z == z_best && id.is_newer_than(best_id)) {
                        best = Some((id, z));
                    }
                }
            }
        }
        best.map(|(element, _)| Hit {
            element,
            path: self.path_to_root(element),
        })
    }

    /// Report everything that changed since the previous commit.
    pub fn commit(&mut self) -> Damage {
        self.epoch = self.epoch.wrapping_add(1);
        let mut damage = Damage {
            elements: Vec::new(),
            dirty_rects: core::mem::take(&mut self.removed_rects),
        };
        for id in core::mem::take(&mut self.dirty) {
            let Some(n) = self.node_opt_mut(id) else {
                continue;
            };
            n.dirty = false;
            let bounds = n.bounds;
            damage.elements.push(id);
            if bounds.width() > 0.0 && bounds.height() > 0.0 {
                damage.dirty_rects.push(bounds);
            }
        }
        damage
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn mark_dirty(&mut self, id: ElementId) {
        if let Some(n) = self.node_opt_mut(id)
            && !n.dirty
        {
            n.dirty = true;
            self.dirty.push(id);
        }
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
