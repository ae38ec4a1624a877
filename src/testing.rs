//! An in-memory [`VisualTree`] double so the core can be exercised without a
//! real rendering surface.
//!
//! Nodes carry a tag, classes and a manually assigned rect. There is no
//! layout engine: tests call [`FakeTree::layout_vertical`] between samples to
//! mimic the reflow a real host performs after each structural change.

use std::collections::BTreeSet;

use emath::{pos2, Pos2, Rect, Vec2};

use crate::geometry::EdgeWidths;
use crate::tree::{NodeId, VisualTree};

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    classes: BTreeSet<String>,
    rect: Rect,
    padding: EdgeWidths,
    border: EdgeWidths,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    floating: bool,
    position: Option<Pos2>,
    fixed_size: Option<Vec2>,
    alive: bool,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            classes: BTreeSet::new(),
            rect: Rect::ZERO,
            padding: EdgeWidths::ZERO,
            border: EdgeWidths::ZERO,
            parent: None,
            children: Vec::new(),
            floating: false,
            position: None,
            fixed_size: None,
            alive: true,
        }
    }
}

/// Arena-backed fake host tree.
///
/// Selectors are tag names, optionally prefixed with ancestor tags separated
/// by `>` (so `li` and `li>span` both work, matching how the engine's host
/// selectors are exercised).
#[derive(Debug, Default)]
pub struct FakeTree {
    nodes: Vec<NodeData>,
    capture_depth: u32,
}

impl FakeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached node.
    pub fn spawn(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(NodeData::new(tag));
        id
    }

    /// Creates a node appended to `parent`'s children.
    pub fn child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.spawn(tag);
        self.data_mut(id).parent = Some(parent);
        self.data_mut(parent).children.push(id);
        id
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.data_mut(node).rect = rect;
    }

    pub fn set_padding(&mut self, node: NodeId, padding: EdgeWidths) {
        self.data_mut(node).padding = padding;
    }

    pub fn set_border(&mut self, node: NodeId, border: EdgeWidths) {
        self.data_mut(node).border = border;
    }

    pub fn rect_of(&self, node: NodeId) -> Rect {
        self.data(node).rect
    }

    pub fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.data(node).children.clone()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.data(node).classes.contains(class)
    }

    pub fn is_floating(&self, node: NodeId) -> bool {
        self.data(node).floating
    }

    pub fn position_of(&self, node: NodeId) -> Option<Pos2> {
        self.data(node).position
    }

    pub fn fixed_size(&self, node: NodeId) -> Option<Vec2> {
        self.data(node).fixed_size
    }

    /// How many unmatched [`VisualTree::begin_drag_capture`] calls are open.
    pub fn capture_depth(&self) -> u32 {
        self.capture_depth
    }

    /// Stacks `container`'s in-flow children into rows of height `row`,
    /// using the container's rect for horizontal extent. Floating children
    /// are out of flow and skipped, like absolutely positioned elements.
    pub fn layout_vertical(&mut self, container: NodeId, row: f32) {
        let bounds = self.data(container).rect;
        let children = self.data(container).children.clone();
        let mut y = bounds.top();
        for child in children {
            if self.data(child).floating {
                continue;
            }
            self.data_mut(child).rect =
                Rect::from_min_size(pos2(bounds.left(), y), Vec2::new(bounds.width(), row));
            y += row;
        }
    }

    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0 as usize]
    }

    fn data_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.nodes[node.0 as usize]
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.data(node).parent {
            self.data_mut(parent).children.retain(|&child| child != node);
            self.data_mut(node).parent = None;
        }
    }
}

impl VisualTree for FakeTree {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.0 as usize)
            .is_some_and(|data| data.alive)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.data(node).parent?;
        let siblings = &self.data(parent).children;
        let index = siblings.iter().position(|&sibling| sibling == node)?;
        siblings.get(index + 1).copied()
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let mut segments = selector.split('>').map(str::trim).rev();
        let Some(own) = segments.next() else {
            return false;
        };
        if self.data(node).tag != own {
            return false;
        }
        let mut cursor = node;
        for segment in segments {
            match self.data(cursor).parent {
                Some(parent) if self.data(parent).tag == segment => cursor = parent,
                _ => return false,
            }
        }
        true
    }

    fn query(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.data(root).children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                found.push(node);
            }
            stack.extend(self.data(node).children.iter().rev().copied());
        }
        found
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        // Freshly spawned and cloned nodes sit at Rect::ZERO until a layout
        // pass assigns them a box, so a detached placeholder is never
        // hoverable under the strict containment test.
        self.data(node).rect
    }

    fn padding(&self, node: NodeId) -> EdgeWidths {
        self.data(node).padding
    }

    fn border(&self, node: NodeId) -> EdgeWidths {
        self.data(node).border
    }

    fn insert_before(&mut self, parent: NodeId, node: NodeId, anchor: Option<NodeId>) {
        // Inserting a node before itself resolves to its next sibling, so
        // the node stays in place.
        let anchor = if anchor == Some(node) {
            self.next_sibling(node)
        } else {
            anchor
        };
        self.detach(node);
        let children = &mut self.data_mut(parent).children;
        let index = anchor
            .and_then(|anchor| children.iter().position(|&child| child == anchor))
            .unwrap_or(children.len());
        children.insert(index, node);
        self.data_mut(node).parent = Some(parent);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
        let children = std::mem::take(&mut self.data_mut(node).children);
        for child in children {
            self.data_mut(child).parent = None;
            self.remove(child);
        }
        self.data_mut(node).alive = false;
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !class.is_empty() {
            self.data_mut(node).classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.data_mut(node).classes.remove(class);
    }

    fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let mut data = self.data(node).clone();
        data.parent = None;
        data.children = Vec::new();
        data.rect = Rect::ZERO;
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(data);
        let children = self.data(node).children.clone();
        for child in children {
            let copy = self.clone_subtree(child);
            self.data_mut(copy).parent = Some(id);
            self.data_mut(id).children.push(copy);
        }
        id
    }

    fn clone_as_placeholder(&mut self, node: NodeId, content_size: Vec2) -> NodeId {
        let tag = self.data(node).tag.clone();
        let mut data = NodeData::new(&tag);
        data.classes = self.data(node).classes.clone();
        data.fixed_size = Some(content_size);
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(data);
        id
    }

    fn set_floating(&mut self, node: NodeId, floating: bool) {
        let data = self.data_mut(node);
        data.floating = floating;
        if !floating {
            data.position = None;
        }
    }

    fn move_to(&mut self, node: NodeId, pos: Pos2) {
        self.data_mut(node).position = Some(pos);
    }

    fn set_fixed_size(&mut self, node: NodeId, size: Vec2) {
        self.data_mut(node).fixed_size = Some(size);
    }

    fn begin_drag_capture(&mut self) {
        self.capture_depth += 1;
    }

    fn end_drag_capture(&mut self) {
        self.capture_depth = self.capture_depth.saturating_sub(1);
    }
}
