use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use glam::DVec2;

use crate::constraint::Constraints;
use crate::error::{ConfigError, Result};
use crate::layout::{ChildLayout, Frame, SizingMode};
use crate::measure::IntrinsicSize;
use crate::primitives::Axis;

/// Stable identifier of a node, used to key the resolved geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    /// Create a new NodeId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A node of the layout tree: a frame with its own auto-layout settings, its
/// participation record inside the parent, and its anchor constraints.
///
/// Leaves are nodes with `LayoutMode::None` and no children; their intrinsic size comes
/// from the host (see [`ContentMeasurer`](crate::ContentMeasurer)) or from the authored
/// natural size.
///
/// Nodes are plain data. Layout never mutates them; results live in a
/// [`Resolution`](crate::Resolution).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    frame: Frame,
    child: ChildLayout,
    constraints: Constraints,
    /// Authored design-time size (text metrics, image dimensions, canvas size)
    natural_size: Option<IntrinsicSize>,
    hidden: bool,
    children: Vec<Node>,
}

impl Node {
    /// Create a new node with default settings
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            frame: Frame::default(),
            child: ChildLayout::default(),
            constraints: Constraints::default(),
            natural_size: None,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// A leaf with a natural size
    pub fn leaf(id: impl Into<NodeId>, width: f64, height: f64) -> Self {
        Self::new(id).with_natural_size(width, height)
    }

    /// Set the auto-layout settings
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Set the participation record inside the parent
    pub fn with_child_layout(mut self, child: ChildLayout) -> Self {
        self.child = child;
        self
    }

    /// Set the anchor constraints used when the parent has no auto-layout
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the authored natural size
    pub fn with_natural_size(mut self, width: f64, height: f64) -> Self {
        self.natural_size = Some(IntrinsicSize::new(width, height));
        self
    }

    /// Fix both dimensions to pixel values, whatever the node's frame sizing says
    pub fn with_fixed_size(mut self, width: f64, height: f64) -> Self {
        self.child.layout_sizing_horizontal = Some(SizingMode::Fixed(width));
        self.child.layout_sizing_vertical = Some(SizingMode::Fixed(height));
        self
    }

    /// Set whether the node is hidden
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Add a child node
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn child_layout(&self) -> &ChildLayout {
        &self.child
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn natural_size(&self) -> Option<IntrinsicSize> {
        self.natural_size
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub(crate) fn child_layout_mut(&mut self) -> &mut ChildLayout {
        &mut self.child
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Whether children flow through auto-layout
    pub fn is_auto_layout(&self) -> bool {
        self.frame.layout_mode.is_auto_layout()
    }

    /// Effective sizing along `axis`.
    ///
    /// The participation record wins when set; otherwise an auto-layout frame uses its
    /// primary/counter sizing and any other node hugs its natural size.
    pub fn sizing(&self, axis: Axis) -> SizingMode {
        self.child
            .sizing(axis)
            .or_else(|| self.frame.sizing(axis))
            .unwrap_or(SizingMode::Hug)
    }

    /// Authored natural size as a vector, zero when absent
    pub(crate) fn natural_vec(&self) -> DVec2 {
        self.natural_size.map(DVec2::from).unwrap_or(DVec2::ZERO)
    }

    /// Visible children taking part in flow, in flow order.
    ///
    /// Sorted by `order_index`, ties broken by node id.
    pub fn flow_children(&self) -> Vec<&Node> {
        let mut flow: Vec<&Node> = self
            .children
            .iter()
            .filter(|child| !child.hidden && !child.child.is_absolute())
            .collect();
        flow.sort_by(|a, b| {
            a.child
                .order_index
                .cmp(&b.child.order_index)
                .then_with(|| a.id.cmp(&b.id))
        });
        flow
    }

    /// Visible absolutely-positioned children, in authored order.
    pub fn absolute_children(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|child| !child.hidden && child.child.is_absolute())
    }

    /// Visible children, in authored order.
    pub fn visible_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|child| !child.hidden)
    }

    /// Depth-first search for a node by id
    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including `self`
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Node::len).sum::<usize>()
    }

    /// Always false: a subtree contains at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check that every id in the subtree is unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !seen.insert(&node.id) {
                return Err(ConfigError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
            stack.extend(node.children.iter());
        }
        Ok(())
    }
}
