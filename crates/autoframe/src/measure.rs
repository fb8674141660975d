//! Intrinsic ("hug") size measurement.
//!
//! The measurement pass walks the tree post-order. Leaves report the natural size the
//! host supplies through a [`ContentMeasurer`] (text metrics, image dimensions), or
//! their authored natural size. Auto-layout frames sum their flow children along the
//! primary axis and take the largest child on the counter axis, plus padding.

use std::collections::HashMap;
use std::hash::BuildHasher;

use glam::DVec2;

use crate::flow::{break_lines, cross_extent, line_extent, CrossItem};
use crate::layout::{CrossAlign, SizingMode};
use crate::node::{Node, NodeId};
use crate::primitives::Axis;

/// Intrinsic size measurement result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntrinsicSize {
    pub width: f64,
    pub height: f64,
}

impl IntrinsicSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl From<IntrinsicSize> for DVec2 {
    fn from(size: IntrinsicSize) -> Self {
        DVec2::new(size.width, size.height)
    }
}

impl From<DVec2> for IntrinsicSize {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Host-side content measurement.
///
/// Implementors provide natural sizes for leaves (primarily text and images). The
/// engine only asks; it never shapes text or decodes images itself. Returning `None`
/// falls back to the node's authored natural size.
pub trait ContentMeasurer {
    /// Natural size of a leaf node.
    fn measure(&self, node: &Node) -> Option<IntrinsicSize>;

    /// Distance from the top of the node to its first baseline, used by
    /// baseline-aligned rows. `None` aligns the node by its bottom edge.
    fn baseline(&self, node: &Node, size: IntrinsicSize) -> Option<f64> {
        let _ = (node, size);
        None
    }
}

/// Measurer that always defers to the authored natural sizes on the nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthoredSizes;

impl ContentMeasurer for AuthoredSizes {
    fn measure(&self, _node: &Node) -> Option<IntrinsicSize> {
        None
    }
}

impl<S: BuildHasher> ContentMeasurer for HashMap<NodeId, IntrinsicSize, S> {
    fn measure(&self, node: &Node) -> Option<IntrinsicSize> {
        self.get(node.id()).copied()
    }
}

/// Table of host-measured sizes and baselines keyed by node id.
#[derive(Clone, Debug, Default)]
pub struct ContentTable {
    sizes: HashMap<NodeId, IntrinsicSize>,
    baselines: HashMap<NodeId, f64>,
}

impl ContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, id: impl Into<NodeId>, width: f64, height: f64) -> Self {
        self.sizes.insert(id.into(), IntrinsicSize::new(width, height));
        self
    }

    pub fn with_baseline(mut self, id: impl Into<NodeId>, baseline: f64) -> Self {
        self.baselines.insert(id.into(), baseline);
        self
    }
}

impl ContentMeasurer for ContentTable {
    fn measure(&self, node: &Node) -> Option<IntrinsicSize> {
        self.sizes.get(node.id()).copied()
    }

    fn baseline(&self, node: &Node, _size: IntrinsicSize) -> Option<f64> {
        self.baselines.get(node.id()).copied()
    }
}

/// Baseline of `node` at `size`, falling back to its bottom edge.
pub(crate) fn baseline_of(measurer: &dyn ContentMeasurer, node: &Node, size: DVec2) -> f64 {
    measurer
        .baseline(node, size.into())
        .unwrap_or(size.y)
}

/// Intrinsic sizes of every visible node of a tree, produced by [`Measurements::measure`].
#[derive(Clone, Debug, Default)]
pub struct Measurements {
    sizes: HashMap<NodeId, DVec2>,
}

impl Measurements {
    /// Measure `root` and all its visible descendants.
    pub fn measure(root: &Node, measurer: &dyn ContentMeasurer) -> Self {
        let mut pass = MeasurePass {
            measurer,
            sizes: HashMap::with_capacity(root.len()),
        };
        pass.measure_node(root);
        log::debug!("measured {} nodes under `{}`", pass.sizes.len(), root.id());
        Self { sizes: pass.sizes }
    }

    /// Intrinsic size of a measured node
    pub fn get(&self, id: &NodeId) -> Option<IntrinsicSize> {
        self.sizes.get(id).copied().map(IntrinsicSize::from)
    }

    pub(crate) fn size(&self, id: &NodeId) -> DVec2 {
        self.sizes.get(id).copied().unwrap_or(DVec2::ZERO)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Measure a single subtree and return the intrinsic size of its root.
pub fn measure(node: &Node, measurer: &dyn ContentMeasurer) -> IntrinsicSize {
    Measurements::measure(node, measurer)
        .get(node.id())
        .unwrap_or_default()
}

struct MeasurePass<'a> {
    measurer: &'a dyn ContentMeasurer,
    sizes: HashMap<NodeId, DVec2>,
}

impl MeasurePass<'_> {
    fn measure_node(&mut self, node: &Node) -> DVec2 {
        // Post-order: every visible child first, whatever this node's own sizing.
        for child in node.visible_children() {
            self.measure_node(child);
        }

        let content = match node.frame().primary_axis() {
            Some(primary) => self.flow_content(node, primary),
            None => self
                .measurer
                .measure(node)
                .map(DVec2::from)
                .unwrap_or_else(|| node.natural_vec()),
        };

        let size = DVec2::new(
            own_extent(node, Axis::Horizontal, content.x),
            own_extent(node, Axis::Vertical, content.y),
        );
        log::trace!("measure `{}`: content {content}, intrinsic {size}", node.id());

        self.sizes.insert(node.id().clone(), size);
        size
    }

    /// Hug size of an auto-layout frame, padding included.
    fn flow_content(&self, node: &Node, primary: Axis) -> DVec2 {
        let frame = node.frame();
        let counter = primary.cross();
        let padding = frame.padding.non_negative();
        let flow = node.flow_children();

        let sizes: Vec<DVec2> = flow.iter().map(|child| self.sizes[child.id()]).collect();
        let primary_sizes: Vec<f64> = sizes.iter().map(|s| primary.of(*s)).collect();
        let items: Vec<CrossItem> = flow
            .iter()
            .zip(&sizes)
            .map(|(child, size)| {
                let align = child
                    .child_layout()
                    .layout_align
                    .resolve(frame.counter_axis_align, primary);
                CrossItem {
                    extent: counter.of(*size),
                    baseline: (align == CrossAlign::Baseline)
                        .then(|| baseline_of(self.measurer, child, *size)),
                }
            })
            .collect();

        let single_line = line_extent(&primary_sizes, frame.item_spacing);
        let own_primary = node.sizing(primary);

        let (primary_content, counter_content) = if frame.wraps(own_primary) {
            let outer = match own_primary {
                SizingMode::Fixed(px) => px,
                _ => single_line + padding.along(primary),
            };
            let budget = (frame.clamp(primary, outer) - padding.along(primary)).max(0.0);
            let lines = break_lines(&primary_sizes, budget, frame.item_spacing);

            let widest = lines
                .iter()
                .map(|line| line_extent(&primary_sizes[line.clone()], frame.item_spacing))
                .fold(0.0, f64::max);
            let stacked: f64 = lines
                .iter()
                .map(|line| cross_extent(items[line.clone()].iter().copied()))
                .sum();
            let gaps = frame.wrap_spacing * lines.len().saturating_sub(1) as f64;
            (widest, (stacked + gaps).max(0.0))
        } else {
            (single_line, cross_extent(items.iter().copied()))
        };

        primary.pack(
            primary_content + padding.along(primary),
            counter_content + padding.along(counter),
        )
    }
}

/// A node's own extent along `axis` given its content extent: fixed wins, hug and
/// fill report content, then min/max clamps apply.
fn own_extent(node: &Node, axis: Axis, content: f64) -> f64 {
    let extent = match node.sizing(axis) {
        SizingMode::Fixed(px) => px,
        SizingMode::Hug | SizingMode::Fill => content,
    };
    node.frame().clamp(axis, extent)
}
