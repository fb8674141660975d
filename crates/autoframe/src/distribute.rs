//! Top-down distribution pass.
//!
//! Runs after [`Measurements::measure`]. Starting at the root, each node receives its
//! final rectangle from its parent and then lays out its own children:
//!
//! - auto-layout frames split their children into lines, share the primary-axis
//!   remainder between growing children and align everything else,
//! - absolutely positioned children are placed against the content box,
//! - children of frames without auto-layout go through the constraint positioner.
//!
//! Every node is visited exactly once.

use glam::DVec2;

use crate::constraint::position_or_fallback;
use crate::error::ConstraintError;
use crate::flow::{break_lines, cross_extent, split_remainder, CrossItem};
use crate::layout::{
    CounterAxisAlignContent, CrossAlign, LayoutPosition, Padding, PrimaryAxisAlign, SizingMode,
};
use crate::measure::{baseline_of, ContentMeasurer, Measurements};
use crate::node::{Node, NodeId};
use crate::options::LayoutOptions;
use crate::output::{Diagnostic, GeometryMap, Resolution};
use crate::primitives::{Axis, Rect};

const EPSILON: f64 = 1e-9;

/// One line of flow children with their final sizes.
struct Line<'n> {
    children: Vec<&'n Node>,
    sizes: Vec<DVec2>,
    aligns: Vec<CrossAlign>,
    /// Counter-axis extent of the line
    extent: f64,
    /// Largest baseline among baseline-aligned children
    ascent: f64,
}

/// Assigns final rectangles to a measured tree.
///
/// ```
/// # use autoframe::*;
/// let root = Node::new("row")
///     .with_frame(Frame::horizontal().with_item_spacing(4.0))
///     .with_children([Node::leaf("a", 10.0, 10.0), Node::leaf("b", 10.0, 10.0)]);
///
/// let measurements = Measurements::measure(&root, &AuthoredSizes);
/// let options = LayoutOptions::default();
/// let mut distributor = Distributor::new(&measurements, &AuthoredSizes, &options);
/// let frame = distributor.distribute(&root, 800.0, None);
/// let resolution = distributor.finish();
///
/// assert_eq!(frame, Rect::new(0.0, 0.0, 24.0, 10.0));
/// assert_eq!(resolution.get("b"), Some(Rect::new(14.0, 0.0, 10.0, 10.0)));
/// ```
pub struct Distributor<'a> {
    measurements: &'a Measurements,
    measurer: &'a dyn ContentMeasurer,
    options: &'a LayoutOptions,
    geometry: GeometryMap,
    hidden: Vec<NodeId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Distributor<'a> {
    pub fn new(
        measurements: &'a Measurements,
        measurer: &'a dyn ContentMeasurer,
        options: &'a LayoutOptions,
    ) -> Self {
        Self {
            measurements,
            measurer,
            options,
            geometry: GeometryMap::new(),
            hidden: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Lay out `node` as a root offered `available_width` by `available_height`.
    ///
    /// The root sits at the origin. A root that fills vertically without an offered
    /// height hugs its content instead.
    pub fn distribute(
        &mut self,
        node: &Node,
        available_width: f64,
        available_height: Option<f64>,
    ) -> Rect {
        if node.is_hidden() {
            self.hidden.push(node.id().clone());
            return Rect::ZERO;
        }

        let size = DVec2::new(
            self.own_extent(node, Axis::Horizontal, Some(available_width)),
            self.own_extent(node, Axis::Vertical, available_height),
        );
        let rect = Rect::from_origin_size(DVec2::ZERO, size);
        self.place(node, rect);
        rect
    }

    /// Collect the geometry, hidden roots and diagnostics gathered so far.
    pub fn finish(self) -> Resolution {
        Resolution {
            active_breakpoint: None,
            geometry: self.geometry,
            hidden: self.hidden,
            diagnostics: self.diagnostics,
        }
    }

    /// Record `rect` for `node` and lay out its children inside it.
    fn place(&mut self, node: &Node, rect: Rect) {
        log::trace!("place `{}` at {rect:?}", node.id());
        self.geometry.insert(node.id().clone(), rect);

        self.hidden.extend(
            node.children()
                .iter()
                .filter(|child| child.is_hidden())
                .map(|child| child.id().clone()),
        );

        match node.frame().primary_axis() {
            Some(primary) => {
                self.layout_flow(node, primary, rect.size());
                self.layout_absolute(node, rect.size());
            }
            None => self.layout_constrained(node, rect.size()),
        }
    }

    /// Final extent of `node` along `axis` when offered `offered`.
    fn own_extent(&self, node: &Node, axis: Axis, offered: Option<f64>) -> f64 {
        let measured = axis.of(self.measurements.size(node.id()));
        match node.sizing(axis) {
            // Measurement already applied the fixed value and the clamps.
            SizingMode::Fixed(_) | SizingMode::Hug => measured,
            SizingMode::Fill => node.frame().clamp(axis, offered.unwrap_or(measured)),
        }
    }

    fn layout_flow(&mut self, node: &Node, primary: Axis, size: DVec2) {
        let flow = node.flow_children();
        if flow.is_empty() {
            return;
        }

        let frame = node.frame();
        let counter = primary.cross();
        let padding = frame.padding.non_negative();
        let content = content_box(&padding, size);
        let content_primary = primary.of(content);
        let content_counter = counter.of(content);

        let measured: Vec<f64> = flow
            .iter()
            .map(|child| primary.of(self.measurements.size(child.id())))
            .collect();
        let wrapped = frame.wraps(node.sizing(primary));
        let ranges = if wrapped {
            break_lines(&measured, content_primary, frame.item_spacing)
        } else {
            vec![0..flow.len()]
        };

        let mut lines = Vec::with_capacity(ranges.len());
        for range in ranges {
            let children = flow[range.clone()].to_vec();
            let primary_sizes =
                self.primary_sizes(node, primary, &children, &measured[range], content_primary);
            let aligns: Vec<CrossAlign> = children
                .iter()
                .map(|child| {
                    child
                        .child_layout()
                        .layout_align
                        .resolve(frame.counter_axis_align, primary)
                })
                .collect();

            let extent = if wrapped {
                cross_extent(children.iter().zip(&aligns).map(|(child, &align)| {
                    let size = self.measurements.size(child.id());
                    CrossItem {
                        extent: counter.of(size),
                        baseline: (align == CrossAlign::Baseline)
                            .then(|| baseline_of(self.measurer, child, size)),
                    }
                }))
            } else {
                content_counter
            };

            let sizes: Vec<DVec2> = children
                .iter()
                .zip(&aligns)
                .zip(&primary_sizes)
                .map(|((child, &align), &along)| {
                    let across = match align {
                        CrossAlign::Stretch => child.frame().clamp(counter, extent),
                        _ => self.own_extent(child, counter, Some(extent)),
                    };
                    primary.pack(along, across)
                })
                .collect();

            let ascent = children
                .iter()
                .zip(&aligns)
                .zip(&sizes)
                .filter(|((_, &align), _)| align == CrossAlign::Baseline)
                .map(|((child, _), &size)| baseline_of(self.measurer, child, size))
                .fold(0.0, f64::max);

            lines.push(Line {
                children,
                sizes,
                aligns,
                extent,
                ascent,
            });
        }

        let gaps = frame.wrap_spacing * (lines.len() - 1) as f64;
        let stacked = lines.iter().map(|line| line.extent).sum::<f64>() + gaps;
        let counter_demand = if wrapped {
            stacked
        } else {
            lines
                .iter()
                .flat_map(|line| line.sizes.iter().map(|size| counter.of(*size)))
                .fold(0.0, f64::max)
        };
        if counter_demand > content_counter + EPSILON {
            self.report_overflow(node, counter, counter_demand, content_counter);
        }

        let line_gap = match frame.counter_axis_align_content {
            CounterAxisAlignContent::SpaceBetween
                if lines.len() > 1 && content_counter > stacked =>
            {
                frame.wrap_spacing + (content_counter - stacked) / (lines.len() - 1) as f64
            }
            _ => frame.wrap_spacing,
        };

        let mut line_start = padding.start(counter);
        for line in &lines {
            self.place_line(node, primary, &padding, content_primary, line_start, line);
            line_start += line.extent + line_gap;
        }
    }

    /// Primary extents of one line.
    ///
    /// Fixed and non-growing children keep their measured size. Growing children start
    /// from their base (zero for fill, the measured size for hug) and share what is left
    /// in proportion to their weight. A grower pinned by its own min/max drops out and the
    /// space it freed or took is shared again among the rest.
    fn primary_sizes(
        &mut self,
        node: &Node,
        primary: Axis,
        children: &[&Node],
        measured: &[f64],
        content_primary: f64,
    ) -> Vec<f64> {
        let spacing = node.frame().item_spacing;
        let mut weights: Vec<f64> = children
            .iter()
            .map(|child| grow_weight(child, primary))
            .collect();
        let bases: Vec<f64> = children
            .iter()
            .zip(measured)
            .zip(&weights)
            .map(|((child, &size), &weight)| {
                if weight > 0.0 && !child.sizing(primary).is_hug() {
                    0.0
                } else {
                    size
                }
            })
            .collect();

        let demand = bases.iter().sum::<f64>() + spacing * children.len().saturating_sub(1) as f64;
        if demand > content_primary + EPSILON {
            self.report_overflow(node, primary, demand, content_primary);
        }

        let mut sizes = bases.clone();
        let mut remaining = content_primary - demand;
        loop {
            let shares =
                split_remainder(remaining.max(0.0), &weights, self.options.snap_to_pixels);
            let mut pinned = false;
            for (index, share) in shares.into_iter().enumerate() {
                if weights[index] == 0.0 {
                    continue;
                }
                let wanted = bases[index] + share;
                let clamped = children[index].frame().clamp(primary, wanted);
                sizes[index] = clamped;
                if (clamped - wanted).abs() > EPSILON {
                    weights[index] = 0.0;
                    remaining -= clamped - bases[index];
                    pinned = true;
                }
            }
            if !pinned {
                return sizes;
            }
        }
    }

    fn place_line(
        &mut self,
        node: &Node,
        primary: Axis,
        padding: &Padding,
        content_primary: f64,
        line_start: f64,
        line: &Line<'_>,
    ) {
        let frame = node.frame();
        let counter = primary.cross();
        let count = line.children.len();
        let spacing = frame.item_spacing;

        let used = line.sizes.iter().map(|size| primary.of(*size)).sum::<f64>()
            + spacing * count.saturating_sub(1) as f64;
        let leftover = content_primary - used;

        let (lead, gap) = match frame.primary_axis_align {
            PrimaryAxisAlign::Min => (0.0, spacing),
            PrimaryAxisAlign::Center => (leftover.max(0.0) / 2.0, spacing),
            PrimaryAxisAlign::Max => (leftover.max(0.0), spacing),
            PrimaryAxisAlign::SpaceBetween if count > 1 && leftover > 0.0 => {
                (0.0, spacing + leftover / (count - 1) as f64)
            }
            PrimaryAxisAlign::SpaceBetween => (0.0, spacing),
        };

        let mut cursor = padding.start(primary) + lead;
        for ((child, &size), &align) in line.children.iter().zip(&line.sizes).zip(&line.aligns) {
            let across = counter.of(size);
            let offset = match align {
                CrossAlign::Stretch | CrossAlign::Min => 0.0,
                CrossAlign::Center => (line.extent - across) / 2.0,
                CrossAlign::Max => line.extent - across,
                CrossAlign::Baseline => line.ascent - baseline_of(self.measurer, child, size),
            };

            let origin = primary.pack(cursor, line_start + offset);
            self.place(child, Rect::from_origin_size(origin, size));
            cursor += primary.of(size) + gap;
        }
    }

    /// Out-of-flow children, placed against the content-box origin.
    fn layout_absolute(&mut self, node: &Node, size: DVec2) {
        let padding = node.frame().padding.non_negative();
        let content = content_box(&padding, size);

        for child in node.absolute_children() {
            let LayoutPosition::Absolute { x, y } = child.child_layout().layout_position else {
                continue;
            };
            let child_size = DVec2::new(
                self.own_extent(child, Axis::Horizontal, Some(content.x)),
                self.own_extent(child, Axis::Vertical, Some(content.y)),
            );
            let origin = DVec2::new(padding.left + x, padding.top + y);
            self.place(child, Rect::from_origin_size(origin, child_size));
        }
    }

    /// Children of a frame without auto-layout follow their constraints, relative to
    /// the frame's authored natural size.
    fn layout_constrained(&mut self, node: &Node, size: DVec2) {
        let original = node.natural_size().map(DVec2::from);
        let design = original.unwrap_or(size);

        for child in node.visible_children() {
            if child.child_layout().is_absolute() {
                log::warn!(
                    "`{}` is absolutely positioned but `{}` has no auto-layout, using its constraints",
                    child.id(),
                    node.id()
                );
            }
            let authored = DVec2::new(
                self.own_extent(child, Axis::Horizontal, Some(design.x)),
                self.own_extent(child, Axis::Vertical, Some(design.y)),
            );
            let (rect, errors) = position_or_fallback(authored, child.constraints(), original, size);
            for error in errors {
                let ConstraintError::DegenerateParent {
                    axis,
                    original: original_extent,
                } = error;
                log::warn!(
                    "`{}` inside `{}`: {error}, keeping authored geometry",
                    child.id(),
                    node.id()
                );
                self.diagnostics.push(Diagnostic::DegenerateParent {
                    node: child.id().clone(),
                    parent: node.id().clone(),
                    axis,
                    original: original_extent,
                });
            }
            self.place(child, rect);
        }
    }

    fn report_overflow(&mut self, node: &Node, axis: Axis, demand: f64, supply: f64) {
        if !self.options.collect_diagnostics {
            return;
        }
        log::debug!(
            "`{}` overflows along {axis:?}: needs {demand}, has {supply}",
            node.id()
        );
        self.diagnostics.push(Diagnostic::Overflow {
            node: node.id().clone(),
            axis,
            demand,
            supply,
        });
    }
}

/// Share weight of a flow child: its grow factor, or one for a fill child without one.
/// Fixed children keep their authored size and never grow.
fn grow_weight(child: &Node, primary: Axis) -> f64 {
    let sizing = child.sizing(primary);
    if sizing.fixed_value().is_some() {
        return 0.0;
    }
    let grow = child.child_layout().grow();
    if grow > 0.0 {
        grow
    } else if sizing.is_fill() {
        1.0
    } else {
        0.0
    }
}

fn content_box(padding: &Padding, size: DVec2) -> DVec2 {
    let inset = DVec2::new(
        padding.along(Axis::Horizontal),
        padding.along(Axis::Vertical),
    );
    (size - inset).max(DVec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraints, HorizontalConstraint};
    use crate::layout::{ChildAlign, ChildLayout, CounterAxisAlign, Frame};
    use crate::measure::{AuthoredSizes, ContentTable};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn resolve_with(
        root: &Node,
        width: f64,
        measurer: &dyn ContentMeasurer,
        options: LayoutOptions,
    ) -> Resolution {
        let measurements = Measurements::measure(root, measurer);
        let mut distributor = Distributor::new(&measurements, measurer, &options);
        distributor.distribute(root, width, None);
        distributor.finish()
    }

    fn resolve(root: &Node, width: f64) -> Resolution {
        resolve_with(root, width, &AuthoredSizes, LayoutOptions::default())
    }

    fn fill_width() -> ChildLayout {
        ChildLayout::default().with_layout_sizing_horizontal(SizingMode::Fill)
    }

    fn scenario_frame(align: PrimaryAxisAlign) -> Node {
        Node::new("frame")
            .with_frame(
                Frame::horizontal()
                    .with_primary_axis_sizing(SizingMode::px(300.0))
                    .with_padding(Padding::all(10.0))
                    .with_item_spacing(8.0)
                    .with_primary_axis_align(align),
            )
            .with_children([
                Node::new("a").with_fixed_size(60.0, 40.0),
                Node::new("b").with_fixed_size(60.0, 40.0),
            ])
    }

    #[test]
    fn test_fixed_row_leaves_remainder_trailing() {
        let res = resolve(&scenario_frame(PrimaryAxisAlign::Min), 1000.0);
        assert_eq!(res.get("frame"), Some(Rect::new(0.0, 0.0, 300.0, 60.0)));
        assert_eq!(res.get("a"), Some(Rect::new(10.0, 10.0, 60.0, 40.0)));
        assert_eq!(res.get("b"), Some(Rect::new(78.0, 10.0, 60.0, 40.0)));
    }

    #[test]
    fn test_space_between_spreads_remainder() {
        let res = resolve(&scenario_frame(PrimaryAxisAlign::SpaceBetween), 1000.0);
        let (a, b) = (res.get("a").unwrap(), res.get("b").unwrap());
        assert_eq!(b.x - a.max_x(), 160.0);
        assert_eq!(b.max_x(), 290.0);
    }

    #[test]
    fn test_space_between_single_child_acts_like_min() {
        let root = Node::new("frame")
            .with_frame(
                Frame::horizontal()
                    .with_primary_axis_sizing(SizingMode::px(300.0))
                    .with_primary_axis_align(PrimaryAxisAlign::SpaceBetween),
            )
            .with_child(Node::new("only").with_fixed_size(60.0, 40.0));
        assert_eq!(resolve(&root, 300.0).get("only"), Some(Rect::new(0.0, 0.0, 60.0, 40.0)));
    }

    #[test]
    fn test_center_and_max_alignment() {
        let frame = Frame::horizontal()
            .with_primary_axis_sizing(SizingMode::px(300.0))
            .with_counter_axis_sizing(SizingMode::px(100.0));

        let centered = Node::new("f")
            .with_frame(
                frame
                    .clone()
                    .with_primary_axis_align(PrimaryAxisAlign::Center)
                    .with_counter_axis_align(CounterAxisAlign::Center),
            )
            .with_child(Node::new("c").with_fixed_size(60.0, 40.0));
        assert_eq!(resolve(&centered, 300.0).get("c"), Some(Rect::new(120.0, 30.0, 60.0, 40.0)));

        let trailing = Node::new("f")
            .with_frame(
                frame
                    .with_primary_axis_align(PrimaryAxisAlign::Max)
                    .with_counter_axis_align(CounterAxisAlign::Max),
            )
            .with_child(Node::new("c").with_fixed_size(60.0, 40.0));
        assert_eq!(resolve(&trailing, 300.0).get("c"), Some(Rect::new(240.0, 60.0, 60.0, 40.0)));
    }

    #[test]
    fn test_vertical_hug_stacks_children() {
        let root = Node::new("col")
            .with_frame(
                Frame::vertical()
                    .with_item_spacing(5.0)
                    .with_padding(Padding::symmetric(0.0, 4.0)),
            )
            .with_children([
                Node::leaf("a", 10.0, 20.0),
                Node::leaf("b", 10.0, 30.0),
                Node::leaf("c", 10.0, 25.0),
            ]);

        let res = resolve(&root, 500.0);
        assert_eq!(res.get("col").unwrap().height, 85.0 + 8.0);
        assert_eq!(res.get("a").unwrap().y, 4.0);
        assert_eq!(res.get("b").unwrap().y, 29.0);
        assert_eq!(res.get("c").unwrap().y, 64.0);
    }

    #[test]
    fn test_wrap_breaks_lines() {
        let root = Node::new("wrap")
            .with_frame(
                Frame::horizontal()
                    .with_primary_axis_sizing(SizingMode::px(100.0))
                    .with_wrap(true)
                    .with_item_spacing(10.0),
            )
            .with_children([
                Node::leaf("a", 40.0, 10.0),
                Node::leaf("b", 40.0, 10.0),
                Node::leaf("c", 40.0, 10.0),
            ]);

        let res = resolve(&root, 500.0);
        assert_eq!(res.get("a"), Some(Rect::new(0.0, 0.0, 40.0, 10.0)));
        assert_eq!(res.get("b"), Some(Rect::new(50.0, 0.0, 40.0, 10.0)));
        assert_eq!(res.get("c"), Some(Rect::new(0.0, 10.0, 40.0, 10.0)));
        assert_eq!(res.get("wrap").unwrap().height, 20.0);
    }

    #[test]
    fn test_hug_with_max_width_wraps() {
        let root = Node::new("wrap")
            .with_frame(
                Frame::horizontal()
                    .with_wrap(true)
                    .with_max_width(100.0)
                    .with_item_spacing(10.0)
                    .with_wrap_spacing(4.0),
            )
            .with_children([
                Node::leaf("a", 40.0, 10.0),
                Node::leaf("b", 40.0, 10.0),
                Node::leaf("c", 40.0, 10.0),
            ]);

        // Hugs the widest line, not the cap.
        let res = resolve(&root, 500.0);
        assert_eq!(res.get("wrap"), Some(Rect::new(0.0, 0.0, 90.0, 24.0)));
        assert_eq!(res.get("a"), Some(Rect::new(0.0, 0.0, 40.0, 10.0)));
        assert_eq!(res.get("b"), Some(Rect::new(50.0, 0.0, 40.0, 10.0)));
        assert_eq!(res.get("c"), Some(Rect::new(0.0, 14.0, 40.0, 10.0)));

        let unwrapped = Node::new("row")
            .with_frame(Frame::horizontal().with_wrap(true).with_item_spacing(10.0))
            .with_children([
                Node::leaf("a", 40.0, 10.0),
                Node::leaf("b", 40.0, 10.0),
                Node::leaf("c", 40.0, 10.0),
            ]);
        assert_eq!(resolve(&unwrapped, 500.0).get("c").unwrap().y, 0.0);
    }

    #[test]
    fn test_wrapped_lines_space_between() {
        let root = Node::new("wrap")
            .with_frame(
                Frame::horizontal()
                    .with_primary_axis_sizing(SizingMode::px(100.0))
                    .with_counter_axis_sizing(SizingMode::px(100.0))
                    .with_wrap(true)
                    .with_item_spacing(10.0)
                    .with_wrap_spacing(5.0)
                    .with_counter_axis_align_content(CounterAxisAlignContent::SpaceBetween),
            )
            .with_children([
                Node::leaf("a", 40.0, 10.0),
                Node::leaf("b", 40.0, 10.0),
                Node::leaf("c", 40.0, 10.0),
            ]);
        assert_eq!(resolve(&root, 500.0).get("c").unwrap().y, 90.0);
    }

    #[test]
    fn test_fill_children_split_remainder() {
        let root = Node::new("row")
            .with_frame(
                Frame::horizontal()
                    .with_primary_axis_sizing(SizingMode::px(300.0))
                    .with_item_spacing(10.0),
            )
            .with_children([
                Node::new("a").with_fixed_size(50.0, 10.0),
                Node::leaf("b", 5.0, 10.0).with_child_layout(fill_width()),
                Node::leaf("c", 5.0, 10.0).with_child_layout(fill_width()),
            ]);

        let res = resolve(&root, 300.0);
        assert_eq!(res.get("b"), Some(Rect::new(60.0, 0.0, 115.0, 10.0)));
        assert_eq!(res.get("c"), Some(Rect::new(185.0, 0.0, 115.0, 10.0)));
    }

    #[test]
    fn test_uneven_fill_gives_extra_unit_to_earlier_children() {
        let root = Node::new("row")
            .with_frame(Frame::horizontal().with_primary_axis_sizing(SizingMode::px(100.0)))
            .with_children(
                ["a", "b", "c"]
                    .map(|id| Node::new(id).with_child_layout(fill_width())),
            );

        let res = resolve(&root, 100.0);
        let widths: Vec<f64> = ["a", "b", "c"].iter().map(|id| res.get(id).unwrap().width).collect();
        assert_eq!(widths, [34.0, 33.0, 33.0]);
        assert_eq!(res.get("c").unwrap().x, 67.0);

        let unsnapped = resolve_with(
            &root,
            100.0,
            &AuthoredSizes,
            LayoutOptions::new().with_pixel_snapping(false),
        );
        assert!((unsnapped.get("a").unwrap().width - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_grow_weights_are_proportional() {
        let root = Node::new("row")
            .with_frame(Frame::horizontal().with_primary_axis_sizing(SizingMode::px(90.0)))
            .with_children([
                Node::leaf("a", 10.0, 10.0)
                    .with_child_layout(ChildLayout::default().with_layout_grow(1.0)),
                Node::leaf("b", 20.0, 10.0)
                    .with_child_layout(ChildLayout::default().with_layout_grow(2.0)),
            ]);

        // Hug growers keep their measured width and add their share of the other 60.
        let res = resolve(&root, 90.0);
        assert_eq!(res.get("a").unwrap().width, 30.0);
        assert_eq!(res.get("b").unwrap().width, 60.0);
    }

    #[test]
    fn test_growers_without_slack_keep_their_size() {
        let grow = ChildLayout::default().with_layout_grow(1.0);
        let hugging = Node::new("row")
            .with_frame(Frame::horizontal())
            .with_children([
                Node::leaf("text", 100.0, 10.0).with_child_layout(grow.clone().with_order_index(0)),
                Node::leaf("icon", 10.0, 10.0).with_child_layout(grow.clone().with_order_index(1)),
            ]);

        let res = resolve(&hugging, 500.0);
        assert_eq!(res.get("row").unwrap().width, 110.0);
        assert_eq!(res.get("text"), Some(Rect::new(0.0, 0.0, 100.0, 10.0)));
        assert_eq!(res.get("icon"), Some(Rect::new(100.0, 0.0, 10.0, 10.0)));

        let fixed = |id: &str| {
            Node::new(id).with_child_layout(
                grow.clone()
                    .with_layout_sizing_horizontal(SizingMode::px(80.0))
                    .with_layout_sizing_vertical(SizingMode::px(10.0)),
            )
        };
        let pinned = Node::new("row")
            .with_frame(Frame::horizontal().with_primary_axis_sizing(SizingMode::px(100.0)))
            .with_children([fixed("a"), fixed("b")]);

        let res = resolve(&pinned, 100.0);
        assert_eq!(res.get("a"), Some(Rect::new(0.0, 0.0, 80.0, 10.0)));
        assert_eq!(res.get("b"), Some(Rect::new(80.0, 0.0, 80.0, 10.0)));
    }

    #[test]
    fn test_clamped_grower_frees_space_for_the_rest() {
        let row = |capped: Frame| {
            Node::new("row")
                .with_frame(Frame::horizontal().with_primary_axis_sizing(SizingMode::px(100.0)))
                .with_children([
                    Node::new("a")
                        .with_frame(capped)
                        .with_child_layout(fill_width().with_order_index(0)),
                    Node::new("b").with_child_layout(fill_width().with_order_index(1)),
                ])
        };

        let res = resolve(&row(Frame::default().with_max_width(20.0)), 100.0);
        assert_eq!(res.get("a").unwrap().width, 20.0);
        assert_eq!(res.get("b"), Some(Rect::new(20.0, 0.0, 80.0, 0.0)));

        let res = resolve(&row(Frame::default().with_min_width(70.0)), 100.0);
        assert_eq!(res.get("a").unwrap().width, 70.0);
        assert_eq!(res.get("b"), Some(Rect::new(70.0, 0.0, 30.0, 0.0)));
    }

    #[test]
    fn test_fill_distribution_sums_to_available() {
        let mut rng = StdRng::seed_from_u64(0xf111);
        for _ in 0..200 {
            let width = rng.random_range(200..1000) as f64;
            let spacing = rng.random_range(0..12) as f64;
            let fixed: Vec<f64> = (0..rng.random_range(0..3))
                .map(|_| rng.random_range(1..40) as f64)
                .collect();
            let fill_count = rng.random_range(1..6);

            let mut children: Vec<Node> = fixed
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    Node::leaf(format!("fixed{i}"), w, 10.0)
                        .with_child_layout(ChildLayout::default().with_order_index(i as i64))
                })
                .collect();
            children.extend((0..fill_count).map(|i| {
                Node::new(format!("fill{i}")).with_child_layout(
                    fill_width().with_order_index(100 + i as i64),
                )
            }));
            let total = fixed.len() + fill_count;

            let root = Node::new("row")
                .with_frame(
                    Frame::horizontal()
                        .with_primary_axis_sizing(SizingMode::px(width))
                        .with_item_spacing(spacing),
                )
                .with_children(children);
            let res = resolve(&root, width);

            let available = width - fixed.iter().sum::<f64>() - spacing * (total - 1) as f64;
            let fills: Vec<f64> = (0..fill_count)
                .map(|i| res.get(&format!("fill{i}")).unwrap().width)
                .collect();

            assert_eq!(fills.iter().sum::<f64>(), available);
            let base = (available / fill_count as f64).floor();
            for pair in fills.windows(2) {
                assert!(pair[0] >= pair[1]);
            }
            for share in &fills {
                assert!(*share == base || *share == base + 1.0);
            }
        }
    }

    #[test]
    fn test_hug_row_conserves_extent() {
        let mut rng = StdRng::seed_from_u64(0xc0de);
        for _ in 0..200 {
            let spacing = rng.random_range(0..16) as f64;
            let padding = Padding::trbl(
                rng.random_range(0..10) as f64,
                rng.random_range(0..10) as f64,
                rng.random_range(0..10) as f64,
                rng.random_range(0..10) as f64,
            );
            let widths: Vec<f64> = (0..rng.random_range(1..8))
                .map(|_| rng.random_range(0..100) as f64)
                .collect();

            let root = Node::new("row")
                .with_frame(
                    Frame::horizontal()
                        .with_item_spacing(spacing)
                        .with_padding(padding),
                )
                .with_children(
                    widths
                        .iter()
                        .enumerate()
                        .map(|(i, &w)| {
                            Node::leaf(format!("c{i}"), w, 10.0).with_child_layout(
                                ChildLayout::default().with_order_index(i as i64),
                            )
                        }),
                );
            let res = resolve(&root, 5000.0);

            let expected = padding.left
                + padding.right
                + widths.iter().sum::<f64>()
                + spacing * (widths.len() - 1) as f64;
            assert_eq!(res.get("row").unwrap().width, expected);

            for i in 1..widths.len() {
                let prev = res.get(&format!("c{}", i - 1)).unwrap();
                let next = res.get(&format!("c{i}")).unwrap();
                assert_eq!(next.x, prev.max_x() + spacing);
            }
        }
    }

    #[test]
    fn test_stretch_and_counter_fill() {
        let root = Node::new("col")
            .with_frame(
                Frame::vertical()
                    .with_counter_axis_sizing(SizingMode::px(200.0))
                    .with_padding(Padding::all(10.0)),
            )
            .with_children([
                Node::leaf("stretched", 20.0, 10.0).with_child_layout(
                    ChildLayout::default().with_layout_align(ChildAlign::Stretch),
                ),
                Node::leaf("filled", 20.0, 10.0).with_child_layout(fill_width()),
                Node::leaf("plain", 20.0, 10.0),
            ]);

        let res = resolve(&root, 800.0);
        assert_eq!(res.get("stretched"), Some(Rect::new(10.0, 10.0, 180.0, 10.0)));
        assert_eq!(res.get("filled"), Some(Rect::new(10.0, 20.0, 180.0, 10.0)));
        assert_eq!(res.get("plain").unwrap().width, 20.0);
    }

    #[test]
    fn test_baseline_alignment() {
        let root = Node::new("row")
            .with_frame(Frame::horizontal().with_counter_axis_align(CounterAxisAlign::Baseline))
            .with_children([Node::new("small"), Node::new("large")]);
        let table = ContentTable::new()
            .with_size("small", 10.0, 20.0)
            .with_baseline("small", 16.0)
            .with_size("large", 10.0, 40.0)
            .with_baseline("large", 12.0);

        let res = resolve_with(&root, 500.0, &table, LayoutOptions::default());
        assert_eq!(res.get("row").unwrap().height, 44.0);
        assert_eq!(res.get("small").unwrap().y, 0.0);
        assert_eq!(res.get("large").unwrap().y, 4.0);
    }

    #[test]
    fn test_absolute_children_leave_flow_alone() {
        let root = Node::new("row")
            .with_frame(Frame::horizontal().with_padding(Padding::all(10.0)))
            .with_children([
                Node::leaf("a", 20.0, 20.0),
                Node::new("badge").with_child_layout(
                    ChildLayout::default()
                        .with_layout_sizing_horizontal(SizingMode::Fixed(30.0))
                        .with_layout_sizing_vertical(SizingMode::Fixed(30.0))
                        .with_layout_position(LayoutPosition::Absolute { x: 5.0, y: 5.0 }),
                ),
                Node::leaf("b", 20.0, 20.0),
            ]);

        let res = resolve(&root, 500.0);
        assert_eq!(res.get("row"), Some(Rect::new(0.0, 0.0, 60.0, 40.0)));
        assert_eq!(res.get("b").unwrap().x, 30.0);
        assert_eq!(res.get("badge"), Some(Rect::new(15.0, 15.0, 30.0, 30.0)));
    }

    #[test]
    fn test_constraint_frame_children() {
        let at = |h: HorizontalConstraint, offset_x: f64| {
            Constraints::default()
                .with_horizontal(h)
                .with_offset_x(offset_x)
        };
        let root = Node::new("canvas")
            .with_natural_size(400.0, 300.0)
            .with_child_layout(fill_width())
            .with_children([
                Node::leaf("right", 50.0, 20.0)
                    .with_constraints(at(HorizontalConstraint::Right, 10.0)),
                Node::leaf("stretch", 100.0, 20.0)
                    .with_constraints(at(HorizontalConstraint::LeftRight, 20.0)),
                Node::leaf("scaled", 40.0, 20.0)
                    .with_constraints(at(HorizontalConstraint::Scale, 100.0)),
                Node::leaf("centered", 100.0, 20.0)
                    .with_constraints(at(HorizontalConstraint::Center, 0.0)),
            ]);

        let res = resolve(&root, 800.0);
        assert_eq!(res.get("canvas"), Some(Rect::new(0.0, 0.0, 800.0, 300.0)));
        assert_eq!(res.get("right").unwrap().x, 740.0);
        assert_eq!(res.get("stretch").unwrap().x, 20.0);
        assert_eq!(res.get("stretch").unwrap().width, 500.0);
        assert_eq!(res.get("scaled").unwrap().x, 200.0);
        assert_eq!(res.get("scaled").unwrap().width, 80.0);
        assert_eq!(res.get("centered").unwrap().x, 350.0);
        assert!(res.diagnostics.is_empty());
    }

    #[test]
    fn test_degenerate_parent_is_isolated() {
        let root = Node::new("canvas")
            .with_child_layout(fill_width())
            .with_children([
                Node::leaf("scaled", 40.0, 20.0).with_constraints(
                    Constraints::default()
                        .with_horizontal(HorizontalConstraint::Scale)
                        .with_offset_x(15.0),
                ),
                Node::leaf("sibling", 10.0, 10.0).with_constraints(
                    Constraints::default()
                        .with_horizontal(HorizontalConstraint::Right)
                        .with_offset_x(0.0),
                ),
            ]);

        let res = resolve(&root, 600.0);
        assert_eq!(res.get("scaled"), Some(Rect::new(15.0, 0.0, 40.0, 20.0)));
        assert_eq!(res.get("sibling").unwrap().x, 590.0);
        assert_eq!(
            res.diagnostics,
            vec![Diagnostic::DegenerateParent {
                node: "scaled".into(),
                parent: "canvas".into(),
                axis: Axis::Horizontal,
                original: None,
            }]
        );
    }

    #[test]
    fn test_overflow_reported_only_when_requested() {
        let root = Node::new("row")
            .with_frame(Frame::horizontal().with_primary_axis_sizing(SizingMode::px(100.0)))
            .with_children([Node::leaf("a", 80.0, 10.0), Node::leaf("b", 80.0, 10.0)]);

        assert!(resolve(&root, 100.0).diagnostics.is_empty());

        let res = resolve_with(
            &root,
            100.0,
            &AuthoredSizes,
            LayoutOptions::new().with_diagnostics(true),
        );
        assert_eq!(
            res.diagnostics,
            vec![Diagnostic::Overflow {
                node: "row".into(),
                axis: Axis::Horizontal,
                demand: 160.0,
                supply: 100.0,
            }]
        );
        assert_eq!(res.diagnostics[0].node().as_str(), "row");
        assert_eq!(res.get("b").unwrap().x, 80.0);
    }

    #[test]
    fn test_hidden_children_are_skipped() {
        let root = Node::new("row")
            .with_frame(Frame::horizontal().with_item_spacing(10.0))
            .with_children([
                Node::leaf("a", 20.0, 20.0),
                Node::leaf("h", 50.0, 50.0)
                    .with_hidden(true)
                    .with_child(Node::leaf("inner", 5.0, 5.0)),
                Node::leaf("b", 20.0, 20.0),
            ]);

        let res = resolve(&root, 500.0);
        assert_eq!(res.get("b").unwrap().x, 30.0);
        assert_eq!(res.get("row").unwrap().width, 50.0);
        assert_eq!(res.hidden, vec![NodeId::from("h")]);
        assert!(res.get("inner").is_none());
    }

    #[test]
    fn test_hidden_root_produces_no_geometry() {
        let root = Node::leaf("root", 10.0, 10.0).with_hidden(true);
        let res = resolve(&root, 100.0);
        assert!(res.geometry.is_empty());
        assert_eq!(res.hidden, vec![NodeId::from("root")]);
    }
}
