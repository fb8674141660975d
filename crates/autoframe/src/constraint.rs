//! Anchor-constraint positioning for nodes outside auto-layout.
//!
//! Children of a frame with [`LayoutMode::None`](crate::LayoutMode::None) keep the
//! relationship to their parent's edges that was authored at design time. When the
//! parent is resized, [`position`] recomputes the child's rectangle from the design-time
//! offsets, the child's size and the parent's original and current sizes.

use autoframe_macros::WithBuilders;
use glam::DVec2;

use crate::error::ConstraintError;
use crate::primitives::{Axis, Rect};

/// Horizontal anchoring of a node to its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HorizontalConstraint {
    #[default]
    Left,
    Right,
    LeftRight,
    Center,
    Scale,
}

/// Vertical anchoring of a node to its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VerticalConstraint {
    #[default]
    Top,
    Bottom,
    TopBottom,
    Center,
    Scale,
}

/// Axis-independent form of the two constraint enums.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Left or top edge
    Start,
    /// Right or bottom edge
    End,
    /// Both edges, size derived
    Both,
    Center,
    Scale,
}

impl From<HorizontalConstraint> for Anchor {
    fn from(constraint: HorizontalConstraint) -> Self {
        match constraint {
            HorizontalConstraint::Left => Anchor::Start,
            HorizontalConstraint::Right => Anchor::End,
            HorizontalConstraint::LeftRight => Anchor::Both,
            HorizontalConstraint::Center => Anchor::Center,
            HorizontalConstraint::Scale => Anchor::Scale,
        }
    }
}

impl From<VerticalConstraint> for Anchor {
    fn from(constraint: VerticalConstraint) -> Self {
        match constraint {
            VerticalConstraint::Top => Anchor::Start,
            VerticalConstraint::Bottom => Anchor::End,
            VerticalConstraint::TopBottom => Anchor::Both,
            VerticalConstraint::Center => Anchor::Center,
            VerticalConstraint::Scale => Anchor::Scale,
        }
    }
}

/// Positioning rule for a node whose parent does not use auto-layout.
///
/// `offset_x`/`offset_y` are design-time distances from the anchored edge: the left
/// (or top) edge for `Start`, `Both` and `Scale`, the right (or bottom) edge for `End`,
/// and a delta from the parent's center for `Center`.
#[derive(Clone, Copy, Debug, Default, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Constraints {
    pub horizontal: HorizontalConstraint,
    pub vertical: VerticalConstraint,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Width never rescales under `Scale` or `LeftRight`
    pub fixed_width: bool,
    /// Height never rescales under `Scale` or `TopBottom`
    pub fixed_height: bool,
}

impl Constraints {
    pub fn anchor(&self, axis: Axis) -> Anchor {
        match axis {
            Axis::Horizontal => self.horizontal.into(),
            Axis::Vertical => self.vertical.into(),
        }
    }

    pub fn offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.offset_x,
            Axis::Vertical => self.offset_y,
        }
    }

    pub fn is_fixed(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.fixed_width,
            Axis::Vertical => self.fixed_height,
        }
    }
}

/// Resolve position and size along one axis.
///
/// `size` is the node's authored size, `original` the parent's design-time size (if
/// known) and `current` the parent's resolved size. Returns `(position, size)`.
pub fn position_axis(
    constraints: &Constraints,
    axis: Axis,
    size: f64,
    original: Option<f64>,
    current: f64,
) -> Result<(f64, f64), ConstraintError> {
    let offset = constraints.offset(axis);
    let fixed = constraints.is_fixed(axis);

    match constraints.anchor(axis) {
        Anchor::Start => Ok((offset, size)),
        Anchor::End => Ok((current - offset - size, size)),
        Anchor::Both => {
            if fixed {
                // Left/top offset wins when the size is pinned.
                return Ok((offset, size));
            }
            let original = original.unwrap_or(current);
            let end_offset = original - offset - size;
            Ok((offset, (current - offset - end_offset).max(0.0)))
        }
        Anchor::Center => Ok(((current - size) / 2.0 + offset, size)),
        Anchor::Scale => {
            let original = match original {
                Some(original) if original.is_finite() && original != 0.0 => original,
                other => {
                    return Err(ConstraintError::DegenerateParent {
                        axis,
                        original: other,
                    })
                }
            };
            let ratio = current / original;
            let size = if fixed { size } else { size * ratio };
            Ok((offset * ratio, size))
        }
    }
}

/// Resolve a node's rectangle relative to a resized parent.
///
/// Fails with [`ConstraintError::DegenerateParent`] when a `Scale` axis has no usable
/// original parent size.
pub fn position(
    size: DVec2,
    constraints: &Constraints,
    parent_original: Option<DVec2>,
    parent_current: DVec2,
) -> Result<Rect, ConstraintError> {
    let (x, width) = position_axis(
        constraints,
        Axis::Horizontal,
        size.x,
        parent_original.map(|s| s.x),
        parent_current.x,
    )?;
    let (y, height) = position_axis(
        constraints,
        Axis::Vertical,
        size.y,
        parent_original.map(|s| s.y),
        parent_current.y,
    )?;
    Ok(Rect::new(x, y, width, height))
}

/// Like [`position`], but an axis that fails keeps its authored offset and size.
///
/// The other axis is still resolved normally. Every failure is returned alongside
/// the rectangle.
pub fn position_or_fallback(
    size: DVec2,
    constraints: &Constraints,
    parent_original: Option<DVec2>,
    parent_current: DVec2,
) -> (Rect, Vec<ConstraintError>) {
    let mut errors = Vec::new();
    let mut resolve = |axis: Axis| {
        position_axis(
            constraints,
            axis,
            axis.of(size),
            parent_original.map(|s| axis.of(s)),
            axis.of(parent_current),
        )
        .unwrap_or_else(|err| {
            errors.push(err);
            (constraints.offset(axis), axis.of(size))
        })
    };
    let (x, width) = resolve(Axis::Horizontal);
    let (y, height) = resolve(Axis::Vertical);
    (Rect::new(x, y, width, height), errors)
}
