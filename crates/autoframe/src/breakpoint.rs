//! Responsive breakpoints and their per-frame overrides.
//!
//! A [`BreakpointSet`] maps a viewport width to exactly one active breakpoint. Only one
//! breakpoint is active at a time: ranged breakpoints containing the width compete by
//! explicit `order` (lower wins, ties by id), and the default breakpoint is the fallback
//! when no range matches. Overrides of the active breakpoint are then merged over the
//! base tree with [`apply_overrides`].

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use autoframe_macros::WithBuilders;

use crate::error::{ConfigError, Result};
use crate::layout::{LayoutMode, Padding, SizingMode};
use crate::node::{Node, NodeId};
use crate::primitives::Axis;

/// Identifier of a breakpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BreakpointId(String);

impl BreakpointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BreakpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BreakpointId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BreakpointId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BreakpointId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A named viewport-width range.
///
/// Bounds are inclusive; an unset bound is open-ended.
#[derive(Clone, Debug, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    #[with_builders(skip)]
    pub id: BreakpointId,
    #[with_builders(into)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_width: Option<f64>,
    /// Resolution priority among overlapping ranges, lower wins
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: i32,
    /// Fallback when no ranged breakpoint contains the viewport width
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_default: bool,
}

impl Breakpoint {
    /// An unbounded, non-default breakpoint named after its id
    pub fn new(id: impl Into<BreakpointId>) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_string(),
            id,
            min_width: None,
            max_width: None,
            order: 0,
            is_default: false,
        }
    }

    /// The default (fallback) breakpoint
    pub fn fallback(id: impl Into<BreakpointId>) -> Self {
        Self::new(id).with_is_default(true)
    }

    /// A ranged breakpoint covering `[min_width, max_width]`
    pub fn range(id: impl Into<BreakpointId>, min_width: f64, max_width: f64) -> Self {
        Self::new(id)
            .with_min_width(min_width)
            .with_max_width(max_width)
    }

    /// Whether `width` lies within the (inclusive) range
    ///
    /// ```
    /// # use autoframe::Breakpoint;
    /// let mobile = Breakpoint::range("mobile", 0.0, 767.0);
    /// assert!(mobile.contains(767.0));
    /// assert!(!mobile.contains(768.0));
    /// ```
    pub fn contains(&self, width: f64) -> bool {
        self.min_width.map_or(true, |min| width >= min)
            && self.max_width.map_or(true, |max| width <= max)
    }
}

/// All breakpoints of a project.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BreakpointSet {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointSet {
    pub fn new(breakpoints: impl IntoIterator<Item = Breakpoint>) -> Self {
        Self {
            breakpoints: breakpoints.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.id.as_str() == id)
    }

    /// The breakpoint flagged `is_default`, if any
    pub fn default_breakpoint(&self) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.is_default)
    }

    /// Check ids are unique, ranges are not inverted and at most one default exists.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut default: Option<&Breakpoint> = None;

        for bp in &self.breakpoints {
            if !ids.insert(&bp.id) {
                return Err(ConfigError::DuplicateBreakpoint { id: bp.id.clone() });
            }
            if let (Some(min), Some(max)) = (bp.min_width, bp.max_width) {
                if min > max {
                    return Err(ConfigError::InvertedBreakpointRange {
                        id: bp.id.clone(),
                        min,
                        max,
                    });
                }
            }
            if bp.is_default {
                if let Some(first) = default {
                    return Err(ConfigError::MultipleDefaultBreakpoints {
                        first: first.id.clone(),
                        second: bp.id.clone(),
                    });
                }
                default = Some(bp);
            }
        }
        Ok(())
    }

    /// Select the active breakpoint for `viewport_width`.
    ///
    /// Ranged (non-default) breakpoints containing the width are candidates; the lowest
    /// `order` wins, ties broken by id. Without a candidate the default breakpoint is
    /// used. Fails with [`ConfigError::NoDefaultBreakpoint`] when neither exists.
    pub fn resolve(&self, viewport_width: f64) -> Result<&Breakpoint> {
        if !viewport_width.is_finite() {
            return Err(ConfigError::InvalidViewport {
                width: viewport_width,
            });
        }

        let candidate = self
            .breakpoints
            .iter()
            .filter(|bp| !bp.is_default && bp.contains(viewport_width))
            .min_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

        candidate
            .or_else(|| self.default_breakpoint())
            .ok_or(ConfigError::NoDefaultBreakpoint { viewport_width })
    }
}

/// Visibility set by an override.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Visibility {
    Visible,
    Hidden,
    /// Keep the base frame's visibility
    #[default]
    Inherit,
}

/// Partial padding: unset sides keep the base value.
#[derive(Clone, Copy, Debug, Default, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaddingOverride {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl PaddingOverride {
    pub fn apply(&self, base: Padding) -> Padding {
        Padding {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }

    /// Merge, preferring values from `other` when present
    pub fn merge(&self, other: &PaddingOverride) -> PaddingOverride {
        PaddingOverride {
            top: other.top.or(self.top),
            right: other.right.or(self.right),
            bottom: other.bottom.or(self.bottom),
            left: other.left.or(self.left),
        }
    }
}

/// Per-breakpoint delta for one frame.
///
/// All fields are optional so an override only touches what changes at its breakpoint.
#[derive(Clone, Debug, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Override {
    #[with_builders(skip)]
    pub breakpoint: BreakpointId,
    #[with_builders(skip)]
    pub node: NodeId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout_mode: Option<LayoutMode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_spacing: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub padding: PaddingOverride,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visibility: Visibility,
    /// Pins the frame to a fixed width
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<f64>,
    /// Pins the frame to a fixed height
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<f64>,
}

impl Override {
    pub fn new(breakpoint: impl Into<BreakpointId>, node: impl Into<NodeId>) -> Self {
        Self {
            breakpoint: breakpoint.into(),
            node: node.into(),
            layout_mode: None,
            item_spacing: None,
            padding: PaddingOverride::default(),
            visibility: Visibility::Inherit,
            width: None,
            height: None,
        }
    }

    /// Merge this override with a later one for the same frame, preferring values from
    /// `other` when present
    pub fn merge(&self, other: &Override) -> Override {
        Override {
            breakpoint: self.breakpoint.clone(),
            node: self.node.clone(),
            layout_mode: other.layout_mode.or(self.layout_mode),
            item_spacing: other.item_spacing.or(self.item_spacing),
            padding: self.padding.merge(&other.padding),
            visibility: match other.visibility {
                Visibility::Inherit => self.visibility,
                set => set,
            },
            width: other.width.or(self.width),
            height: other.height.or(self.height),
        }
    }

    /// Apply the set fields to `node` (shallow; children are untouched)
    pub fn apply_to_node(&self, node: &mut Node) {
        {
            let frame = node.frame_mut();
            if let Some(mode) = self.layout_mode {
                frame.layout_mode = mode;
            }
            if let Some(spacing) = self.item_spacing {
                frame.item_spacing = spacing;
            }
            frame.padding = self.padding.apply(frame.padding);
        }

        if let Some(width) = self.width {
            node.child_layout_mut()
                .set_sizing(Axis::Horizontal, SizingMode::Fixed(width));
        }
        if let Some(height) = self.height {
            node.child_layout_mut()
                .set_sizing(Axis::Vertical, SizingMode::Fixed(height));
        }

        match self.visibility {
            Visibility::Visible => node.set_hidden(false),
            Visibility::Hidden => node.set_hidden(true),
            Visibility::Inherit => {}
        }
    }
}

/// Check every override targets a known breakpoint.
pub fn validate_overrides(breakpoints: &BreakpointSet, overrides: &[Override]) -> Result<()> {
    for ov in overrides {
        if breakpoints.get(ov.breakpoint.as_str()).is_none() {
            return Err(ConfigError::UnknownBreakpoint {
                node: ov.node.clone(),
                breakpoint: ov.breakpoint.clone(),
            });
        }
    }
    Ok(())
}

/// Produce the effective tree for the `active` breakpoint.
///
/// Overrides for other breakpoints are ignored; several overrides for the same frame
/// merge in the order given, later fields winning. The input tree is not modified.
pub fn apply_overrides(tree: &Node, active: &BreakpointId, overrides: &[Override]) -> Node {
    let mut merged: HashMap<&NodeId, Override> = HashMap::new();
    for ov in overrides.iter().filter(|ov| &ov.breakpoint == active) {
        merged
            .entry(&ov.node)
            .and_modify(|existing| *existing = existing.merge(ov))
            .or_insert_with(|| ov.clone());
    }

    let mut effective = tree.clone();
    if merged.is_empty() {
        return effective;
    }

    let mut applied = 0;
    let mut stack = vec![&mut effective];
    while let Some(node) = stack.pop() {
        if let Some(ov) = merged.get(node.id()) {
            ov.apply_to_node(node);
            applied += 1;
        }
        stack.extend(node.children_mut().iter_mut());
    }

    if applied < merged.len() {
        log::warn!(
            "{} override(s) for breakpoint `{active}` target nodes missing from the tree",
            merged.len() - applied
        );
    }
    log::debug!("applied {applied} override(s) for breakpoint `{active}`");
    effective
}
