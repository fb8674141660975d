use std::collections::BTreeMap;

use crate::breakpoint::BreakpointId;
use crate::node::NodeId;
use crate::primitives::{Axis, Rect};

/// Resolved rectangles keyed by node id, in parent-relative coordinates.
pub type GeometryMap = BTreeMap<NodeId, Rect>;

/// Non-fatal findings reported alongside the geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// A scale constraint had no usable original parent size. The node kept its authored
    /// offset and size on that axis.
    DegenerateParent {
        node: NodeId,
        parent: NodeId,
        axis: Axis,
        original: Option<f64>,
    },
    /// Children of `node` asked for more space along `axis` than was available. The
    /// remainder was clamped to zero and the content overflows.
    Overflow {
        node: NodeId,
        axis: Axis,
        demand: f64,
        supply: f64,
    },
}

impl Diagnostic {
    /// The node the finding is about
    pub fn node(&self) -> &NodeId {
        match self {
            Diagnostic::DegenerateParent { node, .. } | Diagnostic::Overflow { node, .. } => node,
        }
    }
}

/// Result of one layout resolution.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Breakpoint whose overrides were applied, `None` when the input has no breakpoints
    pub active_breakpoint: Option<BreakpointId>,
    pub geometry: GeometryMap,
    /// Roots of hidden subtrees. Hidden nodes and their descendants have no geometry.
    pub hidden: Vec<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Rectangle of a node, if it was laid out
    pub fn get(&self, id: &str) -> Option<Rect> {
        self.geometry.get(id).copied()
    }

    /// Changes needed to go from `self` to `newer`, in node id order.
    ///
    /// Hosts that own a retained scene can apply these instead of rebuilding it.
    pub fn diff(&self, newer: &Resolution) -> Vec<GeometryChange> {
        let mut changes = Vec::new();
        for (id, &from) in &self.geometry {
            match newer.geometry.get(id) {
                None => changes.push(GeometryChange::Removed { id: id.clone() }),
                Some(&to) if to != from => changes.push(GeometryChange::Changed {
                    id: id.clone(),
                    from,
                    to,
                }),
                Some(_) => {}
            }
        }
        for (id, &rect) in &newer.geometry {
            if !self.geometry.contains_key(id) {
                changes.push(GeometryChange::Added {
                    id: id.clone(),
                    rect,
                });
            }
        }
        changes.sort_by(|a, b| a.id().cmp(b.id()));
        changes
    }
}

/// One entry of [`Resolution::diff`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "change", rename_all = "snake_case"))]
pub enum GeometryChange {
    Added { id: NodeId, rect: Rect },
    Removed { id: NodeId },
    Changed { id: NodeId, from: Rect, to: Rect },
}

impl GeometryChange {
    pub fn id(&self) -> &NodeId {
        match self {
            GeometryChange::Added { id, .. }
            | GeometryChange::Removed { id }
            | GeometryChange::Changed { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(entries: &[(&str, Rect)]) -> Resolution {
        Resolution {
            geometry: entries
                .iter()
                .map(|(id, rect)| (NodeId::new(*id), *rect))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_diff_reports_added_removed_changed() {
        let before = resolution(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("b", Rect::new(10.0, 0.0, 10.0, 10.0)),
            ("c", Rect::new(20.0, 0.0, 10.0, 10.0)),
        ]);
        let after = resolution(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("b", Rect::new(12.0, 0.0, 10.0, 10.0)),
            ("d", Rect::new(0.0, 10.0, 5.0, 5.0)),
        ]);

        let changes = before.diff(&after);
        assert_eq!(
            changes,
            vec![
                GeometryChange::Changed {
                    id: "b".into(),
                    from: Rect::new(10.0, 0.0, 10.0, 10.0),
                    to: Rect::new(12.0, 0.0, 10.0, 10.0),
                },
                GeometryChange::Removed { id: "c".into() },
                GeometryChange::Added {
                    id: "d".into(),
                    rect: Rect::new(0.0, 10.0, 5.0, 5.0),
                },
            ]
        );
        assert!(after.diff(&after).is_empty());
    }

    #[test]
    fn test_get_by_str() {
        let res = resolution(&[("a", Rect::new(1.0, 2.0, 3.0, 4.0))]);
        assert_eq!(res.get("a"), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(res.get("missing"), None);
    }
}
