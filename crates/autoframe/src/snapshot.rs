//! Flat, serializable form of a layout request.
//!
//! Editors hand the engine a list of node records that point at their parent by id.
//! [`Snapshot::into_input`] rebuilds the tree and rejects anything that is not a single
//! rooted tree before layout ever runs.

use std::collections::{HashMap, HashSet};

use autoframe_macros::WithBuilders;

use crate::breakpoint::{Breakpoint, BreakpointSet, Override};
use crate::constraint::Constraints;
use crate::engine::LayoutInput;
use crate::error::{ConfigError, Result};
use crate::layout::{ChildLayout, Frame};
use crate::measure::IntrinsicSize;
use crate::node::{Node, NodeId};

/// One node of a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    #[with_builders(skip)]
    pub id: NodeId,
    /// `None` for the root
    #[with_builders(into)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<NodeId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: Frame,
    #[cfg_attr(feature = "serde", serde(default))]
    pub child: ChildLayout,
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints: Constraints,
    #[cfg_attr(feature = "serde", serde(default))]
    pub natural_size: Option<IntrinsicSize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: bool,
}

impl NodeRecord {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            frame: Frame::default(),
            child: ChildLayout::default(),
            constraints: Constraints::default(),
            natural_size: None,
            hidden: false,
        }
    }

    /// Build the node without children
    fn into_node(self) -> Node {
        let node = Node::new(self.id)
            .with_frame(self.frame)
            .with_child_layout(self.child)
            .with_constraints(self.constraints)
            .with_hidden(self.hidden);
        match self.natural_size {
            Some(size) => node.with_natural_size(size.width, size.height),
            None => node,
        }
    }
}

/// Everything a host sends for one layout request, minus the viewport width.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Snapshot {
    pub nodes: Vec<NodeRecord>,
    pub breakpoints: Vec<Breakpoint>,
    pub overrides: Vec<Override>,
}

impl Snapshot {
    /// Rebuild the node tree and validate the whole request.
    ///
    /// Children keep the order in which their records appear.
    pub fn into_input(self) -> Result<LayoutInput> {
        let root = build_tree(self.nodes)?;
        let input = LayoutInput::new(root)
            .with_breakpoints(BreakpointSet::new(self.breakpoints))
            .with_overrides(self.overrides);
        input.validate()?;
        Ok(input)
    }
}

fn build_tree(records: Vec<NodeRecord>) -> Result<Node> {
    let mut ids = HashSet::with_capacity(records.len());
    for record in &records {
        if !ids.insert(&record.id) {
            return Err(ConfigError::DuplicateNode {
                id: record.id.clone(),
            });
        }
    }

    let mut root = None;
    let mut children: HashMap<&NodeId, Vec<usize>> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        match &record.parent {
            None => match root {
                None => root = Some(index),
                Some(first) => {
                    return Err(ConfigError::MultipleRoots {
                        first: records[first].id.clone(),
                        second: record.id.clone(),
                    })
                }
            },
            Some(parent) if !ids.contains(parent) => {
                return Err(ConfigError::UnknownParent {
                    node: record.id.clone(),
                    parent: parent.clone(),
                })
            }
            Some(parent) => children.entry(parent).or_default().push(index),
        }
    }
    let root = root.ok_or(ConfigError::MissingRoot)?;

    // With one root and known parents, anything unreachable sits on a cycle.
    let mut reachable = vec![false; records.len()];
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        reachable[index] = true;
        if let Some(kids) = children.get(&records[index].id) {
            stack.extend(kids);
        }
    }
    if let Some(index) = reachable.iter().position(|&seen| !seen) {
        return Err(ConfigError::CyclicTree {
            node: records[index].id.clone(),
        });
    }

    let children: HashMap<NodeId, Vec<usize>> = children
        .into_iter()
        .map(|(id, kids)| (id.clone(), kids))
        .collect();
    let mut slots: Vec<Option<NodeRecord>> = records.into_iter().map(Some).collect();
    assemble(root, &mut slots, &children)
}

fn assemble(
    index: usize,
    slots: &mut [Option<NodeRecord>],
    children: &HashMap<NodeId, Vec<usize>>,
) -> Result<Node> {
    let record = slots[index].take().ok_or(ConfigError::MissingRoot)?;
    let kids = children.get(&record.id).cloned().unwrap_or_default();
    let mut node = record.into_node();
    for kid in kids {
        let child = assemble(kid, slots, children)?;
        node = node.with_child(child);
    }
    Ok(node)
}
