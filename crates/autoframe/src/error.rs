//! Error types for layout resolution

use thiserror::Error;

use crate::breakpoint::BreakpointId;
use crate::node::NodeId;
use crate::primitives::Axis;

/// Fatal configuration problems.
///
/// These are detected before any layout work and abort the whole resolution: the
/// engine refuses to run rather than guess.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no breakpoint range contains viewport width {viewport_width} and no default breakpoint exists")]
    NoDefaultBreakpoint { viewport_width: f64 },

    #[error("multiple default breakpoints: `{first}` and `{second}`")]
    MultipleDefaultBreakpoints {
        first: BreakpointId,
        second: BreakpointId,
    },

    #[error("breakpoint `{id}` has min_width {min} greater than max_width {max}")]
    InvertedBreakpointRange { id: BreakpointId, min: f64, max: f64 },

    #[error("duplicate breakpoint id `{id}`")]
    DuplicateBreakpoint { id: BreakpointId },

    #[error("override for node `{node}` references unknown breakpoint `{breakpoint}`")]
    UnknownBreakpoint {
        node: NodeId,
        breakpoint: BreakpointId,
    },

    #[error("viewport width must be a finite non-negative number, got {width}")]
    InvalidViewport { width: f64 },

    #[error("duplicate node id `{id}`")]
    DuplicateNode { id: NodeId },

    #[error("node `{node}` references unknown parent `{parent}`")]
    UnknownParent { node: NodeId, parent: NodeId },

    #[error("cycle detected in node tree at `{node}`")]
    CyclicTree { node: NodeId },

    #[error("snapshot has no root node")]
    MissingRoot,

    #[error("snapshot has multiple root nodes: `{first}` and `{second}`")]
    MultipleRoots { first: NodeId, second: NodeId },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Per-node positioning failure from the constraint positioner.
///
/// The engine substitutes the node's authored geometry and reports a
/// [`Diagnostic`](crate::Diagnostic) instead of aborting.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConstraintError {
    #[error("scale constraint on the {axis:?} axis needs a non-zero original parent size, got {original:?}")]
    DegenerateParent { axis: Axis, original: Option<f64> },
}
