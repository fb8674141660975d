//! # autoframe
//!
//! Deterministic auto-layout resolution engine.
//!
//! Given a tree of frames, their sizing and alignment rules, responsive breakpoints and
//! per-breakpoint overrides, this crate computes the position and size of every node
//! for a viewport width. It produces geometry only; painting is left to the host.
//!
//! ## Core Types
//!
//! - [`Node`] - A frame of the layout tree
//! - [`Frame`] - Auto-layout settings (direction, sizing, alignment, padding, wrapping)
//! - [`ChildLayout`] - How a node takes part in its parent's flow
//! - [`Constraints`] - Anchoring for nodes outside auto-layout
//!
//! ## Resolution
//!
//! - [`LayoutInput`] - Tree, breakpoints and overrides, resolved per viewport width
//! - [`Snapshot`] - Flat serializable form of a [`LayoutInput`]
//! - [`Resolution`] - Geometry map, active breakpoint, hidden subtrees and diagnostics
//! - [`LayoutOptions`] - Diagnostics collection, pixel snapping, viewport height
//!
//! ## Passes
//!
//! - [`BreakpointSet::resolve`] and [`apply_overrides`] - Effective tree for a width
//! - [`Measurements::measure`] - Bottom-up intrinsic sizes
//! - [`Distributor`] - Top-down sizes and positions
//! - [`position`] - Constraint positioner
//! - [`ContentMeasurer`] - Host hook for text and image metrics
//!
//! ```
//! use autoframe::*;
//!
//! let row = Node::new("row")
//!     .with_frame(
//!         Frame::horizontal()
//!             .with_primary_axis_sizing(SizingMode::px(300.0))
//!             .with_padding(Padding::all(10.0))
//!             .with_item_spacing(8.0),
//!     )
//!     .with_children([
//!         Node::new("a").with_fixed_size(60.0, 40.0),
//!         Node::new("b").with_fixed_size(60.0, 40.0),
//!     ]);
//!
//! let resolution = LayoutInput::new(row).resolve(1280.0)?;
//! assert_eq!(resolution.get("b"), Some(Rect::new(78.0, 10.0, 60.0, 40.0)));
//! # Ok::<(), ConfigError>(())
//! ```

mod breakpoint;
mod constraint;
mod distribute;
mod engine;
mod error;
mod flow;
mod layout;
mod measure;
mod node;
mod options;
mod output;
mod primitives;
mod snapshot;

// Model
pub use constraint::*;
pub use layout::*;
pub use node::*;
pub use primitives::*;

// Responsive configuration
pub use breakpoint::*;

// Passes
pub use distribute::*;
pub use flow::{break_lines, line_extent, split_remainder};
pub use measure::*;

// Resolution
pub use engine::*;
pub use error::{ConfigError, ConstraintError};
pub use options::*;
pub use output::*;
pub use snapshot::*;
