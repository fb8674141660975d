//! The resolution pipeline: breakpoint, overrides, measurement, distribution.

use std::borrow::Cow;

use crate::breakpoint::{apply_overrides, validate_overrides, Breakpoint, BreakpointSet, Override};
use crate::distribute::Distributor;
use crate::error::{ConfigError, Result};
use crate::measure::{AuthoredSizes, ContentMeasurer, Measurements};
use crate::node::Node;
use crate::options::LayoutOptions;
use crate::output::Resolution;

/// An immutable layout request: the base tree plus its responsive configuration.
///
/// Resolution never mutates the input, so one `LayoutInput` can be resolved for many
/// viewport widths, from several threads at once.
///
/// ```
/// # use autoframe::*;
/// let input = LayoutInput::new(
///     Node::new("page")
///         .with_frame(Frame::vertical().with_counter_axis_sizing(SizingMode::Fill))
///         .with_child(Node::leaf("title", 120.0, 24.0)),
/// )
/// .with_breakpoints(BreakpointSet::new([Breakpoint::fallback("desktop")]));
///
/// let resolution = input.resolve(1024.0).unwrap();
/// assert_eq!(resolution.active_breakpoint, Some("desktop".into()));
/// assert_eq!(resolution.get("page"), Some(Rect::new(0.0, 0.0, 1024.0, 24.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutInput {
    pub root: Node,
    pub breakpoints: BreakpointSet,
    pub overrides: Vec<Override>,
}

impl LayoutInput {
    /// A tree without breakpoints
    pub fn new(root: Node) -> Self {
        Self {
            root,
            breakpoints: BreakpointSet::default(),
            overrides: Vec::new(),
        }
    }

    pub fn with_breakpoints(mut self, breakpoints: BreakpointSet) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = Override>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Check the configuration without laying anything out.
    pub fn validate(&self) -> Result<()> {
        self.root.validate()?;
        self.breakpoints.validate()?;
        validate_overrides(&self.breakpoints, &self.overrides)
    }

    /// Breakpoint active at `viewport_width`, `None` when no breakpoints are configured.
    pub fn active_breakpoint(&self, viewport_width: f64) -> Result<Option<&Breakpoint>> {
        if self.breakpoints.is_empty() {
            return Ok(None);
        }
        self.breakpoints.resolve(viewport_width).map(Some)
    }

    /// Resolve with authored natural sizes and default options.
    pub fn resolve(&self, viewport_width: f64) -> Result<Resolution> {
        self.resolve_with(viewport_width, &AuthoredSizes, &LayoutOptions::default())
    }

    /// Resolve the geometry of every visible node for `viewport_width`.
    ///
    /// Configuration errors abort before any layout. Per-node problems are reported in
    /// [`Resolution::diagnostics`] and never prevent the rest of the tree from resolving.
    pub fn resolve_with(
        &self,
        viewport_width: f64,
        measurer: &dyn ContentMeasurer,
        options: &LayoutOptions,
    ) -> Result<Resolution> {
        if !viewport_width.is_finite() || viewport_width < 0.0 {
            return Err(ConfigError::InvalidViewport {
                width: viewport_width,
            });
        }
        self.validate()?;

        let active = self.active_breakpoint(viewport_width)?;
        let effective = match active {
            Some(breakpoint) => {
                log::debug!(
                    "viewport {viewport_width}: active breakpoint `{}`",
                    breakpoint.id
                );
                Cow::Owned(apply_overrides(&self.root, &breakpoint.id, &self.overrides))
            }
            None => Cow::Borrowed(&self.root),
        };

        let measurements = Measurements::measure(&effective, measurer);
        let mut distributor = Distributor::new(&measurements, measurer, options);
        distributor.distribute(&effective, viewport_width, options.viewport_height);

        let mut resolution = distributor.finish();
        resolution.active_breakpoint = active.map(|breakpoint| breakpoint.id.clone());
        log::debug!(
            "resolved {} nodes ({} hidden subtrees, {} diagnostics)",
            resolution.geometry.len(),
            resolution.hidden.len(),
            resolution.diagnostics.len()
        );
        Ok(resolution)
    }
}
