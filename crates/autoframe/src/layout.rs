use autoframe_macros::WithBuilders;

use crate::primitives::Axis;

/// How a frame arranges its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutMode {
    /// No auto-layout. Children are positioned by their constraints.
    #[default]
    None,
    /// Children flow left to right
    Horizontal,
    /// Children flow top to bottom
    Vertical,
}

impl LayoutMode {
    /// The axis children flow along, or `None` when auto-layout is off.
    pub const fn primary_axis(self) -> Option<Axis> {
        match self {
            LayoutMode::None => None,
            LayoutMode::Horizontal => Some(Axis::Horizontal),
            LayoutMode::Vertical => Some(Axis::Vertical),
        }
    }

    pub const fn is_auto_layout(self) -> bool {
        !matches!(self, LayoutMode::None)
    }
}

/// How a size along one axis is determined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SizingMode {
    /// Authored size in pixels
    Fixed(f64),
    /// Size to content (children or host-measured natural size), plus padding
    #[default]
    Hug,
    /// Take the space the parent offers
    Fill,
}

impl SizingMode {
    pub const fn px(pixels: f64) -> Self {
        Self::Fixed(pixels)
    }

    /// The authored value for `Fixed`, `None` otherwise.
    pub const fn fixed_value(&self) -> Option<f64> {
        match self {
            SizingMode::Fixed(px) => Some(*px),
            SizingMode::Hug | SizingMode::Fill => None,
        }
    }

    pub const fn is_fill(&self) -> bool {
        matches!(self, SizingMode::Fill)
    }

    pub const fn is_hug(&self) -> bool {
        matches!(self, SizingMode::Hug)
    }
}

/// Distribution of leftover space along the primary axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrimaryAxisAlign {
    #[default]
    Min,
    Center,
    Max,
    /// Leftover space becomes equal gaps between children
    SpaceBetween,
}

/// Placement of children on the counter axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CounterAxisAlign {
    #[default]
    Min,
    Center,
    Max,
    /// Align first baselines (horizontal frames only, otherwise `Min`)
    Baseline,
}

/// Placement of wrapped lines on the counter axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CounterAxisAlignContent {
    /// Lines packed at the start, separated by `wrap_spacing`
    #[default]
    Auto,
    /// Spare counter space becomes equal gaps between lines
    SpaceBetween,
}

/// Per-child counter-axis placement override.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChildAlign {
    /// Use the parent's `counter_axis_align`
    #[default]
    Inherit,
    /// Fill the counter content size regardless of the child's own sizing
    Stretch,
    Min,
    Center,
    Max,
}

impl ChildAlign {
    /// Resolve against the parent's counter-axis alignment.
    ///
    /// Baseline alignment only exists for horizontal flow; vertical frames fall back to
    /// `Min`.
    pub fn resolve(self, counter_axis_align: CounterAxisAlign, primary: Axis) -> CrossAlign {
        match self {
            ChildAlign::Stretch => CrossAlign::Stretch,
            ChildAlign::Min => CrossAlign::Min,
            ChildAlign::Center => CrossAlign::Center,
            ChildAlign::Max => CrossAlign::Max,
            ChildAlign::Inherit => match counter_axis_align {
                CounterAxisAlign::Min => CrossAlign::Min,
                CounterAxisAlign::Center => CrossAlign::Center,
                CounterAxisAlign::Max => CrossAlign::Max,
                CounterAxisAlign::Baseline if primary == Axis::Horizontal => CrossAlign::Baseline,
                CounterAxisAlign::Baseline => CrossAlign::Min,
            },
        }
    }
}

/// Effective counter-axis placement of one child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossAlign {
    Stretch,
    Min,
    Center,
    Max,
    Baseline,
}

/// Whether a child takes part in the parent's flow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutPosition {
    #[default]
    Auto,
    /// Out of flow, placed at `(x, y)` from the parent's content-box origin
    Absolute { x: f64, y: f64 },
}

/// Padding inside a frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const ZERO: Self = Self::all(0.0);

    /// Create padding with all sides equal
    pub const fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create padding with symmetric horizontal and vertical values (CSS-style)
    ///
    /// ```
    /// # use autoframe::Padding;
    /// let padding = Padding::symmetric(10.0, 20.0);
    /// assert_eq!(padding.left, 10.0);
    /// assert_eq!(padding.right, 10.0);
    /// assert_eq!(padding.top, 20.0);
    /// assert_eq!(padding.bottom, 20.0);
    /// ```
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create padding from individual top, right, bottom, left values (CSS-style)
    pub const fn trbl(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Leading padding along `axis` (left or top)
    pub const fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing padding along `axis` (right or bottom)
    pub const fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Total padding along `axis`
    pub fn along(&self, axis: Axis) -> f64 {
        self.start(axis) + self.end(axis)
    }

    /// Negative sides are treated as zero.
    pub fn non_negative(self) -> Self {
        Self {
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            left: self.left.max(0.0),
        }
    }
}

/// Auto-layout settings of a frame.
///
/// With `layout_mode == LayoutMode::None` every other field except the size clamps is
/// ignored and children are placed through their [`Constraints`](crate::Constraints).
#[derive(Clone, Debug, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Frame {
    pub layout_mode: LayoutMode,
    /// Sizing along the flow direction
    pub primary_axis_sizing: SizingMode,
    /// Sizing perpendicular to the flow direction
    pub counter_axis_sizing: SizingMode,
    pub primary_axis_align: PrimaryAxisAlign,
    pub counter_axis_align: CounterAxisAlign,
    pub padding: Padding,
    /// Gap between consecutive children, may be negative
    pub item_spacing: f64,
    pub wrap: bool,
    /// Gap between wrapped lines
    pub wrap_spacing: f64,
    pub counter_axis_align_content: CounterAxisAlignContent,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::None,
            primary_axis_sizing: SizingMode::Hug,
            counter_axis_sizing: SizingMode::Hug,
            primary_axis_align: PrimaryAxisAlign::Min,
            counter_axis_align: CounterAxisAlign::Min,
            padding: Padding::ZERO,
            item_spacing: 0.0,
            wrap: false,
            wrap_spacing: 0.0,
            counter_axis_align_content: CounterAxisAlignContent::Auto,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
        }
    }
}

impl Frame {
    /// Horizontal auto-layout frame with default settings
    pub fn horizontal() -> Self {
        Self::default().with_layout_mode(LayoutMode::Horizontal)
    }

    /// Vertical auto-layout frame with default settings
    pub fn vertical() -> Self {
        Self::default().with_layout_mode(LayoutMode::Vertical)
    }

    pub fn primary_axis(&self) -> Option<Axis> {
        self.layout_mode.primary_axis()
    }

    /// The frame's own sizing along a physical axis, if it is an auto-layout frame.
    pub fn sizing(&self, axis: Axis) -> Option<SizingMode> {
        let primary = self.primary_axis()?;
        Some(if primary == axis {
            self.primary_axis_sizing
        } else {
            self.counter_axis_sizing
        })
    }

    pub fn min_extent(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    pub fn max_extent(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Apply the min/max clamps along `axis`. `min` wins over a smaller `max`.
    pub fn clamp(&self, axis: Axis, value: f64) -> f64 {
        let mut value = value;
        if let Some(max) = self.max_extent(axis) {
            value = value.min(max);
        }
        if let Some(min) = self.min_extent(axis) {
            value = value.max(min);
        }
        value.max(0.0)
    }

    /// Whether children wrap into lines.
    ///
    /// Wrapping needs a constrained primary axis: a fixed size, or hug with a max cap.
    pub fn wraps(&self, primary_sizing: SizingMode) -> bool {
        let Some(primary) = self.primary_axis() else {
            return false;
        };
        self.wrap
            && match primary_sizing {
                SizingMode::Fixed(_) => true,
                SizingMode::Hug => self.max_extent(primary).is_some(),
                SizingMode::Fill => false,
            }
    }
}

/// A node's participation record inside its parent frame.
#[derive(Clone, Debug, Default, PartialEq, WithBuilders)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChildLayout {
    /// Flow order, ties broken by node id
    pub order_index: i64,
    pub layout_align: ChildAlign,
    /// Share of the primary-axis remainder, zero means "do not grow"
    pub layout_grow: f64,
    /// Overrides the node's own horizontal sizing when set
    pub layout_sizing_horizontal: Option<SizingMode>,
    /// Overrides the node's own vertical sizing when set
    pub layout_sizing_vertical: Option<SizingMode>,
    pub layout_position: LayoutPosition,
}

impl ChildLayout {
    pub fn sizing(&self, axis: Axis) -> Option<SizingMode> {
        match axis {
            Axis::Horizontal => self.layout_sizing_horizontal,
            Axis::Vertical => self.layout_sizing_vertical,
        }
    }

    pub fn set_sizing(&mut self, axis: Axis, sizing: SizingMode) {
        match axis {
            Axis::Horizontal => self.layout_sizing_horizontal = Some(sizing),
            Axis::Vertical => self.layout_sizing_vertical = Some(sizing),
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self.layout_position, LayoutPosition::Absolute { .. })
    }

    /// Grow weight, negative weights count as zero.
    pub fn grow(&self) -> f64 {
        if self.layout_grow.is_finite() {
            self.layout_grow.max(0.0)
        } else {
            0.0
        }
    }
}
