use glam::DVec2;

/// A layout axis.
///
/// Auto-layout frames flow children along their *primary* axis and align them on
/// the perpendicular *counter* axis. Sizes and points are kept as [`DVec2`] with
/// `x` = horizontal and `y` = vertical, so axis-generic code reads and writes
/// components through [`Axis::of`] and [`Axis::pack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Component of `v` along this axis.
    pub fn of(self, v: DVec2) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    /// Build a vector from a component along this axis and one along the cross axis.
    ///
    /// ```
    /// # use autoframe::Axis;
    /// let v = Axis::Vertical.pack(30.0, 10.0);
    /// assert_eq!(v.x, 10.0);
    /// assert_eq!(v.y, 30.0);
    /// ```
    pub fn pack(self, along: f64, across: f64) -> DVec2 {
        match self {
            Axis::Horizontal => DVec2::new(along, across),
            Axis::Vertical => DVec2::new(across, along),
        }
    }
}

/// Axis-aligned rectangle in parent-relative coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: DVec2, size: DVec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Right edge
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.of(self.size())
    }

    /// Whether two rectangles are equal within `tolerance` on every component.
    pub fn approx_eq(&self, other: &Rect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}
