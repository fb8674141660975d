/// Configuration for a layout resolution
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Report overflow conditions (fill demand above supply, content larger than its line)
    pub collect_diagnostics: bool,
    /// Split grow remainders into whole units, earlier children taking the extra unit
    pub snap_to_pixels: bool,
    /// Height offered to a root that fills vertically. `None` lets it hug its content.
    pub viewport_height: Option<f64>,
}

impl LayoutOptions {
    /// Default options: no diagnostics, pixel snapping on, no viewport height
    pub const fn new() -> Self {
        Self {
            collect_diagnostics: false,
            snap_to_pixels: true,
            viewport_height: None,
        }
    }

    /// Enable overflow diagnostics
    pub const fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.collect_diagnostics = enabled;
        self
    }

    /// Enable whole-unit grow shares
    pub const fn with_pixel_snapping(mut self, enabled: bool) -> Self {
        self.snap_to_pixels = enabled;
        self
    }

    /// Offer a viewport height to the root
    pub const fn with_viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = Some(height);
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}
