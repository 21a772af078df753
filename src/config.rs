//! Layout configuration: container geometry, spacing, row targets and widow handling.
//!
//! # Example
//!
//! ```
//! use zenjustify::{LayoutConfig, Padding, WidowLayoutStyle};
//!
//! let config = LayoutConfig::new(800.0)
//!     .target_row_height(240.0)
//!     .container_padding(Padding::uniform(0.0))
//!     .widow_layout_style(WidowLayoutStyle::Center);
//!
//! assert_eq!(config.row_width(), 800.0);
//! ```

/// How items in a force-completed trailing row are positioned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum WidowLayoutStyle {
    /// Items start at the left inset. Remaining width stays empty.
    #[default]
    Left,
    /// Items are centered within the row.
    Center,
    /// Items are stretched to fill the row like any complete row.
    Justified,
}

/// Space between the container edges and the rows, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Same padding on every side.
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Padding in CSS order: top, right, bottom, left.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Gap between neighbouring items (horizontal) and between rows (vertical).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Spacing {
    /// Same gap on both axes.
    pub const fn uniform(value: f64) -> Self {
        Self {
            horizontal: value,
            vertical: value,
        }
    }

    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Configuration for one layout computation.
///
/// Read-only during [`compute_layout`](crate::compute_layout). The widow count
/// is reported on [`Layout`](crate::Layout), never written back here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct LayoutConfig {
    /// Total available width, padding included. Must exceed the left plus
    /// right padding.
    pub container_width: f64,
    pub container_padding: Padding,
    pub box_spacing: Spacing,
    /// Desired row height. Must be positive.
    pub target_row_height: f64,
    /// Fractional slack around the target height. `0.25` allows ±25%.
    pub target_row_height_tolerance: f64,
    /// Stop packing once this many rows are complete. `None` = unbounded.
    pub max_num_rows: Option<usize>,
    /// Lay out every item as a square, ignoring its aspect ratio.
    pub force_aspect_ratio: bool,
    /// Force-complete a trailing partial row instead of holding it back.
    pub show_widows: bool,
    /// Every Nth row is a full-width breakout row.
    pub full_width_breakout_row_cadence: Option<usize>,
    /// Placement of items in the trailing (widow) row.
    pub widow_layout_style: WidowLayoutStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_width: 1060.0,
            container_padding: Padding::default(),
            box_spacing: Spacing::default(),
            target_row_height: 320.0,
            target_row_height_tolerance: 0.25,
            max_num_rows: None,
            force_aspect_ratio: false,
            show_widows: true,
            full_width_breakout_row_cadence: None,
            widow_layout_style: WidowLayoutStyle::Left,
        }
    }
}

impl LayoutConfig {
    /// Default configuration for a container of the given width.
    pub fn new(container_width: f64) -> Self {
        Self {
            container_width,
            ..Self::default()
        }
    }

    /// Set the container width.
    pub fn container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    /// Set the container padding.
    pub fn container_padding(mut self, padding: Padding) -> Self {
        self.container_padding = padding;
        self
    }

    /// Set the gap between items and between rows.
    pub fn box_spacing(mut self, spacing: Spacing) -> Self {
        self.box_spacing = spacing;
        self
    }

    /// Set the desired row height. Must be positive.
    pub fn target_row_height(mut self, height: f64) -> Self {
        self.target_row_height = height;
        self
    }

    /// Set the fractional tolerance around the target row height.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.target_row_height_tolerance = tolerance;
        self
    }

    /// Limit the number of completed rows.
    pub fn max_num_rows(mut self, rows: usize) -> Self {
        self.max_num_rows = Some(rows);
        self
    }

    /// Lay out every item as a square.
    pub fn force_aspect_ratio(mut self, force: bool) -> Self {
        self.force_aspect_ratio = force;
        self
    }

    /// Show or hold back the trailing partial row.
    pub fn show_widows(mut self, show: bool) -> Self {
        self.show_widows = show;
        self
    }

    /// Make every `cadence`th row a full-width breakout row.
    pub fn breakout_cadence(mut self, cadence: usize) -> Self {
        self.full_width_breakout_row_cadence = Some(cadence);
        self
    }

    /// Set how the trailing row is positioned.
    pub fn widow_layout_style(mut self, style: WidowLayoutStyle) -> Self {
        self.widow_layout_style = style;
        self
    }

    /// Width available to a row: container width minus left and right padding.
    pub fn row_width(&self) -> f64 {
        self.container_width - self.container_padding.left - self.container_padding.right
    }

    /// Whether the row following `completed_rows` completed rows is a breakout row.
    ///
    /// A cadence of zero disables breakout rows.
    pub(crate) fn is_breakout_row(&self, completed_rows: usize) -> bool {
        match self.full_width_breakout_row_cadence {
            Some(cadence) if cadence > 0 => (completed_rows + 1) % cadence == 0,
            _ => false,
        }
    }
}
