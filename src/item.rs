//! Input descriptors and output geometry for laid-out items.

/// An item to lay out, described only by its aspect ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Item {
    /// Width divided by height. Must be finite and greater than zero.
    pub aspect_ratio: f64,
}

impl Item {
    /// Create an item from its aspect ratio.
    pub const fn new(aspect_ratio: f64) -> Self {
        Self { aspect_ratio }
    }

    /// Create an item from its intrinsic pixel dimensions.
    ///
    /// A zero height yields a non-finite ratio, which
    /// [`compute_layout`](crate::compute_layout) rejects.
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self {
            aspect_ratio: width / height,
        }
    }

    /// Whether the aspect ratio can be laid out.
    pub fn is_valid(&self) -> bool {
        self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0
    }
}

impl From<f64> for Item {
    fn from(aspect_ratio: f64) -> Self {
        Self::new(aspect_ratio)
    }
}

/// Final position and size of one item within the container, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ItemBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// The item was laid out as a square because of
    /// [`LayoutConfig::force_aspect_ratio`](crate::LayoutConfig::force_aspect_ratio).
    pub forced_aspect_ratio: bool,
}

impl ItemBox {
    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// An item as held by a row: the aspect ratio used for packing and whether
/// configuration overrode it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Entry {
    pub(crate) aspect_ratio: f64,
    pub(crate) forced: bool,
}

impl Entry {
    pub(crate) fn new(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            forced: false,
        }
    }

    pub(crate) fn forced_square() -> Self {
        Self {
            aspect_ratio: 1.0,
            forced: true,
        }
    }
}
