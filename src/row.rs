//! Row assembly: the fit decision for each offered item and the geometry of a
//! completed row.
//!
//! A [`Row`] is either open or full. Items are offered one at a time; each
//! offer either leaves the row open, fills it with the item, or fills it
//! without the item (the caller then offers that item to a fresh row).
//!
//! Completion turns the accepted aspect ratios into pixel boxes. Row height is
//! clamped to `[0.5, 2] × target`; when the clamp bites, item widths keep their
//! unclamped values so the row still spans the container, and the mismatch
//! shows up as crop or pad on the individual items.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::config::{LayoutConfig, WidowLayoutStyle};
use crate::item::{Entry, ItemBox};

/// Fixed geometry of one row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct RowParams {
    /// Vertical offset of the row within the container.
    pub(crate) top: f64,
    /// Left inset of the first item.
    pub(crate) left: f64,
    /// Row width, padding excluded.
    pub(crate) width: f64,
    pub(crate) spacing: f64,
    pub(crate) target_row_height: f64,
    pub(crate) tolerance: f64,
    pub(crate) edge_case_min_row_height: f64,
    pub(crate) edge_case_max_row_height: f64,
    pub(crate) widow_layout_style: WidowLayoutStyle,
    pub(crate) is_breakout_row: bool,
}

impl RowParams {
    pub(crate) fn new(config: &LayoutConfig, top: f64, is_breakout_row: bool) -> Self {
        Self {
            top,
            left: config.container_padding.left,
            width: config.row_width(),
            spacing: config.box_spacing.horizontal,
            target_row_height: config.target_row_height,
            tolerance: config.target_row_height_tolerance,
            edge_case_min_row_height: 0.5 * config.target_row_height,
            edge_case_max_row_height: 2.0 * config.target_row_height,
            widow_layout_style: config.widow_layout_style,
            is_breakout_row,
        }
    }
}

/// Whether a row can take more items.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum RowState {
    Open,
    Full,
}

/// Outcome of offering one item to an open row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Offer {
    /// Taken; the row is still open.
    Accepted,
    /// Taken; the row is now full.
    AcceptedAndFull,
    /// Not taken; the row is now full without it.
    RejectedAndFull,
}

#[derive(Clone, Debug)]
pub(crate) struct Row {
    params: RowParams,
    min_aspect_ratio: f64,
    max_aspect_ratio: f64,
    /// Zero until the row is complete.
    height: f64,
    entries: Vec<Entry>,
    boxes: Vec<ItemBox>,
}

impl Row {
    pub(crate) fn new(params: RowParams) -> Self {
        let target_aspect_ratio = params.width / params.target_row_height;
        Self {
            min_aspect_ratio: target_aspect_ratio * (1.0 - params.tolerance),
            max_aspect_ratio: target_aspect_ratio * (1.0 + params.tolerance),
            params,
            height: 0.0,
            entries: Vec::new(),
            boxes: Vec::new(),
        }
    }

    /// Offer one item to the row.
    ///
    /// A full row rejects every offer without changing.
    pub(crate) fn offer(&mut self, entry: Entry) -> Offer {
        if self.is_complete() {
            return Offer::RejectedAndFull;
        }

        let count = self.entries.len() as f64;
        let row_width_without_spacing = self.params.width - count * self.params.spacing;
        let previous_aspect_ratio = self.aspect_ratio_sum();
        let new_aspect_ratio = previous_aspect_ratio + entry.aspect_ratio;
        let target_aspect_ratio = row_width_without_spacing / self.params.target_row_height;

        // Breakout rows give a lone square or landscape item the full width.
        if self.params.is_breakout_row && self.entries.is_empty() && entry.aspect_ratio >= 1.0 {
            self.entries.push(entry);
            self.complete_layout(
                row_width_without_spacing / entry.aspect_ratio,
                WidowLayoutStyle::Justified,
            );
            return self.trace_offer(entry, Offer::AcceptedAndFull);
        }

        // Still too tall: keep the item and wait for more.
        if new_aspect_ratio < self.min_aspect_ratio {
            self.entries.push(entry);
            return self.trace_offer(entry, Offer::Accepted);
        }

        if new_aspect_ratio < self.max_aspect_ratio {
            self.entries.push(entry);
            self.complete_layout(
                row_width_without_spacing / new_aspect_ratio,
                WidowLayoutStyle::Justified,
            );
            return self.trace_offer(entry, Offer::AcceptedAndFull);
        }

        // Too short with the item. A lone panorama cannot be split, so it
        // gets a row of its own regardless.
        if self.entries.is_empty() {
            self.entries.push(entry);
            self.complete_layout(
                row_width_without_spacing / new_aspect_ratio,
                WidowLayoutStyle::Justified,
            );
            return self.trace_offer(entry, Offer::AcceptedAndFull);
        }

        // Keep whichever of "with" and "without" lands closer to target.
        // Rejecting means padding the shorter row; accepting means cropping.
        let previous_row_width_without_spacing =
            self.params.width - (count - 1.0) * self.params.spacing;
        let previous_target_aspect_ratio =
            previous_row_width_without_spacing / self.params.target_row_height;

        if (new_aspect_ratio - target_aspect_ratio).abs()
            > (previous_aspect_ratio - previous_target_aspect_ratio).abs()
        {
            self.complete_layout(
                previous_row_width_without_spacing / previous_aspect_ratio,
                WidowLayoutStyle::Justified,
            );
            return self.trace_offer(entry, Offer::RejectedAndFull);
        }

        self.entries.push(entry);
        self.complete_layout(
            row_width_without_spacing / new_aspect_ratio,
            WidowLayoutStyle::Justified,
        );
        self.trace_offer(entry, Offer::AcceptedAndFull)
    }

    /// Complete the row with whatever items it holds, at `height` or the
    /// target height, positioned per the configured widow style.
    ///
    /// A justified row never goes taller than the height at which its items
    /// exactly fill the row; past that, the width correction would have to
    /// shrink items instead of stretching them.
    pub(crate) fn force_complete(&mut self, height: Option<f64>) {
        let mut height = height.unwrap_or(self.params.target_row_height);
        let style = self.params.widow_layout_style;
        if style == WidowLayoutStyle::Justified && !self.entries.is_empty() {
            let row_width_without_spacing =
                self.params.width - (self.entries.len() as f64 - 1.0) * self.params.spacing;
            height = height.min(row_width_without_spacing / self.aspect_ratio_sum());
        }
        self.complete_layout(height, style);
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.height > 0.0
    }

    pub(crate) fn state(&self) -> RowState {
        if self.is_complete() {
            RowState::Full
        } else {
            RowState::Open
        }
    }

    pub(crate) fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn top(&self) -> f64 {
        self.params.top
    }

    pub(crate) fn target_row_height(&self) -> f64 {
        self.params.target_row_height
    }

    pub(crate) fn is_breakout_row(&self) -> bool {
        self.params.is_breakout_row
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Item geometry. Empty until the row is complete.
    pub(crate) fn boxes(&self) -> &[ItemBox] {
        &self.boxes
    }

    fn aspect_ratio_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.aspect_ratio).sum()
    }

    fn complete_layout(&mut self, new_height: f64, style: WidowLayoutStyle) {
        let p = self.params;
        let count = self.entries.len();
        let row_width_without_spacing = p.width - (count as f64 - 1.0) * p.spacing;
        let clamped_height = new_height
            .min(p.edge_case_max_row_height)
            .max(p.edge_case_min_row_height);

        // Widths stay at their unclamped size; the clamped height is what
        // the items get cropped or padded to.
        let clamped_to_native_ratio = if (new_height - clamped_height).abs() > f64::MIN_POSITIVE {
            (row_width_without_spacing / clamped_height) / (row_width_without_spacing / new_height)
        } else {
            1.0
        };
        self.height = clamped_height;

        if count == 0 {
            return;
        }

        let height = self.height;
        let mut cursor = p.left;
        self.boxes = self
            .entries
            .iter()
            .map(|entry| {
                let width = entry.aspect_ratio * height * clamped_to_native_ratio;
                let placed = ItemBox {
                    top: p.top,
                    left: cursor,
                    width,
                    height,
                    forced_aspect_ratio: entry.forced,
                };
                cursor += width + p.spacing;
                placed
            })
            .collect();

        match style {
            WidowLayoutStyle::Justified => {
                // Spread the gap between placed width and row width over the
                // items as whole pixels. Each item absorbs the difference of
                // consecutive cumulative errors, so spacing stays uniform and
                // the sum of adjustments is the rounded total error.
                let placed_width = cursor - p.spacing - p.left;
                let error_per_item = (placed_width - p.width) / count as f64;
                let mut previous = 0.0;
                for (i, b) in self.boxes.iter_mut().enumerate() {
                    let cumulative = round_half_even((i + 1) as f64 * error_per_item);
                    b.left -= previous;
                    b.width -= cumulative - previous;
                    previous = cumulative;
                }
            }
            WidowLayoutStyle::Center => {
                let center_offset = (p.width - cursor) / 2.0;
                for b in &mut self.boxes {
                    b.left += center_offset + p.spacing;
                }
            }
            WidowLayoutStyle::Left => {}
        }
    }

    #[allow(unused_variables)]
    fn trace_offer(&self, entry: Entry, offer: Offer) -> Offer {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            aspect_ratio = entry.aspect_ratio,
            items = self.entries.len(),
            height = self.height,
            ?offer,
            "row offer"
        );
        offer
    }
}

/// Round to the nearest integer, ties to even.
fn round_half_even(x: f64) -> f64 {
    let r = x.round();
    if (r - x).abs() == 0.5 && r % 2.0 != 0.0 {
        r - x.signum()
    } else {
        r
    }
}
