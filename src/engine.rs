//! Gallery layout: drives items through rows and keeps the running container
//! state between calls.
//!
//! # Example
//!
//! ```
//! use zenjustify::{Item, LayoutConfig, LayoutData, compute_layout};
//!
//! let config = LayoutConfig::new(200.0).target_row_height(100.0);
//! let mut data = LayoutData::new();
//!
//! let layout = compute_layout(&config, &mut data, &[Item::new(1.0), Item::new(2.0)]).unwrap();
//!
//! assert_eq!(layout.boxes.len(), 2);
//! assert_eq!(layout.boxes[0].top, 10.0);
//! assert_eq!(layout.boxes[1].top, 200.0);
//! ```
//!
//! # Incremental use
//!
//! [`LayoutData`] carries completed rows and the still-open trailing row from
//! one call to the next, so a gallery can be laid out page by page. Feeding
//! `[a, b]` and then `[c, d]` through the same accumulator ends in the same
//! layout as feeding `[a, b, c, d]` at once, unless the row limit is reached.
//! A shown widow row is never committed: its items are re-flowed together with
//! the next call's items.

use alloc::vec::Vec;
use core::fmt;

use crate::config::LayoutConfig;
use crate::item::{Entry, Item, ItemBox};
use crate::row::{Offer, Row, RowParams, RowState};

/// A committed row, as recorded in [`LayoutData`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowSummary {
    /// Vertical offset of the row within the container.
    pub top: f64,
    /// Final (clamped) row height.
    pub height: f64,
    /// Target height the row was built against.
    pub target_row_height: f64,
    /// Whether the row was a full-width breakout row.
    pub is_breakout_row: bool,
    /// Number of items in the row.
    pub item_count: usize,
}

/// Layout state carried across calls to [`compute_layout`].
///
/// Owned by the caller. Its container height is always the top padding plus
/// each committed row's height and the vertical spacing after it; bottom
/// padding is only ever applied to the returned [`Layout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutData {
    container_height: f64,
    started: bool,
    rows: Vec<RowSummary>,
    boxes: Vec<ItemBox>,
    pending: Vec<Entry>,
}

impl LayoutData {
    /// Empty accumulator for a new gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Running height: top padding plus committed rows and their spacing.
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Committed rows, in order.
    pub fn rows(&self) -> &[RowSummary] {
        &self.rows
    }

    /// Geometry of every item in a committed row, in input order.
    pub fn boxes(&self) -> &[ItemBox] {
        &self.boxes
    }

    /// Items held in the open trailing row, to be re-flowed by the next call.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn row_limit_reached(&self, config: &LayoutConfig) -> bool {
        config.max_num_rows.is_some_and(|max| self.rows.len() >= max)
    }

    fn open_row(&self, config: &LayoutConfig) -> Row {
        let is_breakout_row = config.is_breakout_row(self.rows.len());
        Row::new(RowParams::new(config, self.container_height, is_breakout_row))
    }

    fn commit(&mut self, row: &Row, config: &LayoutConfig) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            index = self.rows.len(),
            top = row.top(),
            height = row.height(),
            items = row.len(),
            breakout = row.is_breakout_row(),
            "row committed"
        );
        self.rows.push(RowSummary {
            top: row.top(),
            height: row.height(),
            target_row_height: row.target_row_height(),
            is_breakout_row: row.is_breakout_row(),
            item_count: row.len(),
        });
        self.boxes.extend_from_slice(row.boxes());
        self.container_height += row.height() + config.box_spacing.vertical;
    }

    /// Height a widow row should match: the last row's height, or its target
    /// when it was a breakout row. `None` when no row exists yet.
    fn widow_row_height(&self) -> Option<f64> {
        self.rows.last().map(|previous| {
            if previous.is_breakout_row {
                previous.target_row_height
            } else {
                previous.height
            }
        })
    }
}

/// Result of one [`compute_layout`] call.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Layout {
    /// Total container height, padding included.
    pub container_height: f64,
    /// Items in the force-completed trailing row. Zero when none was shown.
    pub widow_count: usize,
    /// Items discarded because [`LayoutConfig::max_num_rows`] was reached.
    pub dropped_count: usize,
    /// Geometry of every laid-out item in the gallery, in input order.
    pub boxes: Vec<ItemBox>,
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The item at `index` has an aspect ratio that is zero, negative or not finite.
    InvalidAspectRatio { index: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAspectRatio { index } => {
                write!(f, "item {index} has an invalid aspect ratio")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// Lay out `items` after everything already in `data`.
///
/// Every item is validated before `data` is touched; on error `data` is
/// unchanged. Returns the geometry of the whole gallery so far, including a
/// force-completed trailing row when [`LayoutConfig::show_widows`] is set.
///
/// `config` must have a positive target row height and a positive row width
/// (container width minus horizontal padding). Debug builds assert this.
pub fn compute_layout(
    config: &LayoutConfig,
    data: &mut LayoutData,
    items: &[Item],
) -> Result<Layout, LayoutError> {
    if let Some(index) = items.iter().position(|item| !item.is_valid()) {
        return Err(LayoutError::InvalidAspectRatio { index });
    }
    debug_assert!(
        config.target_row_height > 0.0 && config.row_width() > 0.0,
        "target row height and row width must be positive"
    );

    if !data.started {
        data.container_height += config.container_padding.top;
        data.started = true;
    }

    let entries: Vec<Entry> = core::mem::take(&mut data.pending)
        .into_iter()
        .chain(items.iter().map(|item| {
            if config.force_aspect_ratio {
                Entry::forced_square()
            } else {
                Entry::new(item.aspect_ratio)
            }
        }))
        .collect();

    let total = entries.len();
    let mut placed = 0;
    let mut row: Option<Row> = None;

    'items: for entry in entries {
        // A rejected item is offered again to the next row until it lands.
        loop {
            if row.is_none() && data.row_limit_reached(config) {
                break 'items;
            }
            let current = row.get_or_insert_with(|| data.open_row(config));
            debug_assert_eq!(current.state(), RowState::Open);
            match current.offer(entry) {
                Offer::Accepted => {
                    placed += 1;
                    continue 'items;
                }
                Offer::AcceptedAndFull => {
                    placed += 1;
                    data.commit(current, config);
                    row = None;
                    continue 'items;
                }
                Offer::RejectedAndFull => {
                    data.commit(current, config);
                    row = None;
                }
            }
        }
    }

    let dropped_count = total - placed;
    #[cfg(feature = "tracing")]
    if dropped_count > 0 {
        tracing::warn!(
            dropped = dropped_count,
            max_num_rows = ?config.max_num_rows,
            "row limit reached; remaining items dropped"
        );
    }

    let mut boxes = data.boxes.clone();
    let mut container_height = data.container_height;
    let mut widow_count = 0;

    if let Some(mut widow) = row.filter(|r| !r.is_empty()) {
        data.pending = widow.entries().to_vec();
        if config.show_widows {
            widow.force_complete(data.widow_row_height());
            boxes.extend_from_slice(widow.boxes());
            container_height += widow.height() + config.box_spacing.vertical;
            widow_count = widow.len();
            #[cfg(feature = "tracing")]
            tracing::debug!(
                items = widow_count,
                height = widow.height(),
                "widow row force-completed"
            );
        }
    }

    // Drop the spacing added after the last row, then close with padding.
    container_height -= config.box_spacing.vertical;
    container_height += config.container_padding.bottom;

    Ok(Layout {
        container_height,
        widow_count,
        dropped_count,
        boxes,
    })
}

/// Lay out a complete gallery in one call, with a fresh accumulator.
pub fn compute_layout_once(config: &LayoutConfig, items: &[Item]) -> Result<Layout, LayoutError> {
    compute_layout(config, &mut LayoutData::new(), items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Spacing, WidowLayoutStyle};

    fn items(ratios: &[f64]) -> Vec<Item> {
        ratios.iter().copied().map(Item::new).collect()
    }

    fn small() -> LayoutConfig {
        LayoutConfig::new(200.0).target_row_height(100.0)
    }

    #[test]
    fn rejected_item_starts_next_row() {
        let mut data = LayoutData::new();
        let layout = compute_layout(&small(), &mut data, &items(&[1.0, 2.0])).unwrap();

        assert_eq!(data.rows().len(), 2);
        assert_eq!(data.rows()[0].height, 180.0);
        assert_eq!(data.rows()[0].item_count, 1);
        assert_eq!(data.rows()[1].top, 200.0);
        assert_eq!(data.rows()[1].height, 90.0);
        assert_eq!(layout.boxes[1].top, 200.0);
        assert_eq!(layout.container_height, 300.0);
        assert_eq!(layout.widow_count, 0);
    }

    #[test]
    fn accumulator_height_excludes_bottom_padding() {
        let mut data = LayoutData::new();
        compute_layout(&small(), &mut data, &items(&[1.0, 2.0])).unwrap();
        // 10 top + (180 + 10) + (90 + 10)
        assert_eq!(data.container_height(), 300.0);
        assert_eq!(data.pending_count(), 0);
    }

    #[test]
    fn top_padding_applied_once_per_accumulator() {
        let config = small();
        let mut data = LayoutData::new();
        compute_layout(&config, &mut data, &items(&[2.0])).unwrap();
        compute_layout(&config, &mut data, &items(&[2.0])).unwrap();
        assert_eq!(data.container_height(), 10.0 + (90.0 + 10.0) * 2.0);
        assert_eq!(data.rows()[1].top, 110.0);
    }

    #[test]
    fn open_row_is_kept_pending_and_reflowed() {
        let config = LayoutConfig::default();
        let mut data = LayoutData::new();

        let first = compute_layout(&config, &mut data, &items(&[1.0, 1.0])).unwrap();
        assert_eq!(first.widow_count, 2);
        assert_eq!(first.boxes.len(), 2);
        assert_eq!(data.pending_count(), 2);
        assert!(data.rows().is_empty());
        assert!(data.boxes().is_empty());

        // Three squares fill a 1040px row at 340px; the fourth is the new widow.
        let second = compute_layout(&config, &mut data, &items(&[1.0, 1.0])).unwrap();
        assert_eq!(second.widow_count, 1);
        assert_eq!(second.boxes.len(), 4);
        assert_eq!(data.pending_count(), 1);
        assert_eq!(data.rows().len(), 1);
        assert_eq!(data.rows()[0].item_count, 3);
        assert_eq!(data.rows()[0].height, 340.0);
    }

    #[test]
    fn hidden_widows_stay_pending() {
        let config = LayoutConfig::default().show_widows(false);
        let mut data = LayoutData::new();
        let layout = compute_layout(&config, &mut data, &items(&[1.0, 1.0])).unwrap();
        assert!(layout.boxes.is_empty());
        assert_eq!(layout.widow_count, 0);
        assert_eq!(layout.dropped_count, 0);
        assert_eq!(data.pending_count(), 2);
        assert_eq!(layout.container_height, 10.0);
    }

    #[test]
    fn invalid_item_leaves_accumulator_untouched() {
        let mut data = LayoutData::new();
        compute_layout(&small(), &mut data, &items(&[1.0])).unwrap();
        let before = data.clone();

        let err = compute_layout(&small(), &mut data, &items(&[1.0, 2.0, 0.0, -1.0])).unwrap_err();
        assert_eq!(err, LayoutError::InvalidAspectRatio { index: 2 });
        assert_eq!(data, before);
    }

    #[test]
    fn error_display_names_index() {
        let err = LayoutError::InvalidAspectRatio { index: 7 };
        assert_eq!(err.to_string(), "item 7 has an invalid aspect ratio");
    }

    #[test]
    fn row_limit_drops_rest() {
        let config = small().max_num_rows(2);
        let mut data = LayoutData::new();
        let layout = compute_layout(&config, &mut data, &items(&[1.0, 2.0, 1.0])).unwrap();
        assert_eq!(layout.boxes.len(), 2);
        assert_eq!(layout.dropped_count, 1);
        assert_eq!(layout.widow_count, 0);
        assert_eq!(data.rows().len(), 2);
        assert_eq!(data.pending_count(), 0);
    }

    #[test]
    fn row_limit_includes_rejected_item() {
        // Row one fills by rejecting the 2; the limit then drops it too.
        let config = small().max_num_rows(1);
        let layout = compute_layout_once(&config, &items(&[1.0, 2.0, 1.0])).unwrap();
        assert_eq!(layout.boxes.len(), 1);
        assert_eq!(layout.dropped_count, 2);
    }

    #[test]
    fn reached_limit_drops_later_calls_entirely() {
        let config = small().max_num_rows(1);
        let mut data = LayoutData::new();
        compute_layout(&config, &mut data, &items(&[2.0])).unwrap();
        let layout = compute_layout(&config, &mut data, &items(&[2.0, 1.0])).unwrap();
        assert_eq!(layout.boxes.len(), 1);
        assert_eq!(layout.dropped_count, 2);
        assert_eq!(data.rows().len(), 1);
    }

    #[test]
    fn zero_row_limit_lays_out_nothing() {
        let config = small().max_num_rows(0);
        let layout = compute_layout_once(&config, &items(&[1.0, 2.0])).unwrap();
        assert!(layout.boxes.is_empty());
        assert_eq!(layout.dropped_count, 2);
    }

    #[test]
    fn widow_matches_previous_row_height() {
        let config = LayoutConfig::new(1000.0).target_row_height(250.0);
        let mut data = LayoutData::new();
        let layout = compute_layout(&config, &mut data, &items(&[1.0, 4.0, 1.1])).unwrap();
        assert_eq!(layout.widow_count, 1);
        assert_eq!(layout.boxes[2].height, 194.0);
        assert_eq!(layout.boxes[2].top, 214.0);
        assert_eq!(layout.container_height, 10.0 + 194.0 + 10.0 + 194.0 + 10.0);
    }

    #[test]
    fn widow_after_breakout_uses_target_height() {
        let config = LayoutConfig::default().breakout_cadence(2);
        let mut data = LayoutData::new();
        let layout =
            compute_layout(&config, &mut data, &items(&[1.0, 1.0, 1.0, 2.0, 1.0])).unwrap();
        assert!(!data.rows()[0].is_breakout_row);
        assert!(data.rows()[1].is_breakout_row);
        assert_eq!(data.rows()[1].height, 520.0);
        assert_eq!(layout.widow_count, 1);
        assert_eq!(layout.boxes[4].height, 320.0);
    }

    #[test]
    fn justified_widow_after_tall_row_keeps_positive_widths() {
        // Row one rejects the second 9 and ends at 1000/9, above target.
        let config = LayoutConfig::new(1020.0)
            .target_row_height(100.0)
            .tolerance(0.05)
            .widow_layout_style(WidowLayoutStyle::Justified);
        let mut data = LayoutData::new();
        let layout = compute_layout(&config, &mut data, &items(&[9.0, 9.0, 0.05])).unwrap();

        assert!((data.rows()[0].height - 1000.0 / 9.0).abs() < 1e-9);
        assert_eq!(layout.widow_count, 2);
        assert!(layout.boxes.iter().all(|b| b.width > 0.0 && b.height > 0.0));
        let widow = &layout.boxes[1..];
        assert!((widow[0].height - 990.0 / 9.05).abs() < 1e-9);
        assert!((widow[1].right() - 1010.0).abs() < 1e-6);
        assert!(widow[1].left > widow[0].left);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must be positive")]
    fn zero_target_height_is_caught() {
        let config = LayoutConfig::default().target_row_height(0.0);
        let _ = compute_layout_once(&config, &items(&[1.0, 1.0]));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must be positive")]
    fn padding_wider_than_container_is_caught() {
        let config = LayoutConfig::new(15.0);
        let _ = compute_layout_once(&config, &items(&[1.0]));
    }

    #[test]
    fn empty_input_gives_padding_only() {
        let layout = compute_layout_once(&LayoutConfig::default(), &[]).unwrap();
        assert!(layout.boxes.is_empty());
        assert_eq!(layout.container_height, 10.0);
    }

    #[test]
    fn vertical_spacing_between_rows() {
        let config = small().box_spacing(Spacing::new(10.0, 30.0));
        let layout = compute_layout_once(&config, &items(&[1.0, 2.0])).unwrap();
        assert_eq!(layout.boxes[1].top, 10.0 + 180.0 + 30.0);
        assert_eq!(layout.container_height, 10.0 + 180.0 + 30.0 + 90.0 + 10.0);
    }

    #[test]
    fn forced_aspect_ratio_marks_boxes() {
        let config = LayoutConfig::default().force_aspect_ratio(true);
        let layout = compute_layout_once(&config, &items(&[2.0, 0.5, 3.0, 1.0])).unwrap();
        assert_eq!(layout.boxes.len(), 4);
        assert!(layout.boxes.iter().all(|b| b.forced_aspect_ratio));
        let w = layout.boxes[0].width;
        assert!(layout.boxes.iter().all(|b| (b.width - w).abs() <= 1.0));
        assert!(layout.boxes.iter().all(|b| (b.height - b.width).abs() <= 1.0));
    }
}
