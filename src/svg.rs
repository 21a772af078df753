//! SVG visualization of a computed gallery layout.
//!
//! Draws the container, its padding, and every item box scaled to a fixed
//! panel width, with a caption summarizing the result. Widow boxes and boxes
//! with a forced aspect ratio get their own styles.
//!
//! # Example
//!
//! ```
//! use zenjustify::{Item, LayoutConfig, compute_layout_once, svg::render_layout_svg};
//!
//! let config = LayoutConfig::default();
//! let items = [1.5, 0.75, 1.0, 2.0, 1.33].map(Item::new);
//! let layout = compute_layout_once(&config, &items).unwrap();
//!
//! let svg = render_layout_svg(&layout, &config);
//! // svg is a complete SVG document string
//! assert!(svg.starts_with("<svg"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::config::LayoutConfig;
use crate::engine::Layout;

/// Pixel width of the drawn container.
const PANEL_W: f64 = 600.0;
/// Horizontal margin.
const MARGIN_X: f64 = 30.0;
/// Top margin above the caption.
const MARGIN_TOP: f64 = 20.0;
/// Height of the caption text area above the panel.
const LABEL_H: f64 = 40.0;
/// Bottom margin.
const MARGIN_BOTTOM: f64 = 20.0;
/// Boxes narrower than this (in drawn pixels) get no index label.
const MIN_LABELED_W: f64 = 18.0;

/// Render a complete SVG document showing `layout` inside its container.
///
/// `config` must be the configuration the layout was computed with; it
/// supplies the container width and padding.
pub fn render_layout_svg(layout: &Layout, config: &LayoutConfig) -> String {
    let container_w = config.container_width;
    let container_h = layout.container_height;
    if !(container_w > 0.0) || !(container_h > 0.0) {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let scale = PANEL_W / container_w;
    let panel_h = container_h * scale;
    let total_w = PANEL_W + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + panel_h + MARGIN_BOTTOM;

    let mut svg = String::with_capacity(1024 + layout.boxes.len() * 160);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w as u32,
        total_h.ceil() as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    // Light and dark styles via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .index { font-size: 10px; fill: #fff; }
  .container { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .content { fill: none; stroke: #bbb; stroke-width: 1; stroke-dasharray: 4,2; }
  .box { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  .forced { fill: #9b8fd6; stroke: #5a4caa; stroke-width: 1; }
  .widow { fill: #b8d4ee; stroke: #7baed0; stroke-width: 1; stroke-dasharray: 4,2; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .container { fill: #2d2d2d; stroke: #555; }
    .content { stroke: #555; }
    .box { fill: #3a72a4; stroke: #5a9fd4; }
    .forced { fill: #5a4f94; stroke: #8a7fd4; }
    .widow { fill: #2a4a65; stroke: #4a7a9e; }
  }
</style>
"##,
    );

    // Caption
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label">{}</text>"#,
        MARGIN_X,
        MARGIN_TOP + 13.0,
        escape_xml(&format!(
            "Container  {}×{}",
            fmt_px(container_w),
            fmt_px(container_h)
        ))
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="annotation">{}</text>"#,
        MARGIN_X,
        MARGIN_TOP + 29.0,
        escape_xml(&annotation(layout))
    ));
    svg.push('\n');

    let panel_x = MARGIN_X;
    let panel_y = MARGIN_TOP + LABEL_H;

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="container" rx="2"/>"#,
        panel_x, panel_y, PANEL_W, panel_h
    ));
    svg.push('\n');

    // Content area inside the padding
    let pad = config.container_padding;
    let content_w = container_w - pad.left - pad.right;
    let content_h = container_h - pad.top - pad.bottom;
    if content_w > 0.0 && content_h > 0.0 {
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="content"/>"#,
            panel_x + pad.left * scale,
            panel_y + pad.top * scale,
            content_w * scale,
            content_h * scale
        ));
        svg.push('\n');
    }

    let first_widow = layout.boxes.len().saturating_sub(layout.widow_count);
    for (i, b) in layout.boxes.iter().enumerate() {
        let class = if i >= first_widow {
            "widow"
        } else if b.forced_aspect_ratio {
            "forced"
        } else {
            "box"
        };
        let x = panel_x + b.left * scale;
        let y = panel_y + b.top * scale;
        let w = b.width * scale;
        let h = b.height * scale;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}"/>"#,
            x, y, w, h, class
        ));
        svg.push('\n');
        if w >= MIN_LABELED_W {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="index">{}</text>"#,
                x + 3.0,
                y + 12.0,
                i
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Item, widow and dropped counts for the caption.
fn annotation(layout: &Layout) -> String {
    let mut text = format!("{} items", layout.boxes.len());
    if layout.widow_count > 0 {
        text.push_str(&format!(", {} in widow row", layout.widow_count));
    }
    if layout.dropped_count > 0 {
        text.push_str(&format!(", {} dropped by row limit", layout.dropped_count));
    }
    text
}

/// Whole pixels print without a fraction; anything else with one decimal.
fn fmt_px(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v:.1}")
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
