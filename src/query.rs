//! Layout configuration from a URL query string.
//!
//! Parses strings like `?width=800&rowHeight=240&widows=center` into a
//! [`LayoutConfig`]. Keys are case-insensitive and missing keys keep their
//! defaults. Problems never fail the parse; they come back as warnings.
//!
//! # Example
//!
//! ```
//! use zenjustify::query;
//! use zenjustify::WidowLayoutStyle;
//!
//! let result = query::parse("containerWidth=800&targetRowHeight=240&widowLayoutStyle=center");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.config.container_width, 800.0);
//! assert_eq!(result.config.target_row_height, 240.0);
//! assert_eq!(result.config.widow_layout_style, WidowLayoutStyle::Center);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{LayoutConfig, Padding, Spacing, WidowLayoutStyle};

/// Result of parsing a configuration query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed configuration; defaults where a key was absent or invalid.
    pub config: LayoutConfig,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: &'static str, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a configuration query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let mut config = LayoutConfig::default();
    let mut warnings = Vec::new();
    let mut seen: Vec<Key> = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        let Some(known) = Key::from_lowercase(&key) else {
            warnings.push(ParseWarning::KeyNotRecognized { key, value });
            continue;
        };
        if apply(known, &value, &mut config, &mut warnings) {
            if seen.contains(&known) {
                warnings.push(ParseWarning::DuplicateKey {
                    key: known.name(),
                    value,
                });
            } else {
                seen.push(known);
            }
        }
    }

    ParseResult { config, warnings }
}

/// A recognized configuration key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Key {
    ContainerWidth,
    TargetRowHeight,
    Tolerance,
    ContainerPadding,
    BoxSpacing,
    MaxNumRows,
    ForceAspectRatio,
    ShowWidows,
    BreakoutCadence,
    WidowStyle,
}

impl Key {
    /// Look up a lowercased key name or alias.
    fn from_lowercase(key: &str) -> Option<Self> {
        let key = match key {
            "containerwidth" | "width" | "w" => Self::ContainerWidth,
            "targetrowheight" | "rowheight" | "h" => Self::TargetRowHeight,
            "targetrowheighttolerance" | "tolerance" => Self::Tolerance,
            "containerpadding" | "padding" => Self::ContainerPadding,
            "boxspacing" | "spacing" => Self::BoxSpacing,
            "maxnumrows" | "maxrows" => Self::MaxNumRows,
            "forceaspectratio" => Self::ForceAspectRatio,
            "showwidows" => Self::ShowWidows,
            "fullwidthbreakoutrowcadence" | "breakout" => Self::BreakoutCadence,
            "widowlayoutstyle" | "widows" => Self::WidowStyle,
            _ => return None,
        };
        Some(key)
    }

    /// Canonical name, as reported in warnings.
    fn name(self) -> &'static str {
        match self {
            Self::ContainerWidth => "containerWidth",
            Self::TargetRowHeight => "targetRowHeight",
            Self::Tolerance => "targetRowHeightTolerance",
            Self::ContainerPadding => "containerPadding",
            Self::BoxSpacing => "boxSpacing",
            Self::MaxNumRows => "maxNumRows",
            Self::ForceAspectRatio => "forceAspectRatio",
            Self::ShowWidows => "showWidows",
            Self::BreakoutCadence => "fullWidthBreakoutRowCadence",
            Self::WidowStyle => "widowLayoutStyle",
        }
    }
}

/// Apply one value. Returns whether it was accepted.
fn apply(
    key: Key,
    value: &str,
    config: &mut LayoutConfig,
    warnings: &mut Vec<ParseWarning>,
) -> bool {
    let mut invalid = |reason: &'static str| {
        warnings.push(ParseWarning::ValueInvalid {
            key: key.name(),
            value: String::from(value),
            reason,
        });
        false
    };

    match key {
        Key::ContainerWidth => match parse_positive(value) {
            Some(v) => config.container_width = v,
            None => return invalid("expected a positive number"),
        },
        Key::TargetRowHeight => match parse_positive(value) {
            Some(v) => config.target_row_height = v,
            None => return invalid("expected a positive number"),
        },
        Key::Tolerance => match parse_f64(value).filter(|v| (0.0..1.0).contains(v)) {
            Some(v) => config.target_row_height_tolerance = v,
            None => return invalid("expected a fraction in 0..1"),
        },
        Key::ContainerPadding => match parse_padding(value) {
            Some(p) => config.container_padding = p,
            None => return invalid("expected 1, 2 or 4 non-negative numbers"),
        },
        Key::BoxSpacing => match parse_spacing(value) {
            Some(s) => config.box_spacing = s,
            None => return invalid("expected 1 or 2 non-negative numbers"),
        },
        Key::MaxNumRows => match parse_count(value) {
            Some(v) => config.max_num_rows = Some(v),
            None => return invalid("expected a row count"),
        },
        Key::ForceAspectRatio => match parse_bool(value) {
            Some(v) => config.force_aspect_ratio = v,
            None => return invalid("expected true|false"),
        },
        Key::ShowWidows => match parse_bool(value) {
            Some(v) => config.show_widows = v,
            None => return invalid("expected true|false"),
        },
        Key::BreakoutCadence => match parse_count(value).filter(|&v| v > 0) {
            Some(v) => config.full_width_breakout_row_cadence = Some(v),
            None => return invalid("expected a positive row count"),
        },
        Key::WidowStyle => match parse_widow_style(value) {
            Some(s) => config.widow_layout_style = s,
            None => return invalid("expected left|center|justified"),
        },
    }
    true
}

// ---- Value parsers ----

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_positive(s: &str) -> Option<f64> {
    parse_f64(s).filter(|&v| v > 0.0)
}

fn parse_non_negative(s: &str) -> Option<f64> {
    parse_f64(s).filter(|&v| v >= 0.0)
}

fn parse_count(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_widow_style(s: &str) -> Option<WidowLayoutStyle> {
    match s.trim().to_ascii_lowercase().as_str() {
        "left" => Some(WidowLayoutStyle::Left),
        "center" | "centre" => Some(WidowLayoutStyle::Center),
        "justify" | "justified" => Some(WidowLayoutStyle::Justified),
        _ => None,
    }
}

/// Comma-separated non-negative numbers, all of which must parse.
fn parse_list(s: &str) -> Option<Vec<f64>> {
    s.split(',').map(parse_non_negative).collect()
}

/// CSS shorthand: `all`, `vertical,horizontal` or `top,right,bottom,left`.
fn parse_padding(s: &str) -> Option<Padding> {
    match parse_list(s)?.as_slice() {
        &[all] => Some(Padding::uniform(all)),
        &[vertical, horizontal] => Some(Padding::new(vertical, horizontal, vertical, horizontal)),
        &[top, right, bottom, left] => Some(Padding::new(top, right, bottom, left)),
        _ => None,
    }
}

/// `both` or `horizontal,vertical`.
fn parse_spacing(s: &str) -> Option<Spacing> {
    match parse_list(s)?.as_slice() {
        &[both] => Some(Spacing::uniform(both)),
        &[horizontal, vertical] => Some(Spacing::new(horizontal, vertical)),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
