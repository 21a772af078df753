//! Justified row layout for image galleries.
//!
//! Packs items, known only by aspect ratio, into rows that span a fixed
//! container width edge to edge while keeping every row close to a target
//! height. Pure geometry: no pixel operations, no I/O, `no_std` + `alloc`
//! compatible.
//!
//! # Modules
//!
//! - [`config`]: Container, spacing, row-height target and widow options
//! - [`item`]: Input descriptors and output boxes
//! - [`engine`]: Gallery layout and the accumulator carried between calls
//! - `query`: Configuration from a query string (feature `query`)
//! - `svg`: SVG diagram of a computed layout (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zenjustify::{Item, LayoutConfig, compute_layout_once};
//!
//! let items = [1.5, 0.67, 1.0, 1.33, 2.4].map(Item::new);
//! let layout = compute_layout_once(&LayoutConfig::default(), &items).unwrap();
//!
//! assert_eq!(layout.boxes.len(), 5);
//! assert!(layout.boxes.iter().all(|b| b.width > 0.0 && b.height > 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod engine;
pub mod item;
mod row;

#[cfg(feature = "query")]
pub mod query;
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: the types a caller needs for one layout call
pub use config::{LayoutConfig, Padding, Spacing, WidowLayoutStyle};
pub use engine::{Layout, LayoutData, LayoutError, RowSummary, compute_layout, compute_layout_once};
pub use item::{Item, ItemBox};
