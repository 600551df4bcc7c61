//! Masonry (waterfall) layout for `Waterfall`.
//!
//! This crate distributes variable-height items across a fixed number of
//! columns and keeps the columns roughly level. It contains:
//!
//! - the [`balance`] function and its configurable form [`ColumnBalancer`],
//!   a greedy shortest-column packer,
//! - the [`HeightMap`] of measured item heights,
//! - the [`MasonryGrid`] coordinator, which owns heights and configuration,
//!   rebalances when measurements change and renders a backend-agnostic
//!   [`ViewNode`] tree.
//!
//! # Two-pass layout
//!
//! Items are drawn before their height is known. The first render balances
//! them with a placeholder height; the backend then reports each cell's real
//! height and the grid rebalances on the next render. Reporting a height that
//! is already stored does nothing, so the loop always settles.
//!
//! # Example
//!
//! ```
//! use waterfall_masonry::{MasonryConfig, MasonryGrid};
//!
//! let mut grid = MasonryGrid::with_items(MasonryConfig::default(), vec!["a", "b", "c"])?;
//! grid.set_viewport_width(390.0)?;
//!
//! let tree = grid.render(|text, _| text.len());
//! let measured: Vec<(usize, f32)> = tree
//!     .cells()
//!     .iter()
//!     .map(|cell| (cell.index(), 40.0))
//!     .collect();
//!
//! for (index, height) in measured {
//!     grid.on_item_measured(index, height)?;
//! }
//! assert!(grid.is_fully_measured());
//! # Ok::<(), waterfall_masonry::LayoutError>(())
//! ```

pub mod balancer;
pub mod config;
mod error;
pub mod geometry;
pub mod grid;
pub mod heights;
pub mod view;

pub use balancer::{
    Column, ColumnAssignment, ColumnBalancer, ColumnItem, DEFAULT_PLACEHOLDER_HEIGHT, balance,
};
pub use config::{DEFAULT_MAX_CONTENT_WIDTH, MasonryConfig};
pub use error::LayoutError;
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use grid::{GridLayout, ItemFrame, MasonryGrid};
pub use heights::HeightMap;
pub use view::{Axis, Cell, ScrollView, Stack, ViewNode};

#[cfg(test)]
mod tests;
