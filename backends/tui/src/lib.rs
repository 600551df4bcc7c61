#![allow(clippy::multiple_crate_versions)]

//! Terminal backend for `Waterfall` masonry grids.
//!
//! The backend plays the host's part of the two-pass layout: it draws every
//! cell of a [`MasonryGrid`](waterfall_masonry::MasonryGrid) at the column
//! width, counts the lines each one took and reports them back until the
//! grid stops rebalancing.

pub use crate::app::{MAX_SETTLE_PASSES, TuiApp, TuiAppBuilder};
pub use crate::renderer::{
    Measurement, RenderFrame, RenderLine, RenderOutput, RenderSegment, Renderer, TerminalView,
    wrap_text,
};
pub use crate::terminal::Terminal;

mod app;
mod error;
mod renderer;
mod terminal;

pub use error::TuiError;
