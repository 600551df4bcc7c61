#![allow(clippy::multiple_crate_versions)]

//! A terminal demo of the `Waterfall` masonry grid.
//!
//! Sample cards of uneven height are placed by
//! [`waterfall_masonry::MasonryGrid`] and drawn with the
//! [`waterfall_tui`] backend. The [`screen::DemoScreen`] adds and resets
//! cards; [`settings::Settings`] and [`logging`] configure a run.

pub mod card;
pub mod logging;
pub mod sample;
pub mod screen;
pub mod settings;

pub use card::{MasonryCard, Rgb};
pub use screen::{DemoScreen, Flow};
pub use settings::Settings;
