use std::io;

use thiserror::Error;
use waterfall_masonry::LayoutError;

/// Errors that can occur while rendering or presenting a grid in the terminal.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Low level terminal I/O failure.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
    /// The view tree carried geometry the terminal cannot draw.
    #[error("rendering error: {0}")]
    Render(String),
    /// The grid rejected a configuration or measurement.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
