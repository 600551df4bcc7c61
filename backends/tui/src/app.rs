use waterfall_masonry::MasonryGrid;

use crate::{
    error::TuiError,
    renderer::{RenderFrame, Renderer, TerminalView},
    terminal::Terminal,
};

/// Upper bound on render/measure rounds per settle.
///
/// Two rounds are enough once item heights only depend on the column width;
/// the bound stops a view whose height keeps changing from spinning forever.
pub const MAX_SETTLE_PASSES: usize = 8;

/// Entry point for presenting masonry grids in the terminal.
#[derive(Debug)]
pub struct TuiApp {
    terminal: Terminal,
    renderer: Renderer,
}

impl TuiApp {
    /// Renders `grid` until its measurements stop changing.
    ///
    /// Each round draws every item at the current column width, feeds the
    /// drawn heights back through [`MasonryGrid::on_item_measured`] and
    /// renders again if any of them changed. The frame of the last round is
    /// returned.
    ///
    /// # Errors
    ///
    /// Propagates render failures and rejected measurements.
    pub fn settle<T: TerminalView>(
        &mut self,
        grid: &mut MasonryGrid<T>,
    ) -> Result<RenderFrame, TuiError> {
        let mut frame = RenderFrame::default();
        for pass in 1..=MAX_SETTLE_PASSES {
            let output = {
                let tree = grid.render(|item, _| item);
                self.renderer.render(&tree)?
            };

            let mut changed = false;
            for measurement in &output.measurements {
                changed |= grid.on_item_measured(measurement.index, measurement.height)?;
            }
            frame = output.frame;

            if !changed {
                tracing::debug!(passes = pass, lines = frame.len(), "layout settled");
                return Ok(frame);
            }
        }

        tracing::warn!(
            passes = MAX_SETTLE_PASSES,
            "layout did not settle; presenting last frame"
        );
        Ok(frame)
    }

    /// Flushes a frame to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal cannot be written to.
    pub fn present(&mut self, frame: &RenderFrame) -> Result<(), TuiError> {
        self.terminal.render(frame)
    }

    /// Provides immutable access to the terminal handle.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal {
        &self.terminal
    }
}

/// Builder for [`TuiApp`] instances.
#[derive(Debug, Default)]
pub struct TuiAppBuilder {
    terminal: Option<Terminal>,
}

impl TuiAppBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self { terminal: None }
    }

    /// Overrides the terminal handle used by the application.
    #[must_use]
    pub fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Consumes the builder and produces a [`TuiApp`].
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialised.
    pub fn build(self) -> Result<TuiApp, TuiError> {
        let terminal = match self.terminal {
            Some(terminal) => terminal,
            None => Terminal::stdout()?,
        };

        Ok(TuiApp {
            terminal,
            renderer: Renderer::new(),
        })
    }
}
