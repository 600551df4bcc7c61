//! The layout coordinator.
//!
//! A [`MasonryGrid`] owns the data set, the measured heights and a cached
//! [`ColumnAssignment`]. Hosts drive it with a simple loop:
//!
//! 1. [`render`](MasonryGrid::render) the grid. Unmeasured items are balanced
//!    with the placeholder height.
//! 2. Lay the cells out and report each cell's height through
//!    [`on_item_measured`](MasonryGrid::on_item_measured).
//! 3. Render again while any measurement changed.
//!
//! Once every item is measured the assignment stops changing and the loop
//! settles.

use core::num::NonZeroUsize;

use crate::{
    Cell, ColumnAssignment, ColumnBalancer, EdgeInsets, HeightMap, LayoutError, MasonryConfig,
    Point, Rect, ScrollView, Size, Stack, ViewNode, error::check_dimension,
};

/// Layout coordinator for a masonry grid of `T` items.
#[derive(Debug)]
pub struct MasonryGrid<T> {
    items: Vec<T>,
    config: MasonryConfig,
    columns: NonZeroUsize,
    viewport_width: f32,
    heights: HeightMap,
    assignment: ColumnAssignment,
    dirty: bool,
    rebalances: usize,
}

impl<T> MasonryGrid<T> {
    /// Creates an empty grid.
    ///
    /// The viewport width starts at the configured maximum content width until
    /// the host reports the real one.
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate, see
    /// [`MasonryConfig::validate`].
    pub fn new(config: MasonryConfig) -> Result<Self, LayoutError> {
        Self::with_items(config, Vec::new())
    }

    /// Creates a grid holding `items`.
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate, see
    /// [`MasonryConfig::validate`].
    pub fn with_items(config: MasonryConfig, items: Vec<T>) -> Result<Self, LayoutError> {
        let columns = config.validate()?;
        Ok(Self {
            items,
            viewport_width: config.max_content_width,
            config,
            columns,
            heights: HeightMap::new(),
            assignment: ColumnAssignment::default(),
            dirty: true,
            rebalances: 0,
        })
    }

    /// The current data set.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the grid holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item. Existing measurements are kept.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.invalidate();
    }

    /// Replaces the data set.
    ///
    /// Measurements belong to the old items, so the height map is cleared and
    /// every new item starts unmeasured.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.heights.clear();
        self.invalidate();
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &MasonryConfig {
        &self.config
    }

    /// Swaps the configuration.
    ///
    /// # Errors
    ///
    /// Fails when `config` does not validate; the grid keeps its previous
    /// configuration in that case.
    pub fn set_config(&mut self, config: MasonryConfig) -> Result<(), LayoutError> {
        self.columns = config.validate()?;
        self.config = config;
        self.invalidate();
        Ok(())
    }

    /// Changes the column count.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidColumnCount`] when `columns` is zero.
    pub fn set_columns(&mut self, columns: usize) -> Result<(), LayoutError> {
        let config = self.config.clone().columns(columns);
        self.set_config(config)
    }

    /// Width of the host viewport.
    #[must_use]
    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Reports a new viewport width, for example after a rotation or resize.
    ///
    /// Geometry is derived from it on every render; the column assignment only
    /// changes once the host re-measures items at the new column width.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] for negative or non-finite
    /// widths.
    pub fn set_viewport_width(&mut self, width: f32) -> Result<(), LayoutError> {
        self.viewport_width = check_dimension("viewport_width", width)?;
        tracing::debug!(width, column_width = self.column_width(), "viewport resized");
        Ok(())
    }

    /// Width available to the columns and paddings.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.viewport_width.min(self.config.max_content_width)
    }

    /// Width of every column.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn column_width(&self) -> f32 {
        let columns = self.columns.get() as f32;
        let gaps = self.config.column_gap * (columns - 1.0);
        ((self.content_width() - self.config.padding_horizontal * 2.0 - gaps) / columns).max(0.0)
    }

    /// Measurements reported so far.
    #[must_use]
    pub const fn heights(&self) -> &HeightMap {
        &self.heights
    }

    /// Records the rendered height of item `index`.
    ///
    /// Returns `Ok(true)` when the value is new or different, which schedules
    /// a rebalance on the next render. Reporting the same height again is a
    /// no-op and returns `Ok(false)`, as does a report for an index outside
    /// the data set.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidMeasurement`] when `height` is negative or
    /// not finite.
    pub fn on_item_measured(&mut self, index: usize, height: f32) -> Result<bool, LayoutError> {
        if index >= self.items.len() {
            tracing::debug!(index, height, "ignoring measurement for unknown item");
            return Ok(false);
        }

        let changed = self.heights.record(index, height)?;
        if changed {
            tracing::debug!(index, height, "item measured");
            self.invalidate();
        }
        Ok(changed)
    }

    /// Whether every item has a measurement.
    #[must_use]
    pub fn is_fully_measured(&self) -> bool {
        (0..self.items.len()).all(|index| self.heights.contains(index))
    }

    /// Whether the next render will rebalance.
    #[must_use]
    pub const fn needs_rebalance(&self) -> bool {
        self.dirty
    }

    /// How many balancing passes have run so far.
    #[must_use]
    pub const fn rebalance_count(&self) -> usize {
        self.rebalances
    }

    /// The current column assignment, rebalancing first if needed.
    pub fn assignment(&mut self) -> &ColumnAssignment {
        self.refresh();
        &self.assignment
    }

    /// Renders the grid.
    ///
    /// Produces a vertical scroll view holding one vertical stack per column.
    /// Each item is drawn with `render_item` and wrapped in a [`Cell`] of
    /// [`column_width`](Self::column_width).
    pub fn render<'a, V, F>(&'a mut self, mut render_item: F) -> ViewNode<V>
    where
        F: FnMut(&'a T, usize) -> V,
    {
        self.refresh();
        let grid: &'a Self = self;

        let width = grid.column_width();
        let mut columns = Vec::with_capacity(grid.assignment.column_count());
        for indices in grid.assignment.columns() {
            let mut cells = Vec::with_capacity(indices.len());
            for &index in indices {
                let view = render_item(&grid.items[index], index);
                cells.push(ViewNode::Cell(Cell::new(index, width, view)));
            }
            columns.push(ViewNode::Stack(
                Stack::vertical(grid.config.row_gap, cells).width(width),
            ));
        }

        let content = ViewNode::Stack(Stack::horizontal(grid.config.column_gap, columns));
        ViewNode::Scroll(ScrollView::new(grid.scroll_insets(), content))
    }

    /// Computes absolute frames for every item.
    ///
    /// Unmeasured items are given the placeholder height, so frames are
    /// provisional until [`is_fully_measured`](Self::is_fully_measured).
    pub fn layout(&mut self) -> GridLayout {
        self.refresh();

        let insets = self.scroll_insets();
        let width = self.column_width();
        let gap = self.config.row_gap;
        let mut frames = Vec::with_capacity(self.items.len());
        let mut tallest: f32 = 0.0;

        let mut x = insets.leading;
        for (column, indices) in self.assignment.columns().iter().enumerate() {
            let mut y = insets.top;
            for &index in indices {
                let measured = self.heights.get(index);
                let height = measured.unwrap_or(self.config.default_height);
                frames.push(ItemFrame {
                    index,
                    column,
                    rect: Rect::new(Point::new(x, y), Size::new(width, height)),
                    measured: measured.is_some(),
                });
                y += height + gap;
            }
            if !indices.is_empty() {
                tallest = tallest.max(y - gap - insets.top);
            }
            x += width + self.config.column_gap;
        }

        frames.sort_by_key(|frame| frame.index);
        GridLayout {
            frames,
            content_size: Size::new(
                self.viewport_width,
                insets.top + tallest + insets.bottom,
            ),
        }
    }

    fn scroll_insets(&self) -> EdgeInsets {
        let centering = ((self.viewport_width - self.content_width()) / 2.0).max(0.0);
        let mut insets = self.config.content_insets();
        insets.leading += centering;
        insets.trailing += centering;
        insets
    }

    const fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }

        let balancer = ColumnBalancer::with_validated(
            self.columns,
            self.config.row_gap,
            self.config.default_height,
        );
        self.assignment = balancer.assign(self.items.len(), &self.heights);
        self.dirty = false;
        self.rebalances += 1;

        tracing::debug!(
            items = self.items.len(),
            measured = self.heights.len(),
            columns = self.columns.get(),
            tallest = self.assignment.tallest(),
            "rebalanced columns"
        );
    }
}

/// Position of one item inside the grid content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    /// Source index of the item.
    pub index: usize,
    /// Column the item was assigned to.
    pub column: usize,
    /// Frame relative to the content origin.
    pub rect: Rect,
    /// Whether the height is a measurement rather than the placeholder.
    pub measured: bool,
}

/// Result of [`MasonryGrid::layout`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    frames: Vec<ItemFrame>,
    content_size: Size,
}

impl GridLayout {
    /// Frames ordered by item index.
    #[must_use]
    pub fn frames(&self) -> &[ItemFrame] {
        &self.frames
    }

    /// Frame of item `index`.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&ItemFrame> {
        self.frames.get(index)
    }

    /// Size of the scrollable content, insets included.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }
}
