//! Backend-agnostic view tree produced by [`MasonryGrid::render`](crate::MasonryGrid::render).
//!
//! The tree only describes structure and geometry. Backends walk it, draw the
//! caller's item views inside each [`Cell`] and report the height each cell
//! ended up with back to the grid.

use crate::EdgeInsets;

/// Direction a [`Stack`] lays its children out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Axis {
    /// Children side by side.
    Horizontal,
    /// Children top to bottom (default).
    #[default]
    Vertical,
}

/// A node of the rendered grid.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode<V> {
    /// Vertically scrollable container.
    Scroll(ScrollView<V>),
    /// Row or column of children.
    Stack(Stack<V>),
    /// Fixed-width wrapper around one item view.
    Cell(Cell<V>),
}

impl<V> ViewNode<V> {
    /// Collects every cell in depth-first order.
    #[must_use]
    pub fn cells(&self) -> Vec<&Cell<V>> {
        let mut cells = Vec::new();
        self.collect_cells(&mut cells);
        cells
    }

    fn collect_cells<'a>(&'a self, out: &mut Vec<&'a Cell<V>>) {
        match self {
            Self::Scroll(scroll) => scroll.content.collect_cells(out),
            Self::Stack(stack) => {
                for child in &stack.children {
                    child.collect_cells(out);
                }
            }
            Self::Cell(cell) => out.push(cell),
        }
    }
}

/// A vertically scrolling container with content insets.
///
/// Scrolling itself is up to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollView<V> {
    insets: EdgeInsets,
    content: Box<ViewNode<V>>,
}

impl<V> ScrollView<V> {
    /// Creates a scroll view around `content`.
    #[must_use]
    pub fn new(insets: EdgeInsets, content: ViewNode<V>) -> Self {
        Self {
            insets,
            content: Box::new(content),
        }
    }

    /// Insets around the content.
    #[must_use]
    pub const fn insets(&self) -> EdgeInsets {
        self.insets
    }

    /// The scrolled content.
    #[must_use]
    pub fn content(&self) -> &ViewNode<V> {
        &self.content
    }
}

/// Children laid out along one axis with fixed spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<V> {
    axis: Axis,
    spacing: f32,
    width: Option<f32>,
    children: Vec<ViewNode<V>>,
}

impl<V> Stack<V> {
    /// Creates a horizontal stack.
    #[must_use]
    pub const fn horizontal(spacing: f32, children: Vec<ViewNode<V>>) -> Self {
        Self {
            axis: Axis::Horizontal,
            spacing,
            width: None,
            children,
        }
    }

    /// Creates a vertical stack.
    #[must_use]
    pub const fn vertical(spacing: f32, children: Vec<ViewNode<V>>) -> Self {
        Self {
            axis: Axis::Vertical,
            spacing,
            width: None,
            children,
        }
    }

    /// Pins the stack's width, so an empty column still occupies its slot.
    #[must_use]
    pub const fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// The stacking direction.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Space between adjacent children.
    #[must_use]
    pub const fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Pinned width, if any.
    #[must_use]
    pub const fn fixed_width(&self) -> Option<f32> {
        self.width
    }

    /// The stacked children.
    #[must_use]
    pub fn children(&self) -> &[ViewNode<V>] {
        &self.children
    }
}

/// One item wrapped at the column width.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<V> {
    index: usize,
    width: f32,
    content: V,
}

impl<V> Cell<V> {
    /// Wraps `content` for item `index` at `width`.
    #[must_use]
    pub const fn new(index: usize, width: f32, content: V) -> Self {
        Self {
            index,
            width,
            content,
        }
    }

    /// Source index of the wrapped item, used to route measurements back.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Width the item is laid out at.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// The caller's item view.
    #[must_use]
    pub const fn content(&self) -> &V {
        &self.content
    }
}
