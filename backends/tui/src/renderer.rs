use crossterm::style::{ContentStyle, StyledContent};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use waterfall_masonry::{Axis, Cell, ScrollView, Stack, ViewNode};

use crate::error::TuiError;

/// Represents a fully resolved frame ready to be drawn to the terminal.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderFrame {
    lines: Vec<RenderLine>,
}

impl RenderFrame {
    /// Appends every line of `other`.
    pub fn extend(&mut self, other: Self) {
        self.lines.extend(other.lines);
    }

    /// Returns the set of lines recorded in this frame.
    #[must_use]
    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the frame has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copies at most `height` lines starting at `offset`.
    #[must_use]
    pub fn window(&self, offset: usize, height: usize) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .skip(offset)
                .take(height)
                .cloned()
                .collect(),
        }
    }

    /// The frame as unstyled text, one `\n` between lines.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(RenderLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<RenderLine> for RenderFrame {
    fn from_iter<I: IntoIterator<Item = RenderLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Representation of a single line in the terminal output.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderLine {
    segments: Vec<RenderSegment>,
}

impl RenderLine {
    /// Creates an empty line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A line made of `width` unstyled spaces.
    #[must_use]
    pub fn blank(width: usize) -> Self {
        let mut line = Self::new();
        if width > 0 {
            line.push(RenderSegment::plain(" ".repeat(width)));
        }
        line
    }

    /// Pushes a new segment onto the line.
    pub fn push(&mut self, segment: RenderSegment) {
        self.segments.push(segment);
    }

    /// Moves every segment of `other` to the end of this line.
    pub fn append(&mut self, other: Self) {
        self.segments.extend(other.segments);
    }

    /// Returns the list of segments contained in this line.
    #[must_use]
    pub fn segments(&self) -> &[RenderSegment] {
        &self.segments
    }

    /// Display width in terminal columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.segments.iter().map(RenderSegment::width).sum()
    }

    /// The line's text without styling.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(RenderSegment::content)
            .collect()
    }

    /// Truncates or pads the line to exactly `width` columns.
    #[must_use]
    pub fn fit(&self, width: usize) -> Self {
        let mut fitted = Self::new();
        let mut remaining = width;
        for segment in &self.segments {
            if remaining == 0 {
                break;
            }
            let segment = if segment.width() <= remaining {
                segment.clone()
            } else {
                segment.truncate(remaining)
            };
            remaining -= segment.width();
            fitted.push(segment);
        }
        if remaining > 0 {
            fitted.push(RenderSegment::plain(" ".repeat(remaining)));
        }
        fitted
    }
}

/// Atomic piece of content rendered on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSegment {
    content: String,
    style: ContentStyle,
}

impl RenderSegment {
    /// Creates a plain (unstyled) segment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: ContentStyle::new(),
        }
    }

    /// Creates a segment with custom styling.
    pub fn styled(content: impl Into<String>, style: ContentStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Borrows the raw text stored in this segment.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The segment's style.
    #[must_use]
    pub const fn style(&self) -> &ContentStyle {
        &self.style
    }

    /// Display width in terminal columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.content.width()
    }

    /// Longest prefix that fits in `width` columns, keeping the style.
    #[must_use]
    pub fn truncate(&self, width: usize) -> Self {
        let mut used = 0;
        let mut content = String::new();
        for ch in self.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width {
                break;
            }
            used += ch_width;
            content.push(ch);
        }
        Self {
            content,
            style: self.style,
        }
    }

    /// Converts this segment into a [`StyledContent`] for printing through crossterm.
    #[must_use]
    pub fn as_styled_content(&self) -> StyledContent<String> {
        self.style.apply(self.content.clone())
    }
}

/// Word-wraps `text` into lines of at most `width` columns.
///
/// Words longer than a line are broken at character boundaries.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(core::mem::take(&mut current));
            current_width = 0;
        }

        if word_width > width {
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width > 0 && current_width + ch_width > width {
                    lines.push(core::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Item views the terminal backend knows how to draw.
///
/// A view draws itself at a given width; the number of lines it returns is
/// the height reported back to the grid.
pub trait TerminalView {
    /// Draws the view at `width` columns.
    fn draw(&self, width: usize) -> Vec<RenderLine>;
}

impl<V: TerminalView + ?Sized> TerminalView for &V {
    fn draw(&self, width: usize) -> Vec<RenderLine> {
        (**self).draw(width)
    }
}

impl TerminalView for str {
    fn draw(&self, width: usize) -> Vec<RenderLine> {
        wrap_text(self, width)
            .into_iter()
            .map(|text| {
                let mut line = RenderLine::new();
                line.push(RenderSegment::plain(text));
                line
            })
            .collect()
    }
}

impl TerminalView for String {
    fn draw(&self, width: usize) -> Vec<RenderLine> {
        self.as_str().draw(width)
    }
}

/// Height of one cell as drawn in the last render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Source index of the item.
    pub index: usize,
    /// Number of lines the item occupied.
    pub height: f32,
}

/// A rendered grid together with the cell heights observed while drawing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    /// The drawn content, insets included.
    pub frame: RenderFrame,
    /// One measurement per cell, in drawing order.
    pub measurements: Vec<Measurement>,
}

/// Rectangular run of lines, all exactly `width` columns wide.
struct Block {
    width: usize,
    lines: Vec<RenderLine>,
}

/// Walks view trees and produces terminal friendly frames.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    /// Creates a new renderer instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders a grid tree into a frame, measuring every cell on the way.
    ///
    /// # Errors
    ///
    /// Returns [`TuiError::Render`] when the tree carries a width, gap or
    /// inset that is negative or not finite.
    pub fn render<V: TerminalView>(&mut self, node: &ViewNode<V>) -> Result<RenderOutput, TuiError> {
        let mut measurements = Vec::new();
        let block = Self::render_node(node, &mut measurements)?;
        Ok(RenderOutput {
            frame: block.lines.into_iter().collect(),
            measurements,
        })
    }

    fn render_node<V: TerminalView>(
        node: &ViewNode<V>,
        measurements: &mut Vec<Measurement>,
    ) -> Result<Block, TuiError> {
        match node {
            ViewNode::Scroll(scroll) => Self::render_scroll(scroll, measurements),
            ViewNode::Stack(stack) => match stack.axis() {
                Axis::Horizontal => Self::render_row(stack, measurements),
                Axis::Vertical => Self::render_column(stack, measurements),
            },
            ViewNode::Cell(cell) => Self::render_cell(cell, measurements),
        }
    }

    fn render_scroll<V: TerminalView>(
        scroll: &ScrollView<V>,
        measurements: &mut Vec<Measurement>,
    ) -> Result<Block, TuiError> {
        let insets = scroll.insets();
        let top = to_cells(insets.top, "top inset")?;
        let bottom = to_cells(insets.bottom, "bottom inset")?;
        let leading = to_cells(insets.leading, "leading inset")?;
        let trailing = to_cells(insets.trailing, "trailing inset")?;

        let content = Self::render_node(scroll.content(), measurements)?;
        let width = leading + content.width + trailing;

        let mut lines = Vec::with_capacity(top + content.lines.len() + bottom);
        lines.extend((0..top).map(|_| RenderLine::blank(width)));
        for line in content.lines {
            let mut padded = RenderLine::blank(leading);
            padded.append(line);
            padded.append(RenderLine::blank(trailing));
            lines.push(padded);
        }
        lines.extend((0..bottom).map(|_| RenderLine::blank(width)));

        Ok(Block { width, lines })
    }

    fn render_row<V: TerminalView>(
        stack: &Stack<V>,
        measurements: &mut Vec<Measurement>,
    ) -> Result<Block, TuiError> {
        let spacing = to_cells(stack.spacing(), "column spacing")?;
        let blocks = stack
            .children()
            .iter()
            .map(|child| Self::render_node(child, measurements))
            .collect::<Result<Vec<_>, _>>()?;

        let height = blocks.iter().map(|block| block.lines.len()).max().unwrap_or(0);
        let width = blocks.iter().map(|block| block.width).sum::<usize>()
            + spacing * blocks.len().saturating_sub(1);

        let mut lines = Vec::with_capacity(height);
        for row in 0..height {
            let mut line = RenderLine::new();
            for (i, block) in blocks.iter().enumerate() {
                if i > 0 {
                    line.append(RenderLine::blank(spacing));
                }
                match block.lines.get(row) {
                    Some(part) => line.append(part.clone()),
                    None => line.append(RenderLine::blank(block.width)),
                }
            }
            lines.push(line);
        }

        Ok(Block { width, lines })
    }

    fn render_column<V: TerminalView>(
        stack: &Stack<V>,
        measurements: &mut Vec<Measurement>,
    ) -> Result<Block, TuiError> {
        let spacing = to_cells(stack.spacing(), "row spacing")?;
        let blocks = stack
            .children()
            .iter()
            .map(|child| Self::render_node(child, measurements))
            .collect::<Result<Vec<_>, _>>()?;

        let width = match stack.fixed_width() {
            Some(width) => to_cells(width, "column width")?,
            None => blocks.iter().map(|block| block.width).max().unwrap_or(0),
        };

        let mut lines = Vec::new();
        for (i, block) in blocks.into_iter().enumerate() {
            if i > 0 {
                lines.extend((0..spacing).map(|_| RenderLine::blank(width)));
            }
            lines.extend(block.lines.iter().map(|line| line.fit(width)));
        }

        Ok(Block { width, lines })
    }

    #[allow(clippy::cast_precision_loss)]
    fn render_cell<V: TerminalView>(
        cell: &Cell<V>,
        measurements: &mut Vec<Measurement>,
    ) -> Result<Block, TuiError> {
        let width = to_cells(cell.width(), "cell width")?;
        let lines: Vec<RenderLine> = cell
            .content()
            .draw(width)
            .iter()
            .map(|line| line.fit(width))
            .collect();

        tracing::trace!(index = cell.index(), width, height = lines.len(), "measured cell");
        measurements.push(Measurement {
            index: cell.index(),
            height: lines.len() as f32,
        });
        Ok(Block { width, lines })
    }
}

/// Converts a layout length to whole terminal cells, rounding down.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_cells(value: f32, what: &str) -> Result<usize, TuiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value.floor() as usize)
    } else {
        Err(TuiError::Render(format!("{what} must be finite and non-negative, got {value}")))
    }
}
