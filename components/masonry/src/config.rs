//! Grid configuration.

use core::num::NonZeroUsize;

use crate::{
    DEFAULT_PLACEHOLDER_HEIGHT, EdgeInsets, LayoutError, error::check_dimension,
};

/// Width the content is capped at on wide viewports.
pub const DEFAULT_MAX_CONTENT_WIDTH: f32 = 390.0;

/// Tunables for a [`MasonryGrid`](crate::MasonryGrid).
///
/// Every field has a default, so hosts usually start from
/// [`MasonryConfig::default`] and override a few values with the builder
/// methods:
///
/// ```
/// use waterfall_masonry::MasonryConfig;
///
/// let config = MasonryConfig::default().columns(2).column_gap(12.0);
/// assert_eq!(config.columns, 2);
/// assert_eq!(config.row_gap, 8.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MasonryConfig {
    /// Number of columns.
    pub columns: usize,
    /// Horizontal space between columns.
    pub column_gap: f32,
    /// Vertical space after every item in a column.
    pub row_gap: f32,
    /// Leading and trailing inset of the scroll content.
    pub padding_horizontal: f32,
    /// Inset above the first row.
    pub padding_top: f32,
    /// Inset below the tallest column.
    pub padding_bottom: f32,
    /// Upper bound for the laid out width, whatever the viewport width.
    pub max_content_width: f32,
    /// Height assumed for items that have not been measured yet.
    pub default_height: f32,
}

impl Default for MasonryConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            column_gap: 8.0,
            row_gap: 8.0,
            padding_horizontal: 16.0,
            padding_top: 8.0,
            padding_bottom: 24.0,
            max_content_width: DEFAULT_MAX_CONTENT_WIDTH,
            default_height: DEFAULT_PLACEHOLDER_HEIGHT,
        }
    }
}

impl MasonryConfig {
    /// Sets the number of columns.
    #[must_use]
    pub const fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the space between columns.
    #[must_use]
    pub const fn column_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self
    }

    /// Sets the space after every item.
    #[must_use]
    pub const fn row_gap(mut self, gap: f32) -> Self {
        self.row_gap = gap;
        self
    }

    /// Sets the leading and trailing inset.
    #[must_use]
    pub const fn padding_horizontal(mut self, padding: f32) -> Self {
        self.padding_horizontal = padding;
        self
    }

    /// Sets the top and bottom insets.
    #[must_use]
    pub const fn padding_vertical(mut self, top: f32, bottom: f32) -> Self {
        self.padding_top = top;
        self.padding_bottom = bottom;
        self
    }

    /// Sets the content width cap.
    #[must_use]
    pub const fn max_content_width(mut self, width: f32) -> Self {
        self.max_content_width = width;
        self
    }

    /// Sets the placeholder height for unmeasured items.
    #[must_use]
    pub const fn default_height(mut self, height: f32) -> Self {
        self.default_height = height;
        self
    }

    /// Insets of the scroll content.
    #[must_use]
    pub const fn content_insets(&self) -> EdgeInsets {
        EdgeInsets::new(
            self.padding_top,
            self.padding_bottom,
            self.padding_horizontal,
            self.padding_horizontal,
        )
    }

    /// Checks every setting, returning the column count on success.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidColumnCount`] for zero columns and
    /// [`LayoutError::InvalidDimension`] for any negative or non-finite length.
    pub fn validate(&self) -> Result<NonZeroUsize, LayoutError> {
        let columns =
            NonZeroUsize::new(self.columns).ok_or(LayoutError::InvalidColumnCount(self.columns))?;
        check_dimension("column_gap", self.column_gap)?;
        check_dimension("row_gap", self.row_gap)?;
        check_dimension("padding_horizontal", self.padding_horizontal)?;
        check_dimension("padding_top", self.padding_top)?;
        check_dimension("padding_bottom", self.padding_bottom)?;
        check_dimension("max_content_width", self.max_content_width)?;
        check_dimension("default_height", self.default_height)?;
        Ok(columns)
    }
}
