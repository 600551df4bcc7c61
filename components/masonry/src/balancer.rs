//! Greedy shortest-column balancing.
//!
//! Items are visited in their original order. Each one goes to the column
//! whose running height is strictly the smallest, ties resolving to the lowest
//! column index, and that column's total grows by the item's height plus the
//! row gap. Nothing is sorted and nothing is patched incrementally: every pass
//! rebuilds the assignment from scratch, which keeps the result a pure
//! function of `(item count, column count, heights, gap)`.
//!
//! ```
//! use waterfall_masonry::{HeightMap, balance};
//!
//! let cards = ["A", "B", "C", "D"];
//! let heights: HeightMap = [(0, 100.0), (1, 50.0), (2, 50.0), (3, 20.0)]
//!     .into_iter()
//!     .collect();
//!
//! let columns = balance(&cards, 3, &heights, 0.0).unwrap();
//! let names: Vec<Vec<&str>> = columns
//!     .iter()
//!     .map(|column| column.items().iter().map(|entry| *entry.item).collect())
//!     .collect();
//! assert_eq!(names, [vec!["A"], vec!["B", "D"], vec!["C"]]);
//! ```

use core::num::NonZeroUsize;

use crate::{HeightMap, LayoutError, error::check_dimension};

/// Height assumed for an item the host has not measured yet.
pub const DEFAULT_PLACEHOLDER_HEIGHT: f32 = 150.0;

/// An item together with its position in the source sequence.
#[derive(Debug)]
pub struct ColumnItem<'a, T> {
    /// The caller's payload.
    pub item: &'a T,
    /// Position of the item in the source sequence.
    pub index: usize,
}

impl<T> Clone for ColumnItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ColumnItem<'_, T> {}

impl<T> PartialEq for ColumnItem<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && core::ptr::eq(self.item, other.item)
    }
}

/// One column produced by a balancing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a, T> {
    items: Vec<ColumnItem<'a, T>>,
    total_height: f32,
}

impl<'a, T> Column<'a, T> {
    /// Items in the order they were assigned.
    #[must_use]
    pub fn items(&self) -> &[ColumnItem<'a, T>] {
        &self.items
    }

    /// Sum of the assigned heights plus one gap per item.
    #[must_use]
    pub const fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Number of items in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the column received no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Index-only result of a balancing pass.
///
/// This is what the coordinator caches between renders: it owns no payloads,
/// only item indices per column and each column's running total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnAssignment {
    columns: Vec<Vec<usize>>,
    totals: Vec<f32>,
}

impl ColumnAssignment {
    /// Number of columns, including empty ones.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Item indices per column, in assignment order.
    #[must_use]
    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    /// Item indices of a single column.
    #[must_use]
    pub fn column(&self, column: usize) -> Option<&[usize]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Running totals per column (heights plus gaps).
    #[must_use]
    pub fn total_heights(&self) -> &[f32] {
        &self.totals
    }

    /// The column an item was assigned to.
    #[must_use]
    pub fn column_of(&self, index: usize) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.contains(&index))
    }

    /// Largest running total across columns.
    #[must_use]
    pub fn tallest(&self) -> f32 {
        self.totals.iter().copied().fold(0.0, f32::max)
    }

    /// Total number of assigned items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

/// Configured balancing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBalancer {
    columns: NonZeroUsize,
    gap: f32,
    placeholder_height: f32,
}

impl ColumnBalancer {
    /// Creates a balancer for `columns` columns with no gap.
    #[must_use]
    pub const fn new(columns: NonZeroUsize) -> Self {
        Self {
            columns,
            gap: 0.0,
            placeholder_height: DEFAULT_PLACEHOLDER_HEIGHT,
        }
    }

    /// Creates a balancer from a plain column count.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidColumnCount`] when `count` is zero.
    pub fn with_column_count(count: usize) -> Result<Self, LayoutError> {
        NonZeroUsize::new(count)
            .map(Self::new)
            .ok_or(LayoutError::InvalidColumnCount(count))
    }

    /// Balancer for lengths that already passed [`MasonryConfig::validate`](crate::MasonryConfig::validate).
    pub(crate) const fn with_validated(
        columns: NonZeroUsize,
        gap: f32,
        placeholder_height: f32,
    ) -> Self {
        Self {
            columns,
            gap,
            placeholder_height,
        }
    }

    /// Sets the gap added after every item.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] when `gap` is negative or
    /// not finite.
    pub fn gap(mut self, gap: f32) -> Result<Self, LayoutError> {
        self.gap = check_dimension("gap", gap)?;
        Ok(self)
    }

    /// Sets the height used for items without a measurement.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] when `height` is negative or
    /// not finite.
    pub fn placeholder_height(mut self, height: f32) -> Result<Self, LayoutError> {
        self.placeholder_height = check_dimension("placeholder_height", height)?;
        Ok(self)
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> NonZeroUsize {
        self.columns
    }

    /// Assigns `item_count` items, identified by index, to columns.
    #[must_use]
    pub fn assign(&self, item_count: usize, heights: &HeightMap) -> ColumnAssignment {
        let column_count = self.columns.get();
        let mut columns = vec![Vec::new(); column_count];
        let mut totals = vec![0.0_f32; column_count];

        for index in 0..item_count {
            let target = shortest_column(&totals);
            let height = heights.height_or(index, self.placeholder_height);
            columns[target].push(index);
            totals[target] += height + self.gap;
            tracing::trace!(index, column = target, height, "placed item");
        }

        ColumnAssignment { columns, totals }
    }

    /// Balances `items` into columns that borrow the payloads.
    #[must_use]
    pub fn balance<'a, T>(&self, items: &'a [T], heights: &HeightMap) -> Vec<Column<'a, T>> {
        let assignment = self.assign(items.len(), heights);
        assignment
            .columns
            .into_iter()
            .zip(assignment.totals)
            .map(|(indices, total_height)| Column {
                items: indices
                    .into_iter()
                    .map(|index| ColumnItem {
                        item: &items[index],
                        index,
                    })
                    .collect(),
                total_height,
            })
            .collect()
    }
}

/// Balances `items` across `column_count` columns.
///
/// Unmeasured items count as [`DEFAULT_PLACEHOLDER_HEIGHT`].
///
/// # Errors
///
/// Returns [`LayoutError::InvalidColumnCount`] when `column_count` is zero and
/// [`LayoutError::InvalidDimension`] when `gap` is negative or not finite.
pub fn balance<'a, T>(
    items: &'a [T],
    column_count: usize,
    heights: &HeightMap,
    gap: f32,
) -> Result<Vec<Column<'a, T>>, LayoutError> {
    let balancer = ColumnBalancer::with_column_count(column_count)?.gap(gap)?;
    Ok(balancer.balance(items, heights))
}

/// Lowest-indexed column with the strictly smallest total.
fn shortest_column(totals: &[f32]) -> usize {
    let mut index = 0;
    let mut best = totals.first().copied().unwrap_or(0.0);
    for (i, total) in totals.iter().copied().enumerate().skip(1) {
        if total < best {
            best = total;
            index = i;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(values: &[f32]) -> HeightMap {
        values.iter().copied().enumerate().collect()
    }

    #[test]
    fn places_scenario_cards() {
        let items = ['A', 'B', 'C', 'D'];
        let columns = balance(&items, 3, &heights(&[100.0, 50.0, 50.0, 20.0]), 0.0).unwrap();

        let placed: Vec<Vec<char>> = columns
            .iter()
            .map(|c| c.items().iter().map(|entry| *entry.item).collect())
            .collect();
        assert_eq!(placed, [vec!['A'], vec!['B', 'D'], vec!['C']]);

        let totals: Vec<f32> = columns.iter().map(Column::total_height).collect();
        assert_eq!(totals, [100.0, 70.0, 50.0]);
    }

    #[test]
    fn ties_go_to_lowest_column() {
        let items = [0, 1, 2];
        let columns = balance(&items, 3, &heights(&[10.0, 10.0, 10.0]), 0.0).unwrap();
        for (column_index, column) in columns.iter().enumerate() {
            assert_eq!(column.len(), 1);
            assert_eq!(column.items()[0].index, column_index);
        }
    }

    #[test]
    fn zero_columns_is_rejected() {
        let items = [1, 2, 3];
        assert_eq!(
            balance(&items, 0, &HeightMap::new(), 8.0).unwrap_err(),
            LayoutError::InvalidColumnCount(0)
        );
    }

    #[test]
    fn negative_gap_is_rejected() {
        let items = [1];
        assert!(matches!(
            balance(&items, 2, &HeightMap::new(), -8.0),
            Err(LayoutError::InvalidDimension { field: "gap", .. })
        ));
    }

    #[test]
    fn balancer_rejects_lengths_that_would_poison_totals() {
        let balancer = ColumnBalancer::with_column_count(3).unwrap();
        assert!(matches!(
            balancer.placeholder_height(f32::NAN),
            Err(LayoutError::InvalidDimension { field: "placeholder_height", .. })
        ));
        assert!(matches!(
            balancer.placeholder_height(-1.0),
            Err(LayoutError::InvalidDimension { field: "placeholder_height", .. })
        ));
        assert!(matches!(
            balancer.gap(-50.0),
            Err(LayoutError::InvalidDimension { field: "gap", .. })
        ));
        assert!(matches!(
            balancer.gap(f32::INFINITY),
            Err(LayoutError::InvalidDimension { field: "gap", .. })
        ));

        // A rejected setter leaves the original balancer usable.
        let assignment = balancer.assign(6, &HeightMap::new());
        assert_eq!(assignment.columns(), [vec![0, 3], vec![1, 4], vec![2, 5]]);
        assert_eq!(assignment.total_heights(), [300.0, 300.0, 300.0]);
    }

    #[test]
    fn gap_counts_once_per_item() {
        let balancer = ColumnBalancer::with_column_count(2)
            .and_then(|balancer| balancer.gap(8.0))
            .unwrap();
        let assignment = balancer.assign(3, &heights(&[10.0, 30.0, 5.0]));
        assert_eq!(assignment.columns(), [vec![0, 2], vec![1]]);
        assert_eq!(assignment.total_heights(), [31.0, 38.0]);
    }

    #[test]
    fn unmeasured_items_use_placeholder() {
        let balancer = ColumnBalancer::with_column_count(2)
            .and_then(|balancer| balancer.placeholder_height(40.0))
            .unwrap();
        // Item 0 is unmeasured: it must not poison column 0's total.
        let partial: HeightMap = [(1, 10.0), (2, 10.0)].into_iter().collect();
        let assignment = balancer.assign(4, &partial);

        assert_eq!(assignment.total_heights()[0], 40.0);
        assert!(assignment.total_heights().iter().all(|t| t.is_finite()));
        assert_eq!(assignment.columns(), [vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn more_columns_than_items_leaves_empty_columns() {
        let items = ["only"];
        let columns = balance(&items, 4, &HeightMap::new(), 8.0).unwrap();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].len(), 1);
        assert!(columns[1..].iter().all(Column::is_empty));
    }

    #[test]
    fn empty_input_yields_empty_columns() {
        let items: [u8; 0] = [];
        let columns = balance(&items, 3, &HeightMap::new(), 8.0).unwrap();
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| c.is_empty() && c.total_height() == 0.0));
    }

    #[test]
    fn assignment_lookups() {
        let balancer = ColumnBalancer::with_column_count(3).unwrap();
        let assignment = balancer.assign(4, &heights(&[100.0, 50.0, 50.0, 20.0]));
        assert_eq!(assignment.column_of(3), Some(1));
        assert_eq!(assignment.column_of(9), None);
        assert_eq!(assignment.column(2), Some(&[2][..]));
        assert_eq!(assignment.tallest(), 100.0);
        assert_eq!(assignment.item_count(), 4);
    }
}
