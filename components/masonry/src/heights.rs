//! Measured item heights.

use std::collections::BTreeMap;

use crate::LayoutError;

/// Heights reported by the host renderer, keyed by item index.
///
/// An absent entry means the item has not been measured yet. Entries are only
/// inserted or updated; the owning grid clears the whole map when its data set
/// is replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightMap {
    entries: BTreeMap<usize, f32>,
}

impl HeightMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the measured height of `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.entries.get(&index).copied()
    }

    /// Returns the measured height of `index`, or `placeholder` when unmeasured.
    #[must_use]
    pub fn height_or(&self, index: usize, placeholder: f32) -> f32 {
        self.get(index).unwrap_or(placeholder)
    }

    /// Whether `index` has been measured.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Number of measured items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been measured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores a measurement.
    ///
    /// Returns `Ok(true)` when the stored value changed (new entry or different
    /// height) and `Ok(false)` when the same height was already recorded.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidMeasurement`] when `height` is negative or
    /// not finite. The map is left untouched in that case.
    pub fn record(&mut self, index: usize, height: f32) -> Result<bool, LayoutError> {
        if !height.is_finite() || height < 0.0 {
            return Err(LayoutError::InvalidMeasurement { index, height });
        }

        #[allow(clippy::float_cmp)]
        let unchanged = self.get(index) == Some(height);
        if unchanged {
            return Ok(false);
        }

        self.entries.insert(index, height);
        Ok(true)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(usize, f32)> for HeightMap {
    fn from_iter<I: IntoIterator<Item = (usize, f32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
