//! Error types for masonry layout.

use thiserror::Error;

/// Errors raised when a grid is configured or fed with invalid values.
///
/// Every variant is a caller error. Layout never degrades silently: a bad
/// column count or a non-finite dimension is rejected before anything is
/// rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A grid needs at least one column.
    #[error("invalid argument: column count must be at least 1, got {0}")]
    InvalidColumnCount(usize),
    /// A configured length was negative or not finite.
    #[error("invalid argument: `{field}` must be finite and non-negative, got {value}")]
    InvalidDimension {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A host reported a height that cannot take part in balancing.
    #[error("invalid measurement for item {index}: height must be finite and non-negative, got {height}")]
    InvalidMeasurement {
        /// Index of the measured item.
        index: usize,
        /// The rejected height.
        height: f32,
    },
}

/// Checks that `value` is a finite, non-negative length.
pub(crate) fn check_dimension(field: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidDimension { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_negative() {
        assert!(check_dimension("gap", f32::NAN).is_err());
        assert!(check_dimension("gap", -1.0).is_err());
        assert!(check_dimension("gap", f32::INFINITY).is_err());
        assert_eq!(check_dimension("gap", 0.0), Ok(0.0));
    }

    #[test]
    fn messages_name_the_field() {
        let err = check_dimension("row_gap", -2.0).unwrap_err();
        assert!(err.to_string().contains("row_gap"));
        assert!(
            LayoutError::InvalidColumnCount(0)
                .to_string()
                .contains("at least 1")
        );
    }
}
