//! On-disk settings for the demo.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use waterfall_masonry::MasonryConfig;

use crate::sample::INITIAL_CARDS;

/// Errors raised while loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read settings from {path}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid settings TOML.
    #[error("failed to parse settings in {path}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Parser failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Demo settings.
///
/// Every field is optional in the file:
///
/// ```toml
/// initial_cards = 4
/// log_file = "waterfall.log"
///
/// [layout]
/// columns = 2
/// column_gap = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Cards created at startup and on reset.
    pub initial_cards: usize,
    /// Where to write logs in interactive mode.
    pub log_file: Option<PathBuf>,
    /// Layout fields that differ from [`terminal_layout`].
    pub layout: LayoutOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_cards: INITIAL_CARDS,
            log_file: None,
            layout: LayoutOverrides::default(),
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML, unknown keys or mistyped fields.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// The grid configuration these settings describe.
    ///
    /// Lengths are rounded to whole cells: the terminal draws gaps and
    /// paddings as whole rows and columns, and the grid must balance with the
    /// same numbers it is drawn with. Invalid lengths are left for
    /// [`MasonryConfig::validate`] to reject.
    #[must_use]
    pub fn masonry_config(&self) -> MasonryConfig {
        let mut config = self.layout.apply(terminal_layout());
        let lengths = [
            &mut config.column_gap,
            &mut config.row_gap,
            &mut config.padding_horizontal,
            &mut config.padding_top,
            &mut config.padding_bottom,
            &mut config.max_content_width,
            &mut config.default_height,
        ];
        for length in lengths {
            *length = length.round();
        }
        config
    }
}

/// Optional replacements for individual [`MasonryConfig`] fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(missing_docs)]
pub struct LayoutOverrides {
    pub columns: Option<usize>,
    pub column_gap: Option<f32>,
    pub row_gap: Option<f32>,
    pub padding_horizontal: Option<f32>,
    pub padding_top: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub max_content_width: Option<f32>,
    pub default_height: Option<f32>,
}

impl LayoutOverrides {
    /// Writes every set field over `base`.
    #[must_use]
    pub fn apply(&self, mut base: MasonryConfig) -> MasonryConfig {
        if let Some(columns) = self.columns {
            base.columns = columns;
        }
        let fields = [
            (self.column_gap, &mut base.column_gap),
            (self.row_gap, &mut base.row_gap),
            (self.padding_horizontal, &mut base.padding_horizontal),
            (self.padding_top, &mut base.padding_top),
            (self.padding_bottom, &mut base.padding_bottom),
            (self.max_content_width, &mut base.max_content_width),
            (self.default_height, &mut base.default_height),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        base
    }
}

/// Grid defaults scaled to terminal cells.
///
/// A cell is roughly eight points wide and sixteen tall, so gaps and paddings
/// shrink accordingly.
#[must_use]
pub fn terminal_layout() -> MasonryConfig {
    MasonryConfig::default()
        .column_gap(2.0)
        .row_gap(1.0)
        .padding_horizontal(2.0)
        .padding_vertical(1.0, 1.0)
        .max_content_width(120.0)
        .default_height(6.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_terminal_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.initial_cards, 2);
        assert_eq!(settings.masonry_config(), terminal_layout());
        assert_eq!(settings.masonry_config().columns, 3);
    }

    #[test]
    fn partial_layout_keeps_terminal_defaults() {
        let settings = Settings::from_toml(
            r#"
            initial_cards = 5
            log_file = "demo.log"

            [layout]
            columns = 2
            row_gap = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.initial_cards, 5);
        assert_eq!(settings.log_file.as_deref(), Some(Path::new("demo.log")));

        let config = settings.masonry_config();
        assert_eq!(config.columns, 2);
        assert!(config.row_gap.abs() < f32::EPSILON);
        assert!((config.column_gap - 2.0).abs() < f32::EPSILON);
        assert!((config.max_content_width - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fractional_lengths_round_to_whole_cells() {
        let settings = Settings::from_toml(
            r#"
            [layout]
            row_gap = 0.5
            padding_top = 1.4
            default_height = 4.6
            "#,
        )
        .unwrap();

        let config = settings.masonry_config();
        assert_eq!(config.row_gap, 1.0);
        assert_eq!(config.padding_top, 1.0);
        assert_eq!(config.default_height, 5.0);
    }

    #[test]
    fn invalid_lengths_still_fail_validation() {
        let settings = Settings::from_toml("[layout]\nrow_gap = -2.0\n").unwrap();
        assert!(settings.masonry_config().validate().is_err());

        let settings = Settings::from_toml("[layout]\ncolumn_gap = nan\n").unwrap();
        assert!(settings.masonry_config().validate().is_err());
    }

    #[test]
    fn mistyped_or_unknown_fields_are_rejected() {
        assert!(Settings::from_toml("initial_cards = \"two\"").is_err());
        assert!(Settings::from_toml("[layout]\ngutter = 3.0").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/waterfall.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/waterfall.toml"));
    }
}
