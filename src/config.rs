//! Configuration: built-in defaults, an optional JSON file and env overrides.

use crate::charts::Color;
use crate::data::Validation;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATA_DIR_VAR: &str = "SOCIAL_CHARTS_DATA_DIR";
pub const OUT_DIR_VAR: &str = "SOCIAL_CHARTS_OUT_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid colour '{0}'")]
    Color(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Size and margins of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl ChartConfig {
    pub const fn new(width: u32, height: u32, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Pixel interval of the x axis.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.width as f64 - self.margin.right)
    }

    /// Pixel interval of the y axis, bottom to top.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height as f64 - self.margin.bottom, self.margin.top)
    }
}

/// Input file names, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub likes_by_age: String,
    pub likes_by_platform: String,
    pub likes_by_date: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            likes_by_age: "socialMedia.csv".into(),
            likes_by_platform: "socialMediaAvg.csv".into(),
            likes_by_date: "socialMediaTime.csv".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub files: InputFiles,
    pub validation: Validation,
    pub box_plot: ChartConfig,
    pub bar_chart: ChartConfig,
    pub line_chart: ChartConfig,
    /// Post type colours, as `#rrggbb`.
    pub palette: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let standard = ChartConfig::new(720, 420, Margin::new(30.0, 20.0, 60.0, 60.0));
        Self {
            data_dir: PathBuf::from("."),
            out_dir: PathBuf::from("charts"),
            files: InputFiles::default(),
            validation: Validation::Lenient,
            box_plot: standard,
            bar_chart: ChartConfig::new(760, 420, Margin::new(30.0, 160.0, 60.0, 60.0)),
            line_chart: standard,
            palette: vec!["#1f77b4".into(), "#ff7f0e".into(), "#2ca02c".into()],
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid with `path` when given, then with environment
    /// variables (a `.env` file is honoured).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(dir) = std::env::var(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var(OUT_DIR_VAR) {
            config.out_dir = PathBuf::from(dir);
        }

        // Reject bad colours before any chart is built
        config.palette_colors()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn palette_colors(&self) -> Result<Vec<Color>, ConfigError> {
        self.palette
            .iter()
            .map(|hex| Color::from_hex(hex).ok_or_else(|| ConfigError::Color(hex.clone())))
            .collect()
    }

    pub fn input_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_chart_layout() {
        let config = AppConfig::default();
        assert_eq!(config.box_plot.width, 720);
        assert_eq!(config.bar_chart.width, 760);
        assert_eq!(config.bar_chart.margin.right, 160.0);
        assert_eq!(config.line_chart.y_range(), (360.0, 30.0));
        assert_eq!(config.palette_colors().unwrap().len(), 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "validation": "strict", "out_dir": "out" }"#).unwrap();
        assert_eq!(config.validation, Validation::Strict);
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.files, InputFiles::default());
    }

    #[test]
    fn bad_palette_is_rejected() {
        let config = AppConfig {
            palette: vec!["blue".into()],
            ..AppConfig::default()
        };
        assert!(matches!(config.palette_colors(), Err(ConfigError::Color(_))));
    }
}
