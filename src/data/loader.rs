//! CSV Data Loader Module
//! Handles CSV file loading with Polars and coercion into typed rows.

use crate::data::{AgeLikes, DailyLikes, PlatformLikes};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Date format of the `Date` column, e.g. `3/1/2024`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Row {row}: '{value}' in column '{column}' is not a M/D/YYYY date")]
    InvalidDate {
        row: usize,
        column: String,
        value: String,
    },
    #[error("No data loaded")]
    NoData,
}

/// How malformed cells are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    /// Bad numbers become NaN and rows with bad dates are dropped.
    #[default]
    Lenient,
    /// The first malformed cell fails the load.
    Strict,
}

/// Loads the chart inputs with Polars.
pub struct DataLoader {
    validation: Validation,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(Validation::default())
    }
}

impl DataLoader {
    pub fn new(validation: Validation) -> Self {
        Self { validation }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&self, file_path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        debug!(path = %file_path.display(), rows = df.height(), "loaded csv");
        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }
        Ok(df)
    }

    /// Rows of `AgeGroup, Likes`.
    pub fn load_age_likes(&self, file_path: &Path) -> Result<Vec<AgeLikes>, LoaderError> {
        let df = self.load_csv(file_path)?;
        let groups = Self::text_column(&df, "AgeGroup")?;
        let likes = Self::text_column(&df, "Likes")?;

        groups
            .into_iter()
            .zip(likes)
            .enumerate()
            .map(|(row, (group, value))| {
                Ok(AgeLikes {
                    age_group: group.unwrap_or_default(),
                    likes: self.number(row, "Likes", value.as_deref())?,
                })
            })
            .collect()
    }

    /// Rows of `Platform, PostType, AvgLikes`.
    pub fn load_platform_likes(&self, file_path: &Path) -> Result<Vec<PlatformLikes>, LoaderError> {
        let df = self.load_csv(file_path)?;
        let platforms = Self::text_column(&df, "Platform")?;
        let post_types = Self::text_column(&df, "PostType")?;
        let avg_likes = Self::text_column(&df, "AvgLikes")?;

        platforms
            .into_iter()
            .zip(post_types)
            .zip(avg_likes)
            .enumerate()
            .map(|(row, ((platform, post_type), value))| {
                Ok(PlatformLikes {
                    platform: platform.unwrap_or_default(),
                    post_type: post_type.unwrap_or_default(),
                    avg_likes: self.number(row, "AvgLikes", value.as_deref())?,
                })
            })
            .collect()
    }

    /// Rows of `Date, AvgLikes`, in file order.
    pub fn load_daily_likes(&self, file_path: &Path) -> Result<Vec<DailyLikes>, LoaderError> {
        let df = self.load_csv(file_path)?;
        let dates = Self::text_column(&df, "Date")?;
        let avg_likes = Self::text_column(&df, "AvgLikes")?;

        let mut rows = Vec::with_capacity(dates.len());
        for (row, (date, value)) in dates.into_iter().zip(avg_likes).enumerate() {
            let Some(date) = self.date(row, "Date", date.as_deref())? else {
                continue;
            };
            rows.push(DailyLikes {
                date,
                avg_likes: self.number(row, "AvgLikes", value.as_deref())?,
            });
        }

        if rows.is_empty() {
            return Err(LoaderError::NoData);
        }
        Ok(rows)
    }

    /// Read a column as trimmed text, whatever dtype Polars inferred.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let as_text = column.cast(&DataType::String)?;
        let series = as_text.as_materialized_series();

        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect())
    }

    fn number(&self, row: usize, column: &str, raw: Option<&str>) -> Result<f64, LoaderError> {
        let parsed = raw.and_then(|s| s.parse::<f64>().ok());
        match (parsed, self.validation) {
            (Some(v), _) => Ok(v),
            (None, Validation::Lenient) => {
                warn!(row, column, value = raw.unwrap_or(""), "not a number, using NaN");
                Ok(f64::NAN)
            }
            (None, Validation::Strict) => Err(LoaderError::InvalidNumber {
                row,
                column: column.to_string(),
                value: raw.unwrap_or("").to_string(),
            }),
        }
    }

    fn date(
        &self,
        row: usize,
        column: &str,
        raw: Option<&str>,
    ) -> Result<Option<NaiveDate>, LoaderError> {
        let parsed = raw.and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());
        match (parsed, self.validation) {
            (Some(d), _) => Ok(Some(d)),
            (None, Validation::Lenient) => {
                warn!(row, column, value = raw.unwrap_or(""), "not a date, dropping row");
                Ok(None)
            }
            (None, Validation::Strict) => Err(LoaderError::InvalidDate {
                row,
                column: column.to_string(),
                value: raw.unwrap_or("").to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_number_falls_back_to_nan() {
        let loader = DataLoader::new(Validation::Lenient);
        assert!(loader.number(0, "Likes", Some("abc")).unwrap().is_nan());
        assert!(loader.number(0, "Likes", None).unwrap().is_nan());
        assert_eq!(loader.number(0, "Likes", Some("42")).unwrap(), 42.0);
    }

    #[test]
    fn strict_number_reports_cell() {
        let loader = DataLoader::new(Validation::Strict);
        let err = loader.number(3, "Likes", Some("abc")).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidNumber { row: 3, .. }));
    }

    #[test]
    fn parses_unpadded_dates() {
        let loader = DataLoader::default();
        let date = loader.date(0, "Date", Some("3/7/2024")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 7));
    }

    #[test]
    fn lenient_date_drops_row() {
        let loader = DataLoader::default();
        assert_eq!(loader.date(0, "Date", Some("yesterday")).unwrap(), None);
    }
}
