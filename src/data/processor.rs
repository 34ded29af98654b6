//! Data Processor Module
//! Turns the loaded table into show rows and cleans them.
//!
//! Cleaning runs in a fixed order: drop missing episodes, drop duplicate
//! titles (first wins), sort by `(year, title)`, re-index, convert episodes
//! to integers. De-duplication must see the rows in their original order,
//! so nothing is sorted before it.

use super::model::{RawValue, RawShow, Show};
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{column}' has unsupported type {dtype}")]
    UnsupportedType { column: String, dtype: String },
    #[error("Missing '{column}' value in row {row}")]
    MissingValue { column: String, row: usize },
    #[error("Invalid year '{value}' in row {row}")]
    InvalidYear { row: usize, value: String },
    #[error("Non-numeric episode count '{value}' for show '{title}'")]
    NonNumericEpisodes { title: String, value: String },
}

/// Handles row extraction and cleaning.
pub struct DataProcessor;

impl DataProcessor {
    /// Extract `title`, `year` and `episodes` from every row.
    ///
    /// Episode counts are kept untyped; see [`DataProcessor::clean`].
    pub fn extract_rows(df: &DataFrame) -> Result<Vec<RawShow>, ProcessorError> {
        let titles = Self::text_column(df, "title")?;
        let years = Self::cell_column(df, "year")?;
        let episodes = Self::cell_column(df, "episodes")?;

        let mut rows = Vec::with_capacity(df.height());
        for (row, ((title, year), episodes)) in titles
            .into_iter()
            .zip(years)
            .zip(episodes)
            .enumerate()
        {
            let title = title.ok_or_else(|| ProcessorError::MissingValue {
                column: "title".to_string(),
                row,
            })?;
            let year = Self::parse_year(year, row)?;
            rows.push(RawShow::new(title, year, episodes));
        }

        Ok(rows)
    }

    /// Clean raw rows into the final ordered dataset.
    pub fn clean(rows: Vec<RawShow>) -> Result<Vec<Show>, ProcessorError> {
        let initial = rows.len();

        let with_episodes = Self::drop_missing_episodes(rows);
        log::debug!(
            "Dropped {} rows with missing episodes",
            initial - with_episodes.len()
        );

        let before_dedup = with_episodes.len();
        let mut unique = Self::drop_duplicate_titles(with_episodes);
        log::debug!("Dropped {} duplicate titles", before_dedup - unique.len());

        Self::sort_by_year_and_title(&mut unique);

        // Vector position is the dense 0-based index from here on
        let shows = unique
            .into_iter()
            .map(|raw| {
                let episodes = Self::episodes_to_int(&raw.title, &raw.episodes)?;
                Ok(Show {
                    title: raw.title,
                    year: raw.year,
                    episodes,
                })
            })
            .collect::<Result<Vec<_>, ProcessorError>>()?;

        log::info!("Kept {} of {} rows after cleaning", shows.len(), initial);
        Ok(shows)
    }

    fn drop_missing_episodes(rows: Vec<RawShow>) -> Vec<RawShow> {
        rows.into_iter()
            .filter(|row| !row.episodes.is_missing())
            .collect()
    }

    fn drop_duplicate_titles(rows: Vec<RawShow>) -> Vec<RawShow> {
        let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
        rows.into_iter()
            .filter(|row| seen.insert(row.title.clone()))
            .collect()
    }

    fn sort_by_year_and_title(rows: &mut [RawShow]) {
        rows.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.title.cmp(&b.title)));
    }

    /// Truncate toward zero, as an integer cast of a float column would.
    fn episodes_to_int(title: &str, cell: &RawValue) -> Result<i64, ProcessorError> {
        let invalid = |value: String| ProcessorError::NonNumericEpisodes {
            title: title.to_string(),
            value,
        };

        let value = match cell {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid(s.clone()))?,
            RawValue::Missing => return Err(invalid(String::new())),
        };

        let truncated = value.trunc();
        if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
            return Err(invalid(value.to_string()));
        }
        Ok(truncated as i64)
    }

    fn parse_year(cell: RawValue, row: usize) -> Result<i64, ProcessorError> {
        let invalid = |value: String| ProcessorError::InvalidYear { row, value };

        let value = match cell {
            RawValue::Missing => {
                return Err(ProcessorError::MissingValue {
                    column: "year".to_string(),
                    row,
                })
            }
            RawValue::Number(v) => v,
            RawValue::Text(s) => match s.parse::<i64>() {
                Ok(year) => return Ok(year),
                Err(_) => s.parse::<f64>().map_err(|_| invalid(s.clone()))?,
            },
        };

        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Ok(value as i64)
        } else {
            Err(invalid(value.to_string()))
        }
    }

    /// Read any column as optional text.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let series = df
            .column(name)?
            .as_materialized_series()
            .cast(&DataType::String)?;
        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect())
    }

    /// Read a column that should hold numbers, keeping text cells as-is.
    ///
    /// Null, NaN and the usual NA markers all count as missing.
    fn cell_column(df: &DataFrame, name: &str) -> Result<Vec<RawValue>, ProcessorError> {
        let column = df.column(name)?;
        let series = column.as_materialized_series();

        match series.dtype() {
            DataType::Null => Ok((0..series.len()).map(|_| RawValue::Missing).collect()),
            DataType::String => Ok(series
                .str()?
                .into_iter()
                .map(|v| v.map_or(RawValue::Missing, RawValue::from_text))
                .collect()),
            DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => {
                let values = series.cast(&DataType::Float64)?;
                Ok(values
                    .f64()?
                    .into_iter()
                    .map(|v| match v {
                        Some(v) if !v.is_nan() => RawValue::Number(v),
                        _ => RawValue::Missing,
                    })
                    .collect())
            }
            other => Err(ProcessorError::UnsupportedType {
                column: name.to_string(),
                dtype: other.to_string(),
            }),
        }
    }
}
