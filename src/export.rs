//! Export Module
//! Writes the cleaned dataset as CSV and the summary as JSON.

use crate::data::Show;
use crate::stats::ShowStats;
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary file layout.
#[derive(Serialize)]
struct SummaryReport<'a> {
    source: String,
    #[serde(flatten)]
    stats: &'a ShowStats,
}

/// Writes run results next to the chart
pub struct Exporter;

impl Exporter {
    /// Write cleaned shows as `title,year,episodes` in cleaned order.
    pub fn write_cleaned_csv(shows: &[Show], path: &Path) -> Result<(), ExportError> {
        let mut df = DataFrame::new(vec![
            Column::new(
                "title".into(),
                shows.iter().map(|s| s.title.clone()).collect::<Vec<_>>(),
            ),
            Column::new("year".into(), shows.iter().map(|s| s.year).collect::<Vec<_>>()),
            Column::new(
                "episodes".into(),
                shows.iter().map(|s| s.episodes).collect::<Vec<_>>(),
            ),
        ])?;

        Self::ensure_parent_dir(path)?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;

        log::info!("Cleaned dataset ({} rows) written to {}", shows.len(), path.display());
        Ok(())
    }

    /// Write totals and yearly counts as pretty JSON.
    pub fn write_summary_json(
        stats: &ShowStats,
        source: &Path,
        path: &Path,
    ) -> Result<(), ExportError> {
        let report = SummaryReport {
            source: source.display().to_string(),
            stats,
        };

        Self::ensure_parent_dir(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        log::info!("Summary written to {}", path.display());
        Ok(())
    }

    fn ensure_parent_dir(path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsCalculator;
    use crate::test_support::temp_path;

    fn shows() -> Vec<Show> {
        vec![
            Show {
                title: "Show C".to_string(),
                year: 2019,
                episodes: 5,
            },
            Show {
                title: "Show A".to_string(),
                year: 2020,
                episodes: 10,
            },
        ]
    }

    #[test]
    fn cleaned_csv_keeps_row_order() {
        let path = temp_path("export/cleaned.csv");
        Exporter::write_cleaned_csv(&shows(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "title,year,episodes\nShow C,2019,5\nShow A,2020,10\n");
    }

    #[test]
    fn summary_json_has_totals_and_years() {
        let path = temp_path("summary.json");
        let stats = StatsCalculator::compute(&shows());
        Exporter::write_summary_json(&stats, Path::new("shows.csv"), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["source"], "shows.csv");
        assert_eq!(value["total_shows"], 2);
        assert_eq!(value["total_episodes"], 15);
        assert_eq!(value["yearly_counts"][0]["year"], 2019);
        assert_eq!(value["yearly_counts"][1]["shows"], 1);
    }
}
