//! Top-level pipeline: load → clean → aggregate → export → render → display.

use crate::charts::{ChartData, ChartRenderer, RenderError};
use crate::config::Settings;
use crate::data::{DataLoader, DataProcessor, Show};
use crate::export::Exporter;
use crate::stats::{ShowStats, StatsCalculator};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Cleaned shows and their statistics.
#[derive(Debug)]
pub struct Prepared {
    pub shows: Vec<Show>,
    pub stats: ShowStats,
}

/// What happened to the chart.
#[derive(Debug, PartialEq, Eq)]
pub enum ChartOutcome {
    Written(PathBuf),
    /// Nothing left after cleaning, so no chart was drawn.
    Skipped,
}

/// Load, clean and aggregate one CSV file.
pub fn prepare(input: &Path) -> Result<Prepared> {
    let mut loader = DataLoader::new();
    let df = loader
        .load_csv(input)
        .with_context(|| format!("loading shows from {}", input.display()))?;
    let rows = DataProcessor::extract_rows(df).context("reading show rows")?;
    if let Some(path) = loader.get_file_path() {
        log::debug!("Columns in {}: {:?}", path.display(), loader.get_columns());
    }
    let shows = DataProcessor::clean(rows).context("cleaning shows")?;
    let stats = StatsCalculator::compute(&shows);

    Ok(Prepared { shows, stats })
}

/// Run the whole pipeline once.
pub fn run(settings: &Settings) -> Result<ChartOutcome> {
    let prepared = prepare(&settings.input)?;
    if let Some((first, last)) = prepared.stats.year_span() {
        log::info!("Shows span {first} to {last}");
    }

    if let Some(path) = &settings.export_csv {
        Exporter::write_cleaned_csv(&prepared.shows, path)
            .with_context(|| format!("exporting cleaned shows to {}", path.display()))?;
    }
    if let Some(path) = &settings.export_summary {
        Exporter::write_summary_json(&prepared.stats, &settings.input, path)
            .with_context(|| format!("exporting summary to {}", path.display()))?;
    }

    let chart = ChartData::from_stats(&prepared.stats);
    match ChartRenderer::render_png(&chart, &settings.chart, &settings.output) {
        Ok(()) => {}
        Err(RenderError::EmptyDataset) => {
            log::warn!(
                "No shows left after cleaning {}, skipping chart",
                settings.input.display()
            );
            return Ok(ChartOutcome::Skipped);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("rendering chart to {}", settings.output.display()))
        }
    }

    if settings.open_chart {
        display(&settings.output);
    }
    Ok(ChartOutcome::Written(settings.output.clone()))
}

/// Show the chart in the system viewer. The file stays on disk either way.
fn display(path: &Path) {
    match open::that(path) {
        Ok(()) => log::debug!("Opened {}", path.display()),
        Err(err) => log::warn!("Could not open {}: {}", path.display(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::YearlyCount;
    use crate::test_support::{png_dimensions, temp_path, write_temp_csv};

    #[test]
    fn prepares_worked_example() {
        let path = write_temp_csv(
            "app_worked_example.csv",
            "title,year,episodes\nShow A,2020,10\nShow B,2019,\nShow A,2020,10\nShow C,2019,5.0\n",
        );
        let prepared = prepare(&path).unwrap();

        let titles: Vec<&str> = prepared.shows.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Show C", "Show A"]);
        assert_eq!(prepared.stats.total_shows, 2);
        assert_eq!(prepared.stats.total_episodes, 15);
        assert_eq!(
            prepared.stats.yearly_counts,
            vec![
                YearlyCount { year: 2019, shows: 1 },
                YearlyCount { year: 2020, shows: 1 },
            ]
        );
    }

    #[test]
    fn missing_input_error_names_the_file() {
        let path = temp_path("tv_show_chart_missing_input.csv");
        let err = prepare(&path).unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("loading shows from"));
        assert!(message.contains("tv_show_chart_missing_input.csv"));
    }

    #[test]
    fn empty_dataset_skips_chart_but_still_exports() {
        let input = write_temp_csv(
            "app_all_missing.csv",
            "title,year,episodes\nShow A,2020,\nShow B,2021,\n",
        );
        let dir = temp_path("app_empty");
        let settings = Settings {
            input,
            output: dir.join("chart.png"),
            open_chart: false,
            export_csv: None,
            export_summary: Some(dir.join("summary.json")),
            ..Settings::default()
        };

        let outcome = run(&settings).unwrap();

        assert_eq!(outcome, ChartOutcome::Skipped);
        assert!(!settings.output.exists());
        let summary = std::fs::read_to_string(dir.join("summary.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(value["total_shows"], 0);
        assert_eq!(value["total_episodes"], 0);
        assert_eq!(value["yearly_counts"], serde_json::json!([]));
    }

    #[test]
    fn header_only_input_aggregates_to_zero() {
        let path = write_temp_csv("app_header_only.csv", "title,year,episodes\n");
        let prepared = prepare(&path).unwrap();

        assert!(prepared.shows.is_empty());
        assert_eq!(prepared.stats, ShowStats::default());
    }

    #[test]
    fn worked_example_writes_chart() {
        let input = write_temp_csv(
            "app_render.csv",
            "title,year,episodes\nShow A,2020,10\nShow B,2019,\nShow A,2020,10\nShow C,2019,5.0\n",
        );
        let output = temp_path("app_render/shows_per_year.png");
        let _ = std::fs::remove_file(&output);
        let settings = Settings {
            input,
            output: output.clone(),
            open_chart: false,
            export_csv: None,
            export_summary: None,
            ..Settings::default()
        };

        let outcome = run(&settings).unwrap();

        assert_eq!(outcome, ChartOutcome::Written(output.clone()));
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(png_dimensions(&bytes), Some((1200, 600)));
    }
}
