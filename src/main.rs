//! TV Show Chart - CSV cleaning, yearly statistics & chart export
//!
//! Reads a table of TV shows, cleans it, counts shows per year and draws
//! the counts as an annotated line chart.

mod app;
mod charts;
mod config;
mod data;
mod export;
mod stats;

#[cfg(test)]
mod test_support;

use app::ChartOutcome;
use config::Settings;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Settings::load()
        .map_err(anyhow::Error::from)
        .and_then(|settings| app::run(&settings));

    match result {
        Ok(ChartOutcome::Written(path)) => {
            log::debug!("Done, chart at {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(ChartOutcome::Skipped) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
