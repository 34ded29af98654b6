//! Statistics Calculator Module
//! Computes the overall totals and the per-year show counts.

use crate::data::Show;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Number of shows aired in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyCount {
    pub year: i64,
    pub shows: usize,
}

/// Summary of a cleaned dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowStats {
    pub total_shows: usize,
    /// Wide enough that summing any number of `i64` counts cannot overflow.
    pub total_episodes: i128,
    /// Ordered by year ascending, one entry per distinct year.
    pub yearly_counts: Vec<YearlyCount>,
}

impl ShowStats {
    /// First and last year present, if any.
    pub fn year_span(&self) -> Option<(i64, i64)> {
        let first = self.yearly_counts.first()?;
        let last = self.yearly_counts.last()?;
        Some((first.year, last.year))
    }
}

/// Handles aggregate calculations over cleaned shows.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute totals and yearly counts. Never fails, including on empty input.
    pub fn compute(shows: &[Show]) -> ShowStats {
        let stats = ShowStats {
            total_shows: Self::count_distinct_titles(shows),
            total_episodes: shows.iter().map(|s| i128::from(s.episodes)).sum(),
            yearly_counts: Self::count_by_year(shows),
        };

        log::info!(
            "Total shows = {}, total episodes = {}, {} distinct years",
            stats.total_shows,
            stats.total_episodes,
            stats.yearly_counts.len()
        );
        stats
    }

    pub fn count_distinct_titles(shows: &[Show]) -> usize {
        shows
            .iter()
            .map(|s| s.title.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Group by year and count, ascending by year.
    pub fn count_by_year(shows: &[Show]) -> Vec<YearlyCount> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for show in shows {
            *counts.entry(show.year).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(year, shows)| YearlyCount { year, shows })
            .collect()
    }
}
