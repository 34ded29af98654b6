//! Stats module - Show totals and per-year counts

mod calculator;

pub use calculator::{ShowStats, StatsCalculator, YearlyCount};
