//! Chart Plotter Module
//! Chart input data plus the axis and shape geometry the renderer draws.
//!
//! Everything here is pure so that tick placement and box shapes can be
//! tested without a drawing backend.

use crate::stats::ShowStats;
use std::ops::Range;

/// Data for the yearly line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// `(year, show count)` ordered by year.
    pub points: Vec<(i64, usize)>,
    pub total_shows: usize,
    pub total_episodes: i128,
}

impl ChartData {
    pub fn from_stats(stats: &ShowStats) -> Self {
        Self {
            points: stats
                .yearly_counts
                .iter()
                .map(|c| (c.year, c.shows))
                .collect(),
            total_shows: stats.total_shows,
            total_episodes: stats.total_episodes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest year. `None` for an empty chart.
    pub fn year_bounds(&self) -> Option<(i64, i64)> {
        let min = self.points.iter().map(|&(year, _)| year).min()?;
        let max = self.points.iter().map(|&(year, _)| year).max()?;
        Some((min, max))
    }

    pub fn peak_count(&self) -> usize {
        self.points.iter().map(|&(_, n)| n).max().unwrap_or(0)
    }

    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Total Shows = {}", self.total_shows),
            format!("Total Episodes = {}", self.total_episodes),
        ]
    }
}

/// Ticks every `step` years starting at `min`, never past `max`.
pub fn year_ticks(min: i64, max: i64, step: i64) -> Vec<i64> {
    if step < 1 || max < min {
        return Vec::new();
    }
    let mut ticks = Vec::new();
    let mut year = min;
    while year <= max {
        ticks.push(year);
        year += step;
    }
    ticks
}

/// X axis range with a little padding so end markers are not clipped.
pub fn x_range(min: i64, max: i64) -> Range<f64> {
    let span = (max - min) as f64;
    let pad = (span * 0.03).max(1.0);
    (min as f64 - pad)..(max as f64 + pad)
}

/// Y axis range from zero, leaving headroom for the point labels.
pub fn y_range(peak: usize) -> Range<f64> {
    let peak = peak as f64;
    let top = (peak * 1.15).max(peak + 1.0).ceil();
    0.0..top
}

/// Whole-number ticks from zero to the top of `range`.
pub fn count_ticks(range: &Range<f64>) -> Vec<f64> {
    let step = nice_step(range.end / 6.0);
    let mut ticks = Vec::new();
    let mut value = 0.0;
    while value <= range.end {
        ticks.push(value);
        value += step;
    }
    ticks
}

/// Round a raw step up to 1, 2 or 5 times a power of ten, at least 1.
fn nice_step(raw: f64) -> f64 {
    if !(raw > 1.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Top-left offsets of each glyph of a label slanted `angle` degrees
/// upward, relative to the point where the label ends.
///
/// Glyphs stay upright; only their placement follows the slant, so the
/// last glyph ends at the anchor and earlier ones step down-left.
pub fn slanted_glyph_offsets(advances: &[u32], angle: f64) -> Vec<(i32, i32)> {
    let angle = angle.clamp(0.0, 90.0).to_radians();
    let (sin, cos) = angle.sin_cos();
    let total: u32 = advances.iter().sum();

    let mut offsets = Vec::with_capacity(advances.len());
    let mut travelled = 0u32;
    for &advance in advances {
        let back = f64::from(total - travelled);
        offsets.push(((-back * cos).round() as i32, (back * sin).round() as i32));
        travelled += advance;
    }
    offsets
}

/// Closed outline of a rectangle with rounded corners, in pixel space.
pub fn rounded_rect(left: i32, top: i32, right: i32, bottom: i32, radius: i32) -> Vec<(i32, i32)> {
    const ARC_STEPS: usize = 6;

    let radius = radius.min((right - left) / 2).min((bottom - top) / 2).max(0);
    // Corner centers in clockwise order, each with the angle its arc starts at
    let corners = [
        (right - radius, top + radius, -90.0f64),
        (right - radius, bottom - radius, 0.0),
        (left + radius, bottom - radius, 90.0),
        (left + radius, top + radius, 180.0),
    ];

    let mut outline = Vec::with_capacity(corners.len() * (ARC_STEPS + 1) + 1);
    for (cx, cy, start) in corners {
        for i in 0..=ARC_STEPS {
            let angle = (start + 90.0 * i as f64 / ARC_STEPS as f64).to_radians();
            outline.push((
                cx + (radius as f64 * angle.cos()).round() as i32,
                cy + (radius as f64 * angle.sin()).round() as i32,
            ));
        }
    }
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::YearlyCount;

    #[test]
    fn year_ticks_step_from_minimum() {
        assert_eq!(year_ticks(1990, 2004, 5), vec![1990, 1995, 2000]);
        assert_eq!(year_ticks(1990, 2005, 5), vec![1990, 1995, 2000, 2005]);
        assert_eq!(year_ticks(2019, 2019, 5), vec![2019]);
    }

    #[test]
    fn year_ticks_reject_bad_input() {
        assert!(year_ticks(2000, 1990, 5).is_empty());
        assert!(year_ticks(1990, 2000, 0).is_empty());
    }

    #[test]
    fn single_year_range_is_not_degenerate() {
        let range = x_range(2019, 2019);
        assert!(range.start < 2019.0 && range.end > 2019.0);
    }

    #[test]
    fn y_range_leaves_headroom() {
        assert_eq!(y_range(0), 0.0..1.0);
        assert_eq!(y_range(1), 0.0..2.0);
        assert_eq!(y_range(20), 0.0..23.0);
    }

    #[test]
    fn count_ticks_are_whole_and_cover_range() {
        assert_eq!(count_ticks(&(0.0..2.0)), vec![0.0, 1.0, 2.0]);

        let ticks = count_ticks(&(0.0..115.0));
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(ticks.iter().all(|t| t.fract() == 0.0 && *t <= 115.0));
        assert_eq!(ticks[1], 20.0);
    }

    #[test]
    fn slanted_label_climbs_toward_anchor() {
        let offsets = slanted_glyph_offsets(&[8, 8, 8, 8], 45.0);

        assert_eq!(offsets.len(), 4);
        assert_eq!(offsets[0], (-23, 23));
        assert_eq!(offsets[3], (-6, 6));
        // Each glyph is up and to the right of the one before
        assert!(offsets.windows(2).all(|w| w[1].0 > w[0].0 && w[1].1 < w[0].1));
    }

    #[test]
    fn flat_label_runs_along_the_axis() {
        assert_eq!(
            slanted_glyph_offsets(&[5, 7], 0.0),
            vec![(-12, 0), (-7, 0)]
        );
        assert!(slanted_glyph_offsets(&[], 45.0).is_empty());
    }

    #[test]
    fn rounded_rect_stays_inside_bounds_and_closes() {
        let outline = rounded_rect(10, 20, 110, 70, 8);

        assert_eq!(outline.first(), outline.last());
        assert!(outline
            .iter()
            .all(|&(x, y)| (10..=110).contains(&x) && (20..=70).contains(&y)));
        // Corners are cut off
        assert!(!outline.contains(&(10, 20)));
    }

    #[test]
    fn chart_data_from_stats() {
        let stats = ShowStats {
            total_shows: 3,
            total_episodes: 42,
            yearly_counts: vec![
                YearlyCount { year: 2001, shows: 1 },
                YearlyCount { year: 2003, shows: 2 },
            ],
        };
        let data = ChartData::from_stats(&stats);

        assert_eq!(data.points, vec![(2001, 1), (2003, 2)]);
        assert_eq!(data.year_bounds(), Some((2001, 2003)));
        assert_eq!(data.peak_count(), 2);
        assert_eq!(
            data.summary_lines(),
            ["Total Shows = 3".to_string(), "Total Episodes = 42".to_string()]
        );
    }

    #[test]
    fn empty_chart_data_has_no_bounds() {
        let data = ChartData::from_stats(&ShowStats::default());
        assert!(data.is_empty());
        assert_eq!(data.year_bounds(), None);
    }
}
