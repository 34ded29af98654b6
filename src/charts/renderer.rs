//! Static Chart Renderer
//! Draws the yearly show-count line chart to a PNG file with plotters.
//!
//! Layout:
//! 1. Bold title centered on top
//! 2. Dashed grid on every tick, behind the data
//! 3. Year ticks every few years from the first year, labels slanted
//! 4. Line with circle markers, each point labelled with its count
//! 5. Summary box (total shows / episodes) in the upper-left of the plot area

use super::plotter::{
    count_ticks, rounded_rect, slanted_glyph_offsets, x_range, y_range, year_ticks, ChartData,
};
use crate::config::ChartStyle;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);
const BOX_BORDER: RGBColor = RGBColor(120, 120, 120);
/// Grid dash and gap length in pixels.
const GRID_DASH: u32 = 6;
const GRID_GAP: u32 = 4;
const TICK_LEN: i32 = 5;
const TICK_LABEL_SIZE: u32 = 13;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No yearly counts to plot")]
    EmptyDataset,
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the chart to `path` as PNG.
    ///
    /// An empty chart is refused before any axis range is computed.
    pub fn render_png(
        data: &ChartData,
        style: &ChartStyle,
        path: &Path,
    ) -> Result<(), RenderError> {
        if data.is_empty() {
            return Err(RenderError::EmptyDataset);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        Self::draw_chart(&root, data, style).map_err(|e| RenderError::Drawing(e.to_string()))?;
        root.present().map_err(|e| RenderError::Drawing(e.to_string()))?;

        log::info!("Chart written to {}", path.display());
        Ok(())
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &ChartData,
        style: &ChartStyle,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let Some((min_year, max_year)) = data.year_bounds() else {
            return Ok(());
        };

        let x_axis = x_range(min_year, max_year);
        let y_axis = y_range(data.peak_count());
        let x_ticks: Vec<f64> = year_ticks(min_year, max_year, style.tick_step_years)
            .into_iter()
            .map(|y| y as f64)
            .collect();
        let y_ticks = count_ticks(&y_axis);

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&style.title, (FONT, 24).into_font().style(FontStyle::Bold))
            .margin(20)
            .x_label_area_size(80)
            .y_label_area_size(60)
            .build_cartesian_2d(x_axis.clone(), y_axis.clone())?;

        // Axis lines and titles only, ticks are placed by hand
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(0)
            .y_labels(0)
            .x_desc(&style.x_label)
            .y_desc(&style.y_label)
            .axis_desc_style((FONT, 16))
            .draw()?;

        // Dashed grid
        let grid = GRID_COLOR.mix(style.grid_alpha).stroke_width(1);
        chart.draw_series(x_ticks.iter().map(|&x| {
            DashedPathElement::new(
                vec![(x, y_axis.start), (x, y_axis.end)],
                GRID_DASH,
                GRID_GAP,
                grid,
            )
        }))?;
        chart.draw_series(y_ticks.iter().map(|&y| {
            DashedPathElement::new(
                vec![(x_axis.start, y), (x_axis.end, y)],
                GRID_DASH,
                GRID_GAP,
                grid,
            )
        }))?;

        let tick_style = BLACK.stroke_width(1);
        let year_label_style = TextStyle::from((FONT, TICK_LABEL_SIZE).into_font())
            .pos(Pos::new(HPos::Left, VPos::Top));
        for &x in &x_ticks {
            let (px, py) = chart.backend_coord(&(x, y_axis.start));
            root.draw(&PathElement::new(
                vec![(px, py), (px, py + TICK_LEN)],
                tick_style,
            ))?;
            Self::draw_slanted_label(
                root,
                &format!("{x:.0}"),
                (px, py + 2 * TICK_LEN),
                f64::from(style.tick_label_angle),
                &year_label_style,
            )?;
        }

        let count_label_style = TextStyle::from((FONT, TICK_LABEL_SIZE).into_font())
            .pos(Pos::new(HPos::Right, VPos::Center));
        for &y in &y_ticks {
            let (px, py) = chart.backend_coord(&(x_axis.start, y));
            root.draw(&PathElement::new(
                vec![(px - TICK_LEN, py), (px, py)],
                tick_style,
            ))?;
            root.draw(&Text::new(
                format!("{y:.0}"),
                (px - 2 * TICK_LEN, py),
                count_label_style.clone(),
            ))?;
        }

        // Line, markers, count labels
        let [r, g, b] = style.line_color;
        let line_color = RGBColor(r, g, b);
        let points: Vec<(f64, f64)> = data
            .points
            .iter()
            .map(|&(year, count)| (year as f64, count as f64))
            .collect();

        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.stroke_width(2),
        ))?;

        let label_style = TextStyle::from((FONT, style.annotation_font_size).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let radius = style.marker_radius;
        let label_offset = -(radius as i32) - 6;
        chart.draw_series(data.points.iter().map(|&(year, count)| {
            EmptyElement::at((year as f64, count as f64))
                + Circle::new((0, 0), radius, line_color.filled())
                + Text::new(count.to_string(), (0, label_offset), label_style.clone())
        }))?;

        let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
        Self::draw_summary_box(root, data, style, (x_pixels.start, y_pixels.start))?;

        Ok(())
    }

    /// Draw `label` glyph by glyph along a slant, ending at `anchor`.
    fn draw_slanted_label<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        label: &str,
        anchor: (i32, i32),
        angle: f64,
        text_style: &TextStyle,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let glyphs: Vec<String> = label.chars().map(String::from).collect();
        let mut advances = Vec::with_capacity(glyphs.len());
        for glyph in &glyphs {
            advances.push(root.estimate_text_size(glyph, text_style)?.0);
        }

        for (glyph, (dx, dy)) in glyphs.iter().zip(slanted_glyph_offsets(&advances, angle)) {
            root.draw(&Text::new(
                glyph.as_str(),
                (anchor.0 + dx, anchor.1 + dy),
                text_style.clone(),
            ))?;
        }
        Ok(())
    }

    /// Two-line totals box anchored at the top-left corner of the plot area.
    fn draw_summary_box<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &ChartData,
        style: &ChartStyle,
        plot_origin: (i32, i32),
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        const INSET: i32 = 12;
        const PAD: i32 = 6;
        const LINE_GAP: i32 = 4;

        let text_style = TextStyle::from((FONT, 14).into_font());
        let lines = data.summary_lines();

        let mut text_w = 0;
        let mut line_h = 0;
        for line in &lines {
            let (w, h) = root.estimate_text_size(line, &text_style)?;
            text_w = text_w.max(w as i32);
            line_h = line_h.max(h as i32);
        }

        let left = plot_origin.0 + INSET;
        let top = plot_origin.1 + INSET;
        let right = left + text_w + 2 * PAD;
        let bottom = top + lines.len() as i32 * (line_h + LINE_GAP) - LINE_GAP + 2 * PAD;

        let [r, g, b] = style.summary_fill;
        let outline = rounded_rect(left, top, right, bottom, PAD);
        root.draw(&Polygon::new(
            outline.clone(),
            RGBColor(r, g, b).mix(style.summary_alpha).filled(),
        ))?;
        root.draw(&PathElement::new(
            outline,
            BOX_BORDER.mix(style.summary_alpha).stroke_width(1),
        ))?;

        for (i, line) in lines.iter().enumerate() {
            let y = top + PAD + i as i32 * (line_h + LINE_GAP);
            root.draw(&Text::new(line.as_str(), (left + PAD, y), text_style.clone()))?;
        }
        Ok(())
    }
}
