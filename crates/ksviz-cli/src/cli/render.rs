use anyhow::Context;
use ksviz_core::domain::{KsvizError, KsvizResult};
use ksviz_core::modules::FigureRenderer;
use ksviz_core::modules::figure::{AxisScale, Figure, PlotPanel, StyleHint};
use plotters::chart::ChartContext;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::Path;

const CANVAS_WIDTH: u32 = 1000;
const SINGLE_PANEL_HEIGHT: u32 = 600;
const STACKED_PANEL_HEIGHT: u32 = 400;
const FONT_FAMILY: &str = "sans-serif";
const EMPHASIS_DASH: i32 = 10;
const EMPHASIS_GAP: i32 = 6;

/// Draws figures with plotters; `.svg` outputs use the SVG backend, anything
/// else the bitmap backend.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct PlottersRenderer;

impl PlottersRenderer {
    fn draw(&self, figure: &Figure, output_path: &Path) -> anyhow::Result<()> {
        let size = canvas_size(figure);
        let is_svg = output_path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_figure(&root, figure)
        } else {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_figure(&root, figure)
        }
        .with_context(|| format!("failed to draw '{}'", output_path.display()))
    }
}

impl FigureRenderer for PlottersRenderer {
    fn render(&self, figure: &Figure, output_path: &Path) -> KsvizResult<()> {
        self.draw(figure, output_path)
            .map_err(|error| KsvizError::io_system("IO.RENDER", format!("{error:#}")))
    }
}

fn canvas_size(figure: &Figure) -> (u32, u32) {
    match figure.panels.len() {
        0 | 1 => (CANVAS_WIDTH, SINGLE_PANEL_HEIGHT),
        count => (CANVAS_WIDTH, STACKED_PANEL_HEIGHT * count as u32),
    }
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = if figure.panels.len() > 1 {
        root.titled(&figure.title, (FONT_FAMILY, 28))?
    } else {
        root.clone()
    };

    let areas = body.split_evenly((figure.panels.len().max(1), 1));
    for (panel, area) in figure.panels.iter().zip(&areas) {
        draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &PlotPanel) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_range = x_range(panel.x_window);
    let mut builder = ChartBuilder::on(area);
    builder
        .caption(&panel.title, (FONT_FAMILY, 20))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70);

    match panel.y_scale {
        AxisScale::Linear => {
            let mut chart =
                builder.build_cartesian_2d(x_range, linear_y_range(panel.y_bounds()))?;
            draw_curves(&mut chart, panel)
        }
        AxisScale::Log => {
            let mut chart =
                builder.build_cartesian_2d(x_range, log_y_range(panel.y_bounds()).log_scale())?;
            draw_curves(&mut chart, panel)
        }
    }
}

fn draw_curves<'a, DB, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    panel: &PlotPanel,
) -> anyhow::Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let log_tick = |value: &f64| log_tick_label(*value);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .light_line_style(BLACK.mix(0.05));
    if panel.y_scale == AxisScale::Log {
        mesh.y_label_formatter(&log_tick);
    }
    mesh.draw()?;

    if panel.zero_line && panel.y_scale == AxisScale::Linear {
        let (x_min, x_max) = panel.x_window;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x_min, 0.0), (x_max, 0.0)],
            BLACK.mix(0.4),
        )))?;
    }

    for series in &panel.series {
        let points = panel.visible_points(series);
        if points.is_empty() {
            continue;
        }
        let style = series_style(series.style);
        let annotation = match series.style {
            StyleHint::Emphasis => chart.draw_series(DashedLineSeries::new(
                points,
                EMPHASIS_DASH,
                EMPHASIS_GAP,
                style,
            ))?,
            StyleHint::Curve { .. } => chart.draw_series(LineSeries::new(points, style))?,
        };
        if panel.show_legend {
            annotation
                .label(&series.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }
    }

    if panel.show_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

fn series_style(style: StyleHint) -> ShapeStyle {
    match style {
        StyleHint::Curve { palette_index } => Palette99::pick(palette_index).stroke_width(2),
        StyleHint::Emphasis => BLACK.stroke_width(3),
    }
}

fn log_tick_label(value: f64) -> String {
    format!("{:.0e}", value)
}

fn x_range((x_min, x_max): (f64, f64)) -> Range<f64> {
    if x_max > x_min {
        x_min..x_max
    } else {
        x_min..x_min + 1.0
    }
}

fn linear_y_range(bounds: Option<(f64, f64)>) -> Range<f64> {
    let Some((low, high)) = bounds else {
        return -1.0..1.0;
    };
    let span = high - low;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        low.abs().max(1.0) * 0.1
    };
    (low - pad)..(high + pad)
}

fn log_y_range(bounds: Option<(f64, f64)>) -> Range<f64> {
    match bounds {
        Some((low, high)) if high > low => (low * 0.5)..(high * 2.0),
        Some((low, _)) => (low / 10.0)..(low * 10.0),
        None => 1.0e-6..1.0,
    }
}
