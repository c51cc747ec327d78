use crate::domain::PlotArtifact;
use crate::numerics::{finite_bounds, positive_bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleHint {
    /// Regular curve drawn with the backend's palette colour at this index.
    Curve { palette_index: usize },
    /// Aggregate curve drawn on top of the others (black, thick, dashed).
    Emphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub r: Vec<f64>,
    pub y: Vec<f64>,
    pub style: StyleHint,
}

impl PlotSeries {
    pub fn new(label: impl Into<String>, r: &[f64], y: Vec<f64>, style: StyleHint) -> Self {
        Self {
            label: label.into(),
            r: r.to_vec(),
            y,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<PlotSeries>,
    /// Visible r range, `[0, min(cap, last r)]`.
    pub x_window: (f64, f64),
    pub y_scale: AxisScale,
    pub show_legend: bool,
    /// Draw a horizontal reference line at y = 0.
    pub zero_line: bool,
}

impl PlotPanel {
    /// Points of `series` a backend can draw on this panel: finite, inside the
    /// x window and, on a log axis, strictly positive.
    pub fn visible_points(&self, series: &PlotSeries) -> Vec<(f64, f64)> {
        let (x_min, x_max) = self.x_window;
        series
            .r
            .iter()
            .zip(&series.y)
            .map(|(r, y)| (*r, *y))
            .filter(|(r, y)| r.is_finite() && y.is_finite())
            .filter(|(r, _)| *r >= x_min && *r <= x_max)
            .filter(|(_, y)| self.y_scale == AxisScale::Linear || *y > 0.0)
            .collect()
    }

    /// Y range over every visible point of the panel.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let values = self
            .series
            .iter()
            .flat_map(|series| self.visible_points(series))
            .map(|(_, y)| y);
        match self.y_scale {
            AxisScale::Linear => finite_bounds(values),
            AxisScale::Log => positive_bounds(values),
        }
    }
}

/// Everything needed to draw one output artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub artifact: PlotArtifact,
    pub panels: Vec<PlotPanel>,
}

impl Figure {
    pub fn series_count(&self) -> usize {
        self.panels.iter().map(|panel| panel.series.len()).sum()
    }

    /// Whitespace-delimited dump of the plotted data, one block per panel.
    ///
    /// Each block starts with `# <panel title>` and a header row `r <series
    /// labels...>`; rows follow the first series' grid. Values are the raw
    /// series values, not clipped to the x window.
    pub fn to_table(&self) -> String {
        let mut table = String::new();
        for (index, panel) in self.panels.iter().enumerate() {
            if index > 0 {
                table.push('\n');
            }
            table.push_str(&format!("# {}\n", panel.title));

            let mut header = vec!["r".to_string()];
            header.extend(
                panel
                    .series
                    .iter()
                    .map(|series| series.label.replace(char::is_whitespace, "_")),
            );
            table.push_str(&header.join(" "));
            table.push('\n');

            let Some(first) = panel.series.first() else {
                continue;
            };
            for (row, r) in first.r.iter().enumerate() {
                let mut line = format_value(*r);
                for series in &panel.series {
                    line.push(' ');
                    line.push_str(&format_value(series.y.get(row).copied().unwrap_or(f64::NAN)));
                }
                table.push_str(&line);
                table.push('\n');
            }
        }
        table
    }
}

fn format_value(value: f64) -> String {
    format!("{:.10e}", value)
}
