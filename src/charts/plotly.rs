//! Plotly figure JSON
//!
//! Output is a `{ "data": [...], "layout": {...} }` object ready for
//! `Plotly.newPlot`.

use itertools::Itertools;
use serde_json::{Value, json};

use super::{ChartData, ChartKind, ChartSpec, Renderer, Series};
use crate::aggregate::{CorrelationMatrix, HistogramBin, LinearFit};
use crate::error::{DashboardError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders charts as Plotly figure JSON
#[derive(Debug, Clone, Copy)]
pub struct PlotlyRenderer {
    /// Hole size for donut charts, as a fraction of the radius
    pub donut_hole: f64,
}

impl Default for PlotlyRenderer {
    fn default() -> Self {
        Self { donut_hole: 0.3 }
    }
}

impl Renderer for PlotlyRenderer {
    type Output = Value;

    fn render(&self, spec: &ChartSpec, data: &ChartData) -> Result<Value> {
        let traces = match (spec.kind, data) {
            (ChartKind::Line, ChartData::TimeSeries { dates, series }) => {
                let x: Vec<String> = dates
                    .iter()
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .collect();
                series.iter().map(|s| line_trace(&x, s)).collect()
            }
            (ChartKind::Bar, ChartData::Categorical { labels, values }) => {
                vec![json!({ "type": "bar", "x": labels, "y": values })]
            }
            (ChartKind::Donut, ChartData::Categorical { labels, values }) => vec![json!({
                "type": "pie",
                "labels": labels,
                "values": values,
                "hole": self.donut_hole,
            })],
            (ChartKind::Heatmap, ChartData::Matrix(matrix)) => vec![heatmap_trace(matrix)],
            (ChartKind::Histogram, ChartData::Bins(bins)) => vec![histogram_trace(bins)],
            (ChartKind::Scatter, ChartData::Scatter { x, y, fit }) => scatter_traces(x, y, *fit),
            (kind, _) => {
                return Err(DashboardError::Render {
                    chart: spec.id.to_string(),
                    reason: format!("{kind:?} chart cannot draw this data"),
                });
            }
        };

        Ok(json!({
            "data": traces,
            "layout": layout(spec),
        }))
    }
}

fn layout(spec: &ChartSpec) -> Value {
    let mut layout = json!({
        "xaxis": { "title": { "text": spec.x_label } },
        "yaxis": { "title": { "text": spec.y_label } },
        "margin": { "t": 48, "r": 16, "b": 48, "l": 56 },
    });
    if let Some(title) = spec.title {
        layout["title"] = json!({ "text": title });
    }
    if spec.kind == ChartKind::Histogram {
        layout["bargap"] = json!(0);
    }
    layout
}

fn line_trace(x: &[String], series: &Series) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": series.name,
        "x": x,
        "y": series.values,
    })
}

fn heatmap_trace(matrix: &CorrelationMatrix) -> Value {
    // Undefined coefficients become null cells with blank annotations
    let text: Vec<Vec<String>> = matrix
        .values
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| v.map_or_else(String::new, |v| format!("{v:.2}")))
                .collect()
        })
        .collect();

    json!({
        "type": "heatmap",
        "x": matrix.columns,
        "y": matrix.columns,
        "z": matrix.values,
        "text": text,
        "texttemplate": "%{text}",
        "zmin": -1.0,
        "zmax": 1.0,
        "colorscale": "RdBu",
        "reversescale": true,
    })
}

fn histogram_trace(bins: &[HistogramBin]) -> Value {
    let centers: Vec<f64> = bins.iter().map(|b| (b.start + b.end) / 2.0).collect();
    let widths: Vec<f64> = bins.iter().map(|b| b.end - b.start).collect();
    let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
    let ranges: Vec<[f64; 2]> = bins.iter().map(|b| [b.start, b.end]).collect();

    json!({
        "type": "bar",
        "x": centers,
        "y": counts,
        "width": widths,
        "customdata": ranges,
        "hovertemplate": "%{customdata[0]:.2f} to %{customdata[1]:.2f}: %{y}<extra></extra>",
    })
}

fn scatter_traces(x: &[f64], y: &[f64], fit: Option<LinearFit>) -> Vec<Value> {
    let mut traces = vec![json!({
        "type": "scatter",
        "mode": "markers",
        "name": "Sales",
        "x": x,
        "y": y,
    })];

    if let (Some(fit), itertools::MinMaxResult::MinMax(lo, hi)) =
        (fit, x.iter().copied().minmax_by(f64::total_cmp))
    {
        traces.push(json!({
            "type": "scatter",
            "mode": "lines",
            "name": format!("OLS trendline (R² = {:.3})", fit.r_squared),
            "x": [lo, hi],
            "y": [fit.predict(lo), fit.predict(hi)],
        }));
    }
    traces
}
