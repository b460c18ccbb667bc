//! Chart descriptions and the renderer seam
//!
//! The dashboard describes each chart as a [`ChartSpec`] plus the
//! [`ChartData`] it shows. A [`Renderer`] turns that pair into whatever the
//! plotting toolkit consumes.

pub mod plotly;

use chrono::NaiveDate;
use serde::Serialize;

pub use plotly::PlotlyRenderer;

use crate::aggregate::{CorrelationMatrix, HistogramBin, LinearFit};
use crate::error::Result;

/// Visual form of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Donut,
    Heatmap,
    Histogram,
    Scatter,
}

/// What a chart is, independent of its data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Stable identifier used as the DOM id in the page
    pub id: &'static str,
    /// Section heading shown above the chart
    pub heading: &'static str,
    /// Title drawn inside the figure, if any
    pub title: Option<&'static str>,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

/// A named y-series sharing the chart's x values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Data behind one chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// One or more series over a date axis
    TimeSeries {
        dates: Vec<NaiveDate>,
        series: Vec<Series>,
    },
    /// One value per label
    Categorical { labels: Vec<String>, values: Vec<f64> },
    Matrix(CorrelationMatrix),
    Bins(Vec<HistogramBin>),
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        fit: Option<LinearFit>,
    },
}

/// Turns a chart description and its data into toolkit output
pub trait Renderer {
    type Output;

    fn render(&self, spec: &ChartSpec, data: &ChartData) -> Result<Self::Output>;
}
