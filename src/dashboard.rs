//! Presentation stage: metric cards and rendered charts for one selection

use serde::Serialize;
use serde_json::Value;

use crate::aggregate::DashboardAggregates;
use crate::charts::{ChartData, ChartKind, ChartSpec, PlotlyRenderer, Renderer, Series};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::{FilterOutcome, Selection, apply_selection};
use crate::models::SalesTable;
use crate::schema::{PROFIT, QUANTITY_SOLD, REVENUE, SALES_AMOUNT};
use crate::utils::{format_count, format_currency};

/// Warning shown when a selection matches no rows
pub const EMPTY_SELECTION_WARNING: &str = "No data available for selected filters.";

/// A headline number with its display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// A chart description with the figure the renderer produced for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    #[serde(flatten)]
    pub spec: ChartSpec,
    pub figure: Value,
}

/// Everything the page shows for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    /// The selection matched nothing
    Empty { warning: String },
    Ready {
        metrics: Vec<Metric>,
        charts: Vec<RenderedChart>,
    },
}

impl DashboardView {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    #[must_use]
    pub fn metric(&self, label: &str) -> Option<&Metric> {
        match self {
            Self::Ready { metrics, .. } => metrics.iter().find(|m| m.label == label),
            Self::Empty { .. } => None,
        }
    }

    #[must_use]
    pub fn chart(&self, id: &str) -> Option<&RenderedChart> {
        match self {
            Self::Ready { charts, .. } => charts.iter().find(|c| c.spec.id == id),
            Self::Empty { .. } => None,
        }
    }
}

/// Filter, aggregate and render the dashboard for `selection`
pub fn build_dashboard(
    table: &SalesTable,
    selection: &Selection,
    config: &DashboardConfig,
) -> Result<DashboardView> {
    build_dashboard_with(table, selection, config, &PlotlyRenderer::default())
}

/// [`build_dashboard`] with a caller-supplied renderer
pub fn build_dashboard_with<R>(
    table: &SalesTable,
    selection: &Selection,
    config: &DashboardConfig,
    renderer: &R,
) -> Result<DashboardView>
where
    R: Renderer<Output = Value>,
{
    let filtered = match apply_selection(table, selection)? {
        FilterOutcome::Rows(filtered) => filtered,
        FilterOutcome::Empty => {
            return Ok(DashboardView::Empty {
                warning: EMPTY_SELECTION_WARNING.to_string(),
            });
        }
    };

    let aggregates =
        DashboardAggregates::compute(&filtered, config.top_products, config.histogram_bins)?;

    let charts = chart_panels(&aggregates)
        .into_iter()
        .map(|(spec, data)| {
            let figure = renderer.render(&spec, &data)?;
            Ok(RenderedChart { spec, figure })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DashboardView::Ready {
        metrics: metrics(&aggregates, config),
        charts,
    })
}

/// Metric cards in display order
#[must_use]
pub fn metrics(aggregates: &DashboardAggregates, config: &DashboardConfig) -> Vec<Metric> {
    let totals = &aggregates.totals;
    let mut cards = vec![Metric::new("Total Sales", format_currency(totals.sales))];
    if config.show_profit_metric {
        cards.push(Metric::new("Total Profit", format_currency(totals.profit)));
    }
    cards.push(Metric::new(
        "Total Quantity Sold",
        format_count(totals.quantity),
    ));
    cards
}

/// Chart descriptions and their data, in display order
#[must_use]
pub fn chart_panels(aggregates: &DashboardAggregates) -> Vec<(ChartSpec, ChartData)> {
    let a = aggregates;
    vec![
        (
            ChartSpec {
                id: "monthly-trend",
                heading: "Monthly Sales & Profit Trend",
                title: Some("Monthly Trend"),
                kind: ChartKind::Line,
                x_label: "Month",
                y_label: "value",
            },
            ChartData::TimeSeries {
                dates: a.monthly.iter().map(|p| p.month).collect(),
                series: vec![
                    Series {
                        name: SALES_AMOUNT.to_string(),
                        values: a.monthly.iter().map(|p| p.sales).collect(),
                    },
                    Series {
                        name: PROFIT.to_string(),
                        values: a.monthly.iter().map(|p| p.profit).collect(),
                    },
                ],
            },
        ),
        (
            ChartSpec {
                id: "category-revenue",
                heading: "Revenue by Product Category",
                title: None,
                kind: ChartKind::Bar,
                x_label: "Product_Category",
                y_label: REVENUE,
            },
            ChartData::Categorical {
                labels: a.categories.iter().map(|c| c.label.clone()).collect(),
                values: a.categories.iter().map(|c| c.revenue).collect(),
            },
        ),
        (
            ChartSpec {
                id: "region-share",
                heading: "Region-wise Sales Share",
                title: None,
                kind: ChartKind::Donut,
                x_label: "Region",
                y_label: REVENUE,
            },
            ChartData::Categorical {
                labels: a.regions.iter().map(|r| r.label.clone()).collect(),
                values: a.regions.iter().map(|r| r.revenue).collect(),
            },
        ),
        (
            ChartSpec {
                id: "top-products",
                heading: "Top 5 Products by Revenue",
                title: None,
                kind: ChartKind::Bar,
                x_label: "Product_ID",
                y_label: REVENUE,
            },
            ChartData::Categorical {
                labels: a.top_products.iter().map(|p| p.label.clone()).collect(),
                values: a.top_products.iter().map(|p| p.revenue).collect(),
            },
        ),
        (
            ChartSpec {
                id: "correlation",
                heading: "Correlation Matrix",
                title: Some("Correlation Heatmap"),
                kind: ChartKind::Heatmap,
                x_label: "",
                y_label: "",
            },
            ChartData::Matrix(a.correlation.clone()),
        ),
        (
            ChartSpec {
                id: "revenue-distribution",
                heading: "Revenue Distribution (Histogram)",
                title: Some("Revenue Distribution"),
                kind: ChartKind::Histogram,
                x_label: REVENUE,
                y_label: "count",
            },
            ChartData::Bins(a.revenue_histogram.clone()),
        ),
        (
            ChartSpec {
                id: "units-vs-revenue",
                heading: "Units Sold vs Revenue (Scatter Plot)",
                title: Some("Scatter Plot of Units Sold vs Revenue"),
                kind: ChartKind::Scatter,
                x_label: QUANTITY_SOLD,
                y_label: REVENUE,
            },
            ChartData::Scatter {
                x: a.scatter.x.clone(),
                y: a.scatter.y.clone(),
                fit: a.scatter.fit,
            },
        ),
        (
            ChartSpec {
                id: "daily-revenue",
                heading: "Daily Revenue Trend",
                title: Some("Daily Revenue Trend"),
                kind: ChartKind::Line,
                x_label: "Date",
                y_label: REVENUE,
            },
            ChartData::TimeSeries {
                dates: a.daily.iter().map(|d| d.date).collect(),
                series: vec![Series {
                    name: REVENUE.to_string(),
                    values: a.daily.iter().map(|d| d.revenue).collect(),
                }],
            },
        ),
    ]
}
