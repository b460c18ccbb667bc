//! Aggregations over a filtered sales table
//!
//! Every function here is a pure reduction of a [`SalesTable`]; nothing is
//! cached between calls.

pub mod group;
pub mod kpi;
pub mod stats;

pub use group::{
    DailyRevenue, MonthlyPoint, RevenueShare, category_revenue, daily_revenue, monthly_trend,
    region_revenue, top_products,
};
pub use kpi::{Totals, total_profit, total_quantity, total_sales, totals};
pub use stats::{
    CorrelationMatrix, HistogramBin, LinearFit, ScatterFit, correlation_matrix, histogram,
    linear_fit, pearson, quantity_revenue_fit, revenue_histogram,
};

use crate::error::Result;
use crate::models::SalesTable;

/// Everything the dashboard draws, computed from one filtered table
#[derive(Debug, Clone)]
pub struct DashboardAggregates {
    pub totals: Totals,
    pub monthly: Vec<MonthlyPoint>,
    pub categories: Vec<RevenueShare>,
    pub regions: Vec<RevenueShare>,
    pub top_products: Vec<RevenueShare>,
    pub correlation: CorrelationMatrix,
    pub revenue_histogram: Vec<HistogramBin>,
    pub scatter: ScatterFit,
    pub daily: Vec<DailyRevenue>,
}

impl DashboardAggregates {
    pub fn compute(table: &SalesTable, top_n: usize, histogram_bins: usize) -> Result<Self> {
        Ok(Self {
            totals: totals(table)?,
            monthly: monthly_trend(table)?,
            categories: category_revenue(table)?,
            regions: region_revenue(table)?,
            top_products: top_products(table, top_n)?,
            correlation: correlation_matrix(table)?,
            revenue_histogram: revenue_histogram(table, histogram_bins)?,
            scatter: quantity_revenue_fit(table)?,
            daily: daily_revenue(table)?,
        })
    }
}
