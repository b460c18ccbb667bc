//! Scalar totals over a filtered table

use arrow::compute::sum;
use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;
use crate::schema::{PROFIT, QUANTITY_SOLD, SALES_AMOUNT};

/// Headline numbers for the metric cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub sales: f64,
    pub profit: f64,
    pub quantity: i64,
}

/// Sum of `Sales_Amount`
pub fn total_sales(table: &SalesTable) -> Result<f64> {
    Ok(sum(table.f64_column(SALES_AMOUNT)?).unwrap_or(0.0))
}

/// Sum of `Profit`
pub fn total_profit(table: &SalesTable) -> Result<f64> {
    Ok(sum(table.f64_column(PROFIT)?).unwrap_or(0.0))
}

/// Sum of `Quantity_Sold`
pub fn total_quantity(table: &SalesTable) -> Result<i64> {
    Ok(sum(table.i64_column(QUANTITY_SOLD)?).unwrap_or(0))
}

pub fn totals(table: &SalesTable) -> Result<Totals> {
    Ok(Totals {
        sales: total_sales(table)?,
        profit: total_profit(table)?,
        quantity: total_quantity(table)?,
    })
}
