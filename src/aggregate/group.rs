//! Group-by reductions over a filtered table
//!
//! Groups are formed in first-seen order; each reducer then applies its own
//! ordering. All sorts are stable, so equal totals keep first-seen order.

use std::hash::Hash;

use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;
use crate::schema::{
    self, MONTH, PRODUCT_CATEGORY, PRODUCT_ID, PROFIT, REGION, REVENUE, SALE_DATE, SALES_AMOUNT,
};

/// Sales and profit for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub sales: f64,
    pub profit: f64,
}

/// Revenue attributed to one label (category, region or product)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueShare {
    pub label: String,
    pub revenue: f64,
}

/// Revenue for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Sum `N` value columns per key, keeping keys in first-seen order
fn sum_by_key<K, I, const N: usize>(keys: I, values: [&[f64]; N]) -> Vec<(K, [f64; N])>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<(K, [f64; N])> = Vec::new();

    for (row, key) in keys.into_iter().enumerate() {
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, [0.0; N]));
            groups.len() - 1
        });
        for (total, column) in groups[slot].1.iter_mut().zip(values) {
            *total += column[row];
        }
    }

    groups
}

fn revenue_by_label(table: &SalesTable, column: &str) -> Result<Vec<RevenueShare>> {
    let labels = table.string_column(column)?;
    let revenue = table.f64_column(REVENUE)?;

    Ok(sum_by_key(labels.iter().map(Option::unwrap_or_default), [&revenue.values()[..]])
        .into_iter()
        .map(|(label, [revenue])| RevenueShare {
            label: label.to_string(),
            revenue,
        })
        .collect())
}

/// Sales and profit per month, ordered by month
pub fn monthly_trend(table: &SalesTable) -> Result<Vec<MonthlyPoint>> {
    let months = table.date_column(MONTH)?;
    let sales = table.f64_column(SALES_AMOUNT)?;
    let profit = table.f64_column(PROFIT)?;

    Ok(sum_by_key(
        months.values().iter().copied(),
        [&sales.values()[..], &profit.values()[..]],
    )
    .into_iter()
    .sorted_by_key(|(month, _)| *month)
    .map(|(month, [sales, profit])| MonthlyPoint {
        month: schema::naive_from_date32(month),
        sales,
        profit,
    })
    .collect())
}

/// Revenue per product category, smallest first
pub fn category_revenue(table: &SalesTable) -> Result<Vec<RevenueShare>> {
    Ok(revenue_by_label(table, PRODUCT_CATEGORY)?
        .into_iter()
        .sorted_by(|a, b| a.revenue.total_cmp(&b.revenue))
        .collect())
}

/// Revenue per region, in first-seen order
pub fn region_revenue(table: &SalesTable) -> Result<Vec<RevenueShare>> {
    revenue_by_label(table, REGION)
}

/// The `n` products with the highest revenue, largest first
///
/// Products with equal revenue keep the order they first appear in the table.
pub fn top_products(table: &SalesTable, n: usize) -> Result<Vec<RevenueShare>> {
    Ok(revenue_by_label(table, PRODUCT_ID)?
        .into_iter()
        .sorted_by(|a, b| b.revenue.total_cmp(&a.revenue))
        .take(n)
        .collect())
}

/// Revenue per calendar day, ordered by date
pub fn daily_revenue(table: &SalesTable) -> Result<Vec<DailyRevenue>> {
    let dates = table.date_column(SALE_DATE)?;
    let revenue = table.f64_column(REVENUE)?;

    Ok(sum_by_key(dates.values().iter().copied(), [&revenue.values()[..]])
        .into_iter()
        .sorted_by_key(|(date, _)| *date)
        .map(|(date, [revenue])| DailyRevenue {
            date: schema::naive_from_date32(date),
            revenue,
        })
        .collect())
}
