//! Statistical summaries: correlation, histogram and least-squares fit

use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;
use crate::schema::{CORRELATION_COLUMNS, QUANTITY_SOLD, REVENUE};

/// Pairwise Pearson correlation between numeric columns
///
/// `None` marks an undefined coefficient (a constant column or fewer than
/// two rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

/// One histogram bin, `[start, end)`; the last bin also includes `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Scatter points with an optional trendline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFit {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub fit: Option<LinearFit>,
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations from the mean
fn sum_sq_dev(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum()
}

/// Pearson correlation of two equal-length samples
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mean_x, mean_y) = (mean(x), mean(y));
    let ss_x = sum_sq_dev(x, mean_x);
    let ss_y = sum_sq_dev(y, mean_y);
    if ss_x == 0.0 || ss_y == 0.0 {
        return None;
    }
    let cross: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    Some((cross / (ss_x * ss_y).sqrt()).clamp(-1.0, 1.0))
}

/// Correlation between `Quantity_Sold`, `Unit_Cost`, `Unit_Price`,
/// `Sales_Amount`, `Profit` and `Revenue`
pub fn correlation_matrix(table: &SalesTable) -> Result<CorrelationMatrix> {
    let series = CORRELATION_COLUMNS
        .iter()
        .map(|column| table.numeric_values(column))
        .collect::<Result<Vec<_>>>()?;

    let n = series.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        // Self-correlation is only defined for a column that varies
        values[i][i] = pearson(&series[i], &series[i]).map(|_| 1.0);
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: CORRELATION_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        values,
    })
}

/// Equal-width histogram of `values` with `bins` bins spanning min..=max
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let Some((mut lo, mut hi)) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) else {
        return Vec::new();
    };

    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: (i as f64).mul_add(width, lo),
            end: if i + 1 == bins {
                hi
            } else {
                ((i + 1) as f64).mul_add(width, lo)
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let slot = (((v - lo) / width).floor() as usize).min(bins - 1);
        result[slot].count += 1;
    }
    result
}

/// Histogram of filtered `Revenue`
pub fn revenue_histogram(table: &SalesTable, bins: usize) -> Result<Vec<HistogramBin>> {
    Ok(histogram(&table.numeric_values(REVENUE)?, bins))
}

/// Ordinary least-squares fit of `y` on `x`
#[must_use]
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mean_x, mean_y) = (mean(x), mean(y));
    let ss_x = sum_sq_dev(x, mean_x);
    if ss_x == 0.0 {
        return None;
    }
    let cross: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    let slope = cross / ss_x;
    let intercept = slope.mul_add(-mean_x, mean_y);

    let ss_tot = sum_sq_dev(y, mean_y);
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (b - slope.mul_add(*a, intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// `Quantity_Sold` against `Revenue`, with the OLS trendline
pub fn quantity_revenue_fit(table: &SalesTable) -> Result<ScatterFit> {
    let x = table.numeric_values(QUANTITY_SOLD)?;
    let y = table.numeric_values(REVENUE)?;
    let fit = linear_fit(&x, &y);
    Ok(ScatterFit { x, y, fit })
}
