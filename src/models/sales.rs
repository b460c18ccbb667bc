//! The in-memory sales table and its row view.

use arrow::array::{Array, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, SchemaRef};
use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::schema::{self, DERIVED_COLUMNS, REQUIRED_COLUMNS};

/// One sales transaction with its derived columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Sale_Date")]
    pub sale_date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Product_Category")]
    pub product_category: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Quantity_Sold")]
    pub quantity_sold: i64,
    #[serde(rename = "Unit_Cost")]
    pub unit_cost: f64,
    #[serde(rename = "Unit_Price")]
    pub unit_price: f64,
    #[serde(rename = "Sales_Amount")]
    pub sales_amount: f64,
    #[serde(rename = "Total_Cost")]
    pub total_cost: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Month")]
    pub month: NaiveDate,
}

/// Immutable table of sales records
///
/// Cloning is cheap: Arrow arrays are reference counted.
#[derive(Debug, Clone)]
pub struct SalesTable {
    batch: RecordBatch,
}

impl SalesTable {
    /// Wrap a batch after checking every required and derived column is
    /// present with its loaded type
    pub fn try_new(batch: RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        for column in Self::typed_columns() {
            let field = schema
                .field_with_name(column)
                .map_err(|_| DashboardError::MissingColumn(column.to_string()))?;
            let expected = schema::loaded_type(column);
            if field.data_type() != &expected {
                return Err(DashboardError::ColumnType {
                    column: column.to_string(),
                    expected: type_label(&expected),
                });
            }
        }
        Ok(Self { batch })
    }

    fn typed_columns() -> impl Iterator<Item = &'static str> {
        REQUIRED_COLUMNS
            .into_iter()
            .chain(DERIVED_COLUMNS)
    }

    /// The underlying record batch
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    fn column<T: Array + 'static>(&self, name: &str, expected: &'static str) -> Result<&T> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| DashboardError::ColumnType {
                column: name.to_string(),
                expected,
            })
    }

    pub fn string_column(&self, name: &str) -> Result<&StringArray> {
        self.column(name, "Utf8")
    }

    pub fn f64_column(&self, name: &str) -> Result<&Float64Array> {
        self.column(name, "Float64")
    }

    pub fn i64_column(&self, name: &str) -> Result<&Int64Array> {
        self.column(name, "Int64")
    }

    pub fn date_column(&self, name: &str) -> Result<&Date32Array> {
        self.column(name, "Date32")
    }

    /// Values of a numeric column widened to `f64`
    #[allow(clippy::cast_precision_loss)]
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        if name == schema::QUANTITY_SOLD {
            return Ok(self
                .i64_column(name)?
                .values()
                .iter()
                .map(|&q| q as f64)
                .collect());
        }
        Ok(self.f64_column(name)?.values().to_vec())
    }

    /// Distinct values of a text column in first-seen order
    pub fn distinct_values(&self, name: &str) -> Result<Vec<String>> {
        let column = self.string_column(name)?;
        let mut seen = FxHashSet::default();
        Ok(column
            .iter()
            .flatten()
            .filter(|value| seen.insert(*value))
            .map(str::to_string)
            .collect())
    }

    /// Convert the table into typed rows
    pub fn records(&self) -> Result<Vec<SaleRecord>> {
        let schema = self.batch.schema();
        let indices = Self::typed_columns()
            .map(|column| {
                schema
                    .index_of(column)
                    .map_err(|_| DashboardError::MissingColumn(column.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        let projected = self.batch.project(&indices)?;

        serde_arrow::from_record_batch::<Vec<SaleRecord>>(&projected)
            .map_err(|e| DashboardError::RowConversion(e.to_string()))
    }
}

fn type_label(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Date32 => "Date32",
        DataType::Int64 => "Int64",
        DataType::Float64 => "Float64",
        _ => "Utf8",
    }
}
