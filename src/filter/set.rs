//! Membership filter over a text column

use arrow::array::{Array, BooleanArray, StringArray};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::error::{DashboardError, Result};
use crate::filter::core::BatchFilter;

/// Keeps rows whose `column` value is one of `values`
///
/// Null cells never match. An empty value set matches nothing.
#[derive(Debug, Clone)]
pub struct ValueSetFilter {
    column: String,
    values: FxHashSet<String>,
}

impl ValueSetFilter {
    #[must_use]
    pub fn new<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl BatchFilter for ValueSetFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let column = batch
            .column_by_name(&self.column)
            .ok_or_else(|| DashboardError::MissingColumn(self.column.clone()))?;
        let strings = column
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| DashboardError::ColumnType {
                column: self.column.clone(),
                expected: "Utf8",
            })?;

        Ok(strings
            .iter()
            .map(|value| Some(value.is_some_and(|v| self.values.contains(v))))
            .collect())
    }
}
