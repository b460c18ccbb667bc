//! Core filtering functionality
//!
//! Defines the [`BatchFilter`] trait and the mask-based
//! [`filter_record_batch`] every filter goes through.

use std::fmt::Debug;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;

/// Filter a record batch based on a boolean mask
///
/// # Errors
/// Returns an error if the mask length differs from the row count or the
/// Arrow filter kernel fails.
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(ArrowError::InvalidArgumentError(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        ))
        .into());
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<std::result::Result<_, ArrowError>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: Debug {
    /// Compute which rows of `batch` pass this filter
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray>;

    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.mask(batch)?;
        filter_record_batch(batch, &mask)
    }
}

/// A filter that always includes all rows
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAllFilter;

impl BatchFilter for IncludeAllFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        Ok(BooleanArray::from(vec![true; batch.num_rows()]))
    }

    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        Ok(batch.clone())
    }
}

/// A filter that combines multiple filters with a logical AND
#[derive(Debug, Clone, Default)]
pub struct AndFilter {
    filters: Vec<Arc<dyn BatchFilter + Send + Sync>>,
}

impl AndFilter {
    /// Create a new AND filter
    #[must_use]
    pub fn new(filters: Vec<Arc<dyn BatchFilter + Send + Sync>>) -> Self {
        Self { filters }
    }
}

impl BatchFilter for AndFilter {
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        let mut combined = IncludeAllFilter.mask(batch)?;
        for filter in &self.filters {
            let mask = filter.mask(batch)?;
            combined = arrow::compute::and(&combined, &mask)?;
        }
        Ok(combined)
    }

    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mut result_batch = batch.clone();
        for filter in &self.filters {
            // Nothing left to narrow down
            if result_batch.num_rows() == 0 {
                return Ok(result_batch);
            }
            result_batch = filter.filter(&result_batch)?;
        }
        Ok(result_batch)
    }
}
