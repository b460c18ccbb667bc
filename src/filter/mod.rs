//! Region and category filtering of the sales table
//!
//! A [`Selection`] is the pair of label lists chosen in the sidebar.
//! [`apply_selection`] narrows a [`SalesTable`] to the matching rows and
//! reports an empty result as [`FilterOutcome::Empty`] so the caller can stop
//! before aggregating.

pub mod core;
pub mod set;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use self::core::{AndFilter, BatchFilter, IncludeAllFilter, filter_record_batch};
pub use self::set::ValueSetFilter;

use crate::error::Result;
use crate::models::SalesTable;
use crate::schema::{PRODUCT_CATEGORY, REGION};

/// Regions and product categories to keep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Selection {
    #[must_use]
    pub fn new<R, C>(regions: R, categories: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Every region and category present in `table`, in first-seen order
    pub fn all(table: &SalesTable) -> Result<Self> {
        Ok(Self {
            regions: table.distinct_values(REGION)?,
            categories: table.distinct_values(PRODUCT_CATEGORY)?,
        })
    }

    /// The conjunction of the region and category membership filters
    #[must_use]
    pub fn to_filter(&self) -> AndFilter {
        AndFilter::new(vec![
            Arc::new(ValueSetFilter::new(REGION, self.regions.iter().cloned())),
            Arc::new(ValueSetFilter::new(
                PRODUCT_CATEGORY,
                self.categories.iter().cloned(),
            )),
        ])
    }
}

/// Result of applying a selection
#[derive(Debug, Clone)]
pub enum FilterOutcome {
    /// At least one row matched
    Rows(SalesTable),
    /// No row matched; later stages are skipped
    Empty,
}

impl FilterOutcome {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The filtered table, if any row matched
    #[must_use]
    pub fn into_rows(self) -> Option<SalesTable> {
        match self {
            Self::Rows(table) => Some(table),
            Self::Empty => None,
        }
    }
}

/// Restrict `table` to rows whose region and category are both selected
///
/// The source table is never modified; row order is preserved.
pub fn apply_selection(table: &SalesTable, selection: &Selection) -> Result<FilterOutcome> {
    let filtered = selection.to_filter().filter(table.batch())?;

    if filtered.num_rows() == 0 {
        log::info!(
            "No records matched {} regions and {} categories",
            selection.regions.len(),
            selection.categories.len()
        );
        return Ok(FilterOutcome::Empty);
    }

    log::debug!(
        "Filter kept {} of {} rows",
        filtered.num_rows(),
        table.num_rows()
    );
    Ok(FilterOutcome::Rows(SalesTable::try_new(filtered)?))
}
