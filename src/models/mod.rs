//! Domain models for the sales dashboard
//!
//! The loaded data lives in one immutable Arrow batch wrapped by
//! [`SalesTable`]; [`SaleRecord`] is the typed row view of it.

pub mod sales;

pub use sales::{SaleRecord, SalesTable};
