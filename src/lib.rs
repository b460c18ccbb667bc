//! Sales data analysis dashboard: CSV loading with derived columns,
//! region/category filtering, aggregations and a local web UI.

pub mod aggregate;
pub mod cache;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod schema;
pub mod server;
pub mod utils;

// Core types
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use models::{SaleRecord, SalesTable};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Pipeline stages
pub use aggregate::DashboardAggregates;
pub use cache::DatasetCache;
pub use charts::{ChartData, ChartKind, ChartSpec, PlotlyRenderer, Renderer};
pub use dashboard::{DashboardView, Metric, build_dashboard};
pub use filter::{FilterOutcome, Selection, apply_selection};
pub use loader::load_sales_csv;
