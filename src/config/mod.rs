//! Configuration for the sales dashboard.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::schema::dates::DateFormatConfig;

/// File the dashboard reads, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "sales_data.csv";

/// Configuration for loading, aggregating and serving the dashboard
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Path of the sales CSV
    pub data_path: PathBuf,
    /// Address the web server binds to
    pub bind_addr: SocketAddr,
    /// Rows per batch for the CSV reader
    pub batch_size: usize,
    /// Number of equal-width bins in the revenue histogram
    pub histogram_bins: usize,
    /// How many products the top-products chart shows
    pub top_products: usize,
    /// Show the "Total Profit" metric card (hidden by default)
    pub show_profit_metric: bool,
    /// Date format configuration for parsing `Sale_Date`
    pub date_format_config: DateFormatConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8501)),
            batch_size: 8192,
            histogram_bins: 40,
            top_products: 5,
            show_profit_metric: false,
            date_format_config: DateFormatConfig::default(),
        }
    }
}
