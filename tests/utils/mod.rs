use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;
use sales_dashboard::{DashboardConfig, Result, SalesTable, load_sales_csv};
use tempfile::TempDir;

/// Header row as it appears in exported sales files, with spaces
pub const HEADER: &str =
    "Sale Date,Region,Product Category,Product ID,Quantity Sold,Unit Cost,Unit Price,Sales Amount";

/// The two-row reference dataset
pub const SCENARIO_ROWS: [&str; 2] = [
    "2024-01-15,East,Tools,P1,2,5,10,20",
    "2024-01-20,West,Tools,P2,1,5,12,12",
];

pub const REGIONS: [&str; 4] = ["East", "West", "North", "South"];
pub const CATEGORIES: [&str; 3] = ["Tools", "Garden", "Kitchen"];

/// A temporary directory holding one sales CSV
pub struct Fixture {
    // Held so the directory outlives the test
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    #[must_use]
    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            data_path: self.path.clone(),
            ..Default::default()
        }
    }

    pub fn load(&self) -> Result<SalesTable> {
        load_sales_csv(&self.path, &self.config())
    }
}

/// Write `header` and `rows` to `sales_data.csv` in a fresh temp directory
pub fn write_csv(header: &str, rows: &[&str]) -> Fixture {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("sales_data.csv");
    write_lines(&path, header, rows.iter().map(|r| (*r).to_string()));
    Fixture { _dir: dir, path }
}

/// Overwrite an existing CSV in place
pub fn write_lines(path: &Path, header: &str, rows: impl IntoIterator<Item = String>) {
    let mut file = std::fs::File::create(path).expect("create csv");
    writeln!(file, "{header}").expect("write header");
    for row in rows {
        writeln!(file, "{row}").expect("write row");
    }
}

pub fn scenario_fixture() -> Fixture {
    write_csv(HEADER, &SCENARIO_ROWS)
}

/// `n` random rows over a fixed set of regions, categories and products
pub fn random_rows(rng: &mut impl Rng, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| {
            let quantity: i64 = rng.random_range(1..=20);
            let unit_cost: f64 = f64::from(rng.random_range(100..5_000_u32)) / 100.0;
            let unit_price = unit_cost + f64::from(rng.random_range(0..3_000_u32)) / 100.0;
            let discount = f64::from(rng.random_range(0..=10_u32)) / 100.0;
            #[allow(clippy::cast_precision_loss)]
            let sales_amount = (quantity as f64 * unit_price * (1.0 - discount) * 100.0).round() / 100.0;
            format!(
                "2024-{:02}-{:02},{},{},P{},{},{:.2},{:.2},{:.2}",
                rng.random_range(1..=12_u32),
                rng.random_range(1..=28_u32),
                REGIONS.choose(rng).expect("regions"),
                CATEGORIES.choose(rng).expect("categories"),
                rng.random_range(1..=12_u32),
                quantity,
                unit_cost,
                unit_price,
                sales_amount,
            )
        })
        .collect()
}

pub fn random_fixture(rng: &mut impl Rng, n: usize) -> Fixture {
    let rows = random_rows(rng, n);
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    write_csv(HEADER, &refs)
}

/// Random subset of `values`, possibly empty
pub fn random_subset(rng: &mut impl Rng, values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|_| rng.random_bool(0.5))
        .cloned()
        .collect()
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
