//! Column names and Arrow schema for the sales table.

pub mod dates;

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema, SchemaRef};

pub use dates::{
    ColumnDateFormat, DateFormatConfig, date32_from_naive, infer_column_format, naive_from_date32,
    parse_date_string,
};

/// Date of the sale
pub const SALE_DATE: &str = "Sale_Date";
/// Sales region label
pub const REGION: &str = "Region";
/// Product category label
pub const PRODUCT_CATEGORY: &str = "Product_Category";
/// Product identifier
pub const PRODUCT_ID: &str = "Product_ID";
/// Units sold in the transaction
pub const QUANTITY_SOLD: &str = "Quantity_Sold";
/// Cost per unit
pub const UNIT_COST: &str = "Unit_Cost";
/// Price per unit
pub const UNIT_PRICE: &str = "Unit_Price";
/// Amount recorded for the sale
pub const SALES_AMOUNT: &str = "Sales_Amount";

/// `Unit_Cost * Quantity_Sold`
pub const TOTAL_COST: &str = "Total_Cost";
/// `Sales_Amount - Total_Cost`
pub const PROFIT: &str = "Profit";
/// `Quantity_Sold * Unit_Price`
pub const REVENUE: &str = "Revenue";
/// First day of the month of `Sale_Date`
pub const MONTH: &str = "Month";

/// Columns the input file must provide, after header normalization
pub const REQUIRED_COLUMNS: [&str; 8] = [
    SALE_DATE,
    REGION,
    PRODUCT_CATEGORY,
    PRODUCT_ID,
    QUANTITY_SOLD,
    UNIT_COST,
    UNIT_PRICE,
    SALES_AMOUNT,
];

/// Columns computed by the loader; input columns with these names are replaced
pub const DERIVED_COLUMNS: [&str; 4] = [TOTAL_COST, PROFIT, REVENUE, MONTH];

/// Decimal input columns, parsed as `Float64`
pub const DECIMAL_COLUMNS: [&str; 3] = [UNIT_COST, UNIT_PRICE, SALES_AMOUNT];

/// Columns that enter the correlation matrix, in display order
pub const CORRELATION_COLUMNS: [&str; 6] = [
    QUANTITY_SOLD,
    UNIT_COST,
    UNIT_PRICE,
    SALES_AMOUNT,
    PROFIT,
    REVENUE,
];

/// Normalize a CSV header name: trim it and replace spaces with `_`
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    // Leading byte-order mark on the first header
    name.trim_start_matches('\u{feff}').trim().replace(' ', "_")
}

/// Arrow type a column has after loading
#[must_use]
pub fn loaded_type(column: &str) -> DataType {
    match column {
        SALE_DATE | MONTH => DataType::Date32,
        QUANTITY_SOLD => DataType::Int64,
        UNIT_COST | UNIT_PRICE | SALES_AMOUNT | TOTAL_COST | PROFIT | REVENUE => DataType::Float64,
        _ => DataType::Utf8,
    }
}

/// Schema used to read the raw file: every column as nullable text
#[must_use]
pub fn raw_text_schema(normalized_names: &[String]) -> SchemaRef {
    let fields: Vec<Field> = normalized_names
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Field for a loaded column; required and derived columns are non-nullable
#[must_use]
pub fn loaded_field(column: &str) -> Field {
    let nullable = !REQUIRED_COLUMNS.contains(&column)
        && !DERIVED_COLUMNS.contains(&column);
    Field::new(column, loaded_type(column), nullable)
}
