//! Sales CSV loading
//!
//! Reads the file through the Arrow CSV reader with every column as text,
//! then converts the required columns to their typed representation and
//! appends the derived `Total_Cost`, `Profit`, `Revenue` and `Month` columns.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, Date32Array, Int64Array, StringArray};
use arrow::compute::kernels::numeric::{mul, sub};
use arrow::compute::{CastOptions, cast, cast_with_options, concat_batches};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::Date32Type;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, Schema};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::DashboardConfig;
use crate::error::util::safe_open_file;
use crate::error::{DashboardError, Result};
use crate::models::SalesTable;
use crate::schema::dates::month_start_date32;
use crate::schema::{
    self, DECIMAL_COLUMNS, DERIVED_COLUMNS, DateFormatConfig, MONTH, PROFIT, QUANTITY_SOLD,
    REQUIRED_COLUMNS, REVENUE, SALE_DATE, SALES_AMOUNT, TOTAL_COST, UNIT_COST, UNIT_PRICE,
};
use crate::utils::{log_operation_complete, log_operation_start};

/// Load the sales CSV at `path` into a [`SalesTable`]
///
/// # Errors
/// `MissingInputFile` when the file does not exist; any malformed header,
/// missing value, bad number or bad date fails the whole load.
pub fn load_sales_csv(path: &Path, config: &DashboardConfig) -> Result<SalesTable> {
    let start = Instant::now();
    log_operation_start("Loading sales data from", path);

    let mut file = safe_open_file(path, "sales data")?;
    let headers = read_normalized_headers(&mut file)?;
    file.rewind()
        .map_err(|e| DashboardError::io("Failed to rewind sales file", e))?;

    let raw_schema = schema::raw_text_schema(&headers);
    let reader = ReaderBuilder::new(raw_schema.clone())
        .with_header(true)
        .with_batch_size(config.batch_size)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    let raw = concat_batches(&raw_schema, &batches)?;
    log::debug!(
        "Read {} raw rows in {} batches with columns {:?}",
        raw.num_rows(),
        batches.len(),
        headers
    );

    let table = derive_columns(&raw, &config.date_format_config)?;
    log_operation_complete("loaded", path, table.num_rows(), Some(start.elapsed()));
    Ok(table)
}

/// Read the header row and return its normalized column names
fn read_normalized_headers(file: &mut std::fs::File) -> Result<Vec<String>> {
    let (header_schema, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut *file, Some(0))?;

    let mut seen = FxHashSet::default();
    let mut names = Vec::with_capacity(header_schema.fields().len());
    for field in header_schema.fields() {
        let name = schema::normalize_column_name(field.name());
        if !seen.insert(name.clone()) {
            return Err(DashboardError::DuplicateColumn(name));
        }
        names.push(name);
    }

    for required in REQUIRED_COLUMNS {
        if !seen.contains(required) {
            return Err(DashboardError::MissingColumn(required.to_string()));
        }
    }

    Ok(names)
}

/// Turn an all-text batch into the typed table with derived columns
///
/// Column order is kept; derived columns are appended at the end.
pub fn derive_columns(raw: &RecordBatch, date_config: &DateFormatConfig) -> Result<SalesTable> {
    let raw_schema = raw.schema();

    for column in REQUIRED_COLUMNS {
        let array = raw
            .column_by_name(column)
            .ok_or_else(|| DashboardError::MissingColumn(column.to_string()))?;
        ensure_no_nulls(column, array.as_ref())?;
    }

    let sale_dates = parse_sale_dates(text_column(raw, SALE_DATE)?, date_config)?;
    let quantity = parse_quantity(raw)?;

    let mut typed: FxHashMap<&str, ArrayRef> = FxHashMap::default();
    for column in DECIMAL_COLUMNS {
        typed.insert(column, parse_decimal(raw, column)?);
    }

    let quantity_f64 = cast(&quantity, &DataType::Float64)?;
    let total_cost = mul(&typed[UNIT_COST], &quantity_f64)?;
    let profit = sub(&typed[SALES_AMOUNT], &total_cost)?;
    let revenue = mul(&quantity_f64, &typed[UNIT_PRICE])?;
    let month: ArrayRef = Arc::new(sale_dates.unary::<_, Date32Type>(month_start_date32));

    typed.insert(SALE_DATE, Arc::new(sale_dates));
    typed.insert(QUANTITY_SOLD, quantity);

    let mut fields: Vec<Field> = Vec::with_capacity(raw_schema.fields().len() + 4);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(raw_schema.fields().len() + 4);
    for (field, raw_column) in raw_schema.fields().iter().zip(raw.columns()) {
        let name = field.name().as_str();
        if DERIVED_COLUMNS.contains(&name) {
            log::warn!("Input column '{name}' is replaced by the computed value");
            continue;
        }
        fields.push(schema::loaded_field(name));
        columns.push(typed.get(name).unwrap_or(raw_column).clone());
    }
    for (name, column) in [
        (TOTAL_COST, total_cost),
        (PROFIT, profit),
        (REVENUE, revenue),
        (MONTH, month),
    ] {
        fields.push(schema::loaded_field(name));
        columns.push(column);
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    SalesTable::try_new(batch)
}

fn text_column<'a>(raw: &'a RecordBatch, column: &str) -> Result<&'a StringArray> {
    raw.column_by_name(column)
        .ok_or_else(|| DashboardError::MissingColumn(column.to_string()))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| DashboardError::ColumnType {
            column: column.to_string(),
            expected: "Utf8",
        })
}

fn ensure_no_nulls(column: &str, array: &dyn Array) -> Result<()> {
    if array.null_count() == 0 {
        return Ok(());
    }
    let row = (0..array.len()).find(|&i| array.is_null(i)).unwrap_or(0);
    Err(DashboardError::MissingValue {
        column: column.to_string(),
        row,
    })
}

/// Parse `Sale_Date` with one format for the whole column
///
/// The format is the one that parses the first cell; any later cell it
/// rejects fails the load.
fn parse_sale_dates(values: &StringArray, config: &DateFormatConfig) -> Result<Date32Array> {
    let Some(first) = values.iter().flatten().next() else {
        return Ok(Date32Array::from(Vec::<i32>::new()));
    };
    let format = schema::infer_column_format(first, config).ok_or_else(|| {
        DashboardError::InvalidDate {
            row: 0,
            value: first.to_string(),
        }
    })?;
    log::debug!("Parsing {SALE_DATE} with {format:?}");

    let days = values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            let value = value.unwrap_or_default();
            format
                .parse(value)
                .map(schema::date32_from_naive)
                .ok_or_else(|| DashboardError::InvalidDate {
                    row,
                    value: value.to_string(),
                })
        })
        .collect::<Result<Vec<i32>>>()?;
    Ok(Date32Array::from(days))
}

fn strict_cast(raw: &RecordBatch, column: &str, to: &DataType) -> Result<ArrayRef> {
    let options = CastOptions {
        safe: false,
        ..CastOptions::default()
    };
    cast_with_options(text_column(raw, column)?, to, &options).map_err(|source| {
        DashboardError::InvalidNumber {
            column: column.to_string(),
            source,
        }
    })
}

fn parse_decimal(raw: &RecordBatch, column: &str) -> Result<ArrayRef> {
    strict_cast(raw, column, &DataType::Float64)
}

fn parse_quantity(raw: &RecordBatch) -> Result<ArrayRef> {
    let quantity = strict_cast(raw, QUANTITY_SOLD, &DataType::Int64)?;
    let values = quantity
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| DashboardError::ColumnType {
            column: QUANTITY_SOLD.to_string(),
            expected: "Int64",
        })?;

    if let Some(row) = values.values().iter().position(|&q| q < 0) {
        return Err(DashboardError::InvalidValue {
            column: QUANTITY_SOLD.to_string(),
            row,
            reason: format!("quantity {} is negative", values.value(row)),
        });
    }
    Ok(quantity)
}
