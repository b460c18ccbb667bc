use chrono::NaiveDate;
use sales_dashboard::schema::{MONTH, PROFIT, REVENUE, TOTAL_COST};
use sales_dashboard::{DashboardConfig, DashboardError, load_sales_csv};

use crate::utils::{HEADER, SCENARIO_ROWS, scenario_fixture, write_csv};

#[test]
fn test_scenario_rows_have_derived_columns() -> sales_dashboard::Result<()> {
    let fixture = scenario_fixture();
    let table = fixture.load()?;

    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.f64_column(TOTAL_COST)?.values().to_vec(), vec![10.0, 5.0]);
    assert_eq!(table.f64_column(PROFIT)?.values().to_vec(), vec![10.0, 7.0]);
    assert_eq!(table.f64_column(REVENUE)?.values().to_vec(), vec![20.0, 12.0]);

    let records = table.records()?;
    let january = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(records[0].sale_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(records[0].region, "East");
    assert_eq!(records[1].product_id, "P2");
    assert!(records.iter().all(|r| r.month == january));
    Ok(())
}

#[test]
fn test_headers_are_normalized() -> sales_dashboard::Result<()> {
    let fixture = write_csv(
        "\u{feff} Sale Date , Region,Product Category,Product ID,Quantity Sold,Unit Cost,Unit Price,Sales Amount,Sales Rep",
        &["2024-03-02,East,Tools,P1,3,2.5,4,12,Ann"],
    );
    let table = fixture.load()?;
    let schema = table.schema();

    assert!(schema.field_with_name("Sale_Date").is_ok());
    assert!(schema.field_with_name("Product_Category").is_ok());
    // Extra columns are carried through as text
    assert!(schema.field_with_name("Sales_Rep").is_ok());
    assert!(schema.field_with_name(MONTH).is_ok());
    Ok(())
}

#[test]
fn test_alternate_date_formats() -> sales_dashboard::Result<()> {
    let us = write_csv(
        HEADER,
        &["01/15/2024,East,Tools,P1,2,5,10,20", "02/03/2024,West,Tools,P2,1,5,12,12"],
    );
    let records = us.load()?.records()?;
    assert_eq!(records[0].sale_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(records[1].sale_date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());

    let stamped = write_csv(
        HEADER,
        &[
            "2024-01-20 13:45:00,West,Tools,P2,1,5,12,12",
            "2024-01-21 09:00:00,East,Tools,P1,2,5,10,20",
        ],
    );
    let records = stamped.load()?.records()?;
    assert_eq!(records[0].sale_date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    assert_eq!(records[1].sale_date, NaiveDate::from_ymd_opt(2024, 1, 21).unwrap());
    Ok(())
}

#[test]
fn test_mixed_day_month_order_fails_the_load() {
    // First row fixes month/day/year; the second row only parses as day/month/year
    let fixture = write_csv(
        HEADER,
        &["03/04/2024,East,Tools,P1,2,5,10,20", "25/04/2024,West,Tools,P2,1,5,12,12"],
    );
    let err = fixture.load().unwrap_err();
    assert!(matches!(
        err,
        DashboardError::InvalidDate { row: 1, ref value } if value == "25/04/2024"
    ));
}

#[test]
fn test_input_column_named_like_derived_is_replaced() -> sales_dashboard::Result<()> {
    let fixture = write_csv(
        &format!("{HEADER},Revenue,Profit"),
        &["2024-01-15,East,Tools,P1,2,5,10,20,999,-1", "2024-01-20,West,Tools,P2,1,5,12,12,0,0"],
    );
    let table = fixture.load()?;

    let schema = table.schema();
    assert_eq!(schema.fields().iter().filter(|f| f.name() == REVENUE).count(), 1);
    assert_eq!(table.f64_column(REVENUE)?.values().to_vec(), vec![20.0, 12.0]);
    assert_eq!(table.f64_column(PROFIT)?.values().to_vec(), vec![10.0, 7.0]);
    for record in table.records()? {
        #[allow(clippy::cast_precision_loss)]
        let expected = record.quantity_sold as f64 * record.unit_price;
        assert_eq!(record.revenue.to_bits(), expected.to_bits());
    }
    Ok(())
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales_data.csv");
    let err = load_sales_csv(&path, &DashboardConfig::default()).unwrap_err();
    assert!(err.is_missing_input());
}

#[test]
fn test_missing_required_column() {
    let fixture = write_csv(
        "Sale Date,Region,Product Category,Product ID,Quantity Sold,Unit Cost,Unit Price",
        &["2024-01-15,East,Tools,P1,2,5,10"],
    );
    let err = fixture.load().unwrap_err();
    assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "Sales_Amount"));
}

#[test]
fn test_duplicate_column_after_normalizing() {
    let fixture = write_csv(&format!("{HEADER},Region "), &[]);
    let err = fixture.load().unwrap_err();
    assert!(matches!(err, DashboardError::DuplicateColumn(ref c) if c == "Region"));
}

#[test]
fn test_malformed_rows_fail_the_load() {
    let cases = [
        (SCENARIO_ROWS[0].replace(",East,", ",,"), "Region"),
        (SCENARIO_ROWS[0].replace(",10,", ",ten,"), "Unit_Price"),
    ];
    for (row, column) in cases {
        let fixture = write_csv(HEADER, &[SCENARIO_ROWS[1], row.as_str()]);
        let err = fixture.load().unwrap_err();
        match err {
            DashboardError::MissingValue { column: c, row: 1 } => assert_eq!(c, column),
            DashboardError::InvalidNumber { column: c, .. } => assert_eq!(c, column),
            other => panic!("unexpected error for {column}: {other}"),
        }
    }

    let fixture = write_csv(HEADER, &["not-a-date,East,Tools,P1,2,5,10,20"]);
    assert!(matches!(
        fixture.load().unwrap_err(),
        DashboardError::InvalidDate { row: 0, .. }
    ));
}

#[test]
fn test_header_only_file_loads_empty_table() -> sales_dashboard::Result<()> {
    let fixture = write_csv(HEADER, &[]);
    let table = fixture.load()?;
    assert!(table.is_empty());
    Ok(())
}
