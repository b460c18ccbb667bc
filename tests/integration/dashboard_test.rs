use rand::SeedableRng;
use rand::rngs::StdRng;
use sales_dashboard::dashboard::EMPTY_SELECTION_WARNING;
use sales_dashboard::{
    ChartKind, DashboardConfig, DashboardView, Selection, build_dashboard,
};

use crate::utils::{random_fixture, scenario_fixture};

const CHART_ORDER: [&str; 8] = [
    "monthly-trend",
    "category-revenue",
    "region-share",
    "top-products",
    "correlation",
    "revenue-distribution",
    "units-vs-revenue",
    "daily-revenue",
];

#[test]
fn test_ready_view_for_scenario() -> sales_dashboard::Result<()> {
    let fixture = scenario_fixture();
    let table = fixture.load()?;
    let selection = Selection::all(&table)?;
    let view = build_dashboard(&table, &selection, &fixture.config())?;

    let DashboardView::Ready { metrics, charts } = &view else {
        panic!("expected a ready dashboard");
    };
    let labels: Vec<&str> = metrics.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Total Sales", "Total Quantity Sold"]);
    assert_eq!(view.metric("Total Sales").unwrap().value, "$32");
    assert_eq!(view.metric("Total Quantity Sold").unwrap().value, "3");

    let ids: Vec<&str> = charts.iter().map(|c| c.spec.id).collect();
    assert_eq!(ids, CHART_ORDER);

    let monthly = &view.chart("monthly-trend").unwrap().figure;
    assert_eq!(monthly["data"][0]["y"][0], 32.0);
    assert_eq!(monthly["data"][1]["y"][0], 17.0);

    let donut = view.chart("region-share").unwrap();
    assert_eq!(donut.spec.kind, ChartKind::Donut);
    assert_eq!(donut.figure["data"][0]["hole"], 0.3);
    Ok(())
}

#[test]
fn test_profit_metric_is_opt_in() -> sales_dashboard::Result<()> {
    let fixture = scenario_fixture();
    let table = fixture.load()?;
    let selection = Selection::all(&table)?;
    let config = DashboardConfig {
        show_profit_metric: true,
        ..fixture.config()
    };
    let view = build_dashboard(&table, &selection, &config)?;
    assert_eq!(view.metric("Total Profit").unwrap().value, "$17");
    Ok(())
}

#[test]
fn test_empty_selection_yields_warning_only() -> sales_dashboard::Result<()> {
    let fixture = scenario_fixture();
    let table = fixture.load()?;
    let view = build_dashboard(
        &table,
        &Selection::new(["North"], ["Tools"]),
        &fixture.config(),
    )?;
    assert_eq!(
        view,
        DashboardView::Empty {
            warning: EMPTY_SELECTION_WARNING.to_string()
        }
    );
    assert!(view.is_empty());
    assert!(view.chart("monthly-trend").is_none());
    Ok(())
}

#[test]
fn test_view_serializes_with_status_tag() -> sales_dashboard::Result<()> {
    let mut rng = StdRng::seed_from_u64(11);
    let fixture = random_fixture(&mut rng, 120);
    let table = fixture.load()?;
    let view = build_dashboard(&table, &Selection::all(&table)?, &fixture.config())?;

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["charts"].as_array().unwrap().len(), 8);
    assert_eq!(json["charts"][0]["heading"], "Monthly Sales & Profit Trend");
    assert_eq!(json["charts"][4]["kind"], "heatmap");
    assert_eq!(json["charts"][5]["figure"]["data"][0]["y"].as_array().unwrap().len(), 40);
    Ok(())
}
