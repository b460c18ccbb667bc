use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::Router;
use serde_json::{Value, json};
use sales_dashboard::DashboardConfig;
use sales_dashboard::server::{AppState, router};
use tower::ServiceExt;

use crate::utils::scenario_fixture;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = router(AppState::new(DashboardConfig::default()));
    let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_index_page() {
    let app = router(AppState::new(DashboardConfig::default()));
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/api/dashboard"));
    assert!(html.contains("Select Product Category"));
}

#[tokio::test]
async fn test_filter_options() {
    let fixture = scenario_fixture();
    let app = router(AppState::new(fixture.config()));
    let (status, body) = send(app, Request::get("/api/filters").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "regions": ["East", "West"], "categories": ["Tools"] }));
}

#[tokio::test]
async fn test_dashboard_ready_and_empty() {
    let fixture = scenario_fixture();
    let app = router(AppState::new(fixture.config()));

    let all = json!({ "regions": ["East", "West"], "categories": ["Tools"] });
    let (status, body) = send(app.clone(), post_json("/api/dashboard", &all)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["metrics"][0], json!({ "label": "Total Sales", "value": "$32" }));

    let north = json!({ "regions": ["North"], "categories": ["Tools"] });
    let (status, body) = send(app, post_json("/api/dashboard", &north)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "empty", "warning": "No data available for selected filters." })
    );
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        data_path: dir.path().join("sales_data.csv"),
        ..Default::default()
    };
    let app = router(AppState::new(config));

    let (status, body) = send(app, post_json("/api/dashboard", &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "'sales_data.csv' not found. Keep it in the same folder as the server."
    );
}

#[tokio::test]
async fn test_malformed_file_is_server_error() {
    let fixture = crate::utils::write_csv(crate::utils::HEADER, &["bad,East,Tools,P1,2,5,10,20"]);
    let app = router(AppState::new(fixture.config()));
    let (status, body) = send(app, Request::get("/api/filters").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Invalid date"));
}
