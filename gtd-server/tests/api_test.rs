//! HTTP tests for the dashboard API.
//!
//! Each test builds the router over the sample export and drives it with
//! `oneshot`, without binding a socket.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use gtd_charts::JitterConfig;
use gtd_db::Database;
use clap::Parser;
use gtd_server::config::{Cli, ServerConfig};
use gtd_server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const SAMPLE_CSV: &str = include_str!("../../fixtures/gtd_sample.csv");

fn app() -> Router {
    let db = Database::from_csv_str(SAMPLE_CSV).unwrap();
    router(AppState::new(db, JitterConfig::disabled()).unwrap())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn post_callback(output: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/callback/{}", output))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_country_by_year_for_iraq() {
    let (status, body) = send(
        app(),
        post_callback(
            "country_by_year",
            json!({ "countries": ["Iraq"], "years_1": [2014, 2015] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let figure: Value = serde_json::from_slice(&body).unwrap();
    let data = figure["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["type"], "bar");
    assert_eq!(data[0]["name"], "Iraq");
    assert_eq!(data[0]["x"], json!([2014, 2015]));
    assert_eq!(data[0]["y"], json!([3, 2]));
    assert_eq!(
        figure["layout"]["title"]["text"],
        "Yearly Terrorist Attacks Iraq  2014 - 2015"
    );
}

#[tokio::test]
async fn test_empty_selection_has_no_series() {
    for output in [
        "map",
        "country_by_year",
        "country_attacks",
        "country_deaths",
        "g_name",
        "deaths",
    ] {
        let (status, body) = send(
            app(),
            post_callback(output, json!({ "countries": [], "years_1": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", output);
        let figure: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(figure["data"], json!([]), "{}", output);
    }
}

#[tokio::test]
async fn test_empty_body_is_accepted() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/callback/deaths")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    let figure: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(figure["data"], json!([]));
}

#[tokio::test]
async fn test_deadliest_countries() {
    let (status, body) = send(app(), post_callback("deaths", json!({ "years_2": [2014, 2015] }))).await;
    assert_eq!(status, StatusCode::OK);
    let figure: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(figure["data"][0]["y"][0], "Nigeria");
    assert_eq!(figure["data"][0]["x"][0], 150.0);
    assert_eq!(
        figure["layout"]["title"]["text"],
        "Top 15 Countries by Deaths during 2014 - 2015"
    );
}

#[tokio::test]
async fn test_unknown_output_is_not_found() {
    let (status, body) = send(app(), post_callback("histogram", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("histogram"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/callback/map")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn test_layout_endpoint() {
    let (status, body) = send(app(), get("/api/layout")).await;
    assert_eq!(status, StatusCode::OK);
    let layout: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(layout["bounds"], json!({ "min": 1983, "max": 2017 }));
    assert_eq!(layout["years_1"]["value"], json!([2010, 2017]));
    assert_eq!(layout["years_2"]["value"], json!([2012, 2017]));
    assert_eq!(layout["countries"].as_array().unwrap().len(), 5);
    assert_eq!(
        layout["dependencies"][0],
        json!({ "output": "map", "inputs": ["countries", "years_1"] })
    );
    assert_eq!(
        layout["triggers"][2],
        json!({ "input": "years_2", "outputs": ["country_attacks", "deaths"] })
    );
}

#[tokio::test]
async fn test_health_reports_incident_count() {
    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health, json!({ "status": "ok", "incidents": 15 }));
}

#[tokio::test]
async fn test_index_serves_page() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Global Terrorist Attack Data Visualization Dashboard"));
    assert!(html.contains("Global Terrorism Data from 1983 till 2017"));
}

#[tokio::test]
async fn test_dashboard_script_is_served() {
    let response = app().oneshot(get("/assets/dashboard.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("application/javascript"));
}

#[tokio::test]
async fn test_serve_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        data: dir.path().join("missing.csv"),
        host: "127.0.0.1".to_string(),
        port: 0,
        jitter: JitterConfig::disabled(),
    };
    let err = gtd_server::serve(config).await.unwrap_err();
    assert!(format!("{:#}", err).contains("missing.csv"));
}

#[tokio::test]
async fn test_run_fails_without_data_path() {
    let cli = Cli::try_parse_from(["gtd-server", "--port", "0"]).unwrap();
    let err = gtd_server::run(cli, None).await.unwrap_err();
    assert!(err.to_string().contains("--data"));
}

#[tokio::test]
async fn test_run_reports_load_failure_for_env_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("from-env.csv");
    let cli = Cli::try_parse_from(["gtd-server", "--port", "0"]).unwrap();
    let err = gtd_server::run(cli, Some(missing.into_os_string()))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("from-env.csv"));
}
