use crate::helpers::{mock_with_dataset, spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use std::sync::Arc;
use surfsup_api::db;

#[tokio::test]
async fn index_lists_available_routes() {
    let test_app = spawn_app(Arc::new(mock_with_dataset())).await;

    let (status, html) = test_app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Available routes"));
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/api/v1.0/&lt;start&gt;"));
    assert!(html.contains("/api/v1.0/&lt;start&gt;/&lt;end&gt;"));
    // Derived dataset facts are shown too
    assert!(html.contains("2017-08-23"));
    assert!(html.contains("USC00519281"));
}

#[tokio::test]
async fn docs_are_served() {
    let test_app = spawn_app(Arc::new(mock_with_dataset())).await;

    let (status, html) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("/api/v1.0/precipitation"));
}

#[tokio::test]
async fn app_state_computes_constants_once() {
    let test_app = spawn_app(Arc::new(mock_with_dataset())).await;

    assert_eq!(
        test_app.state.constants.one_year_prior_date,
        crate::helpers::ONE_YEAR_PRIOR_DATE
    );
    assert_eq!(
        test_app.state.constants.most_active_station,
        crate::helpers::MOST_ACTIVE_STATION
    );
}

#[tokio::test]
async fn empty_dataset_prevents_startup() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_most_recent_date()
        .times(1)
        .returning(|| Ok(None));
    climate_data.expect_most_active_station().never();

    let result = surfsup_api::AppState::new(
        String::from("http://127.0.0.1:5000"),
        Arc::new(climate_data),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn unreadable_dataset_prevents_startup() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_most_recent_date()
        .times(1)
        .returning(|| Err(db::Error::Integrity(String::from("malformed page"))));

    let result = surfsup_api::AppState::new(
        String::from("http://127.0.0.1:5000"),
        Arc::new(climate_data),
    )
    .await;

    assert!(result.is_err());
}
