use crate::helpers::{
    mock_with_dataset, spawn_app, MOST_ACTIVE_STATION, MOST_RECENT_DATE, ONE_YEAR_PRIOR_DATE,
};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use surfsup_api::{db, DatedValue, StationList, TemperatureSummary};
use time::macros::date;

#[tokio::test]
async fn precipitation_covers_last_year_with_repeated_dates() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_precipitation()
        .withf(|since| *since == ONE_YEAR_PRIOR_DATE)
        .times(1)
        .returning(|_| {
            Ok(vec![
                DatedValue::new("2016-08-23", Some(0.0)),
                DatedValue::new("2016-08-23", Some(0.15)),
                DatedValue::new("2016-08-23", None),
                DatedValue::new("2017-08-23", Some(0.45)),
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        json!([
            {"2016-08-23": 0.0},
            {"2016-08-23": 0.15},
            {"2016-08-23": null},
            {"2017-08-23": 0.45}
        ])
    );
}

#[tokio::test]
async fn stations_returns_every_station() {
    let mut climate_data = mock_with_dataset();
    climate_data.expect_stations().times(1).returning(|| {
        Ok(StationList {
            stations: vec![
                String::from("USC00511918"),
                String::from("USC00513117"),
                String::from("USC00519281"),
            ],
        })
    });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        json!({"stations": ["USC00511918", "USC00513117", "USC00519281"]})
    );
}

#[tokio::test]
async fn tobs_reads_most_active_station_for_last_year() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_temperature_observations()
        .withf(|station_id, since| station_id == MOST_ACTIVE_STATION && *since == ONE_YEAR_PRIOR_DATE)
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                DatedValue::new("2016-08-23", 77.0),
                DatedValue::new("2016-08-24", 77.0),
                DatedValue::new("2017-08-18", 79.0),
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        json!([
            {"2016-08-23": 77.0},
            {"2016-08-24": 77.0},
            {"2017-08-18": 79.0}
        ])
    );
}

#[tokio::test]
async fn start_only_runs_through_most_recent_date() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_temperature_summary()
        .withf(|start, end| *start == date!(2017 - 03 - 01) && *end == MOST_RECENT_DATE)
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                tmin: Some(58.0),
                tmax: Some(87.0),
                tavg: Some(74.5),
            })
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/2017-03-01").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({"TMIN": 58.0, "TMAX": 87.0, "TAVG": 74.5}));
}

#[tokio::test]
async fn start_and_end_summarize_inclusive_range() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_temperature_summary()
        .withf(|start, end| *start == date!(2017 - 03 - 01) && *end == date!(2017 - 03 - 03))
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                tmin: Some(60.0),
                tmax: Some(80.0),
                tavg: Some(70.0),
            })
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/2017-03-01/2017-03-03").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({"TMIN": 60.0, "TMAX": 80.0, "TAVG": 70.0}));
}

#[tokio::test]
async fn single_day_range_is_allowed() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_temperature_summary()
        .withf(|start, end| *start == date!(2017 - 03 - 01) && start == end)
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                tmin: Some(71.0),
                tmax: Some(71.0),
                tavg: Some(71.0),
            })
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, _) = test_app.get("/api/v1.0/2017-03-01/2017-03-01").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_range_returns_null_aggregates() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_temperature_summary()
        .times(1)
        .returning(|_, _| Ok(TemperatureSummary::default()));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/1999-01-01/1999-12-31").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({"TMIN": null, "TMAX": null, "TAVG": null}));
}

#[tokio::test]
async fn malformed_start_is_a_bad_request() {
    let mut climate_data = mock_with_dataset();
    climate_data.expect_temperature_summary().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2017-13-01",
        "/api/v1.0/08-23-2017",
        "/api/v1.0/2017-02-30/2017-03-01",
    ] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body.contains("start"), "{}: {}", uri, body);
    }
}

#[tokio::test]
async fn malformed_end_is_a_bad_request() {
    let mut climate_data = mock_with_dataset();
    climate_data.expect_temperature_summary().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/2017-01-01/someday").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("end"));
}

#[tokio::test]
async fn inverted_range_is_a_bad_request() {
    let mut climate_data = mock_with_dataset();
    climate_data.expect_temperature_summary().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/2017-08-23/2017-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("after"));
}

#[tokio::test]
async fn start_after_most_recent_date_is_a_bad_request() {
    let mut climate_data = mock_with_dataset();
    climate_data.expect_temperature_summary().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/2018-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("2018-01-01"), "{}", body);
    assert!(body.contains("2017-08-23"), "{}", body);
}

#[tokio::test]
async fn start_on_most_recent_date_is_allowed() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_temperature_summary()
        .withf(|start, end| *start == MOST_RECENT_DATE && *end == MOST_RECENT_DATE)
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                tmin: Some(76.0),
                tmax: Some(82.0),
                tavg: Some(79.0),
            })
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, _) = test_app.get("/api/v1.0/2017-08-23").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn data_errors_are_server_errors() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_stations()
        .times(1)
        .returning(|| Err(db::Error::Integrity(String::from("database disk image is malformed"))));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    // Internal details stay in the log
    assert!(!body.contains("malformed"));
}

#[tokio::test]
async fn repeated_requests_return_identical_json() {
    let mut climate_data = mock_with_dataset();
    climate_data
        .expect_precipitation()
        .times(2)
        .returning(|_| {
            Ok(vec![
                DatedValue::new("2016-08-23", Some(0.7)),
                DatedValue::new("2016-08-24", None),
            ])
        });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (_, first) = test_app.get("/api/v1.0/precipitation").await;
    let (_, second) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(first, second);
}
