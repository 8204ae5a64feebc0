use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::{debug, error};
use std::sync::Arc;
use time::Date;

use crate::{
    db::{
        self, parse_date, Precipitation, StationList, TemperatureObservation, TemperatureSummary,
    },
    AppState,
};

fn data_error(err: db::Error) -> (StatusCode, String) {
    error!("error reading measurement data: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        String::from("Failed to read measurement data"),
    )
}

fn path_date(name: &str, value: &str) -> Result<Date, (StatusCode, String)> {
    parse_date(value).map_err(|e| {
        debug!("rejecting {} date {:?}: {}", name, value, e);
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {} date '{}', expected YYYY-MM-DD: {}", name, value, e),
        )
    })
}

fn ordered_range(start: Date, end: Date) -> Result<(), (StatusCode, String)> {
    if start > end {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Start date {} is after end date {}", start, end),
        ));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for every station report in the last 365 days of data, as single-key {date: inches} objects; dates repeat once per reporting station", content_type = "application/json", body = Vec<serde_json::Value>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurement data")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Precipitation>>, (StatusCode, String)> {
    state
        .climate_db
        .precipitation(state.constants.one_year_prior_date)
        .await
        .map(Json)
        .map_err(data_error)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every weather station id", content_type = "application/json", body = StationList),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read station data")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationList>, (StatusCode, String)> {
    state
        .climate_db
        .stations()
        .await
        .map(Json)
        .map_err(data_error)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Observed temperatures of the most active station over the last 365 days of data, as single-key {date: fahrenheit} objects", content_type = "application/json", body = Vec<serde_json::Value>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurement data")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, (StatusCode, String)> {
    state
        .climate_db
        .temperature_observations(
            state.constants.most_active_station.clone(),
            state.constants.one_year_prior_date,
        )
        .await
        .map(Json)
        .map_err(data_error)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature summary from start through the most recent measurement; all fields null when no measurement falls in the range", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "Start is not a YYYY-MM-DD date or is after the most recent measurement"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurement data")
    ))]
pub async fn temperature_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, (StatusCode, String)> {
    let start = path_date("start", &start)?;

    // Nothing postdates the most recent measurement, so this covers everything from start on
    let end = state.constants.most_recent_date;
    ordered_range(start, end)?;

    summarize(&state, start, end).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last day of the range (inclusive), YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature summary for the inclusive range; all fields null when no measurement falls in the range", content_type = "application/json", body = TemperatureSummary),
        (status = BAD_REQUEST, description = "A date is not YYYY-MM-DD or start is after end"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurement data")
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, (StatusCode, String)> {
    let start = path_date("start", &start)?;
    let end = path_date("end", &end)?;
    ordered_range(start, end)?;

    summarize(&state, start, end).await
}

async fn summarize(
    state: &AppState,
    start: Date,
    end: Date,
) -> Result<Json<TemperatureSummary>, (StatusCode, String)> {
    state
        .climate_db
        .temperature_summary(start, end)
        .await
        .map(Json)
        .map_err(data_error)
}
