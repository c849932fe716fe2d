use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::error;
use std::{collections::BTreeMap, sync::Arc};

use crate::{db, parse_date, AppState, Observation, ObservationField, TemperatureStats};

/// Collapse dated readings into a date-keyed map. When multiple rows share a
/// date the later row wins; clients depend on this collapsed shape.
fn into_date_map(observations: Vec<Observation>) -> BTreeMap<String, Option<f64>> {
    let mut map = BTreeMap::new();
    for obs in observations {
        map.insert(obs.date, obs.value);
    }
    map
}

pub(crate) fn store_error(err: db::Error) -> (StatusCode, String) {
    match err {
        db::Error::NoData => (
            StatusCode::NOT_FOUND,
            "no measurement data available".to_owned(),
        ),
        err => {
            error!("error querying dataset: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "error querying dataset".to_owned(),
            )
        }
    }
}

fn validate_date(value: &str) -> Result<(), (StatusCode, String)> {
    parse_date(value).map(|_| ()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("invalid date '{}', expected YYYY-MM-DD: {}", value, e),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Date-keyed precipitation readings across all stations for the pinned trailing-12-months window", body = BTreeMap<String, Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, (StatusCode, String)> {
    let readings = state
        .climate_db
        .observations(
            ObservationField::Precipitation,
            &state.window.date_start,
            &state.window.date_end,
            false,
        )
        .await
        .map_err(store_error)?;

    Ok(Json(into_date_map(readings)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Display names of every station in the dataset", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let names = state
        .climate_db
        .station_names()
        .await
        .map_err(store_error)?;

    Ok(Json(names))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Date-keyed temperature readings for the most-active station over the pinned trailing-12-months window", body = BTreeMap<String, Option<f64>>),
        (status = NOT_FOUND, description = "No measurement data available"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, (StatusCode, String)> {
    let readings = state
        .climate_db
        .observations(
            ObservationField::Temperature,
            &state.window.date_start,
            &state.window.date_end,
            true,
        )
        .await
        .map_err(store_error)?;

    Ok(Json(into_date_map(readings)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Inclusive start date (YYYY-MM-DD)"),
    ),
    responses(
        (status = OK, description = "Min/avg/max temperature from the start date to the end of the pinned window; null aggregates when no rows match", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed start date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stats_from_start(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    validate_date(&start)?;

    let stats = state
        .climate_db
        .temperature_stats(&start, &state.window.date_end)
        .await
        .map_err(store_error)?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Inclusive start date (YYYY-MM-DD)"),
        ("end" = String, Path, description = "Inclusive end date (YYYY-MM-DD)"),
    ),
    responses(
        (status = OK, description = "Min/avg/max temperature between the two dates; null aggregates when no rows match", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Malformed start or end date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stats_for_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, (StatusCode, String)> {
    validate_date(&start)?;
    validate_date(&end)?;

    let stats = state
        .climate_db
        .temperature_stats(&start, &end)
        .await
        .map_err(store_error)?;

    Ok(Json(stats))
}
