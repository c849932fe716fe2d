use climate_api::{db::climate_data::Error, ClimateAccess, ClimateData, ObservationField};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Executor,
};
use std::str::FromStr;

/// Fresh in-memory database with the dataset's two tables. A single
/// connection keeps the database alive for the life of the pool.
async fn seed_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    pool.execute(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            name TEXT NOT NULL,
            latitude REAL,
            longitude REAL,
            elevation REAL
        );
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            date TEXT NOT NULL,
            prcp REAL,
            tobs REAL
        );",
    )
    .await
    .unwrap();

    pool
}

async fn insert_station(pool: &SqlitePool, code: &str, name: &str) {
    sqlx::query(
        "INSERT INTO station (station, name, latitude, longitude, elevation)
         VALUES (?, ?, 21.27, -157.82, 3.0)",
    )
    .bind(code)
    .bind(name)
    .execute(pool)
    .await
    .unwrap();
}

async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn most_active_station_has_highest_row_count() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-01-01", Some(0.1), 70.0).await;
    insert_measurement(&pool, "USC00519281", "2017-01-02", Some(0.2), 71.0).await;
    insert_measurement(&pool, "USC00519281", "2017-01-03", None, 72.0).await;
    insert_measurement(&pool, "USC00514830", "2017-01-01", Some(0.3), 68.0).await;

    let access = ClimateAccess::from_pool(pool);
    assert_eq!(access.most_active_station().await.unwrap(), "USC00519281");
    // Idempotent on unchanged data
    assert_eq!(access.most_active_station().await.unwrap(), "USC00519281");
}

#[tokio::test]
async fn most_active_station_breaks_ties_by_code() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-01-01", None, 70.0).await;
    insert_measurement(&pool, "USC00514830", "2017-01-01", None, 68.0).await;

    let access = ClimateAccess::from_pool(pool);
    assert_eq!(access.most_active_station().await.unwrap(), "USC00514830");
}

#[tokio::test]
async fn most_active_station_on_empty_dataset_is_no_data() {
    let pool = seed_pool().await;

    let access = ClimateAccess::from_pool(pool);
    let err = access.most_active_station().await.unwrap_err();
    assert!(matches!(err, Error::NoData));
}

#[tokio::test]
async fn observations_date_range_is_inclusive_on_both_ends() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2016-12-31", Some(0.9), 65.0).await;
    insert_measurement(&pool, "USC00519281", "2017-01-01", Some(0.1), 70.0).await;
    insert_measurement(&pool, "USC00519281", "2017-01-31", Some(0.2), 71.0).await;
    insert_measurement(&pool, "USC00519281", "2017-02-01", Some(0.8), 72.0).await;

    let access = ClimateAccess::from_pool(pool);
    let readings = access
        .observations(ObservationField::Precipitation, "2017-01-01", "2017-01-31", false)
        .await
        .unwrap();

    let dates: Vec<&str> = readings.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2017-01-01", "2017-01-31"]);
    assert_eq!(readings[0].value, Some(0.1));
}

#[tokio::test]
async fn observations_selects_the_requested_column() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-01-01", None, 70.0).await;

    let access = ClimateAccess::from_pool(pool);

    let prcp = access
        .observations(ObservationField::Precipitation, "2017-01-01", "2017-01-01", false)
        .await
        .unwrap();
    assert_eq!(prcp[0].value, None);

    let tobs = access
        .observations(ObservationField::Temperature, "2017-01-01", "2017-01-01", false)
        .await
        .unwrap();
    assert_eq!(tobs[0].value, Some(70.0));
}

#[tokio::test]
async fn observations_most_active_only_drops_other_stations() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-01-01", None, 70.0).await;
    insert_measurement(&pool, "USC00519281", "2017-01-02", None, 71.0).await;
    insert_measurement(&pool, "USC00514830", "2017-01-01", None, 55.0).await;

    let access = ClimateAccess::from_pool(pool);
    let readings = access
        .observations(ObservationField::Temperature, "2017-01-01", "2017-01-02", true)
        .await
        .unwrap();

    assert_eq!(readings.len(), 2);
    assert!(readings.iter().all(|r| r.value != Some(55.0)));
}

#[tokio::test]
async fn temperature_stats_orders_min_avg_max() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-01-05", None, 60.0).await;
    insert_measurement(&pool, "USC00514830", "2017-01-10", None, 70.0).await;

    let access = ClimateAccess::from_pool(pool);
    let stats = access
        .temperature_stats("2017-01-01", "2017-01-31")
        .await
        .unwrap();

    assert_eq!(stats.date_start, "2017-01-01");
    assert_eq!(stats.date_end, "2017-01-31");
    assert_eq!(stats.min, Some(60.0));
    assert_eq!(stats.avg, Some(65.0));
    assert_eq!(stats.max, Some(70.0));
    assert!(stats.min <= stats.avg && stats.avg <= stats.max);
}

#[tokio::test]
async fn temperature_stats_empty_range_is_all_null() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-01-01", None, 70.0).await;

    let access = ClimateAccess::from_pool(pool);
    let stats = access
        .temperature_stats("2099-01-01", "2099-12-31")
        .await
        .unwrap();

    assert_eq!(stats.min, None);
    assert_eq!(stats.avg, None);
    assert_eq!(stats.max, None);
}

#[tokio::test]
async fn station_names_match_station_table_cardinality() {
    let pool = seed_pool().await;
    insert_station(&pool, "USC00519281", "Station A").await;
    insert_station(&pool, "USC00514830", "Station B").await;

    let access = ClimateAccess::from_pool(pool);
    let names = access.station_names().await.unwrap();

    assert_eq!(names, vec!["Station A", "Station B"]);
}

#[tokio::test]
async fn most_recent_date_is_the_dataset_maximum() {
    let pool = seed_pool().await;
    insert_measurement(&pool, "USC00519281", "2017-08-23", None, 81.0).await;
    insert_measurement(&pool, "USC00519281", "2017-08-22", None, 80.0).await;
    insert_measurement(&pool, "USC00514830", "2016-01-01", None, 65.0).await;

    let access = ClimateAccess::from_pool(pool);
    assert_eq!(access.most_recent_date().await.unwrap(), "2017-08-23");
}

#[tokio::test]
async fn most_recent_date_on_empty_dataset_is_no_data() {
    let pool = seed_pool().await;

    let access = ClimateAccess::from_pool(pool);
    let err = access.most_recent_date().await.unwrap_err();
    assert!(matches!(err, Error::NoData));
}
