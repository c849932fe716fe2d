use crate::Database;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("no measurement rows in the dataset")]
    NoData,
}

/// Column of the measurement table exposed by the observation listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationField {
    Precipitation,
    Temperature,
}

impl ObservationField {
    pub fn column(&self) -> &'static str {
        match self {
            ObservationField::Precipitation => "prcp",
            ObservationField::Temperature => "tobs",
        }
    }
}

/// One dated reading of a single measurement column. Precipitation is
/// nullable in the dataset, so the value carries through as an option.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: String,
    pub value: Option<f64>,
}

/// Min/avg/max temperature aggregates over an inclusive date range.
/// All three are null when no rows fall inside the range.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureStats {
    pub date_start: String,
    pub date_end: String,
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

#[async_trait]
pub trait ClimateData: Send + Sync {
    /// Station code with the highest measurement count.
    async fn most_active_station(&self) -> Result<String, Error>;
    /// Readings of one measurement column for `start <= date <= end`,
    /// optionally restricted to the most-active station.
    async fn observations(
        &self,
        field: ObservationField,
        start: &str,
        end: &str,
        most_active_only: bool,
    ) -> Result<Vec<Observation>, Error>;
    async fn temperature_stats(&self, start: &str, end: &str) -> Result<TemperatureStats, Error>;
    /// Display names of every station, in store iteration order.
    async fn station_names(&self) -> Result<Vec<String>, Error>;
    /// Maximum `date` value across all measurements.
    async fn most_recent_date(&self) -> Result<String, Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Build directly from a pool, bypassing the read-only dataset file.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn most_active_station(&self) -> Result<String, Error> {
        // Secondary ordering by code keeps ties deterministic
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(station,)| station).ok_or(Error::NoData)
    }

    async fn observations(
        &self,
        field: ObservationField,
        start: &str,
        end: &str,
        most_active_only: bool,
    ) -> Result<Vec<Observation>, Error> {
        // String comparison on YYYY-MM-DD orders the same as dates
        let query = format!(
            "SELECT date, {} AS value FROM measurement
             WHERE date >= ? AND date <= ?{}",
            field.column(),
            if most_active_only {
                " AND station = ?"
            } else {
                ""
            },
        );

        let mut q = sqlx::query(&query).bind(start).bind(end);
        if most_active_only {
            let station = self.most_active_station().await?;
            q = q.bind(station);
        }

        let rows = q.fetch_all(&self.pool).await?;
        let mut observations = Vec::with_capacity(rows.len());
        for row in rows {
            observations.push(Observation {
                date: row.get("date"),
                value: row.get("value"),
            });
        }

        Ok(observations)
    }

    async fn temperature_stats(&self, start: &str, end: &str) -> Result<TemperatureStats, Error> {
        let row = sqlx::query(
            "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(TemperatureStats {
            date_start: start.to_owned(),
            date_end: end.to_owned(),
            min: row.get("min"),
            avg: row.get("avg"),
            max: row.get("max"),
        })
    }

    async fn station_names(&self) -> Result<Vec<String>, Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM station")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn most_recent_date(&self) -> Result<String, Error> {
        let max: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        max.ok_or(Error::NoData)
    }
}
