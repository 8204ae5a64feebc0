use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::{str::FromStr, time::Duration};
use time::Date;

use super::{
    format_date, parse_date, ClimateData, DatedValue, Error, Precipitation, StationList,
    TemperatureObservation, TemperatureSummary,
};

/// Columns the queries below rely on, per table
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station"]),
];

/// Read-only handle on the measurement database.
pub struct ClimateDatabase {
    pool: SqlitePool,
}

impl ClimateDatabase {
    /// Opens an existing database file without write access, then verifies it.
    pub async fn connect(path: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        let db = Self::from_pool(pool);
        db.health_check().await?;
        db.verify_schema().await?;
        info!("SQLite measurement database opened read-only at: {}", path);

        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await?;
        if result != "ok" {
            return Err(Error::Integrity(result));
        }

        Ok(())
    }

    /// Fails unless every column the queries below touch exists in the file.
    pub async fn verify_schema(&self) -> Result<(), Error> {
        for (table, columns) in REQUIRED_COLUMNS {
            let found: Vec<String> = sqlx::query(&format!("PRAGMA table_info({})", table))
                .fetch_all(&self.pool)
                .await?
                .iter()
                .map(|row| row.try_get::<String, _>("name"))
                .collect::<Result<_, _>>()?;
            debug!("table {} has columns {:?}", table, found);

            if let Some(missing) = columns.iter().find(|c| !found.iter().any(|f| f == *c)) {
                return Err(Error::MissingColumn {
                    table: table.to_string(),
                    column: missing.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn row_to_precipitation(row: &SqliteRow) -> Result<Precipitation, Error> {
    Ok(DatedValue::new(
        row.try_get::<String, _>("date")?,
        row.try_get::<Option<f64>, _>("prcp")?,
    ))
}

fn row_to_temperature(row: &SqliteRow) -> Result<TemperatureObservation, Error> {
    Ok(DatedValue::new(
        row.try_get::<String, _>("date")?,
        row.try_get::<f64, _>("tobs")?,
    ))
}

#[async_trait]
impl ClimateData for ClimateDatabase {
    async fn most_recent_date(&self) -> Result<Option<Date>, Error> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        Ok(latest.as_deref().map(parse_date).transpose()?)
    }

    async fn most_active_station(&self) -> Result<Option<String>, Error> {
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(station)
    }

    async fn precipitation(&self, since: Date) -> Result<Vec<Precipitation>, Error> {
        let rows = sqlx::query(
            "SELECT date, CAST(prcp AS REAL) AS prcp
             FROM measurement
             WHERE date >= ?
             ORDER BY date ASC, station ASC",
        )
        .bind(format_date(since)?)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_precipitation).collect()
    }

    async fn stations(&self) -> Result<StationList, Error> {
        let stations: Vec<String> =
            sqlx::query_scalar("SELECT station FROM station ORDER BY station")
                .fetch_all(&self.pool)
                .await?;

        Ok(StationList { stations })
    }

    async fn temperature_observations(
        &self,
        station_id: String,
        since: Date,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        let rows = sqlx::query(
            "SELECT date, CAST(tobs AS REAL) AS tobs
             FROM measurement
             WHERE station = ? AND date >= ? AND tobs IS NOT NULL
             ORDER BY date ASC",
        )
        .bind(station_id)
        .bind(format_date(since)?)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_temperature).collect()
    }

    async fn temperature_summary(
        &self,
        start: Date,
        end: Date,
    ) -> Result<TemperatureSummary, Error> {
        let row = sqlx::query(
            "SELECT MIN(CAST(tobs AS REAL)) AS tmin,
                    MAX(CAST(tobs AS REAL)) AS tmax,
                    AVG(CAST(tobs AS REAL)) AS tavg
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(format_date(start)?)
        .bind(format_date(end)?)
        .fetch_one(&self.pool)
        .await?;

        Ok(TemperatureSummary {
            tmin: row.try_get("tmin")?,
            tmax: row.try_get("tmax")?,
            tavg: row.try_get("tavg")?,
        })
    }
}
