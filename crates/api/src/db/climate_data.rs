use async_trait::async_trait;
use time::Date;

use super::{Precipitation, StationList, TemperatureObservation, TemperatureSummary};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date string: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("Failed to parse date string: {0}")]
    DateParse(#[from] time::error::Parse),
    #[error("Table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: String },
    #[error("Database integrity check failed: {0}")]
    Integrity(String),
}

/// Read access to the measurement and station tables.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Latest `measurement.date`, `None` when the table is empty
    async fn most_recent_date(&self) -> Result<Option<Date>, Error>;
    /// Station with the most measurement rows; ties go to the smallest station id
    async fn most_active_station(&self) -> Result<Option<String>, Error>;
    /// Precipitation for every station on or after `since`, ordered by date
    async fn precipitation(&self, since: Date) -> Result<Vec<Precipitation>, Error>;
    async fn stations(&self) -> Result<StationList, Error>;
    /// Temperatures observed by one station on or after `since`, ordered by date
    async fn temperature_observations(
        &self,
        station_id: String,
        since: Date,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    /// Min/max/mean temperature for `start..=end` across all stations
    async fn temperature_summary(&self, start: Date, end: Date)
        -> Result<TemperatureSummary, Error>;
}
