use log::info;
use time::{Date, Duration};

use crate::db::{self, ClimateData};

/// Window covered by the precipitation and tobs series
pub const LOOKBACK_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("measurement table is empty, no most recent date or active station exists")]
    EmptyDataset,
    #[error("failed to read measurement data: {0}")]
    Data(#[from] db::Error),
}

/// Facts derived from the full measurement table, computed once before the server
/// starts accepting requests and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateConstants {
    pub most_recent_date: Date,
    pub one_year_prior_date: Date,
    pub most_active_station: String,
}

impl ClimateConstants {
    pub fn new(most_recent_date: Date, most_active_station: String) -> Self {
        Self {
            most_recent_date,
            one_year_prior_date: most_recent_date.saturating_sub(Duration::days(LOOKBACK_DAYS)),
            most_active_station,
        }
    }

    pub async fn compute(data: &dyn ClimateData) -> Result<Self, Error> {
        let most_recent_date = data.most_recent_date().await?.ok_or(Error::EmptyDataset)?;
        let most_active_station = data
            .most_active_station()
            .await?
            .ok_or(Error::EmptyDataset)?;

        let constants = Self::new(most_recent_date, most_active_station);
        info!(
            "most recent measurement: {}, lookback starts: {}, most active station: {}",
            constants.most_recent_date,
            constants.one_year_prior_date,
            constants.most_active_station
        );
        Ok(constants)
    }
}
