mod climate_data;
pub mod sqlite;

pub use climate_data::{ClimateData, Error};
pub use sqlite::ClimateDatabase;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use utoipa::ToSchema;

/// Text form of `measurement.date`
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

/// One observation keyed by its date.
///
/// Serializes as a single-key object, `{"2017-08-23": 0.45}`. A series is a JSON
/// array of these, so a date reported by several stations shows up once per
/// station rather than being merged into one map entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedValue<T> {
    pub date: String,
    pub value: T,
}

impl<T> DatedValue<T> {
    pub fn new(date: impl Into<String>, value: T) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

impl<T: Serialize> Serialize for DatedValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

/// Daily precipitation in inches; `None` when the station did not report
pub type Precipitation = DatedValue<Option<f64>>;

/// Observed temperature in degrees Fahrenheit
pub type TemperatureObservation = DatedValue<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationList {
    pub stations: Vec<String>,
}

/// Min/max/mean observed temperature over a date range.
///
/// All three fields are `None` when no measurement falls in the range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct TemperatureSummary {
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
    pub tavg: Option<f64>,
}
