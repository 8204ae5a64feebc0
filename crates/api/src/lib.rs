pub mod constants;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use constants::ClimateConstants;
pub use db::{
    ClimateData, ClimateDatabase, DatedValue, Precipitation, StationList, TemperatureObservation,
    TemperatureSummary,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
