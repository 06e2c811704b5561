//! Read-only datasets loaded once per process: the daily weather table and
//! the hourly consumption series.

pub mod consumption;
pub mod weather;

pub use consumption::{ConsumptionSeries, HourlyPoint};
pub use weather::{DailyRecord, WeatherTable};
