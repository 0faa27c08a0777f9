use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Weather condition attached to a forecast sample
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Condition {
    /// OpenWeatherMap icon code, e.g. `10d`
    pub icon: String,
    pub description: String,
}

/// Temperatures in Kelvin
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Temperature {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub feels_like: f64,
}

/// One fully-populated 3-hour forecast record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub condition: Condition,
    pub temperature: Temperature,
    /// hPa
    pub pressure: f64,
    /// Percent
    pub humidity: f64,
    /// Metres per second
    pub wind_speed: f64,
    /// Metres
    pub visibility: f64,
}

/// Location metadata returned alongside a series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Location {
    pub name: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// Seconds east of UTC
    pub utc_offset: i32,
}

/// Ordered samples for one queried place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ForecastSeries {
    pub location: Location,
    pub samples: Vec<ForecastSample>,
}

/// Upstream `forecast` response. Every field is optional so partial
/// payloads still decode; defaults are applied when sanitizing.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct RawForecastResponse {
    #[serde(default)]
    pub list: Vec<RawForecastEntry>,
    pub city: Option<RawCity>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawForecastEntry {
    pub dt: Option<i64>,
    pub main: Option<RawMain>,
    #[serde(default)]
    pub weather: Vec<RawWeather>,
    pub wind: Option<RawWind>,
    pub visibility: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawMain {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawWeather {
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawWind {
    pub speed: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawCity {
    pub name: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub timezone: Option<i32>,
}

/// Dashboard document for one place
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub location: LocationView,
    pub today: TodayView,
    pub daily: Vec<DailyView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationView {
    pub name: String,
    pub sunrise: String,
    pub sunset: String,
}

/// Current conditions plus the hour-by-hour strip
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodayView {
    pub day: String,
    pub date: String,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub temp_min_c: i64,
    pub temp_max_c: i64,
    pub description: String,
    pub icon: String,
    pub visibility: String,
    pub air_pressure: String,
    pub humidity: String,
    pub wind_speed: String,
    pub hourly: Vec<HourlyView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HourlyView {
    pub time: String,
    pub icon: String,
    pub temperature_c: i64,
}

/// Representative sample for one calendar date
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyView {
    pub date: String,
    pub day: String,
    pub description: String,
    pub icon: String,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub temp_min_c: i64,
    pub temp_max_c: i64,
    pub air_pressure: String,
    pub humidity: String,
    pub visibility: String,
    pub wind_speed: String,
}
