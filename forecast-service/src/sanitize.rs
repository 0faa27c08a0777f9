//! Turns the loosely-typed upstream payload into a fully-populated
//! [`ForecastSeries`]. Every default lives here.

use chrono::{DateTime, Utc};
use common::errors::AppError;
use common::models::{
    Condition, ForecastSample, ForecastSeries, Location, RawCity, RawForecastEntry,
    RawForecastResponse, Temperature,
};

pub const DEFAULT_TEMPERATURE_K: f64 = 296.37;
pub const DEFAULT_BOUND_TEMPERATURE_K: f64 = 0.0;
pub const DEFAULT_VISIBILITY_M: f64 = 10_000.0;
pub const DEFAULT_ICON: &str = "01d";
pub const DEFAULT_SUN_EVENT: i64 = 100_000_000;

const UTC_OFFSET_RANGE: std::ops::RangeInclusive<i32> = -86_399..=86_399;

pub fn sanitize_series(raw: RawForecastResponse) -> Result<ForecastSeries, AppError> {
    let location = sanitize_location(raw.city.unwrap_or_default())?;

    let samples = raw
        .list
        .into_iter()
        .enumerate()
        .map(|(index, entry)| sanitize_sample(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(index) = samples
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(AppError::invalid_upstream(format!(
            "Forecast entry {} is earlier than the entry before it",
            index + 1
        )));
    }

    Ok(ForecastSeries { location, samples })
}

pub fn sanitize_sample(index: usize, entry: RawForecastEntry) -> Result<ForecastSample, AppError> {
    let dt = entry
        .dt
        .ok_or_else(|| AppError::invalid_upstream(format!("Forecast entry {} has no timestamp", index)))?;
    let timestamp = unix_time(dt)
        .ok_or_else(|| AppError::invalid_upstream(format!("Forecast entry {} has an invalid timestamp", index)))?;

    let main = entry.main.unwrap_or_default();
    let weather = entry.weather.into_iter().next().unwrap_or_default();

    Ok(ForecastSample {
        timestamp,
        condition: Condition {
            icon: weather.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            description: weather.description.unwrap_or_default(),
        },
        temperature: Temperature {
            current: main.temp.unwrap_or(DEFAULT_TEMPERATURE_K),
            min: main.temp_min.unwrap_or(DEFAULT_BOUND_TEMPERATURE_K),
            max: main.temp_max.unwrap_or(DEFAULT_BOUND_TEMPERATURE_K),
            feels_like: main.feels_like.unwrap_or(DEFAULT_BOUND_TEMPERATURE_K),
        },
        pressure: main.pressure.unwrap_or_default(),
        humidity: main.humidity.unwrap_or_default(),
        wind_speed: entry.wind.and_then(|w| w.speed).unwrap_or_default(),
        visibility: entry.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
    })
}

fn sanitize_location(city: RawCity) -> Result<Location, AppError> {
    let utc_offset = city.timezone.unwrap_or_default();
    if !UTC_OFFSET_RANGE.contains(&utc_offset) {
        return Err(AppError::invalid_upstream(format!(
            "UTC offset {} seconds is out of range",
            utc_offset
        )));
    }

    let sun_event = |value: Option<i64>, name: &str| {
        unix_time(value.unwrap_or(DEFAULT_SUN_EVENT))
            .ok_or_else(|| AppError::invalid_upstream(format!("City {} time is out of range", name)))
    };

    Ok(Location {
        name: city.name.unwrap_or_default(),
        sunrise: sun_event(city.sunrise, "sunrise")?,
        sunset: sun_event(city.sunset, "sunset")?,
        utc_offset,
    })
}

fn unix_time(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
