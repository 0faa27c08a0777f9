use chrono::{DateTime, FixedOffset, Timelike, Utc};
use common::errors::AppError;
use common::models::{
    DailyView, DashboardResponse, ForecastSample, ForecastSeries, HourlyView, LocationView,
    TodayView,
};

use crate::aggregator::{
    build_daily_summaries, derive_hourly_strip, extract_distinct_dates, local_offset, local_time,
};

const KELVIN_OFFSET: f64 = 273.15;
const DAYTIME_HOURS: std::ops::Range<u32> = 6..18;

pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET).floor() as i64
}

/// Metres per second to a km/h label, halves rounded up
pub fn convert_wind_speed(meters_per_second: f64) -> String {
    format!("{}km/h", (meters_per_second * 3.6).round())
}

/// Halves round up, not to even
pub fn meters_to_kilometers(meters: f64) -> String {
    format!("{}km", (meters / 1000.0).round())
}

/// Swap the trailing `d`/`n` of an icon code to match the local hour.
pub fn day_or_night_icon(icon: &str, local: DateTime<FixedOffset>) -> String {
    let suffix = if DAYTIME_HOURS.contains(&local.hour()) {
        'd'
    } else {
        'n'
    };

    let mut chars = icon.chars();
    chars.next_back();
    let mut adjusted = chars.as_str().to_string();
    adjusted.push(suffix);
    adjusted
}

fn format_pressure(hpa: f64) -> String {
    format!("{:.0} hPa", hpa)
}

fn format_humidity(percent: f64) -> String {
    format!("{:.0}%", percent)
}

fn format_clock(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    local_time(timestamp, offset).format("%-H:%M").to_string()
}

fn hourly_view(sample: &ForecastSample, offset: FixedOffset) -> HourlyView {
    let local = local_time(sample.timestamp, offset);
    HourlyView {
        time: local.format("%-I:%M %p").to_string(),
        icon: day_or_night_icon(&sample.condition.icon, local),
        temperature_c: kelvin_to_celsius(sample.temperature.current),
    }
}

fn daily_view(sample: &ForecastSample, offset: FixedOffset) -> DailyView {
    let local = local_time(sample.timestamp, offset);
    DailyView {
        date: local.format("%m.%d").to_string(),
        day: local.format("%A").to_string(),
        description: sample.condition.description.clone(),
        icon: sample.condition.icon.clone(),
        temperature_c: kelvin_to_celsius(sample.temperature.current),
        feels_like_c: kelvin_to_celsius(sample.temperature.feels_like),
        temp_min_c: kelvin_to_celsius(sample.temperature.min),
        temp_max_c: kelvin_to_celsius(sample.temperature.max),
        air_pressure: format_pressure(sample.pressure),
        humidity: format_humidity(sample.humidity),
        visibility: meters_to_kilometers(sample.visibility),
        wind_speed: convert_wind_speed(sample.wind_speed),
    }
}

/// Build the dashboard document: today's conditions from the first sample,
/// the hourly strip, and one entry per date that has a daytime sample.
pub fn build_dashboard(series: &ForecastSeries) -> Result<DashboardResponse, AppError> {
    let offset = local_offset(series);
    let first = series.samples.first().ok_or_else(|| {
        AppError::not_found(format!(
            "No forecast samples for '{}'",
            series.location.name
        ))
    })?;
    let now = local_time(first.timestamp, offset);

    let hourly = derive_hourly_strip(series)
        .iter()
        .map(|sample| hourly_view(sample, offset))
        .collect();

    let dates = extract_distinct_dates(series);
    let daily = build_daily_summaries(series, &dates)
        .into_iter()
        .filter_map(|summary| summary.sample)
        .map(|sample| daily_view(sample, offset))
        .collect();

    Ok(DashboardResponse {
        location: LocationView {
            name: series.location.name.clone(),
            sunrise: format_clock(series.location.sunrise, offset),
            sunset: format_clock(series.location.sunset, offset),
        },
        today: TodayView {
            day: now.format("%A").to_string(),
            date: now.format("%m-%d-%Y").to_string(),
            temperature_c: kelvin_to_celsius(first.temperature.current),
            feels_like_c: kelvin_to_celsius(first.temperature.feels_like),
            temp_min_c: kelvin_to_celsius(first.temperature.min),
            temp_max_c: kelvin_to_celsius(first.temperature.max),
            description: first.condition.description.clone(),
            icon: day_or_night_icon(&first.condition.icon, now),
            visibility: meters_to_kilometers(first.visibility),
            air_pressure: format_pressure(first.pressure),
            humidity: format_humidity(first.humidity),
            wind_speed: convert_wind_speed(first.wind_speed),
            hourly,
        },
        daily,
    })
}
