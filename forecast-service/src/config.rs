use std::env;

use crate::api_client::DEFAULT_SAMPLE_COUNT;

pub struct Config {
    pub port: u16,
    pub openweather_url: String,
    pub openweather_api_key: String,
    pub sample_count: u32,
    pub cache_ttl_seconds: u64,
    pub rate_limit_per_minute: u32,
    pub http_timeout_seconds: u64,
    pub http_max_retries: u32,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parsed("PORT", 3002),
            openweather_url: env::var("OPENWEATHER_URL").unwrap_or_else(|_| {
                "https://api.openweathermap.org/data/2.5/forecast".to_string()
            }),
            openweather_api_key: env::var("OPENWEATHER_API_KEY").unwrap_or_default(),
            sample_count: parsed("FORECAST_SAMPLE_COUNT", DEFAULT_SAMPLE_COUNT),
            cache_ttl_seconds: parsed("CACHE_TTL_SECONDS", 300), // 5 minutes default
            rate_limit_per_minute: parsed("RATE_LIMIT_PER_MINUTE", 60),
            http_timeout_seconds: parsed("HTTP_TIMEOUT_SECONDS", 5),
            http_max_retries: parsed("HTTP_MAX_RETRIES", 2),
        }
    }
}
