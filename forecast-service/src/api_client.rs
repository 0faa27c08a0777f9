use crate::cache::ForecastCache;
use crate::sanitize::sanitize_series;
use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::{ForecastSeries, RawForecastResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

/// Seven days of 3-hour samples
pub const DEFAULT_SAMPLE_COUNT: u32 = 56;

pub struct OpenWeatherMapClient {
    http_client: HttpClient,
    cache: Arc<ForecastCache>,
    base_url: String,
    api_key: String,
    sample_count: u32,
    rate_limiter: Arc<Semaphore>,
    last_request_time: Arc<tokio::sync::Mutex<Option<Instant>>>,
    min_request_interval: Duration,
}

impl OpenWeatherMapClient {
    pub fn new(
        http_client: HttpClient,
        cache: Arc<ForecastCache>,
        base_url: String,
        api_key: String,
        sample_count: u32,
        rate_limit_per_minute: u32,
    ) -> Self {
        let permits = rate_limit_per_minute.max(1) as usize;
        let min_request_interval =
            Duration::from_millis(60_000 / rate_limit_per_minute.max(1) as u64);
        Self {
            http_client,
            cache,
            base_url,
            api_key,
            sample_count,
            rate_limiter: Arc::new(Semaphore::new(permits)),
            last_request_time: Arc::new(tokio::sync::Mutex::new(None)),
            min_request_interval,
        }
    }

    #[instrument(skip(self), fields(place = %place))]
    pub async fn get_forecast(&self, place: &str) -> Result<ForecastSeries, AppError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(AppError::validation("Place name must not be empty"));
        }

        if let Some(cached) = self.cache.get(place).await {
            info!(place = %place, "Cache hit");
            return Ok(cached);
        }

        let _permit = self
            .rate_limiter
            .acquire()
            .await
            .map_err(|e| AppError::internal(format!("Rate limiter error: {}", e)))?;

        self.debounce().await;

        info!(place = %place, count = self.sample_count, "Fetching forecast from API");

        let raw: RawForecastResponse = self.http_client.get_json(&self.forecast_url(place)).await?;
        let series = sanitize_series(raw)?;

        info!(
            place = %place,
            samples = series.samples.len(),
            location = %series.location.name,
            "Forecast received"
        );

        self.cache.set(place, series.clone()).await;

        Ok(series)
    }

    fn forecast_url(&self, place: &str) -> String {
        format!(
            "{}?q={}&appid={}&cnt={}",
            self.base_url,
            urlencoding::encode(place),
            urlencoding::encode(&self.api_key),
            self.sample_count
        )
    }

    async fn debounce(&self) {
        let mut last_request = self.last_request_time.lock().await;
        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_request_interval {
                let wait_time = self.min_request_interval - elapsed;
                warn!(wait_ms = wait_time.as_millis(), "Debouncing request");
                tokio::time::sleep(wait_time).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}
