use common::models::ForecastSeries;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

struct CacheEntry {
    series: ForecastSeries,
    expires_at: Instant,
}

/// Sanitized series per place, keyed case-insensitively
pub struct ForecastCache {
    cache: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

fn cache_key(place: &str) -> String {
    place.trim().to_lowercase()
}

impl ForecastCache {
    pub fn with_ttl(ttl_seconds: u64) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    pub async fn get(&self, place: &str) -> Option<ForecastSeries> {
        let cache = self.cache.read().await;
        if let Some(entry) = cache.get(&cache_key(place))
            && entry.expires_at > Instant::now()
        {
            return Some(entry.series.clone());
        }
        None
    }

    pub async fn set(&self, place: &str, series: ForecastSeries) {
        let mut cache = self.cache.write().await;
        let now = Instant::now();
        cache.retain(|_, entry| entry.expires_at > now);
        cache.insert(
            cache_key(place),
            CacheEntry {
                series,
                expires_at: now + self.ttl,
            },
        );
    }
}
