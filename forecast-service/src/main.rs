use common::http_client::HttpClient;
use common::tracing::init_from_env;
use forecast_service::{api_client, app, cache, config, handlers};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_from_env();

    let config = config::Config::from_env();
    if config.openweather_api_key.is_empty() {
        warn!("OPENWEATHER_API_KEY is not set, upstream requests will be rejected");
    }

    let cache = Arc::new(cache::ForecastCache::with_ttl(config.cache_ttl_seconds));
    let http_client = HttpClient::new(config.http_timeout_seconds, config.http_max_retries)?;
    let client = Arc::new(api_client::OpenWeatherMapClient::new(
        http_client,
        cache,
        config.openweather_url.clone(),
        config.openweather_api_key.clone(),
        config.sample_count,
        config.rate_limit_per_minute,
    ));

    let state = handlers::AppState { client };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Forecast service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Forecast service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
