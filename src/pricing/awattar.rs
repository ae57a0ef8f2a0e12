use crate::{
    config::PricingConfig,
    metrics,
    models::{MarketDataResponse, MarketPriceBucket},
    pricing::source::{FetchError, PriceSource},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// aWATTar market data API client
#[derive(Debug, Clone)]
pub struct AwattarClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AwattarClient {
    pub fn new(client: Client, config: &PricingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PriceSource for AwattarClient {
    fn name(&self) -> &str {
        "awattar"
    }

    async fn fetch_prices(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<MarketPriceBucket>, FetchError> {
        let start = Instant::now();
        let result = fetch_market_data(
            &self.client,
            &self.base_url,
            self.timeout,
            start_ms,
            end_ms,
        )
        .await;
        metrics::record_price_fetch(self.name(), start.elapsed());

        match &result {
            Ok(buckets) => {
                tracing::debug!(
                    source = self.name(),
                    start = start_ms,
                    end = end_ms,
                    buckets = buckets.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "Fetched market prices"
                );
            }
            Err(e) => {
                metrics::record_price_fetch_error(self.name(), e.kind());
                tracing::warn!(
                    source = self.name(),
                    start = start_ms,
                    end = end_ms,
                    error = %e,
                    "Market price fetch failed"
                );
            }
        }

        result
    }
}

async fn fetch_market_data(
    client: &Client,
    base_url: &str,
    timeout: Duration,
    start_ms: i64,
    end_ms: i64,
) -> Result<Vec<MarketPriceBucket>, FetchError> {
    let response = client
        .get(base_url)
        .query(&[("start", start_ms), ("end", end_ms)])
        .header("Accept", "application/json")
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FetchError::Status { status, body });
    }

    let market_data: MarketDataResponse = serde_json::from_str(&body)?;
    Ok(market_data.data.into_iter().map(MarketPriceBucket::from).collect())
}
