use crate::models::MarketPriceBucket;
use async_trait::async_trait;

/// Errors raised while retrieving market prices
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure, including timeouts
    #[error("request to price service failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("price service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Upstream body was not the expected market data document
    #[error("failed to parse price service response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request(e) if e.is_timeout() => "timeout",
            Self::Request(_) => "request",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
        }
    }
}

/// Anything that can supply market price buckets for a time range.
///
/// The production implementation talks to the aWATTar market data API;
/// tests substitute [`StaticPriceSource`].
#[async_trait]
pub trait PriceSource: Send + Sync + 'static {
    /// Source name (e.g. "awattar"), used in logs and metrics
    fn name(&self) -> &str;

    /// Fetch the price buckets covering `[start_ms, end_ms]`.
    ///
    /// Buckets are returned in upstream order, which is expected to be
    /// time-ordered and non-overlapping.
    async fn fetch_prices(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<MarketPriceBucket>, FetchError>;
}

/// Price source backed by a fixed list of buckets
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    buckets: Vec<MarketPriceBucket>,
}

impl StaticPriceSource {
    pub fn new(buckets: Vec<MarketPriceBucket>) -> Self {
        Self { buckets }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_prices(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<MarketPriceBucket>, FetchError> {
        // Same overlap semantics as the upstream query
        Ok(self
            .buckets
            .iter()
            .filter(|b| b.end > start_ms && b.start <= end_ms)
            .copied()
            .collect())
    }
}
