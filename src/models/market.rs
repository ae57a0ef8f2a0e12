use serde::{Deserialize, Serialize};

/// A time-bucketed wholesale electricity price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketPriceBucket {
    /// Bucket start in milliseconds (inclusive)
    pub start: i64,
    /// Bucket end in milliseconds (exclusive)
    pub end: i64,
    /// Price in EUR/MWh
    pub price: f64,
}

impl MarketPriceBucket {
    pub fn new(start: i64, end: i64, price: f64) -> Self {
        Self { start, end, price }
    }

    /// Whether `timestamp` falls within the half-open interval [start, end)
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }

    /// Price converted from EUR/MWh to EUR/kWh
    pub fn price_per_kwh(&self) -> f64 {
        self.price / 1000.0
    }
}

/// Market data response from the aWATTar API
///
/// Only the fields used for pricing are kept; anything else the upstream
/// sends (e.g. `unit`, `object`) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataResponse {
    pub data: Vec<MarketPrice>,
}

/// Single entry of the aWATTar `data` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPrice {
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    /// Price in EUR/MWh
    #[serde(rename = "marketprice")]
    pub market_price: f64,
}

impl From<MarketPrice> for MarketPriceBucket {
    fn from(price: MarketPrice) -> Self {
        Self {
            start: price.start_timestamp,
            end: price.end_timestamp,
            price: price.market_price,
        }
    }
}
