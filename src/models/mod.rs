pub mod market;
pub mod meter;

pub use market::{MarketDataResponse, MarketPrice, MarketPriceBucket};
pub use meter::{EnergyCostRequest, EnergyCostResponse, MeterReading};
