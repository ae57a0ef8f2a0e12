//! Market pricing
//!
//! - source: the `PriceSource` abstraction and its fetch errors
//! - awattar: `PriceSource` backed by the aWATTar market data API
//! - calculator: prices meter-reading intervals against market buckets

pub mod awattar;
pub mod calculator;
pub mod source;

pub use awattar::AwattarClient;
pub use calculator::{calculate_energy_cost, CostBreakdown};
pub use source::{FetchError, PriceSource, StaticPriceSource};
