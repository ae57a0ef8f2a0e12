pub mod energy_cost;
pub mod health;
pub mod metrics_handler;
