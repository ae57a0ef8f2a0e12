use serde::{Deserialize, Serialize};

/// A single meter reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Timestamp in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Cumulative energy in kWh
    pub value: f64,
}

impl MeterReading {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Request body for POST /energy_cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyCostRequest {
    pub readings: Vec<MeterReading>,
}

impl EnergyCostRequest {
    /// Time range covered by the readings, taken from the first and last reading.
    ///
    /// Returns None for an empty request.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        let first = self.readings.first()?;
        let last = self.readings.last()?;
        Some((first.timestamp, last.timestamp))
    }
}

/// Response body for POST /energy_cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyCostResponse {
    /// Total cost in euros
    pub total_cost: f64,
}
