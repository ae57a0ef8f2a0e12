use crate::models::{MarketPriceBucket, MeterReading};

/// Result of pricing a sequence of meter readings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    /// Total cost in euros
    pub total_cost: f64,
    /// Number of consumption intervals that matched a price bucket
    pub priced_intervals: usize,
    /// Start timestamps of intervals that matched no price bucket
    pub unpriced: Vec<i64>,
}

impl CostBreakdown {
    pub fn has_gaps(&self) -> bool {
        !self.unpriced.is_empty()
    }
}

/// Calculate the energy cost of consecutive meter readings.
///
/// Each pair of readings (A, B) is charged `B.value - A.value` kWh at the
/// price of the first bucket containing `A.timestamp`. An interval with no
/// matching bucket contributes nothing and is listed in
/// [`CostBreakdown::unpriced`]. Meter decreases are not rejected and reduce
/// the total.
pub fn calculate_energy_cost(
    readings: &[MeterReading],
    prices: &[MarketPriceBucket],
) -> CostBreakdown {
    let mut breakdown = CostBreakdown::default();

    for pair in readings.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let consumption = b.value - a.value;

        match find_bucket(prices, a.timestamp) {
            Some(bucket) => {
                breakdown.total_cost += consumption * bucket.price_per_kwh();
                breakdown.priced_intervals += 1;
            }
            None => breakdown.unpriced.push(a.timestamp),
        }
    }

    breakdown
}

/// First bucket whose [start, end) contains `timestamp`
fn find_bucket(prices: &[MarketPriceBucket], timestamp: i64) -> Option<&MarketPriceBucket> {
    prices.iter().find(|bucket| bucket.contains(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_two_readings_single_bucket() {
        let readings = [MeterReading::new(0, 100.0), MeterReading::new(HOUR / 2, 102.5)];
        let prices = [MarketPriceBucket::new(0, HOUR, 80.0)];

        let breakdown = calculate_energy_cost(&readings, &prices);

        // 2.5 kWh at 0.08 EUR/kWh
        assert_close(breakdown.total_cost, 0.2);
        assert_eq!(breakdown.priced_intervals, 1);
        assert!(!breakdown.has_gaps());
    }

    #[test]
    fn test_many_readings_single_bucket_equals_total_consumption() {
        let readings = [
            MeterReading::new(0, 10.0),
            MeterReading::new(600_000, 10.4),
            MeterReading::new(1_200_000, 11.1),
            MeterReading::new(1_800_000, 12.0),
        ];
        let prices = [MarketPriceBucket::new(0, HOUR, 250.0)];

        let breakdown = calculate_energy_cost(&readings, &prices);

        assert_close(breakdown.total_cost, (12.0 - 10.0) * 250.0 / 1000.0);
        assert_eq!(breakdown.priced_intervals, 3);
    }

    #[test]
    fn test_readings_across_bucket_boundary() {
        let readings = [
            MeterReading::new(0, 0.0),
            MeterReading::new(HOUR, 1.0),
            MeterReading::new(2 * HOUR, 3.0),
        ];
        let prices = [
            MarketPriceBucket::new(0, HOUR, 100.0),
            MarketPriceBucket::new(HOUR, 2 * HOUR, 200.0),
        ];

        let breakdown = calculate_energy_cost(&readings, &prices);

        // 1 kWh at 0.1 + 2 kWh at 0.2
        assert_close(breakdown.total_cost, 0.5);
        assert_eq!(breakdown.priced_intervals, 2);
    }

    #[test]
    fn test_interval_is_priced_by_its_start() {
        // Second reading sits exactly on the boundary; the last reading
        // never needs a bucket of its own.
        let readings = [MeterReading::new(HOUR - 1, 5.0), MeterReading::new(2 * HOUR + 10, 6.0)];
        let prices = [
            MarketPriceBucket::new(0, HOUR, 40.0),
            MarketPriceBucket::new(HOUR, 2 * HOUR, 400.0),
        ];

        let breakdown = calculate_energy_cost(&readings, &prices);
        assert_close(breakdown.total_cost, 0.04);
    }

    #[test]
    fn test_unmatched_reading_contributes_zero() {
        let readings = [
            MeterReading::new(0, 0.0),
            MeterReading::new(HOUR, 1.0),
            MeterReading::new(2 * HOUR, 2.0),
        ];
        // Nothing covers the second hour
        let prices = [MarketPriceBucket::new(0, HOUR, 100.0)];

        let breakdown = calculate_energy_cost(&readings, &prices);

        assert_close(breakdown.total_cost, 0.1);
        assert_eq!(breakdown.priced_intervals, 1);
        assert_eq!(breakdown.unpriced, vec![HOUR]);
        assert!(breakdown.has_gaps());
    }

    #[test]
    fn test_first_matching_bucket_wins() {
        let readings = [MeterReading::new(500, 0.0), MeterReading::new(600, 1.0)];
        let prices = [
            MarketPriceBucket::new(0, 1_000, 10.0),
            MarketPriceBucket::new(0, 1_000, 999.0),
        ];

        let breakdown = calculate_energy_cost(&readings, &prices);
        assert_close(breakdown.total_cost, 0.01);
    }

    #[test]
    fn test_meter_decrease_subtracts() {
        let readings = [MeterReading::new(0, 10.0), MeterReading::new(1_000, 8.0)];
        let prices = [MarketPriceBucket::new(0, HOUR, 100.0)];

        let breakdown = calculate_energy_cost(&readings, &prices);
        assert_close(breakdown.total_cost, -0.2);
    }

    #[test]
    fn test_negative_price() {
        let readings = [MeterReading::new(0, 0.0), MeterReading::new(1_000, 4.0)];
        let prices = [MarketPriceBucket::new(0, HOUR, -25.0)];

        let breakdown = calculate_energy_cost(&readings, &prices);
        assert_close(breakdown.total_cost, -0.1);
    }

    #[test]
    fn test_fewer_than_two_readings() {
        let prices = [MarketPriceBucket::new(0, HOUR, 100.0)];

        assert_eq!(calculate_energy_cost(&[], &prices), CostBreakdown::default());
        assert_eq!(
            calculate_energy_cost(&[MeterReading::new(0, 1.0)], &prices),
            CostBreakdown::default()
        );
    }

    #[test]
    fn test_no_prices() {
        let readings = [MeterReading::new(0, 0.0), MeterReading::new(1_000, 1.0)];

        let breakdown = calculate_energy_cost(&readings, &[]);
        assert_eq!(breakdown.total_cost, 0.0);
        assert_eq!(breakdown.unpriced, vec![0]);
    }
}
