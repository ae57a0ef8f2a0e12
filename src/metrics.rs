use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder.
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "energy_cost_requests_total",
        "Total number of energy cost requests by response status"
    );
    describe_histogram!(
        "energy_cost_price_fetch_duration_seconds",
        "Market price fetch duration in seconds"
    );
    describe_counter!(
        "energy_cost_price_fetch_errors_total",
        "Total number of failed market price fetches"
    );
    describe_counter!(
        "energy_cost_unpriced_intervals_total",
        "Consumption intervals with no matching market price"
    );
    describe_gauge!("energy_cost_info", "Service version information");

    gauge!("energy_cost_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a handled request
pub fn record_request(status: u16) {
    counter!("energy_cost_requests_total", "status" => status.to_string()).increment(1);
}

/// Record price fetch duration
pub fn record_price_fetch(source: &str, duration: Duration) {
    histogram!(
        "energy_cost_price_fetch_duration_seconds",
        "source" => source.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record a failed price fetch
pub fn record_price_fetch_error(source: &str, kind: &str) {
    counter!(
        "energy_cost_price_fetch_errors_total",
        "source" => source.to_string(),
        "kind" => kind.to_string(),
    )
    .increment(1);
}

/// Record intervals priced at zero for lack of a bucket
pub fn record_unpriced_intervals(count: usize) {
    counter!("energy_cost_unpriced_intervals_total").increment(count as u64);
}
