use crate::{
    error::AppError,
    metrics,
    models::{EnergyCostRequest, EnergyCostResponse},
    pricing::{calculate_energy_cost, PriceSource},
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

/// Application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub price_source: Arc<dyn PriceSource>,
    /// Fail instead of pricing uncovered intervals at zero
    pub reject_unpriced_intervals: bool,
}

impl AppState {
    pub fn new(price_source: Arc<dyn PriceSource>, reject_unpriced_intervals: bool) -> Self {
        Self {
            price_source,
            reject_unpriced_intervals,
        }
    }
}

/// Handle POST /energy_cost
pub async fn handle_energy_cost(
    State(state): State<AppState>,
    payload: Result<Json<EnergyCostRequest>, JsonRejection>,
) -> Result<Json<EnergyCostResponse>, AppError> {
    let result = energy_cost(&state, payload).await;

    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status().as_u16(),
    };
    metrics::record_request(status);

    result
}

async fn energy_cost(
    state: &AppState,
    payload: Result<Json<EnergyCostRequest>, JsonRejection>,
) -> Result<Json<EnergyCostResponse>, AppError> {
    let start = Instant::now();
    let Json(request) = payload?;

    if request.readings.len() < 2 {
        return Err(AppError::InvalidRequest(
            "At least two meter readings are required".to_string(),
        ));
    }

    let (start_ms, end_ms) = request
        .time_range()
        .ok_or_else(|| AppError::InternalError("empty readings after validation".to_string()))?;

    tracing::info!(
        readings = request.readings.len(),
        start = start_ms,
        end = end_ms,
        from = %format_timestamp(start_ms),
        to = %format_timestamp(end_ms),
        "Handling energy cost request"
    );

    let prices = state.price_source.fetch_prices(start_ms, end_ms).await?;
    let breakdown = calculate_energy_cost(&request.readings, &prices);

    if breakdown.has_gaps() {
        metrics::record_unpriced_intervals(breakdown.unpriced.len());
        tracing::warn!(
            unpriced = breakdown.unpriced.len(),
            first_unpriced = breakdown.unpriced[0],
            buckets = prices.len(),
            "Readings not covered by any market price bucket"
        );

        if state.reject_unpriced_intervals {
            return Err(AppError::UnpricedIntervals {
                count: breakdown.unpriced.len(),
                first_timestamp: breakdown.unpriced[0],
            });
        }
    }

    // JSON has no representation for inf/NaN
    if !breakdown.total_cost.is_finite() {
        return Err(AppError::InvalidRequest(
            "Meter readings produce a non-finite energy cost".to_string(),
        ));
    }

    tracing::info!(
        total_cost = breakdown.total_cost,
        priced_intervals = breakdown.priced_intervals,
        duration_ms = start.elapsed().as_millis(),
        "Completed energy cost request"
    );

    Ok(Json(EnergyCostResponse {
        total_cost: breakdown.total_cost,
    }))
}

/// RFC 3339 rendering of a millisecond timestamp for logs
fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| format!("{}ms", ms))
}
