//! Short-horizon demand estimation.
//!
//! Model:
//! - Weighted moving average over the most recent week of observations, with
//!   linearly increasing weights (the newest day counts 7x the oldest).
//! - 95% interval from the population standard deviation of the window.
//! - Confidence grows linearly with history length, capped at 0.95.

use serde::{Deserialize, Serialize};

use crate::history::SalesObservation;

/// Number of observations the moving average looks at, and the minimum
/// history required to produce a non-degenerate forecast.
const WMA_WINDOW: usize = 7;

/// History length at which confidence saturates.
const FULL_CONFIDENCE_SAMPLES: f64 = 30.0;

/// Confidence ceiling; the model never claims more than this.
const CONFIDENCE_CAP: f64 = 0.95;

/// Two-sided 95% z-value.
const Z_95: f64 = 1.96;

/// Forecast horizon in days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    SevenDays,
    ThirtyDays,
}

impl Horizon {
    pub fn days(&self) -> u32 {
        match self {
            Horizon::SevenDays => 7,
            Horizon::ThirtyDays => 30,
        }
    }
}

/// How a forecast was produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Fewer than a week of observations; no extrapolation attempted.
    InsufficientData,
    WeightedMovingAverage,
}

/// A short-horizon demand estimate with a confidence interval.
///
/// Derived, never stored: recomputed on every planning cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    /// Estimated demand per day.
    pub daily_rate: f64,
    /// Estimated total demand over the horizon.
    pub horizon_total: i64,
    /// Lower bound of the 95% interval (floored at 0).
    pub interval_low: i64,
    /// Upper bound of the 95% interval.
    pub interval_high: i64,
    /// Confidence in \[0, 0.95\].
    pub confidence: f64,
    pub method: ForecastMethod,
    /// Number of observations the forecast was computed from.
    pub sample_size: usize,
}

impl DemandForecast {
    fn insufficient(sample_size: usize) -> Self {
        Self {
            daily_rate: 0.0,
            horizon_total: 0,
            interval_low: 0,
            interval_high: 0,
            confidence: 0.0,
            method: ForecastMethod::InsufficientData,
            sample_size,
        }
    }
}

/// Forecast demand over `horizon` from an ordered (oldest to newest) sales
/// history.
///
/// Fewer than a week of observations is a hard floor: the result is the
/// degenerate insufficient-data forecast, never an error or a panic.
pub fn forecast_demand(observations: &[SalesObservation], horizon: Horizon) -> DemandForecast {
    if observations.len() < WMA_WINDOW {
        return DemandForecast::insufficient(observations.len());
    }

    let window = &observations[observations.len() - WMA_WINDOW..];

    // Linear weights 1..=7, oldest to newest.
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (i, obs) in window.iter().enumerate() {
        let weight = (i + 1) as f64;
        weighted_sum += obs.quantity * weight;
        weight_total += weight;
    }
    let daily_rate = weighted_sum / weight_total;

    let horizon_total = (daily_rate * f64::from(horizon.days())).round() as i64;

    let quantities: Vec<f64> = observations.iter().map(|o| o.quantity).collect();
    let margin = stddev_population(&quantities) * Z_95;

    DemandForecast {
        daily_rate,
        horizon_total,
        interval_low: ((horizon_total as f64 - margin).round() as i64).max(0),
        interval_high: (horizon_total as f64 + margin).round() as i64,
        confidence: (observations.len() as f64 / FULL_CONFIDENCE_SAMPLES).min(CONFIDENCE_CAP),
        method: ForecastMethod::WeightedMovingAverage,
        sample_size: observations.len(),
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// Population standard deviation (n), deterministic.
fn stddev_population(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs
        .iter()
        .map(|x| {
            let d = x - m;
            d * d
        })
        .sum::<f64>()
        / (xs.len() as f64);
    var.sqrt()
}
