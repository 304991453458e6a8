//! Demand forecasting over per-product, per-location sales history.
//!
//! This crate contains business rules for short-horizon demand estimation,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). History is supplied by callers through [`SalesHistoryRepository`].

pub mod demand;
pub mod history;

pub use demand::{DemandForecast, ForecastMethod, Horizon, forecast_demand};
pub use history::{SalesHistoryRepository, SalesObservation};
