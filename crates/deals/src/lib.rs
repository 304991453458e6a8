//! Deal scoring: is traveling to a cheaper offer worth the trip?
//!
//! Stateless and pure; safe to call concurrently without synchronization.
//! Consumes only coordinates and price data, produces a [`DealQuote`] that is
//! discarded within a single request/response cycle.

pub mod geo;
pub mod score;

pub use geo::{Coordinate, haversine_km};
pub use score::{DealCategory, DealQuote, DealRequest, TravelParams, score_deal};
