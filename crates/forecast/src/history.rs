//! Sales history input contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelfwise_core::{DomainResult, LocationId, ProductId};

/// One historical demand sample for a (product, location) pair.
///
/// Observations are append-only and immutable once recorded; the owning
/// sales subsystem accumulates them over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesObservation {
    pub date: NaiveDate,
    pub quantity: f64,
}

impl SalesObservation {
    pub fn new(date: NaiveDate, quantity: f64) -> Self {
        Self { date, quantity }
    }
}

/// Read access to recorded sales history.
///
/// Implementations must return observations ordered oldest to newest. The
/// engine never fabricates history: an empty result simply yields the
/// degenerate insufficient-data forecast downstream.
pub trait SalesHistoryRepository: Send + Sync {
    fn fetch(
        &self,
        product_id: ProductId,
        location_id: LocationId,
    ) -> DomainResult<Vec<SalesObservation>>;
}

impl<T: SalesHistoryRepository + ?Sized> SalesHistoryRepository for std::sync::Arc<T> {
    fn fetch(
        &self,
        product_id: ProductId,
        location_id: LocationId,
    ) -> DomainResult<Vec<SalesObservation>> {
        (**self).fetch(product_id, location_id)
    }
}
