//! In-memory sales history for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shelfwise_core::{DomainResult, LocationId, ProductId};
use shelfwise_forecast::{SalesHistoryRepository, SalesObservation};

#[derive(Debug, Default)]
pub struct InMemorySalesHistory {
    series: RwLock<HashMap<(ProductId, LocationId), Vec<SalesObservation>>>,
}

impl InMemorySalesHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn record(
        &self,
        product_id: ProductId,
        location_id: LocationId,
        observation: SalesObservation,
    ) {
        self.series
            .write()
            .unwrap()
            .entry((product_id, location_id))
            .or_default()
            .push(observation);
    }
}

impl SalesHistoryRepository for InMemorySalesHistory {
    fn fetch(
        &self,
        product_id: ProductId,
        location_id: LocationId,
    ) -> DomainResult<Vec<SalesObservation>> {
        let mut observations = self
            .series
            .read()
            .unwrap()
            .get(&(product_id, location_id))
            .cloned()
            .unwrap_or_default();
        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }
}
