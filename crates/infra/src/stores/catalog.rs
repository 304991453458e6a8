//! In-memory product catalog for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shelfwise_core::{DomainResult, LocationId, ProductId};

use crate::planning::{PlannedProduct, ProductCatalog, ProductPlan};

#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    entries: RwLock<Vec<PlannedProduct>>,
    plans: RwLock<HashMap<(ProductId, LocationId), ProductPlan>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn add(&self, entry: PlannedProduct) {
        self.entries.write().unwrap().push(entry);
    }

    /// The plan last written for a pair, if any. Test helper.
    pub fn plan_for(&self, product_id: ProductId, location_id: LocationId) -> Option<ProductPlan> {
        self.plans
            .read()
            .unwrap()
            .get(&(product_id, location_id))
            .cloned()
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn planned_products(&self) -> DomainResult<Vec<PlannedProduct>> {
        Ok(self.entries.read().unwrap().clone())
    }

    fn store_plan(
        &self,
        product_id: ProductId,
        location_id: LocationId,
        plan: &ProductPlan,
    ) -> DomainResult<()> {
        self.plans
            .write()
            .unwrap()
            .insert((product_id, location_id), plan.clone());
        Ok(())
    }
}

impl ProductCatalog for Arc<InMemoryProductCatalog> {
    fn planned_products(&self) -> DomainResult<Vec<PlannedProduct>> {
        (**self).planned_products()
    }

    fn store_plan(
        &self,
        product_id: ProductId,
        location_id: LocationId,
        plan: &ProductPlan,
    ) -> DomainResult<()> {
        (**self).store_plan(product_id, location_id, plan)
    }
}
