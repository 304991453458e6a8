//! In-memory inventory snapshot provider for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use shelfwise_alerts::stores::{InventoryProvider, StockPosition, StoreError};
use shelfwise_core::{LocationId, OrganizationId};

/// In-memory stand-in for the inventory subsystem's read API.
#[derive(Debug, Default)]
pub struct InMemoryInventoryProvider {
    organizations: RwLock<Vec<OrganizationId>>,
    locations: RwLock<HashMap<OrganizationId, Vec<LocationId>>>,
    positions: RwLock<HashMap<(OrganizationId, LocationId), Vec<StockPosition>>>,
}

impl InMemoryInventoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn add_organization(&self, organization_id: OrganizationId) {
        self.organizations.write().unwrap().push(organization_id);
    }

    pub fn add_location(&self, organization_id: OrganizationId, location_id: LocationId) {
        self.locations
            .write()
            .unwrap()
            .entry(organization_id)
            .or_default()
            .push(location_id);
    }

    /// Insert or replace the snapshot row for one product at one location.
    pub fn put_position(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
        position: StockPosition,
    ) {
        let mut positions = self.positions.write().unwrap();
        let rows = positions.entry((organization_id, location_id)).or_default();
        rows.retain(|p| p.product_id != position.product_id);
        rows.push(position);
    }

}

impl InventoryProvider for InMemoryInventoryProvider {
    fn active_organizations(&self) -> Result<Vec<OrganizationId>, StoreError> {
        Ok(self.organizations.read().unwrap().clone())
    }

    fn active_locations(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<LocationId>, StoreError> {
        Ok(self
            .locations
            .read()
            .unwrap()
            .get(&organization_id)
            .cloned()
            .unwrap_or_default())
    }

    fn stock_positions(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
    ) -> Result<Vec<StockPosition>, StoreError> {
        Ok(self
            .positions
            .read()
            .unwrap()
            .get(&(organization_id, location_id))
            .cloned()
            .unwrap_or_default())
    }
}
