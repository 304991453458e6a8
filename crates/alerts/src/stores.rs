//! Repository contracts the monitor is built on.
//!
//! The inventory/sales subsystem owns the data; this engine reads snapshots
//! and writes alerts through these traits. `shelfwise-infra` provides
//! in-memory implementations for tests and local development.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfwise_core::{LocationId, OrganizationId, ProductId};

use crate::alert::{Alert, AlertId, AlertKind, AlertSeverity};
use crate::analysis::{AnalysisId, AnalysisRecord};

/// Repository error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("alert not found: {0}")]
    NotFound(AlertId),
    #[error("alert already exists: {0}")]
    AlreadyExists(AlertId),
    #[error("analysis not found: {0}")]
    AnalysisNotFound(AnalysisId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// One row of the inventory snapshot: a product's stock at a location,
/// annotated with its current 7-day demand forecast (if one has been
/// computed by the planning cycle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPosition {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity_on_hand: f64,
    /// Forecasted total demand over the next 7 days; `None` means the
    /// product is not yet monitorable.
    pub forecast_7d: Option<i64>,
}

/// Read-only view of the inventory subsystem's snapshot.
pub trait InventoryProvider: Send + Sync {
    fn active_organizations(&self) -> Result<Vec<OrganizationId>, StoreError>;

    fn active_locations(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<LocationId>, StoreError>;

    fn stock_positions(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
    ) -> Result<Vec<StockPosition>, StoreError>;
}

/// Alert persistence.
pub trait AlertStore: Send + Sync {
    fn insert(&self, alert: Alert) -> Result<AlertId, StoreError>;

    fn update(&self, alert: &Alert) -> Result<(), StoreError>;

    fn delete(&self, alert_id: AlertId) -> Result<(), StoreError>;

    /// Find an unread alert for the same tuple created at or after `since`.
    /// This is the deduplication check; best-effort, not linearizable.
    fn find_recent_unread(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
        product_id: ProductId,
        kind: AlertKind,
        severity: AlertSeverity,
        since: DateTime<Utc>,
    ) -> Result<Option<Alert>, StoreError>;

    fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Alert>, StoreError>;

    /// Alerts acknowledged strictly before `cutoff` (retention sweep input).
    fn list_read_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Alert>, StoreError>;

    /// Unread alerts whose `expires_at` has passed (expiry sweep input).
    fn list_unread_expired(&self, now: DateTime<Utc>) -> Result<Vec<Alert>, StoreError>;
}

/// Price-analysis persistence, as far as cleanup needs it.
pub trait AnalysisStore: Send + Sync {
    fn list_all(&self) -> Result<Vec<AnalysisRecord>, StoreError>;

    fn delete(&self, analysis_id: AnalysisId) -> Result<(), StoreError>;
}

impl<T: InventoryProvider + ?Sized> InventoryProvider for Arc<T> {
    fn active_organizations(&self) -> Result<Vec<OrganizationId>, StoreError> {
        (**self).active_organizations()
    }

    fn active_locations(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<LocationId>, StoreError> {
        (**self).active_locations(organization_id)
    }

    fn stock_positions(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
    ) -> Result<Vec<StockPosition>, StoreError> {
        (**self).stock_positions(organization_id, location_id)
    }
}

impl<T: AlertStore + ?Sized> AlertStore for Arc<T> {
    fn insert(&self, alert: Alert) -> Result<AlertId, StoreError> {
        (**self).insert(alert)
    }

    fn update(&self, alert: &Alert) -> Result<(), StoreError> {
        (**self).update(alert)
    }

    fn delete(&self, alert_id: AlertId) -> Result<(), StoreError> {
        (**self).delete(alert_id)
    }

    fn find_recent_unread(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
        product_id: ProductId,
        kind: AlertKind,
        severity: AlertSeverity,
        since: DateTime<Utc>,
    ) -> Result<Option<Alert>, StoreError> {
        (**self).find_recent_unread(organization_id, location_id, product_id, kind, severity, since)
    }

    fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Alert>, StoreError> {
        (**self).list_for_organization(organization_id)
    }

    fn list_read_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Alert>, StoreError> {
        (**self).list_read_before(cutoff)
    }

    fn list_unread_expired(&self, now: DateTime<Utc>) -> Result<Vec<Alert>, StoreError> {
        (**self).list_unread_expired(now)
    }
}

impl<T: AnalysisStore + ?Sized> AnalysisStore for Arc<T> {
    fn list_all(&self) -> Result<Vec<AnalysisRecord>, StoreError> {
        (**self).list_all()
    }

    fn delete(&self, analysis_id: AnalysisId) -> Result<(), StoreError> {
        (**self).delete(analysis_id)
    }
}
