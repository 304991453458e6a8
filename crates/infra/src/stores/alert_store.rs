//! In-memory alert store for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use shelfwise_alerts::alert::{Alert, AlertId, AlertKind, AlertSeverity};
use shelfwise_alerts::stores::{AlertStore, StoreError};
use shelfwise_core::{LocationId, OrganizationId, ProductId};

/// In-memory alert store.
///
/// The dedup check-and-create is serialized only by the `RwLock`; like the
/// production store, this is best-effort, not linearizable.
#[derive(Debug, Default)]
pub struct InMemoryAlertStore {
    alerts: RwLock<HashMap<AlertId, Alert>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// All alerts, oldest first. Test helper.
    pub fn all(&self) -> Vec<Alert> {
        let alerts = self.alerts.read().unwrap();
        let mut result: Vec<_> = alerts.values().cloned().collect();
        result.sort_by_key(|a| a.created_at);
        result
    }
}

impl AlertStore for InMemoryAlertStore {
    fn insert(&self, alert: Alert) -> Result<AlertId, StoreError> {
        let mut alerts = self.alerts.write().unwrap();
        if alerts.contains_key(&alert.id) {
            return Err(StoreError::AlreadyExists(alert.id));
        }
        let id = alert.id;
        alerts.insert(id, alert);
        Ok(id)
    }

    fn update(&self, alert: &Alert) -> Result<(), StoreError> {
        let mut alerts = self.alerts.write().unwrap();
        if !alerts.contains_key(&alert.id) {
            return Err(StoreError::NotFound(alert.id));
        }
        alerts.insert(alert.id, alert.clone());
        Ok(())
    }

    fn delete(&self, alert_id: AlertId) -> Result<(), StoreError> {
        let mut alerts = self.alerts.write().unwrap();
        alerts
            .remove(&alert_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(alert_id))
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
        let alerts = self.alerts.read().unwrap();
        let mut matches: Vec<_> = alerts
            .values()
            .filter(|a| {
                a.organization_id == organization_id
                    && a.location_id == location_id
                    && a.product_id == product_id
                    && a.kind == kind
                    && a.severity == severity
                    && !a.is_read()
                    && a.created_at >= since
            })
            .cloned()
            .collect();
        matches.sort_by_key(|a| a.created_at);
        Ok(matches.pop())
    }

    fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().unwrap();
        let mut result: Vec<_> = alerts
            .values()
            .filter(|a| a.organization_id == organization_id)
            .cloned()
            .collect();
        result.sort_by_key(|a| a.created_at);
        Ok(result)
    }

    fn list_read_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().unwrap();
        Ok(alerts
            .values()
            .filter(|a| a.read_at.is_some_and(|t| t < cutoff))
            .cloned()
            .collect())
    }

    fn list_unread_expired(&self, now: DateTime<Utc>) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().unwrap();
        Ok(alerts
            .values()
            .filter(|a| !a.is_read() && a.is_expired(now))
            .cloned()
            .collect())
    }
}
