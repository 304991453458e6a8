//! Periodic stock-out scan and alert cleanup.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use shelfwise_core::{LocationId, OrganizationId};

use crate::alert::{Alert, AlertKind, AlertSeverity};
use crate::stores::{AlertStore, AnalysisStore, InventoryProvider, StockPosition, StoreError};

/// Rolling window within which a repeat detection must not produce a new
/// alert.
pub const DEDUP_WINDOW_HOURS: i64 = 24;

/// Alerts stay around this long after being read, then the retention sweep
/// deletes them.
pub const READ_RETENTION_DAYS: i64 = 7;

/// The horizon the monitored forecast totals cover.
const FORECAST_HORIZON_DAYS: f64 = 7.0;

/// Batch-level failure: the scan could not start or finish. Per-position
/// failures are logged and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("inventory enumeration failed: {0}")]
    Enumeration(#[source] StoreError),

    #[error("cleanup sweep failed: {0}")]
    Cleanup(#[source] StoreError),
}

/// Counters for one scan invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ScanReport {
    pub positions_scanned: u64,
    pub alerts_created: u64,
    pub deduplicated: u64,
    pub skipped_no_forecast: u64,
    pub failures: u64,
    pub retention_deleted: u64,
    pub expired_acknowledged: u64,
    pub analyses_deleted: u64,
}

/// Outcome of evaluating a single stock position.
enum PositionOutcome {
    Healthy,
    NotMonitorable,
    Deduplicated,
    Created,
}

/// The periodic batch scan.
///
/// Built from injected repositories so tests can substitute in-memory fakes.
/// One logical invocation per cadence tick; the external scheduler owns the
/// cadence and the retry policy.
pub struct StockMonitor<P, A, N> {
    inventory: P,
    alerts: A,
    analyses: N,
}

impl<P, A, N> StockMonitor<P, A, N>
where
    P: InventoryProvider,
    A: AlertStore,
    N: AnalysisStore,
{
    pub fn new(inventory: P, alerts: A, analyses: N) -> Self {
        Self {
            inventory,
            alerts,
            analyses,
        }
    }

    /// Scan all active organizations and locations for imminent stock-outs,
    /// then run the cleanup passes.
    ///
    /// `now` is passed in so the whole run is deterministic under test; the
    /// runner supplies wall-clock time.
    pub fn run_scan(&self, now: DateTime<Utc>) -> Result<ScanReport, MonitorError> {
        let mut report = ScanReport::default();

        let organizations = self
            .inventory
            .active_organizations()
            .map_err(MonitorError::Enumeration)?;

        for organization_id in organizations {
            let locations = self
                .inventory
                .active_locations(organization_id)
                .map_err(MonitorError::Enumeration)?;

            for location_id in locations {
                self.scan_location(organization_id, location_id, now, &mut report);
            }
        }

        self.retention_sweep(now, &mut report)?;
        self.expiry_sweep(now, &mut report)?;
        self.analysis_cleanup(now, &mut report)?;

        info!(
            positions = report.positions_scanned,
            created = report.alerts_created,
            deduplicated = report.deduplicated,
            failures = report.failures,
            "stock scan finished"
        );

        Ok(report)
    }

    /// Per-location work is failure-isolated: a broken location or position
    /// is logged and skipped, never aborting the rest of the scan.
    fn scan_location(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
        now: DateTime<Utc>,
        report: &mut ScanReport,
    ) {
        let positions = match self.inventory.stock_positions(organization_id, location_id) {
            Ok(p) => p,
            Err(e) => {
                warn!(
                    organization = %organization_id,
                    location = %location_id,
                    error = %e,
                    "failed to read stock positions"
                );
                report.failures += 1;
                return;
            }
        };

        for position in positions {
            report.positions_scanned += 1;
            match self.evaluate_position(organization_id, location_id, &position, now) {
                Ok(PositionOutcome::Created) => report.alerts_created += 1,
                Ok(PositionOutcome::Deduplicated) => report.deduplicated += 1,
                Ok(PositionOutcome::NotMonitorable) => report.skipped_no_forecast += 1,
                Ok(PositionOutcome::Healthy) => {}
                Err(e) => {
                    warn!(
                        organization = %organization_id,
                        location = %location_id,
                        product = %position.product_id,
                        error = %e,
                        "position evaluation failed"
                    );
                    report.failures += 1;
                }
            }
        }
    }

    fn evaluate_position(
        &self,
        organization_id: OrganizationId,
        location_id: LocationId,
        position: &StockPosition,
        now: DateTime<Utc>,
    ) -> Result<PositionOutcome, StoreError> {
        // No forecast yet: not monitorable, not an error.
        let Some(forecast_7d) = position.forecast_7d else {
            return Ok(PositionOutcome::NotMonitorable);
        };

        let daily_demand = forecast_7d as f64 / FORECAST_HORIZON_DAYS;
        let days_remaining = position.quantity_on_hand / daily_demand.max(1.0);

        // Stock-out risk within 24h: strictly less than one day of cover,
        // and something actually left on the shelf.
        if !(days_remaining < 1.0 && position.quantity_on_hand > 0.0) {
            return Ok(PositionOutcome::Healthy);
        }

        let since = now - Duration::hours(DEDUP_WINDOW_HOURS);
        let existing = self.alerts.find_recent_unread(
            organization_id,
            location_id,
            position.product_id,
            AlertKind::StockoutRisk,
            AlertSeverity::Critical,
            since,
        )?;
        if existing.is_some() {
            debug!(
                organization = %organization_id,
                product = %position.product_id,
                "stock-out already alerted within the dedup window"
            );
            return Ok(PositionOutcome::Deduplicated);
        }

        let hours_remaining = days_remaining * 24.0;
        let alert = Alert::new(
            AlertKind::StockoutRisk,
            AlertSeverity::Critical,
            organization_id,
            location_id,
            position.product_id,
            now,
        )
        .with_title(format!(
            "Urgent: {} is about to run out",
            position.product_name
        ))
        .with_description(format!(
            "{} units on hand; projected stock-out in {hours_remaining:.1} hours.",
            position.quantity_on_hand
        ))
        .with_recommended_action(format!("Reorder at least {forecast_7d} units immediately."))
        .with_action_link(format!(
            "/inventory/{location_id}/products/{}",
            position.product_id
        ))
        .with_metadata(json!({
            "quantity_on_hand": position.quantity_on_hand,
            "hours_remaining": hours_remaining,
        }))
        .expiring_at(now + Duration::hours(DEDUP_WINDOW_HOURS));

        self.alerts.insert(alert)?;
        info!(
            organization = %organization_id,
            location = %location_id,
            product = %position.product_id,
            hours_remaining,
            "critical stock-out alert created"
        );
        Ok(PositionOutcome::Created)
    }

    /// Permanently delete alerts that were read more than the retention
    /// window ago.
    fn retention_sweep(
        &self,
        now: DateTime<Utc>,
        report: &mut ScanReport,
    ) -> Result<(), MonitorError> {
        let cutoff = now - Duration::days(READ_RETENTION_DAYS);
        let aged = self
            .alerts
            .list_read_before(cutoff)
            .map_err(MonitorError::Cleanup)?;
        for alert in aged {
            self.alerts.delete(alert.id).map_err(MonitorError::Cleanup)?;
            report.retention_deleted += 1;
        }
        Ok(())
    }

    /// Auto-acknowledge expired, still-unread alerts. They are deleted by a
    /// later retention pass, not immediately.
    fn expiry_sweep(
        &self,
        now: DateTime<Utc>,
        report: &mut ScanReport,
    ) -> Result<(), MonitorError> {
        let expired = self
            .alerts
            .list_unread_expired(now)
            .map_err(MonitorError::Cleanup)?;
        for mut alert in expired {
            alert.mark_read(now);
            self.alerts.update(&alert).map_err(MonitorError::Cleanup)?;
            report.expired_acknowledged += 1;
        }
        Ok(())
    }

    /// Remove stale price analyses (independent of alerting).
    fn analysis_cleanup(
        &self,
        now: DateTime<Utc>,
        report: &mut ScanReport,
    ) -> Result<(), MonitorError> {
        let records = self.analyses.list_all().map_err(MonitorError::Cleanup)?;
        for record in records {
            if record.is_stale(now) {
                self.analyses
                    .delete(record.id)
                    .map_err(MonitorError::Cleanup)?;
                report.analyses_deleted += 1;
            }
        }
        Ok(())
    }
}
