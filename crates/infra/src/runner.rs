//! Periodic driver for the stock monitor.
//!
//! The engine itself defines no scheduling primitive; this runner is the
//! in-process embodiment of the scheduler contract: a fixed cadence, a
//! manual trigger hook, and retry with bounded backoff when a scan fails.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use shelfwise_alerts::monitor::StockMonitor;
use shelfwise_alerts::stores::{AlertStore, AnalysisStore, InventoryProvider};

/// Config for the stock monitor runner.
#[derive(Debug, Clone)]
pub struct StockMonitorRunner {
    /// Scan cadence.
    pub interval: Duration,
    pub max_retries: u32,
    pub base_backoff: Duration,
}

impl Default for StockMonitorRunner {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            max_retries: 5,
            base_backoff: Duration::from_millis(250),
        }
    }
}

/// Handle for the running monitor (shutdown + trigger hook).
#[derive(Debug)]
pub struct StockMonitorRunnerHandle {
    shutdown: mpsc::Sender<()>,
    trigger: mpsc::SyncSender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl StockMonitorRunnerHandle {
    /// Request an immediate scan (e.g. after a large inventory import).
    ///
    /// Backpressure: triggers are coalesced (bounded queue). If a scan is
    /// already pending, this becomes a no-op.
    pub fn trigger(&self) {
        // Coalesce: channel capacity=1; ignore if already full.
        let _ = self.trigger.try_send(());
    }

    /// Gracefully stop the runner thread.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

impl StockMonitorRunner {
    /// Spawn the runner.
    ///
    /// - Schedule: runs every `interval`, plus once at startup
    /// - Trigger: call `handle.trigger()` for an out-of-band scan
    /// - Failures: logged and retried with bounded exponential backoff;
    ///   never propagate out of the thread
    pub fn spawn<P, A, N>(
        &self,
        name: &'static str,
        monitor: Arc<StockMonitor<P, A, N>>,
    ) -> StockMonitorRunnerHandle
    where
        P: InventoryProvider + 'static,
        A: AlertStore + 'static,
        N: AnalysisStore + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (trigger_tx, trigger_rx) = mpsc::sync_channel::<()>(1);

        let cfg = self.clone();
        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || runner_loop(name, cfg, shutdown_rx, trigger_rx, monitor))
            .expect("failed to spawn stock monitor runner thread");

        StockMonitorRunnerHandle {
            shutdown: shutdown_tx,
            trigger: trigger_tx,
            join: Some(join),
        }
    }
}

fn runner_loop<P, A, N>(
    name: &'static str,
    cfg: StockMonitorRunner,
    shutdown_rx: mpsc::Receiver<()>,
    trigger_rx: mpsc::Receiver<()>,
    monitor: Arc<StockMonitor<P, A, N>>,
) where
    P: InventoryProvider + 'static,
    A: AlertStore + 'static,
    N: AnalysisStore + 'static,
{
    info!(runner = name, "stock monitor runner started");

    let mut next_tick = Instant::now() + cfg.interval;
    let mut pending = true; // run once on startup
    let mut failures: u32 = 0;
    let mut backoff_until: Option<Instant> = None;

    loop {
        // Shutdown has priority.
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        let now = Instant::now();
        if now >= next_tick {
            pending = true;
            // Keep a stable cadence even if we were delayed.
            while next_tick <= now {
                next_tick += cfg.interval;
            }
        }

        // Non-blocking drain to coalesce multiple triggers.
        while trigger_rx.try_recv().is_ok() {
            pending = true;
        }

        // Backoff gate.
        if let Some(until) = backoff_until {
            if Instant::now() < until {
                thread::sleep(Duration::from_millis(50));
                continue;
            }
            backoff_until = None;
        }

        if !pending {
            // Wait until next tick or trigger or shutdown.
            let sleep_for = next_tick
                .saturating_duration_since(Instant::now())
                .min(Duration::from_millis(250));
            thread::sleep(sleep_for);
            continue;
        }

        pending = false;

        match monitor.run_scan(Utc::now()) {
            Ok(report) => {
                failures = 0;
                info!(
                    runner = name,
                    created = report.alerts_created,
                    deduplicated = report.deduplicated,
                    failures = report.failures,
                    "scheduled stock scan completed"
                );
            }
            Err(e) => {
                warn!(runner = name, error = %e, "stock scan failed");
                failures += 1;
                if failures <= cfg.max_retries {
                    pending = true;
                    backoff_until = Some(Instant::now() + backoff(cfg.base_backoff, failures));
                } else {
                    // Give up until the next cadence tick.
                    failures = 0;
                }
            }
        }
    }

    info!(runner = name, "stock monitor runner stopped");
}

fn backoff(base: Duration, attempt: u32) -> Duration {
    // Exponential backoff: base * 2^(attempt-1), capped.
    let pow = 1u32 << attempt.saturating_sub(1).min(10);
    let ms = base.as_millis().saturating_mul(pow as u128);
    Duration::from_millis(ms.min(10_000) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    use shelfwise_alerts::stores::StockPosition;
    use shelfwise_core::{LocationId, OrganizationId, ProductId};

    use crate::stores::{InMemoryAlertStore, InMemoryAnalysisStore, InMemoryInventoryProvider};

    #[test]
    fn startup_scan_creates_alerts() {
        let inventory = InMemoryInventoryProvider::arc();
        let alerts = InMemoryAlertStore::arc();
        let analyses = InMemoryAnalysisStore::arc();

        let organization = OrganizationId::new();
        let location = LocationId::new();
        inventory.add_organization(organization);
        inventory.add_location(organization, location);
        inventory.put_position(
            organization,
            location,
            StockPosition {
                product_id: ProductId::new(),
                product_name: "Whole bean coffee 1kg".to_string(),
                quantity_on_hand: 10.0,
                forecast_7d: Some(84),
            },
        );

        let monitor = Arc::new(StockMonitor::new(inventory, alerts.clone(), analyses));
        let runner = StockMonitorRunner {
            interval: Duration::from_secs(3600),
            ..Default::default()
        };
        let handle = runner.spawn("stock-monitor-test", monitor);

        // The startup scan should land well before this deadline.
        let deadline = Instant::now() + Duration::from_secs(5);
        while alerts.all().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }

        handle.shutdown();
        assert_eq!(alerts.all().len(), 1);
    }

    #[test]
    fn trigger_coalesces_and_rescans() {
        let inventory = InMemoryInventoryProvider::arc();
        let alerts = InMemoryAlertStore::arc();
        let analyses = InMemoryAnalysisStore::arc();

        let monitor = Arc::new(StockMonitor::new(
            inventory.clone(),
            alerts.clone(),
            analyses,
        ));
        let runner = StockMonitorRunner {
            interval: Duration::from_secs(3600),
            ..Default::default()
        };
        let handle = runner.spawn("stock-monitor-trigger-test", monitor);

        // Let the startup scan (over an empty inventory) pass, then add a
        // critical position and trigger.
        thread::sleep(Duration::from_millis(100));

        let organization = OrganizationId::new();
        let location = LocationId::new();
        inventory.add_organization(organization);
        inventory.add_location(organization, location);
        inventory.put_position(
            organization,
            location,
            StockPosition {
                product_id: ProductId::new(),
                product_name: "UHT milk 1L".to_string(),
                quantity_on_hand: 2.0,
                forecast_7d: Some(70),
            },
        );

        handle.trigger();
        handle.trigger(); // coalesced

        let deadline = Instant::now() + Duration::from_secs(5);
        while alerts.all().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }

        handle.shutdown();
        assert_eq!(alerts.all().len(), 1);
    }
}
