//! Planning cycle: forecast demand, derive replenishment policy, write the
//! results back to the product catalog.
//!
//! Runs per product/location pair; pairs are independent, so a failure on
//! one is logged and the rest of the cycle continues. Only catalog
//! enumeration is fatal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use shelfwise_core::{DomainError, DomainResult, LocationId, ProductId};
use shelfwise_forecast::{Horizon, SalesHistoryRepository, forecast_demand};
use shelfwise_replenish::{AbcClass, DEFAULT_LEAD_TIME_DAYS, plan};

/// A catalog entry the planning cycle should refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedProduct {
    pub product_id: ProductId,
    pub location_id: LocationId,
    /// Configured replenishment lead time; `None` falls back to the default.
    pub lead_time_days: Option<u32>,
    /// Turnover ratio (sales over a period / average inventory), computed by
    /// the inventory subsystem.
    pub turnover_rate: f64,
}

/// Forecast fields written back to the product record each cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPlan {
    pub demand_forecast_7d: i64,
    pub demand_forecast_30d: i64,
    pub reorder_point: i64,
    pub safety_stock: i64,
    pub turnover_rate: f64,
    pub abc_class: AbcClass,
    pub refreshed_at: DateTime<Utc>,
}

/// Write access to the product catalog's planning fields.
pub trait ProductCatalog: Send + Sync {
    fn planned_products(&self) -> DomainResult<Vec<PlannedProduct>>;

    fn store_plan(
        &self,
        product_id: ProductId,
        location_id: LocationId,
        plan: &ProductPlan,
    ) -> DomainResult<()>;
}

/// Batch-level planning failure.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("product catalog enumeration failed: {0}")]
    Catalog(#[source] DomainError),
}

/// Counters for one planning cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanningReport {
    pub refreshed: u64,
    pub failures: u64,
}

/// The planning cycle over injected repositories.
pub struct PlanningService<S, C> {
    sales: S,
    catalog: C,
}

impl<S, C> PlanningService<S, C>
where
    S: SalesHistoryRepository,
    C: ProductCatalog,
{
    pub fn new(sales: S, catalog: C) -> Self {
        Self { sales, catalog }
    }

    /// Refresh every planned product, log-and-continue on per-product
    /// failures.
    pub fn refresh_all(&self, now: DateTime<Utc>) -> Result<PlanningReport, PlanningError> {
        let entries = self
            .catalog
            .planned_products()
            .map_err(PlanningError::Catalog)?;

        let mut report = PlanningReport::default();
        for entry in &entries {
            match self.refresh_product(entry, now) {
                Ok(_) => report.refreshed += 1,
                Err(e) => {
                    warn!(
                        product = %entry.product_id,
                        location = %entry.location_id,
                        error = %e,
                        "planning refresh failed for product"
                    );
                    report.failures += 1;
                }
            }
        }

        info!(
            refreshed = report.refreshed,
            failures = report.failures,
            "planning cycle finished"
        );
        Ok(report)
    }

    /// Forecast both horizons for one pair, derive the replenishment policy,
    /// and write the plan back.
    pub fn refresh_product(
        &self,
        entry: &PlannedProduct,
        now: DateTime<Utc>,
    ) -> DomainResult<ProductPlan> {
        let history = self.sales.fetch(entry.product_id, entry.location_id)?;

        let weekly = forecast_demand(&history, Horizon::SevenDays);
        let monthly = forecast_demand(&history, Horizon::ThirtyDays);

        let lead_time_days = entry.lead_time_days.unwrap_or(DEFAULT_LEAD_TIME_DAYS);
        let policy = plan(weekly.daily_rate, lead_time_days, entry.turnover_rate);

        let product_plan = ProductPlan {
            demand_forecast_7d: weekly.horizon_total,
            demand_forecast_30d: monthly.horizon_total,
            reorder_point: policy.reorder_point,
            safety_stock: policy.safety_stock,
            turnover_rate: entry.turnover_rate,
            abc_class: policy.abc_class,
            refreshed_at: now,
        };

        self.catalog
            .store_plan(entry.product_id, entry.location_id, &product_plan)?;
        Ok(product_plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::stores::{InMemoryProductCatalog, InMemorySalesHistory};
    use shelfwise_forecast::SalesObservation;

    fn test_time() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    fn seed_week(history: &InMemorySalesHistory, product: ProductId, location: LocationId) {
        let start = NaiveDate::from_ymd_opt(2024, 5, 25).unwrap();
        for (i, q) in [8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0].iter().enumerate() {
            history.record(
                product,
                location,
                SalesObservation::new(start + chrono::Days::new(i as u64), *q),
            );
        }
    }

    #[test]
    fn refresh_writes_forecast_fields_back() {
        let history = InMemorySalesHistory::arc();
        let catalog = InMemoryProductCatalog::arc();
        let (product, location) = (ProductId::new(), LocationId::new());

        seed_week(&history, product, location);
        catalog.add(PlannedProduct {
            product_id: product,
            location_id: location,
            lead_time_days: None,
            turnover_rate: 6.5,
        });

        let service = PlanningService::new(history, catalog.clone());
        let report = service.refresh_all(test_time()).unwrap();
        assert_eq!(report.refreshed, 1);
        assert_eq!(report.failures, 0);

        let plan = catalog.plan_for(product, location).unwrap();
        assert_eq!(plan.demand_forecast_7d, 84);
        assert_eq!(plan.demand_forecast_30d, 360);
        assert_eq!(plan.reorder_point, 86);
        assert_eq!(plan.safety_stock, 26);
        assert_eq!(plan.abc_class, AbcClass::A);
        assert_eq!(plan.refreshed_at, test_time());
    }

    #[test]
    fn short_history_plans_to_zero() {
        let history = InMemorySalesHistory::arc();
        let catalog = InMemoryProductCatalog::arc();
        let (product, location) = (ProductId::new(), LocationId::new());

        history.record(
            product,
            location,
            SalesObservation::new(NaiveDate::from_ymd_opt(2024, 5, 30).unwrap(), 4.0),
        );
        catalog.add(PlannedProduct {
            product_id: product,
            location_id: location,
            lead_time_days: Some(10),
            turnover_rate: 1.0,
        });

        let service = PlanningService::new(history, catalog.clone());
        service.refresh_all(test_time()).unwrap();

        let plan = catalog.plan_for(product, location).unwrap();
        assert_eq!(plan.demand_forecast_7d, 0);
        assert_eq!(plan.reorder_point, 0);
        assert_eq!(plan.abc_class, AbcClass::C);
    }

    #[test]
    fn failing_product_does_not_stop_the_cycle() {
        struct FailingHistory;

        impl SalesHistoryRepository for FailingHistory {
            fn fetch(
                &self,
                _product_id: ProductId,
                _location_id: LocationId,
            ) -> DomainResult<Vec<SalesObservation>> {
                Err(DomainError::unavailable("sales history offline"))
            }
        }

        let catalog = InMemoryProductCatalog::arc();
        for _ in 0..3 {
            catalog.add(PlannedProduct {
                product_id: ProductId::new(),
                location_id: LocationId::new(),
                lead_time_days: None,
                turnover_rate: 2.0,
            });
        }

        let service = PlanningService::new(FailingHistory, catalog);
        let report = service.refresh_all(test_time()).unwrap();
        assert_eq!(report.refreshed, 0);
        assert_eq!(report.failures, 3);
    }
}
