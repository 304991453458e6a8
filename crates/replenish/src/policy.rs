//! Reorder point and ABC rotation classification.

use serde::{Deserialize, Serialize};

/// Days between placing a replenishment order and the stock arriving, when
/// the product has no configured lead time.
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 5;

/// Safety margin: 30% of one week of demand is held as buffer.
const SAFETY_FRACTION: f64 = 0.3;

/// Turnover ratio at or above which a product rotates fast.
const FAST_MOVER_TURNOVER: f64 = 6.0;

/// Turnover ratio at or above which a product rotates at medium speed.
const MEDIUM_MOVER_TURNOVER: f64 = 3.0;

/// Pareto-style rotation velocity class.
///
/// A = fast movers (roughly the top 20%), B = medium (~30%), C = slow (~50%).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl core::fmt::Display for AbcClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        };
        f.write_str(s)
    }
}

/// Derived replenishment attributes for a product/location pair.
///
/// Recomputed on each planning run and written back to the product record;
/// no history of past policies is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPolicy {
    pub reorder_point: i64,
    pub safety_stock: i64,
    pub lead_time_days: u32,
    pub abc_class: AbcClass,
}

/// Inventory level at which replenishment should be triggered: lead-time
/// demand plus a 30%-of-weekly-demand safety margin, rounded up.
///
/// A `daily_rate` of 0 yields 0, which downstream monitoring treats as
/// "never flag this product".
pub fn reorder_point(daily_rate: f64, lead_time_days: u32) -> i64 {
    let lead_time_demand = daily_rate * f64::from(lead_time_days);
    (lead_time_demand + safety_margin(daily_rate)).ceil() as i64
}

/// Buffer held above expected lead-time demand, rounded up.
pub fn safety_stock(daily_rate: f64) -> i64 {
    safety_margin(daily_rate).ceil() as i64
}

fn safety_margin(daily_rate: f64) -> f64 {
    SAFETY_FRACTION * daily_rate * 7.0
}

/// Classify rotation velocity from a turnover ratio (sales over a period
/// divided by average inventory).
pub fn classify_turnover(turnover: f64) -> AbcClass {
    if turnover >= FAST_MOVER_TURNOVER {
        AbcClass::A
    } else if turnover >= MEDIUM_MOVER_TURNOVER {
        AbcClass::B
    } else {
        AbcClass::C
    }
}

/// Bundle the reorder point, safety stock, and rotation class for one
/// product/location pair.
pub fn plan(daily_rate: f64, lead_time_days: u32, turnover: f64) -> ReorderPolicy {
    ReorderPolicy {
        reorder_point: reorder_point(daily_rate, lead_time_days),
        safety_stock: safety_stock(daily_rate),
        lead_time_days,
        abc_class: classify_turnover(turnover),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_point_covers_lead_time_plus_margin() {
        // 12/day over 5 days = 60, margin 0.3 * 12 * 7 = 25.2, ceil(85.2) = 86.
        assert_eq!(reorder_point(12.0, 5), 86);
    }

    #[test]
    fn zero_rate_never_triggers() {
        assert_eq!(reorder_point(0.0, DEFAULT_LEAD_TIME_DAYS), 0);
        assert_eq!(safety_stock(0.0), 0);
    }

    #[test]
    fn abc_boundaries() {
        assert_eq!(classify_turnover(6.0), AbcClass::A);
        assert_eq!(classify_turnover(5.99), AbcClass::B);
        assert_eq!(classify_turnover(3.0), AbcClass::B);
        assert_eq!(classify_turnover(2.99), AbcClass::C);
    }

    #[test]
    fn plan_bundles_consistently() {
        let policy = plan(12.0, 5, 6.5);
        assert_eq!(policy.reorder_point, 86);
        assert_eq!(policy.safety_stock, 26);
        assert_eq!(policy.lead_time_days, 5);
        assert_eq!(policy.abc_class, AbcClass::A);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: the reorder point never decreases when demand grows,
            /// for a fixed lead time.
            #[test]
            fn monotone_in_daily_rate(
                rate in 0.0f64..1_000.0,
                bump in 0.0f64..1_000.0,
                lead_time in 1u32..30,
            ) {
                prop_assert!(reorder_point(rate + bump, lead_time) >= reorder_point(rate, lead_time));
            }

            /// Property: the reorder point always covers bare lead-time demand.
            #[test]
            fn covers_lead_time_demand(
                rate in 0.0f64..1_000.0,
                lead_time in 1u32..30,
            ) {
                let bare = (rate * f64::from(lead_time)).ceil() as i64;
                prop_assert!(reorder_point(rate, lead_time) >= bare);
            }
        }
    }
}
