//! Replenishment policy: reorder points, safety stock, rotation classes.
//!
//! Pure domain logic; consumes a demand rate produced by `shelfwise-forecast`
//! and a turnover ratio supplied by the caller.

pub mod policy;

pub use policy::{
    AbcClass, DEFAULT_LEAD_TIME_DAYS, ReorderPolicy, classify_turnover, plan, reorder_point,
    safety_stock,
};
