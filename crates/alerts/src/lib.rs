//! Stock monitoring and alert generation.
//!
//! The only component of the engine with externally visible state mutation:
//! a periodic batch scan over organizations, locations, and stock positions
//! that emits deduplicated stock-out alerts, retires stale ones, and cleans
//! up expired price analyses. Storage is abstracted behind repository traits
//! implemented by `shelfwise-infra`.

pub mod alert;
pub mod analysis;
pub mod monitor;
pub mod stores;

pub use alert::{Alert, AlertId, AlertKind, AlertSeverity};
pub use analysis::{AnalysisId, AnalysisRecord, AnalysisStatus};
pub use monitor::{MonitorError, ScanReport, StockMonitor};
pub use stores::{AlertStore, AnalysisStore, InventoryProvider, StockPosition, StoreError};
