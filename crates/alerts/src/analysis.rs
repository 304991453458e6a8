//! Stale price-analysis cleanup.
//!
//! Price analyses are produced elsewhere in the platform; this engine only
//! removes the ones that no longer matter: past their own expiry, or parked
//! in a terminal state for longer than the retention window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shelfwise_core::OrganizationId;

/// Terminal-state analyses older than this are removed.
pub const ANALYSIS_RETENTION_DAYS: i64 = 30;

/// Unique analysis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an analysis sits in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Pending,
    Rejected,
    Executed,
}

impl AnalysisStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Rejected | AnalysisStatus::Executed)
    }
}

/// A recorded price analysis, as far as cleanup is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub organization_id: OrganizationId,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AnalysisRecord {
    /// Whether the cleanup pass should remove this record.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        if self.expires_at.is_some_and(|at| at < now) {
            return true;
        }
        self.status.is_terminal()
            && self.created_at < now - Duration::days(ANALYSIS_RETENTION_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    fn record(status: AnalysisStatus, age_days: i64) -> AnalysisRecord {
        AnalysisRecord {
            id: AnalysisId::new(),
            organization_id: OrganizationId::new(),
            status,
            created_at: test_time() - Duration::days(age_days),
            expires_at: None,
        }
    }

    #[test]
    fn expired_records_are_stale_regardless_of_status() {
        let mut r = record(AnalysisStatus::Pending, 1);
        r.expires_at = Some(test_time() - Duration::hours(1));
        assert!(r.is_stale(test_time()));
    }

    #[test]
    fn old_terminal_records_are_stale() {
        assert!(record(AnalysisStatus::Rejected, 31).is_stale(test_time()));
        assert!(record(AnalysisStatus::Executed, 31).is_stale(test_time()));
    }

    #[test]
    fn recent_or_pending_records_survive() {
        assert!(!record(AnalysisStatus::Rejected, 29).is_stale(test_time()));
        assert!(!record(AnalysisStatus::Pending, 120).is_stale(test_time()));
    }
}
