//! Alert entity and lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shelfwise_core::{LocationId, OrganizationId, ProductId};

/// Unique alert identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub Uuid);

impl AlertId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What condition the alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Imminent stock-out detected by the monitor.
    StockoutRisk,
    /// A favorable condition worth acting on (e.g. a nearby cheaper offer).
    Opportunity,
}

/// Alert priority, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A prioritized, time-bounded notification about one product at one
/// location.
///
/// Lifecycle: created unread by the generator; marked read by a consumer or
/// by the expiry sweep; permanently deleted by the retention sweep once read
/// and aged out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub organization_id: OrganizationId,
    pub location_id: LocationId,
    pub product_id: ProductId,
    pub title: String,
    pub description: String,
    pub recommended_action: String,
    /// Relative link to where the alert can be acted on.
    pub action_link: String,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Free-form structured context (quantities, deadlines, prices).
    pub metadata: serde_json::Value,
}

impl Alert {
    /// Create an unread alert with empty content; fill it in with the
    /// builder methods.
    pub fn new(
        kind: AlertKind,
        severity: AlertSeverity,
        organization_id: OrganizationId,
        location_id: LocationId,
        product_id: ProductId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AlertId::new(),
            kind,
            severity,
            organization_id,
            location_id,
            product_id,
            title: String::new(),
            description: String::new(),
            recommended_action: String::new(),
            action_link: String::new(),
            created_at,
            read_at: None,
            expires_at: None,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_recommended_action(mut self, action: impl Into<String>) -> Self {
        self.recommended_action = action.into();
        self
    }

    pub fn with_action_link(mut self, link: impl Into<String>) -> Self {
        self.action_link = link.into();
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Acknowledge the alert.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        self.read_at = Some(at);
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}
