//! Analytics event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded analytics event.
///
/// Advisory only: events feed the admin report and are never consulted for
/// correctness. `data` is free-form and intentionally unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn now(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}
