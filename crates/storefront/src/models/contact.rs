//! Contact form submission model.

use albarka_core::Email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact form submission.
///
/// Write-only from the state layer's perspective: submissions are appended
/// to storage and never read back by the storefront itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub date: DateTime<Utc>,
}

impl ContactMessage {
    /// Create a submission stamped with the current time.
    #[must_use]
    pub fn now(
        name: impl Into<String>,
        email: Email,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email,
            subject: subject.into(),
            message: message.into(),
            date: Utc::now(),
        }
    }
}
