//! Transient notifications and persistent error records
//!
//! Notifications auto-expire 5000 ms after creation unless dismissed first;
//! error records accumulate until explicitly cleared. Duplicate suppression
//! is deliberately absent: repeated identical messages each get an entry.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long a notification lives before auto-expiry
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

/// Notification flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient toast-style notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Creation timestamp plus entropy, unique even for same-instant adds
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Create a notification with a fresh id and timestamp.
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("{}-{}", now.timestamp_millis(), Uuid::new_v4().simple()),
            kind,
            message: message.into(),
            timestamp: now,
        }
    }

    /// Whether this notification has outlived its TTL at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.timestamp).num_milliseconds()
            >= NOTIFICATION_TTL.as_millis() as i64
    }
}

/// A persistent error entry; never auto-expires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    /// Create an error record with a fresh id and timestamp.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("{}-{}", now.timestamp_millis(), Uuid::new_v4().simple()),
            message: message.into(),
            timestamp: now,
        }
    }
}
