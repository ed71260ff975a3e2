//! Notification and per-notification delivery options.

use uuid::Uuid;

/// APNs delivery priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Priority {
    /// Deliver immediately (apns-priority: 10).
    Immediate,
    /// Deliver at a time that conserves device power (apns-priority: 5).
    PowerConsiderate,
}

impl Priority {
    /// Wire value for the apns-priority header.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Immediate => 10,
            Self::PowerConsiderate => 5,
        }
    }
}

/// Optional per-notification headers.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct NotificationOptions {
    /// Canonical notification identifier (apns-id).
    pub apns_id: Option<Uuid>,
    /// Expiration as epoch seconds (apns-expiration).
    pub expiration: Option<u64>,
    /// Delivery priority (apns-priority).
    pub priority: Option<Priority>,
    /// Collapse identifier (apns-collapse-id).
    pub collapse_id: Option<String>,
}

/// A push notification: an opaque JSON payload plus delivery options.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    /// Payload handed to the payload encoder.
    pub payload: serde_json::Value,
    /// Per-notification delivery options.
    pub options: NotificationOptions,
}

impl Notification {
    /// Create a notification with default options.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            options: NotificationOptions::default(),
        }
    }

    /// Create a notification with explicit options.
    pub fn with_options(payload: serde_json::Value, options: NotificationOptions) -> Self {
        Self { payload, options }
    }
}
