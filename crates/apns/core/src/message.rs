//! Receiver and queued-message types.

use crate::Notification;

/// APNs device token (hex-encoded).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DeviceToken(String);

impl DeviceToken {
    /// Create a device token from its hex representation.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery target for one notification.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Receiver {
    /// Device push token.
    pub token: DeviceToken,
    /// APNs topic (app bundle identifier).
    pub topic: String,
}

impl Receiver {
    /// Create a new receiver.
    pub fn new(token: DeviceToken, topic: impl Into<String>) -> Self {
        Self {
            token,
            topic: topic.into(),
        }
    }
}

/// A (receiver, notification) pair waiting for dispatch.
///
/// Immutable once enqueued; identified by its position in the queue,
/// which is the correlation key for outcome routing.
#[derive(Debug, Clone)]
pub struct QueuedMessage {
    /// Delivery target.
    pub receiver: Receiver,
    /// Notification to deliver.
    pub notification: Notification,
    /// Use the APNs sandbox environment.
    pub sandbox: bool,
}
