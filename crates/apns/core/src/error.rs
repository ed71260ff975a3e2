//! Error taxonomy for dispatch.

use thiserror::Error;

/// Typed APNs rejection reason, mapped from a response by the exception
/// factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApnsError {
    /// Device token is malformed.
    #[error("bad device token")]
    BadDeviceToken,

    /// Device token is no longer active for the topic.
    #[error("device token is inactive for the specified topic")]
    Unregistered,

    /// Payload exceeded the APNs size limit.
    #[error("notification payload was too large")]
    PayloadTooLarge,

    /// Payload was empty.
    #[error("notification payload was empty")]
    PayloadEmpty,

    /// Topic is invalid or disallowed.
    #[error("bad topic")]
    BadTopic,

    /// Device token does not match the specified topic.
    #[error("device token does not match the specified topic")]
    DeviceTokenNotForTopic,

    /// apns-collapse-id exceeded the allowed size.
    #[error("bad collapse identifier")]
    BadCollapseId,

    /// apns-expiration is invalid.
    #[error("bad expiration date")]
    BadExpirationDate,

    /// apns-id is invalid.
    #[error("bad message identifier")]
    BadMessageId,

    /// apns-priority is invalid.
    #[error("bad priority")]
    BadPriority,

    /// Request was missing a device token.
    #[error("missing device token")]
    MissingDeviceToken,

    /// Request was missing a topic.
    #[error("missing topic")]
    MissingTopic,

    /// Provider token has expired.
    #[error("provider token is expired")]
    ExpiredProviderToken,

    /// Provider token could not be validated.
    #[error("provider token is invalid")]
    InvalidProviderToken,

    /// No provider token was supplied.
    #[error("missing provider token")]
    MissingProviderToken,

    /// Too many requests for the same device token.
    #[error("too many requests for the same device token")]
    TooManyRequests,

    /// APNs internal error.
    #[error("internal server error")]
    InternalServerError,

    /// APNs is unavailable.
    #[error("service unavailable")]
    ServiceUnavailable,

    /// APNs server is shutting down.
    #[error("server is shutting down")]
    Shutdown,

    /// Rejection with an unrecognized reason.
    #[error("unknown rejection (status {status}): {reason}")]
    Unknown {
        /// HTTP status of the rejecting response.
        status: u16,
        /// Raw reason string (or body) from the response.
        reason: String,
    },
}

/// Per-message failure while building the outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Payload encoding failed.
    #[error("payload encoding failed: {0}")]
    Encode(String),

    /// Target URI could not be constructed.
    #[error("uri construction failed: {0}")]
    Uri(String),

    /// Authenticator could not attach credentials.
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// Per-message failure below the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request never reached the transport.
    #[error("request build failed: {0}")]
    Build(#[from] BuildError),

    /// Connection-level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// HTTP/2 or other protocol-level failure.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Whole-batch deadline elapsed before the request finished.
    #[error("batch deadline exceeded")]
    DeadlineExceeded,

    /// Sender was closed.
    #[error("sender is closed")]
    Closed,
}

/// Failure that escapes `send()` itself.
///
/// Per-message failures never surface here; they are reported through
/// outcomes and reject listeners.
#[derive(Debug, Error)]
pub enum SendError {
    /// Dispatcher was closed via `close_connection`.
    #[error("protocol is closed")]
    Closed,

    /// The dispatch pool could not be set up at all.
    #[error("dispatch setup failed: {0}")]
    Setup(String),
}
