//! Maps APNs rejection responses to typed errors.

use apns_core::{ApnsError, Response};

use crate::ExceptionFactory;

/// Reason payload APNs returns on rejection.
#[derive(Debug, serde::Deserialize)]
struct ReasonBody {
    reason: String,
}

/// Parses the `{"reason": "..."}` rejection body.
///
/// A 200 response with no recognizable reason carries no rejection; any
/// non-200 response is a rejection even when the body is unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasonExceptionFactory;

impl ExceptionFactory for ReasonExceptionFactory {
    fn create(&self, response: &Response) -> Option<ApnsError> {
        let reason = serde_json::from_str::<ReasonBody>(&response.body)
            .ok()
            .map(|body| body.reason);

        match (response.status, reason) {
            (200, None) => None,
            (status, Some(reason)) => Some(map_reason(status, &reason)),
            (status, None) => Some(ApnsError::Unknown {
                status,
                reason: response.body.clone(),
            }),
        }
    }
}

fn map_reason(status: u16, reason: &str) -> ApnsError {
    match reason {
        "BadDeviceToken" => ApnsError::BadDeviceToken,
        "Unregistered" => ApnsError::Unregistered,
        "PayloadTooLarge" => ApnsError::PayloadTooLarge,
        "PayloadEmpty" => ApnsError::PayloadEmpty,
        "BadTopic" | "TopicDisallowed" => ApnsError::BadTopic,
        "DeviceTokenNotForTopic" => ApnsError::DeviceTokenNotForTopic,
        "BadCollapseId" => ApnsError::BadCollapseId,
        "BadExpirationDate" => ApnsError::BadExpirationDate,
        "BadMessageId" => ApnsError::BadMessageId,
        "BadPriority" => ApnsError::BadPriority,
        "MissingDeviceToken" => ApnsError::MissingDeviceToken,
        "MissingTopic" => ApnsError::MissingTopic,
        "ExpiredProviderToken" => ApnsError::ExpiredProviderToken,
        "InvalidProviderToken" => ApnsError::InvalidProviderToken,
        "MissingProviderToken" => ApnsError::MissingProviderToken,
        "TooManyRequests" => ApnsError::TooManyRequests,
        "InternalServerError" => ApnsError::InternalServerError,
        "ServiceUnavailable" => ApnsError::ServiceUnavailable,
        "Shutdown" => ApnsError::Shutdown,
        other => ApnsError::Unknown {
            status,
            reason: other.to_string(),
        },
    }
}
