//! Protocol visitors applied as the final pass over each request.

use apns_core::{Notification, Request};

use crate::ProtocolVisitor;

/// Applies notification options as `apns-*` headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationHeadersVisitor;

impl ProtocolVisitor for NotificationHeadersVisitor {
    fn visit(&self, notification: &Notification, mut request: Request) -> Request {
        let options = &notification.options;

        if let Some(apns_id) = options.apns_id {
            request.headers.set("apns-id", apns_id.to_string());
        }
        if let Some(expiration) = options.expiration {
            request.headers.set("apns-expiration", expiration.to_string());
        }
        if let Some(priority) = options.priority {
            request
                .headers
                .set("apns-priority", priority.as_u8().to_string());
        }
        if let Some(ref collapse_id) = options.collapse_id {
            request.headers.set("apns-collapse-id", collapse_id.clone());
        }

        request
    }
}

/// Visitor that leaves the request untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVisitor;

impl ProtocolVisitor for NoopVisitor {
    fn visit(&self, _notification: &Notification, request: Request) -> Request {
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProtocolVisitor as _;
    use apns_core::{NotificationOptions, Priority};
    use uuid::Uuid;

    #[test]
    fn test_applies_all_option_headers() {
        let apns_id = Uuid::new_v4();
        let notification = Notification::with_options(
            serde_json::json!({}),
            NotificationOptions {
                apns_id: Some(apns_id),
                expiration: Some(1_700_000_000),
                priority: Some(Priority::Immediate),
                collapse_id: Some("game-score".to_string()),
            },
        );

        let request = NotificationHeadersVisitor
            .visit(&notification, Request::new("https://example.com", Vec::new()));

        assert_eq!(
            request.headers.get("apns-id"),
            Some(apns_id.to_string().as_str())
        );
        assert_eq!(request.headers.get("apns-expiration"), Some("1700000000"));
        assert_eq!(request.headers.get("apns-priority"), Some("10"));
        assert_eq!(request.headers.get("apns-collapse-id"), Some("game-score"));
    }

    #[test]
    fn test_no_options_adds_no_headers() {
        let notification = Notification::new(serde_json::json!({}));
        let request = NotificationHeadersVisitor
            .visit(&notification, Request::new("https://example.com", Vec::new()));
        assert!(request.headers.is_empty());
    }
}
