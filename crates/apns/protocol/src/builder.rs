//! Builds one finished outbound request per queued message.

use apns_core::{BuildError, QueuedMessage, Request};

use crate::{Authenticator, PayloadEncoder, ProtocolVisitor, UriFactory};

/// Pure transformation from a queued message to a finished request.
///
/// A failure here is scoped to the one message being built; the dispatch
/// engine keeps building requests for the rest of the batch.
pub struct RequestBuilder {
    encoder: Box<dyn PayloadEncoder>,
    uri_factory: Box<dyn UriFactory>,
    authenticator: Box<dyn Authenticator>,
    visitor: Box<dyn ProtocolVisitor>,
}

impl RequestBuilder {
    /// Create a builder from its collaborators.
    pub fn new(
        encoder: impl PayloadEncoder + 'static,
        uri_factory: impl UriFactory + 'static,
        authenticator: impl Authenticator + 'static,
        visitor: impl ProtocolVisitor + 'static,
    ) -> Self {
        Self {
            encoder: Box::new(encoder),
            uri_factory: Box::new(uri_factory),
            authenticator: Box::new(authenticator),
            visitor: Box::new(visitor),
        }
    }

    /// Build the outbound request for one message.
    pub fn build(&self, message: &QueuedMessage) -> Result<Request, BuildError> {
        let body = self.encoder.encode(&message.notification.payload)?;
        let url = self
            .uri_factory
            .create(&message.receiver.token, message.sandbox);

        let request = Request::new(url, body)
            .with_header("content-type", "application/json")
            .with_header("accept", "application/json")
            .with_header("apns-topic", message.receiver.topic.clone());

        let request = self.authenticator.authenticate(request)?;

        Ok(self.visitor.visit(&message.notification, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ApnUriFactory, BearerAuthenticator, JsonPayloadEncoder, NotificationHeadersVisitor,
    };
    use apns_core::{DeviceToken, Notification, NotificationOptions, Priority, Receiver};

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            JsonPayloadEncoder,
            ApnUriFactory,
            BearerAuthenticator::new("jwt"),
            NotificationHeadersVisitor,
        )
    }

    fn message(sandbox: bool) -> QueuedMessage {
        QueuedMessage {
            receiver: Receiver::new(DeviceToken::new("token1"), "com.example.app"),
            notification: Notification::new(serde_json::json!({"aps": {"alert": "hi"}})),
            sandbox,
        }
    }

    #[test]
    fn test_builds_production_request() {
        let request = builder().build(&message(false)).unwrap();

        assert_eq!(request.url, "https://api.push.apple.com/3/device/token1");
        assert_eq!(request.body, br#"{"aps":{"alert":"hi"}}"#);

        let names: Vec<&str> = request.headers.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["content-type", "accept", "apns-topic", "authorization"]
        );
        assert_eq!(request.headers.get("apns-topic"), Some("com.example.app"));
        assert_eq!(request.headers.get("authorization"), Some("bearer jwt"));
    }

    #[test]
    fn test_sandbox_flag_selects_sandbox_host() {
        let request = builder().build(&message(true)).unwrap();
        assert_eq!(
            request.url,
            "https://api.sandbox.push.apple.com/3/device/token1"
        );
    }

    #[test]
    fn test_visitor_runs_after_authenticator() {
        let mut msg = message(false);
        msg.notification.options = NotificationOptions {
            priority: Some(Priority::PowerConsiderate),
            ..Default::default()
        };

        let request = builder().build(&msg).unwrap();
        assert_eq!(request.headers.get("apns-priority"), Some("5"));

        // Visitor headers land after the authenticator's.
        let names: Vec<&str> = request.headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names.last(), Some(&"apns-priority"));
    }
}
