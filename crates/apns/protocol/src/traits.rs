//! Collaborator traits consumed by the dispatch engine.

use apns_core::{
    ApnsError, BuildError, DeviceToken, Notification, RejectEvent, Request, Response,
    TransportError,
};

/// Encodes a notification payload to the request body.
pub trait PayloadEncoder: Send + Sync {
    /// Encode a payload to bytes. Deterministic; fails on malformed input.
    fn encode(&self, payload: &serde_json::Value) -> Result<Vec<u8>, BuildError>;
}

/// Builds the target URI for a device token and environment.
pub trait UriFactory: Send + Sync {
    /// Create the request URI for a token, selecting the sandbox or
    /// production endpoint.
    fn create(&self, token: &DeviceToken, sandbox: bool) -> String;
}

/// Attaches credentials to an outbound request.
pub trait Authenticator: Send + Sync {
    /// Add or overwrite the authentication headers on a request.
    fn authenticate(&self, request: Request) -> Result<Request, BuildError>;
}

/// Final per-notification mutation hook before the request is finished.
pub trait ProtocolVisitor: Send + Sync {
    /// Apply notification-specific headers or body changes.
    fn visit(&self, notification: &Notification, request: Request) -> Request;
}

/// Maps an APNs response into a typed rejection reason.
pub trait ExceptionFactory: Send + Sync {
    /// Return the rejection the response encodes, or `None` if the
    /// response carries no application-level rejection.
    fn create(&self, response: &Response) -> Option<ApnsError>;
}

/// Low-level HTTP sender shared by all in-flight requests of one batch.
#[trait_variant::make(Send)]
pub trait HttpSender: Send + Sync {
    /// Execute one request and return the response.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;

    /// Release the underlying connection. Safe to call more than once.
    fn close(&self);
}

impl<S: HttpSender> HttpSender for std::sync::Arc<S> {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (**self).send(request).await
    }

    fn close(&self) {
        (**self).close()
    }
}

/// Observer invoked once per rejected or failed message.
pub trait RejectListener: Send + Sync {
    /// Handle one reject event.
    fn on_reject(&self, event: &RejectEvent<'_>);
}

impl<F> RejectListener for F
where
    F: Fn(&RejectEvent<'_>) + Send + Sync,
{
    fn on_reject(&self, event: &RejectEvent<'_>) {
        self(event)
    }
}
