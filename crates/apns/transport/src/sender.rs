//! reqwest-backed HTTP/2 sender.

use std::sync::Mutex;
use std::time::Duration;

use apns_core::{Request, Response, TransportError};
use apns_protocol::HttpSender;
use color_eyre::eyre::WrapErr as _;

/// Sender configuration.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP/2 sender backed by a shared reqwest client.
///
/// The client tolerates concurrent use up to the dispatch pool's ceiling;
/// `close` drops it, after which every send fails with
/// [`TransportError::Closed`].
pub struct ReqwestSender {
    client: Mutex<Option<reqwest::Client>>,
}

impl ReqwestSender {
    /// Create a sender with the default configuration.
    pub fn new() -> color_eyre::eyre::Result<Self> {
        Self::with_config(SenderConfig::default())
    }

    /// Create a sender with an explicit configuration.
    pub fn with_config(config: SenderConfig) -> color_eyre::eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .http2_prior_knowledge()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .wrap_err("failed to create http client")?;

        Ok(Self {
            client: Mutex::new(Some(client)),
        })
    }

    fn client(&self) -> Result<reqwest::Client, TransportError> {
        self.client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or(TransportError::Closed)
    }
}

impl HttpSender for ReqwestSender {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let client = self.client()?;

        let mut outbound = client.post(&request.url).body(request.body);
        for (name, value) in request.headers.iter() {
            outbound = outbound.header(name, value);
        }

        let response = outbound.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_error)?;

        tracing::debug!(url = %request.url, status, "request completed");
        Ok(Response::new(status, body))
    }

    fn close(&self) {
        self.client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }
}

fn map_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connection(error.to_string())
    } else {
        TransportError::Protocol(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_config_default() {
        let config = SenderConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_send_after_close_fails_fast() {
        let sender = ReqwestSender::new().unwrap();
        sender.close();

        let result = sender
            .send(Request::new("https://api.push.apple.com/3/device/x", vec![]))
            .await;
        assert!(matches!(result, Err(TransportError::Closed)));
    }

    #[test]
    fn test_close_is_idempotent() {
        let sender = ReqwestSender::new().unwrap();
        sender.close();
        sender.close();
    }
}
