//! Default URI factory for the APNs endpoints.

use apns_core::DeviceToken;

use crate::UriFactory;

/// APNs production host.
pub const PRODUCTION_HOST: &str = "api.push.apple.com";

/// APNs sandbox host.
pub const SANDBOX_HOST: &str = "api.sandbox.push.apple.com";

/// Builds `https://<host>/3/device/<token>` URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApnUriFactory;

impl UriFactory for ApnUriFactory {
    fn create(&self, token: &DeviceToken, sandbox: bool) -> String {
        let host = if sandbox {
            SANDBOX_HOST
        } else {
            PRODUCTION_HOST
        };
        format!("https://{}/3/device/{}", host, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UriFactory as _;

    #[test]
    fn test_production_uri() {
        let uri = ApnUriFactory.create(&DeviceToken::new("abc123"), false);
        assert_eq!(uri, "https://api.push.apple.com/3/device/abc123");
    }

    #[test]
    fn test_sandbox_uri() {
        let uri = ApnUriFactory.create(&DeviceToken::new("abc123"), true);
        assert_eq!(uri, "https://api.sandbox.push.apple.com/3/device/abc123");
    }
}
