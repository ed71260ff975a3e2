//! Default JSON payload encoder.

use apns_core::BuildError;

use crate::PayloadEncoder;

/// Encodes payloads as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadEncoder;

impl PayloadEncoder for JsonPayloadEncoder {
    fn encode(&self, payload: &serde_json::Value) -> Result<Vec<u8>, BuildError> {
        serde_json::to_vec(payload).map_err(|e| BuildError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PayloadEncoder as _;

    #[test]
    fn test_encodes_compact_json() {
        let payload = serde_json::json!({"aps": {"alert": "hello"}});
        let bytes = JsonPayloadEncoder.encode(&payload).unwrap();
        assert_eq!(bytes, br#"{"aps":{"alert":"hello"}}"#);
    }
}
