//! Codec trait and implementations for serializing/deserializing bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The HTTP client and the credential file both go through a [`Codec`],
//! so neither of them cares which serialization format is in use.
//!
//! The game API speaks JSON, so [`JsonCodec`] is the only implementation
//! today.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → safe to share between tasks (pollers run on any
///   thread of the Tokio pool).
/// - `'static` → the codec owns everything it needs, so it can live
///   inside long-lived clients.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// The `Content-Type` header value for bodies produced by this codec.
    fn content_type(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use warhundred_protocol::{Codec, JsonCodec, LoginRequest};
///
/// let codec = JsonCodec;
///
/// let request = LoginRequest {
///     username: "alice".into(),
///     password: "secret".into(),
/// };
///
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: LoginRequest = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::LoginResponse;

    #[test]
    fn test_decode_login_response_from_server_json() {
        let body = br#"{"access_token":"tok1","nickname":"alice"}"#;

        let decoded: LoginResponse = JsonCodec.decode(body).unwrap();

        assert_eq!(decoded.access_token, "tok1");
        assert_eq!(decoded.nickname, "alice");
    }

    #[test]
    fn test_decode_html_error_page_returns_decode_error() {
        // Reverse proxies answer with HTML when the backend is down.
        let body = b"<html>502 Bad Gateway</html>";

        let result: Result<LoginResponse, _> = JsonCodec.decode(body);

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_content_type_is_json() {
        assert_eq!(JsonCodec.content_type(), "application/json");
    }
}
