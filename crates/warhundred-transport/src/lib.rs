//! Transport abstraction layer for the War Hundred client.
//!
//! Provides the [`Transport`] trait: one request in, one response out.
//! Everything above this crate (sessions, panels) talks to the backend
//! through it, which lets tests swap the real HTTP stack for a stub.
//!
//! # Feature Flags
//!
//! - `http` (default): HTTP transport via `reqwest`

#[cfg(feature = "http")]
mod http;
mod error;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::fmt;
use std::future::Future;

/// HTTP verbs used by the game API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Put => f.write_str("PUT"),
        }
    }
}

/// A single outgoing API call.
///
/// `path` is relative to the transport's base URL. `bearer`, when set,
/// becomes an `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<&'static str>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            content_type: None,
            bearer: None,
        }
    }

    /// A `GET` request without body or credentials.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A `POST` request without body or credentials.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// A `PUT` request without body or credentials.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Attaches an encoded body and its content type.
    pub fn with_body(mut self, body: Vec<u8>, content_type: &'static str) -> Self {
        self.body = Some(body);
        self.content_type = Some(content_type);
        self
    }

    /// Attaches a bearer token.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// The raw answer to an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable status, e.g. `"401 Unauthorized"`.
    pub fn status_text(&self) -> String {
        #[cfg(feature = "http")]
        {
            if let Some(reason) = reqwest::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
            {
                return format!("{} {reason}", self.status);
            }
        }
        format!("HTTP {}", self.status)
    }
}

/// Performs API calls against the game backend.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one transport is shared (behind `Arc`) by
///   the session and every polling panel, each on its own task.
/// - The returned future is `Send` so callers can `tokio::spawn` it.
///
/// Implementors can write `async fn execute` in their `impl` block.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and waits for the full response.
    ///
    /// Only failures to complete the exchange are errors; any HTTP
    /// status, including 4xx/5xx, comes back as `Ok`.
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_builders_set_method_and_path() {
        let req = ApiRequest::put("/profile/alice");
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.path, "/profile/alice");
        assert!(req.body.is_none());
        assert!(req.bearer.is_none());
    }

    #[test]
    fn test_api_request_with_body_records_content_type() {
        let req = ApiRequest::post("/login").with_body(b"{}".to_vec(), "application/json");
        assert_eq!(req.body.as_deref(), Some(&b"{}"[..]));
        assert_eq!(req.content_type, Some("application/json"));
    }

    #[test]
    fn test_api_request_with_bearer() {
        let req = ApiRequest::get("/zone/players").with_bearer("tok1");
        assert_eq!(req.bearer.as_deref(), Some("tok1"));
    }

    #[test]
    fn test_api_response_is_success_only_for_2xx() {
        let ok = ApiResponse { status: 204, body: vec![] };
        let redirect = ApiResponse { status: 302, body: vec![] };
        let denied = ApiResponse { status: 401, body: vec![] };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!denied.is_success());
    }

    #[test]
    fn test_api_response_status_text_includes_reason() {
        let denied = ApiResponse { status: 401, body: vec![] };
        assert_eq!(denied.status_text(), "401 Unauthorized");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
