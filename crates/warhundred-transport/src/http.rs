//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// A `reqwest`-backed [`Transport`] bound to one API base URL.
///
/// `reqwest::Client` pools connections internally and is cheap to clone,
/// so one `HttpTransport` serves the whole client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Builds a transport for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// - [`TransportError::InvalidBaseUrl`] if the URL doesn't parse or
    ///   isn't `http`/`https`.
    /// - [`TransportError::Client`] if the TLS backend fails to initialize.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        // A trailing slash makes `Url::join` treat the last segment as a
        // directory, so "https://host/api" + "login" → "https://host/api/login".
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| TransportError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidBaseUrl(format!(
                "unsupported scheme {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        tracing::debug!(%base_url, ?timeout, "HTTP transport ready");
        Ok(Self { client, base_url })
    }

    /// The base URL every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidBaseUrl(format!("{path}: {e}")))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let method = request.method;
        let mut builder = self.client.request(method.into(), url.clone());

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            if let Some(content_type) = request.content_type {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Unreachable(format!("{url}: {e}"))
            } else {
                TransportError::Request(e)
            }
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(TransportError::Body)?
            .to_vec();

        tracing::debug!(
            %method,
            path = %request.path,
            status,
            bytes = body.len(),
            "API call finished"
        );
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(base, Duration::from_secs(1)).expect("valid base url")
    }

    #[test]
    fn test_url_for_joins_relative_to_base_path() {
        let t = transport("https://example.com/api");
        let url = t.url_for("/zone/players").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/zone/players");
    }

    #[test]
    fn test_url_for_tolerates_trailing_slash_on_base() {
        let t = transport("http://localhost:8000/");
        let url = t.url_for("login").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/login");
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let result = HttpTransport::new("ftp://example.com", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_new_rejects_garbage_url() {
        let result = HttpTransport::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidBaseUrl(_))));
    }
}
