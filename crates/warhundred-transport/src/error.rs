/// Errors that can occur in the transport layer.
///
/// A non-success HTTP status is NOT a transport error: the exchange
/// worked, and the caller decides what a 401 or 500 means.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured base URL can't be used to build request URLs.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[cfg(feature = "http")]
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Sending the request failed after connecting (timeout, TLS, reset).
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The status line arrived but the body could not be read.
    #[cfg(feature = "http")]
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// No connection could be made: refused, DNS failure, host down.
    #[error("server unreachable: {0}")]
    Unreachable(String),
}
