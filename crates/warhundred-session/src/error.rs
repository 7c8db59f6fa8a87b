//! Error types for the session layer.

use warhundred_protocol::ProtocolError;
use warhundred_transport::TransportError;

/// Errors that can occur while logging in, logging out, or registering.
///
/// These end up as entries in [`Session::errors`](crate::Session::errors),
/// which is why the enum is `Clone + PartialEq`: the session snapshot is
/// cloned out to every subscriber. Source errors are flattened to their
/// message for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The request never completed: refused connection, DNS failure,
    /// timeout, or the connection dropped mid-response.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with a non-success status. One entry is
    /// produced per message in the error body.
    #[error("rejected by server ({status}): {message}")]
    AuthRejected { status: u16, message: String },

    /// A body could not be encoded, or a success body could not be
    /// understood.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Another login or logout is still in flight on this session.
    #[error("a login or logout is already in progress")]
    OperationInFlight,

    /// The background logout task ended without reporting back
    /// (runtime shutdown or panic).
    #[error("logout task aborted: {0}")]
    TaskAborted(String),
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<ProtocolError> for SessionError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err.to_string())
    }
}
