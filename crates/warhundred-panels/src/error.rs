//! Error types for the panels.

use warhundred_protocol::ProtocolError;
use warhundred_transport::TransportError;

/// Errors from panel fetches and the player service.
///
/// Panels don't show these verbatim: each panel maps them to its own
/// short message for the player.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("server answered {status}")]
    Status { status: u16 },

    /// A body could not be encoded, or a success body didn't have the
    /// expected shape.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The nickname can't be placed in a request path.
    #[error("invalid nickname: {0:?}")]
    InvalidNickname(String),
}

impl PanelError {
    /// `true` when the backend couldn't be reached at all.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
