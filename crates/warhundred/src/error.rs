//! Unified error type for the War Hundred client.

use warhundred_panels::PanelError;
use warhundred_protocol::ProtocolError;
use warhundred_session::SessionError;
use warhundred_transport::TransportError;
use warhundred_view::ViewError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `warhundred` facade you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WarhundredError {
    /// Bad base URL, or the HTTP stack failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body couldn't be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Login, logout or registration failed or was refused.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A view-state request or the canvas task failed.
    #[error(transparent)]
    View(#[from] ViewError),

    /// A panel fetch or player request failed.
    #[error(transparent)]
    Panel(#[from] PanelError),
}
