//! Error types for the view layer.

/// Errors that can occur while switching views or driving a canvas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A textual view-state request named no known state.
    ///
    /// [`GameViewState::request_view`](crate::GameViewState::request_view)
    /// logs this and carries on; it never reaches the caller.
    #[error("invalid game state: {0}")]
    InvalidViewState(String),

    /// The canvas task has already exited.
    #[error("canvas is no longer running")]
    CanvasStopped,
}
