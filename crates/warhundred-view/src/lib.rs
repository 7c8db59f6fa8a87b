//! What the War Hundred client shows.
//!
//! Three small pieces, from coarse to fine:
//!
//! - [`gate`] / [`RouteGate`]: entry forms or game window, decided by the
//!   session alone.
//! - [`GameViewState`]: inside the game window, the town or a battle.
//! - [`Canvas`]: paints the [`Scene`] for the current view onto a
//!   [`Surface`] and keeps it in sync with resizes and view changes.
//!
//! ```text
//! AuthState ──→ RouteGate ──→ MainView ──→ GameViewState ──→ Canvas ──→ Surface
//! ```

mod canvas;
mod error;
mod gate;
mod scene;
mod surface;
mod view_state;

pub use canvas::{Canvas, CanvasHandle, spawn_canvas};
pub use error::ViewError;
pub use gate::{Page, RouteGate, ViewSelector, gate, resolve_route};
pub use scene::{Color, DrawCommand, Rect, Scene};
pub use surface::{FrameBuffer, Surface};
pub use view_state::{GameViewState, ViewState};
