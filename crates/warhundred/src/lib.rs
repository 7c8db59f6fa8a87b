//! # War Hundred
//!
//! Headless client core for the War Hundred browser game.
//!
//! A [`GameClient`] ties the layers together: credentials and the session
//! state machine, the route gate that picks the entry forms or the game
//! window, the town/battle view with its canvas, and the zone and chat
//! side panels. Rendering is left to the embedder; everything here is
//! state you can subscribe to.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warhundred::prelude::*;
//!
//! # async fn run() -> Result<(), WarhundredError> {
//! warhundred::init_tracing();
//!
//! let client = GameClient::builder()
//!     .config(ClientConfig::from_env())
//!     .build()?;
//!
//! client.login("alice", "secret").await?;
//! assert_eq!(client.selector(), ViewSelector::MainView);
//!
//! let _pollers = client.start_polling();
//! client.views().change_view(ViewState::Battle);
//!
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod telemetry;

pub use client::{GameClient, GameClientBuilder, Pollers};
pub use config::{API_URL_VAR, CREDENTIALS_VAR, ClientConfig, ENVIRONMENT_VAR, Environment};
pub use error::WarhundredError;
pub use telemetry::{DEFAULT_FILTER, init_tracing, init_tracing_with};

pub use warhundred_panels as panels;
pub use warhundred_protocol as protocol;
pub use warhundred_session as session;
pub use warhundred_transport as transport;
pub use warhundred_view as view;

/// Commonly used types.
pub mod prelude {
    pub use crate::{ClientConfig, Environment, GameClient, GameClientBuilder, WarhundredError};
    pub use warhundred_panels::{ChatPanel, MiniProfile, PanelState, PollConfig, ZonePlayersPanel};
    pub use warhundred_protocol::{ChatMessage, PlayerProfile, Rank, ZonePlayer};
    pub use warhundred_session::{AuthPhase, AuthState, CredentialStore, Session, SessionError};
    pub use warhundred_transport::{HttpTransport, Transport};
    pub use warhundred_view::{
        FrameBuffer, GameViewState, Page, RouteGate, Surface, ViewSelector, ViewState,
    };
}
