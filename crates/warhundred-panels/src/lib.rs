//! Side panels of the War Hundred main page.
//!
//! - [`ZonePlayersPanel`]: who else is in the zone.
//! - [`ChatPanel`]: chat history and the player's draft.
//! - [`PlayerService`] / [`MiniProfile`]: profile data and the character
//!   card.
//!
//! List panels keep a [`PanelState`] in a `tokio::sync::watch` channel
//! and reload through [`Refresh`]; [`spawn_poller`] calls it on a timer.
//! All requests go through the session's [`ApiClient`], so they carry the
//! player's bearer token whenever one is stored.
//!
//! [`ApiClient`]: warhundred_session::ApiClient

mod chat;
mod error;
pub mod fixtures;
mod panel;
mod poller;
mod profile;
mod zone;

pub use chat::{CHAT_MESSAGES_PATH, ChatPanel, LOCAL_SENDER};
pub use error::PanelError;
pub use panel::{PanelSource, PanelState, Refresh};
pub use poller::{PollConfig, PollerHandle, spawn_poller};
pub use profile::{MiniProfile, PlayerService};
pub use zone::{ZONE_PLAYERS_PATH, ZonePlayersPanel, ZoneRow};

/// Player-facing error strings.
pub mod messages {
    pub use crate::chat::LOAD_FAILED as CHAT_LOAD_FAILED;
    pub use crate::zone::{CONNECTION_FAILED as ZONE_CONNECTION_FAILED, LOAD_FAILED as ZONE_LOAD_FAILED};
}
