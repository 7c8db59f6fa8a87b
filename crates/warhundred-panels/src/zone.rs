//! "Players in Zone" panel.

use tokio::sync::watch;
use warhundred_protocol::{Rank, ZonePlayer};
use warhundred_session::ApiClient;
use warhundred_transport::Transport;

use crate::panel::{ListPanel, fetch_list};
use crate::{PanelError, PanelSource, PanelState, Refresh};

pub const ZONE_PLAYERS_PATH: &str = "/zone/players";

pub const LOAD_FAILED: &str = "Failed to load players data";
pub const CONNECTION_FAILED: &str = "Error connecting to server";

/// One rendered line of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRow {
    pub initial: char,
    /// `nickname[level]`
    pub label: String,
    pub rank: Rank,
    pub pips: u8,
}

impl From<&ZonePlayer> for ZoneRow {
    fn from(player: &ZonePlayer) -> Self {
        Self {
            initial: player.avatar_initial(),
            label: format!("{}[{}]", player.nickname, player.level),
            rank: player.rank,
            pips: player.rank.pips(),
        }
    }
}

/// The players currently in the zone, refreshed from the backend.
pub struct ZonePlayersPanel<T> {
    client: ApiClient<T>,
    list: ListPanel<ZonePlayer>,
}

impl<T> Clone for ZonePlayersPanel<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            list: self.list.clone(),
        }
    }
}

impl<T: Transport> ZonePlayersPanel<T> {
    pub fn new(client: ApiClient<T>, source: PanelSource<ZonePlayer>) -> Self {
        Self {
            client,
            list: ListPanel::new(source),
        }
    }

    pub fn snapshot(&self) -> PanelState<ZonePlayer> {
        self.list.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelState<ZonePlayer>> {
        self.list.subscribe()
    }

    /// Rows ready for display, in server order.
    pub fn rows(&self) -> Vec<ZoneRow> {
        self.snapshot().items.iter().map(ZoneRow::from).collect()
    }

    /// Header text, e.g. `"5 online"`.
    pub fn summary(&self) -> String {
        format!("{} online", self.snapshot().items.len())
    }

    /// Placeholder shown when the list is empty and nothing else is.
    pub fn empty_message(&self) -> Option<&'static str> {
        let state = self.snapshot();
        (state.items.is_empty() && !state.is_loading && state.error.is_none())
            .then_some("No players in this zone")
    }

    async fn fetch(&self) -> Result<Vec<ZonePlayer>, PanelError> {
        fetch_list(&self.client, ZONE_PLAYERS_PATH).await
    }
}

impl<T: Transport> Refresh for ZonePlayersPanel<T> {
    fn name(&self) -> &'static str {
        "zone"
    }

    async fn refresh(&self) {
        if self.list.is_fixture() {
            return;
        }
        self.list.begin_fetch();

        let outcome = self.fetch().await.map_err(|e| {
            tracing::warn!(error = %e, "zone players fetch failed");
            if e.is_connection_failure() {
                CONNECTION_FAILED.to_string()
            } else {
                LOAD_FAILED.to_string()
            }
        });
        if let Ok(players) = &outcome {
            tracing::debug!(count = players.len(), "zone players loaded");
        }
        self.list.finish_fetch(outcome);
    }
}
