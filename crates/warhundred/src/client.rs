//! `GameClient` builder and the wiring between the layers.
//!
//! The client owns one of everything: the credential store, the session,
//! the in-game view, and the side panels. All of them share a single
//! [`ApiClient`], so a token stored by login is what the panels send.

use std::future::Future;
use std::sync::Arc;

use warhundred_panels::{
    ChatPanel, MiniProfile, PanelSource, PlayerService, PollerHandle, ZonePlayersPanel, fixtures,
    spawn_poller,
};
use warhundred_session::{
    ApiClient, AuthState, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    SessionService,
};
use warhundred_transport::{HttpTransport, Transport};
use warhundred_view::{
    Canvas, CanvasHandle, GameViewState, Page, RouteGate, Surface, ViewSelector, gate,
    resolve_route, spawn_canvas,
};

use crate::{ClientConfig, WarhundredError};

/// Builder for a [`GameClient`].
///
/// # Example
///
/// ```rust,no_run
/// use warhundred::prelude::*;
///
/// # async fn run() -> Result<(), WarhundredError> {
/// let client = GameClient::builder()
///     .config(ClientConfig::from_env())
///     .build()?;
/// client.login("alice", "secret").await?;
/// # Ok(())
/// # }
/// ```
pub struct GameClientBuilder {
    config: ClientConfig,
    store: Option<Arc<dyn CredentialStore>>,
    fixtures: bool,
}

impl GameClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            store: None,
            fixtures: false,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides where the token is kept. Without this the store comes
    /// from `credential_path`, or memory if that is unset.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Fills the zone and chat panels with canned data instead of
    /// fetching them.
    pub fn use_fixtures(mut self, enabled: bool) -> Self {
        self.fixtures = enabled;
        self
    }

    /// Builds a client talking HTTP to `config.api_base_url`.
    pub fn build(self) -> Result<GameClient, WarhundredError> {
        let config = self.config.clone().validated();
        let transport = HttpTransport::new(&config.api_base_url, config.request_timeout)?;
        Ok(self.config(config).build_with_transport(Arc::new(transport)))
    }

    /// Builds a client over any transport.
    pub fn build_with_transport<T: Transport>(self, transport: Arc<T>) -> GameClient<T> {
        let config = self.config.validated();
        let store = self.store.unwrap_or_else(|| match &config.credential_path {
            Some(path) => Arc::new(FileCredentialStore::new(path.clone())),
            None => Arc::new(MemoryCredentialStore::new()),
        });

        let api = ApiClient::new(transport, store);
        let (zone_source, chat_source) = if self.fixtures {
            (
                PanelSource::Fixture(fixtures::zone_players()),
                PanelSource::Fixture(fixtures::chat_messages()),
            )
        } else {
            (PanelSource::Remote, PanelSource::Remote)
        };

        tracing::info!(
            api = %config.api_base_url,
            environment = %config.environment,
            fixtures = self.fixtures,
            "game client ready"
        );

        GameClient {
            auth: AuthState::new(SessionService::new(api.clone())),
            views: GameViewState::default(),
            zone: ZonePlayersPanel::new(api.clone(), zone_source),
            chat: ChatPanel::new(api.clone(), chat_source),
            players: PlayerService::new(api.clone()),
            api,
            config,
        }
    }
}

impl Default for GameClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The timers started by [`GameClient::start_polling`]. Dropping this
/// stops both.
#[derive(Debug)]
pub struct Pollers {
    pub zone: PollerHandle,
    pub chat: PollerHandle,
}

/// A War Hundred client.
pub struct GameClient<T = HttpTransport> {
    config: ClientConfig,
    api: ApiClient<T>,
    auth: AuthState<T>,
    views: GameViewState,
    zone: ZonePlayersPanel<T>,
    chat: ChatPanel<T>,
    players: PlayerService<T>,
}

impl GameClient {
    pub fn builder() -> GameClientBuilder {
        GameClientBuilder::new()
    }
}

impl<T: Transport> GameClient<T> {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn auth(&self) -> &AuthState<T> {
        &self.auth
    }

    pub fn views(&self) -> &GameViewState {
        &self.views
    }

    pub fn zone(&self) -> &ZonePlayersPanel<T> {
        &self.zone
    }

    pub fn chat(&self) -> &ChatPanel<T> {
        &self.chat
    }

    pub fn players(&self) -> &PlayerService<T> {
        &self.players
    }

    /// The top-level view for the current session.
    pub fn selector(&self) -> ViewSelector {
        gate(&self.auth.snapshot())
    }

    /// A gate that follows future session changes.
    pub fn route_gate(&self) -> RouteGate {
        RouteGate::from(&self.auth)
    }

    pub fn page(&self, path: &str) -> Page {
        resolve_route(path, &self.auth.snapshot())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), WarhundredError> {
        Ok(self.auth.login(username, password).await?)
    }

    /// Logs out. The stored token is gone as soon as this is called, even
    /// if the returned future is dropped; awaiting it waits for the server
    /// notification.
    pub fn logout(&self) -> impl Future<Output = Result<(), WarhundredError>> + Send + use<T> {
        let pending = self.auth.logout();
        async move { Ok(pending.await?) }
    }

    /// The character card for the logged-in player, or the sample card
    /// when nobody is logged in.
    pub async fn mini_profile(&self) -> Result<MiniProfile, WarhundredError> {
        match self.auth.user() {
            Some(nickname) => {
                let profile = self.players.profile(&nickname).await?;
                Ok(MiniProfile::from(&profile))
            }
            None => Ok(MiniProfile::sample()),
        }
    }

    /// Starts reloading the zone and chat panels every
    /// `config.poll_interval`.
    pub fn start_polling(&self) -> Pollers {
        let poll = self.config.poll_config();
        Pollers {
            zone: spawn_poller(self.zone.clone(), poll),
            chat: spawn_poller(self.chat.clone(), poll),
        }
    }

    /// Mounts a canvas on `surface` that follows this client's view.
    pub fn mount_canvas<S: Surface>(&self, surface: S, width: u32, height: u32) -> CanvasHandle {
        let canvas = Canvas::mount(surface, self.views.current(), width, height);
        spawn_canvas(canvas, self.views.subscribe())
    }
}
