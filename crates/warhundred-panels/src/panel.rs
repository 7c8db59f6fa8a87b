//! Shared plumbing for list panels.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use warhundred_session::ApiClient;
use warhundred_transport::{ApiRequest, Transport};

use crate::PanelError;

/// What a list panel renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    /// Player-facing message of the last failed fetch.
    pub error: Option<String>,
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
        }
    }
}

/// Where a panel's items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSource<T> {
    /// Fetched from the backend.
    Remote,
    /// Fixed data, for development and tests. Nothing is fetched.
    Fixture(Vec<T>),
}

impl<T> PanelSource<T> {
    pub fn is_fixture(&self) -> bool {
        matches!(self, Self::Fixture(_))
    }
}

/// A panel that can reload itself. Driven by
/// [`spawn_poller`](crate::spawn_poller).
///
/// # Trait bounds
///
/// - `Clone` → every tick gets its own copy of the handle to fetch with.
/// - `Send + Sync + 'static` → fetches run as separate Tokio tasks.
pub trait Refresh: Clone + Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fetches once and writes the outcome into the panel state.
    fn refresh(&self) -> impl Future<Output = ()> + Send;
}

/// Observable list state shared by clones of a panel.
pub(crate) struct ListPanel<T> {
    state: Arc<watch::Sender<PanelState<T>>>,
    fixture: bool,
}

impl<T> Clone for ListPanel<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            fixture: self.fixture,
        }
    }
}

impl<T: Clone> ListPanel<T> {
    /// A remote panel starts out loading; a fixture panel starts out
    /// filled.
    pub(crate) fn new(source: PanelSource<T>) -> Self {
        let (initial, fixture) = match source {
            PanelSource::Remote => (
                PanelState {
                    is_loading: true,
                    ..PanelState::default()
                },
                false,
            ),
            PanelSource::Fixture(items) => (
                PanelState {
                    items,
                    ..PanelState::default()
                },
                true,
            ),
        };
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
            fixture,
        }
    }

    pub(crate) fn is_fixture(&self) -> bool {
        self.fixture
    }

    pub(crate) fn snapshot(&self) -> PanelState<T> {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<PanelState<T>> {
        self.state.subscribe()
    }

    pub(crate) fn begin_fetch(&self) {
        self.state.send_modify(|s| {
            s.error = None;
            s.is_loading = true;
        });
    }

    /// Replaces the items on success, or empties them and records
    /// `message` on failure.
    pub(crate) fn finish_fetch(&self, outcome: Result<Vec<T>, String>) {
        self.state.send_modify(|s| {
            s.is_loading = false;
            match outcome {
                Ok(items) => s.items = items,
                Err(message) => {
                    s.items.clear();
                    s.error = Some(message);
                }
            }
        });
    }

    pub(crate) fn modify(&self, f: impl FnOnce(&mut PanelState<T>)) {
        self.state.send_modify(f);
    }
}

/// GETs `path` with the stored credential and decodes a JSON list.
pub(crate) async fn fetch_list<T, Tr>(
    client: &ApiClient<Tr>,
    path: &str,
) -> Result<Vec<T>, PanelError>
where
    T: DeserializeOwned,
    Tr: Transport,
{
    let response = client.send(ApiRequest::get(path)).await?;
    if !response.is_success() {
        return Err(PanelError::Status {
            status: response.status,
        });
    }
    Ok(client.decode(&response)?)
}
