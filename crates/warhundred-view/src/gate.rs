//! Route gate: which top-level view to mount for a given session.

use tokio::sync::watch;
use warhundred_session::{AuthState, Session};
use warhundred_transport::Transport;

/// The two top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSelector {
    /// Login and registration forms.
    EntryView,
    /// The game window.
    MainView,
}

/// Picks the top-level view. Only `user` matters: an in-flight login
/// still shows the entry view, an in-flight logout still shows the game.
pub fn gate(session: &Session) -> ViewSelector {
    if session.user.is_some() {
        ViewSelector::MainView
    } else {
        ViewSelector::EntryView
    }
}

/// What the router renders for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Entry,
    Main,
    /// "Page not found".
    Missing,
}

/// Resolves a path. Only the root is routed; it shows whatever the gate
/// picks.
pub fn resolve_route(path: &str, session: &Session) -> Page {
    match path {
        "" | "/" => match gate(session) {
            ViewSelector::EntryView => Page::Entry,
            ViewSelector::MainView => Page::Main,
        },
        _ => Page::Missing,
    }
}

/// A [`gate`] kept up to date with a live session.
#[derive(Debug)]
pub struct RouteGate {
    session: watch::Receiver<Session>,
    current: ViewSelector,
}

impl RouteGate {
    pub fn new(mut session: watch::Receiver<Session>) -> Self {
        let current = gate(&session.borrow_and_update());
        Self { session, current }
    }

    pub fn current(&self) -> ViewSelector {
        self.current
    }

    /// Waits until the selected view flips and returns the new one.
    ///
    /// Session updates that don't change the selection (loading flag,
    /// errors) are skipped. Returns `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<ViewSelector> {
        loop {
            self.session.changed().await.ok()?;
            let next = gate(&self.session.borrow_and_update());
            if next != self.current {
                tracing::debug!(from = ?self.current, to = ?next, "route gate flipped");
                self.current = next;
                return Some(next);
            }
        }
    }
}

impl<T: Transport> From<&AuthState<T>> for RouteGate {
    fn from(auth: &AuthState<T>) -> Self {
        Self::new(auth.subscribe())
    }
}
