//! Which scene the game window shows: the town or a battle.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::ViewError;

/// The game window's rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewState {
    #[default]
    Town,
    Battle,
}

impl ViewState {
    pub const ALL: [ViewState; 2] = [ViewState::Town, ViewState::Battle];

    /// Textual form: `"TOWN"` or `"BATTLE"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Town => "TOWN",
            Self::Battle => "BATTLE",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewState {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ViewError::InvalidViewState(s.to_string()))
    }
}

/// Shared, observable [`ViewState`].
///
/// Clones share the same value. Canvases subscribe and redraw when it
/// changes.
#[derive(Debug, Clone)]
pub struct GameViewState {
    sender: Arc<watch::Sender<ViewState>>,
}

impl Default for GameViewState {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}

impl GameViewState {
    pub fn new(initial: ViewState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> ViewState {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.sender.subscribe()
    }

    /// Makes `view` active. Subscribers are only woken if it differs from
    /// the current value.
    pub fn change_view(&self, view: ViewState) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        });
        if changed {
            tracing::debug!(%view, "game view changed");
        }
    }

    /// Switches by textual name. Unknown names are logged and ignored.
    pub fn request_view(&self, requested: &str) {
        match requested.parse::<ViewState>() {
            Ok(view) => self.change_view(view),
            Err(e) => {
                tracing::warn!(error = %e, current = %self.current(), "view change ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_defaults_to_town() {
        assert_eq!(ViewState::default(), ViewState::Town);
        assert_eq!(GameViewState::default().current(), ViewState::Town);
    }

    #[test]
    fn test_from_str_accepts_exact_names_only() {
        assert_eq!("TOWN".parse::<ViewState>(), Ok(ViewState::Town));
        assert_eq!("BATTLE".parse::<ViewState>(), Ok(ViewState::Battle));
        assert_eq!(
            "battle".parse::<ViewState>(),
            Err(ViewError::InvalidViewState("battle".into()))
        );
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&ViewState::Battle).unwrap();
        assert_eq!(json, r#""BATTLE""#);
        let back: ViewState = serde_json::from_str(r#""TOWN""#).unwrap();
        assert_eq!(back, ViewState::Town);
    }

    #[test]
    fn test_change_view_battle_then_town_returns_to_town() {
        let views = GameViewState::default();

        views.change_view(ViewState::Battle);
        assert_eq!(views.current(), ViewState::Battle);
        views.change_view(ViewState::Town);

        assert_eq!(views.current(), ViewState::Town);
    }

    #[test]
    fn test_request_view_unknown_name_leaves_state_unchanged() {
        let views = GameViewState::new(ViewState::Battle);

        views.request_view("NOT_A_STATE");

        assert_eq!(views.current(), ViewState::Battle);
    }

    #[test]
    fn test_request_view_by_name() {
        let views = GameViewState::default();

        views.request_view("BATTLE");

        assert_eq!(views.current(), ViewState::Battle);
    }

    #[test]
    fn test_change_view_same_value_does_not_notify() {
        let views = GameViewState::default();
        let rx = views.subscribe();

        views.change_view(ViewState::Town);

        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clones_share_state() {
        let views = GameViewState::default();
        let other = views.clone();

        other.change_view(ViewState::Battle);

        assert_eq!(views.current(), ViewState::Battle);
    }
}
