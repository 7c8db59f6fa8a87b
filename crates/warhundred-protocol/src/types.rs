//! Request and response bodies of the War Hundred HTTP API.
//!
//! Every type in this module travels "on the wire" as JSON. Field names
//! follow what the backend emits, which is why most structs use
//! `snake_case` while the profile uses `camelCase`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful answer to `POST /login`.
///
/// `access_token` becomes the bearer credential for every later
/// authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub nickname: String,
}

/// Body of `POST /logout`.
///
/// `access_token` is `None` when the client had already lost its token;
/// the server still gets told which nickname is leaving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub nickname: String,
    pub access_token: Option<String>,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Account identifier as returned by the backend.
///
/// Older backends return a numeric row id, newer ones a UUID string.
/// `#[serde(untagged)]` tries each variant in order until one fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Number(u64),
    Text(String),
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Successful answer to `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub id: Option<AccountId>,
    pub nickname: String,
    #[serde(default)]
    pub registered: bool,
}

/// Error body the backend attaches to non-success statuses.
///
/// Different handlers use different field names, so every field is
/// optional and [`ApiErrorBody::into_messages`] flattens whatever is there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiErrorBody {
    /// All messages in the body, `errors` first, blanks dropped.
    pub fn into_messages(self) -> Vec<String> {
        self.errors
            .into_iter()
            .chain(self.error)
            .chain(self.message)
            .filter(|m| !m.trim().is_empty())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// Military rank shown next to a player's name.
///
/// The backend sends free text. Anything we don't recognise is shown as
/// the lowest rank, so decoding never fails on a new rank name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum Rank {
    #[default]
    Novice,
    Recruit,
    Soldier,
    #[serde(rename = "Senior Soldier")]
    SeniorSoldier,
}

impl Rank {
    /// Number of pips drawn on the rank badge.
    pub fn pips(self) -> u8 {
        match self {
            Self::Novice => 0,
            Self::Recruit => 1,
            Self::Soldier => 2,
            Self::SeniorSoldier => 3,
        }
    }

    /// Display name, identical to the wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Recruit => "Recruit",
            Self::Soldier => "Soldier",
            Self::SeniorSoldier => "Senior Soldier",
        }
    }
}

impl From<String> for Rank {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Recruit" => Self::Recruit,
            "Soldier" => Self::Soldier,
            "Senior Soldier" => Self::SeniorSoldier,
            _ => Self::Novice,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `GET /zone/players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePlayer {
    pub nickname: String,
    pub level: u32,
    #[serde(default)]
    pub rank: Rank,
}

impl ZonePlayer {
    /// Letter shown in the avatar bubble: the uppercased first character
    /// of the nickname, or `'?'` for an empty one.
    pub fn avatar_initial(&self) -> char {
        self.nickname
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// One entry of `GET /chat/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: String,
    pub content: String,
    /// Pre-formatted `HH:MM` wall-clock time.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Lifetime counters shown on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatistics {
    pub battles_won: u32,
    pub battles_lost: u32,
    pub time_played_minutes: u32,
}

/// Body of `GET /profile/{nickname}` and `PUT /profile/{nickname}`.
///
/// Only `nickname` is required; a freshly registered character has no
/// stats yet and the backend omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub nickname: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub rank: Rank,
    #[serde(default)]
    pub spec: Option<String>,
    #[serde(default)]
    pub health: u32,
    #[serde(default = "default_pool")]
    pub max_health: u32,
    #[serde(default)]
    pub stamina: u32,
    #[serde(default = "default_pool")]
    pub max_stamina: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default = "default_pool")]
    pub next_level_experience: u32,
    #[serde(default)]
    pub strength: u32,
    #[serde(default)]
    pub dexterity: u32,
    #[serde(default)]
    pub physique: u32,
    #[serde(default)]
    pub luck: u32,
    #[serde(default)]
    pub intellect: u32,
    #[serde(default)]
    pub statistics: PlayerStatistics,
}

fn default_pool() -> u32 {
    100
}

// =========================================================================
// Tests
// =========================================================================
