//! Player profile: the service behind the profile page and the mini
//! profile card.

use serde::de::DeserializeOwned;
use warhundred_protocol::{PlayerProfile, PlayerStatistics, Rank};
use warhundred_session::ApiClient;
use warhundred_transport::{ApiRequest, Transport};

use crate::PanelError;

/// Authenticated calls for one player's data.
pub struct PlayerService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for PlayerService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> PlayerService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /profile/{nickname}`
    pub async fn profile(&self, nickname: &str) -> Result<PlayerProfile, PanelError> {
        let path = format!("/profile/{}", path_segment(nickname)?);
        self.get(&path).await
    }

    /// `PUT /profile/{nickname}`. Returns the server's copy, or `profile`
    /// itself if the server answered without a body.
    pub async fn update_profile(
        &self,
        nickname: &str,
        profile: &PlayerProfile,
    ) -> Result<PlayerProfile, PanelError> {
        let path = format!("/profile/{}", path_segment(nickname)?);
        let request = self.client.json_body(ApiRequest::put(path.as_str()), profile)?;
        let response = self.client.send(request).await?;
        if !response.is_success() {
            tracing::warn!(%path, status = response.status, "profile update rejected");
            return Err(PanelError::Status {
                status: response.status,
            });
        }
        if response.body.is_empty() {
            return Ok(profile.clone());
        }
        Ok(self.client.decode(&response)?)
    }

    pub async fn inventory(&self, nickname: &str) -> Result<serde_json::Value, PanelError> {
        self.player_data("inventory", nickname).await
    }

    pub async fn skills(&self, nickname: &str) -> Result<serde_json::Value, PanelError> {
        self.player_data("skills", nickname).await
    }

    pub async fn achievements(&self, nickname: &str) -> Result<serde_json::Value, PanelError> {
        self.player_data("achievements", nickname).await
    }

    pub async fn statistics(&self, nickname: &str) -> Result<PlayerStatistics, PanelError> {
        self.player_data("statistics", nickname).await
    }

    async fn player_data<M: DeserializeOwned>(
        &self,
        kind: &str,
        nickname: &str,
    ) -> Result<M, PanelError> {
        let path = format!("/player/{kind}/{}", path_segment(nickname)?);
        self.get(&path).await
    }

    async fn get<M: DeserializeOwned>(&self, path: &str) -> Result<M, PanelError> {
        let response = self.client.send(ApiRequest::get(path)).await.map_err(|e| {
            tracing::warn!(path, error = %e, "player request failed");
            PanelError::from(e)
        })?;
        if !response.is_success() {
            tracing::warn!(path, status = response.status, "player request rejected");
            return Err(PanelError::Status {
                status: response.status,
            });
        }
        Ok(self.client.decode(&response)?)
    }
}

/// Nicknames go into the URL path as a single segment. Dot segments and
/// `%` are refused too, since URL joining would resolve `..` and `%2e%2e`
/// against the parent path.
fn path_segment(nickname: &str) -> Result<&str, PanelError> {
    if nickname.is_empty()
        || matches!(nickname, "." | "..")
        || nickname.contains(['/', '\\', '?', '#', '%'])
    {
        return Err(PanelError::InvalidNickname(nickname.to_string()));
    }
    Ok(nickname)
}

// ---------------------------------------------------------------------------
// MiniProfile
// ---------------------------------------------------------------------------

/// The compact character card: name, rank and three bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniProfile {
    pub nickname: String,
    pub level: u32,
    pub rank: Rank,
    pub spec: Option<String>,
    /// Bar fill, 0..=100.
    pub health: u8,
    pub stamina: u8,
    /// Progress towards the next level, 0..=100.
    pub experience: u8,
}

impl MiniProfile {
    /// The placeholder card shown before real data is wired in.
    pub fn sample() -> Self {
        Self {
            nickname: "YourCharacter".into(),
            level: 5,
            rank: Rank::Novice,
            spec: Some("Archer".into()),
            health: 75,
            stamina: 60,
            experience: 65,
        }
    }
}

impl From<&PlayerProfile> for MiniProfile {
    fn from(p: &PlayerProfile) -> Self {
        Self {
            nickname: p.nickname.clone(),
            level: p.level,
            rank: p.rank,
            spec: p.spec.clone(),
            health: percent(p.health, p.max_health),
            stamina: percent(p.stamina, p.max_stamina),
            experience: percent(p.experience, p.next_level_experience),
        }
    }
}

fn percent(value: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    (u64::from(value) * 100 / u64::from(max)).min(100) as u8
}
