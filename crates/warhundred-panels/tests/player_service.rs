//! Integration tests for the player profile service.

use std::sync::{Arc, Mutex};

use warhundred_panels::{MiniProfile, PanelError, PlayerService};
use warhundred_protocol::{PlayerProfile, Rank};
use warhundred_session::{ApiClient, MemoryCredentialStore};
use warhundred_transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// Answers every request with the same status and body, recording what
/// it was asked.
struct Fixed {
    status: u16,
    body: &'static str,
    seen: Mutex<Vec<ApiRequest>>,
}

impl Fixed {
    fn new(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn last(&self) -> ApiRequest {
        self.seen.lock().unwrap().last().cloned().expect("a request")
    }
}

impl Transport for Fixed {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        Ok(ApiResponse {
            status: self.status,
            body: self.body.as_bytes().to_vec(),
        })
    }
}

fn service(transport: &Arc<Fixed>) -> PlayerService<Fixed> {
    PlayerService::new(ApiClient::new(
        Arc::clone(transport),
        Arc::new(MemoryCredentialStore::with_token("tok1")),
    ))
}

const PROFILE: &str = r#"{
    "nickname": "alice",
    "level": 4,
    "rank": "Soldier",
    "spec": "Archer",
    "health": 90,
    "maxHealth": 120,
    "stamina": 30,
    "experience": 250,
    "nextLevelExperience": 1000,
    "statistics": {"battlesWon": 12, "battlesLost": 3}
}"#;

#[tokio::test]
async fn test_profile_fetches_and_decodes() {
    let transport = Fixed::new(200, PROFILE);

    let profile = service(&transport).profile("alice").await.unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.path, "/profile/alice");
    assert_eq!(sent.bearer.as_deref(), Some("tok1"));
    assert_eq!(profile.rank, Rank::Soldier);
    assert_eq!(profile.max_health, 120);
    assert_eq!(profile.max_stamina, 100);
    assert_eq!(profile.statistics.battles_won, 12);
}

#[tokio::test]
async fn test_profile_feeds_mini_profile() {
    let transport = Fixed::new(200, PROFILE);

    let profile = service(&transport).profile("alice").await.unwrap();
    let card = MiniProfile::from(&profile);

    assert_eq!(card.health, 75);
    assert_eq!(card.stamina, 30);
    assert_eq!(card.experience, 25);
    assert_eq!(card.spec.as_deref(), Some("Archer"));
}

#[tokio::test]
async fn test_profile_not_found_is_status_error() {
    let transport = Fixed::new(404, "");

    let result = service(&transport).profile("nobody").await;

    assert!(matches!(result, Err(PanelError::Status { status: 404 })));
}

#[tokio::test]
async fn test_profile_rejects_nickname_with_slash_without_request() {
    let transport = Fixed::new(200, PROFILE);

    let result = service(&transport).profile("../admin").await;

    assert!(matches!(result, Err(PanelError::InvalidNickname(_))));
    assert!(transport.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_rejects_dot_segment_without_request() {
    let transport = Fixed::new(200, PROFILE);

    for nickname in ["..", ".", "%2E%2E"] {
        let result = service(&transport).statistics(nickname).await;
        assert!(
            matches!(result, Err(PanelError::InvalidNickname(_))),
            "{nickname:?} should be refused"
        );
    }
    assert!(transport.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_profile_puts_json_and_accepts_empty_reply() {
    let transport = Fixed::new(204, "");
    let profile = PlayerProfile {
        nickname: "alice".into(),
        level: 5,
        ..PlayerProfile::default()
    };

    let updated = service(&transport)
        .update_profile("alice", &profile)
        .await
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.path, "/profile/alice");
    assert_eq!(sent.content_type, Some("application/json"));
    assert_eq!(updated, profile);
}

#[tokio::test]
async fn test_statistics_and_inventory_paths() {
    let transport = Fixed::new(200, r#"{"battlesWon":1,"battlesLost":2,"timePlayedMinutes":3}"#);
    let players = service(&transport);

    let stats = players.statistics("alice").await.unwrap();
    assert_eq!(stats.time_played_minutes, 3);
    assert_eq!(transport.last().path, "/player/statistics/alice");

    let inventory = players.inventory("alice").await.unwrap();
    assert_eq!(inventory["battlesLost"], 2);
    assert_eq!(transport.last().path, "/player/inventory/alice");

    players.skills("alice").await.unwrap();
    assert_eq!(transport.last().path, "/player/skills/alice");

    players.achievements("alice").await.unwrap();
    assert_eq!(transport.last().path, "/player/achievements/alice");
}

#[test]
fn test_mini_profile_sample_card() {
    let card = MiniProfile::sample();
    assert_eq!(card.nickname, "YourCharacter");
    assert_eq!((card.health, card.stamina, card.experience), (75, 60, 65));
}
