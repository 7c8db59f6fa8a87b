//! Canned panel data for development builds and tests.

use warhundred_protocol::{ChatMessage, Rank, ZonePlayer};

pub fn zone_players() -> Vec<ZonePlayer> {
    [
        ("ArcherQueen", 5, Rank::Novice),
        ("DarkWizard", 6, Rank::Recruit),
        ("HealerGirl", 3, Rank::Novice),
        ("TankMaster", 7, Rank::SeniorSoldier),
        ("Warrior123", 7, Rank::Soldier),
    ]
    .into_iter()
    .map(|(nickname, level, rank)| ZonePlayer {
        nickname: nickname.into(),
        level,
        rank,
    })
    .collect()
}

pub fn chat_messages() -> Vec<ChatMessage> {
    [
        ("System", "Welcome to the chat!", "10:00"),
        ("Warrior123", "Hello everyone!", "10:05"),
        ("ArcherQueen", "Hi there!", "10:07"),
        ("DarkWizard", "Anyone want to team up for a raid?", "10:10"),
        ("HealerGirl", "I can join as a healer", "10:12"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((sender, content, timestamp), id)| ChatMessage {
        id,
        sender: sender.into(),
        content: content.into(),
        timestamp: timestamp.into(),
    })
    .collect()
}
