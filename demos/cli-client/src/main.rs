//! Logs in, looks around the zone, and logs out again.
//!
//! ```text
//! cli-client <username> <password>
//! ```
//!
//! Credentials can also come from `WARHUNDRED_USER` and
//! `WARHUNDRED_PASSWORD`. The backend address follows `WARHUNDRED_API_URL`.
//! Pass `--fixtures` to skip the zone request and show canned players.

use std::time::Duration;

use clap::Parser;
use warhundred::panels::Refresh;
use warhundred::prelude::*;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "cli-client")]
#[command(about = "Log in to War Hundred, look around the zone, and log out")]
struct Args {
    /// Account name
    #[arg(env = "WARHUNDRED_USER")]
    username: String,

    /// Account password
    #[arg(env = "WARHUNDRED_PASSWORD", hide_env_values = true)]
    password: String,

    /// Show canned zone players instead of fetching them
    #[arg(long)]
    fixtures: bool,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_zone<T: Transport>(client: &GameClient<T>) {
    let zone = client.zone();
    let state = zone.snapshot();
    println!("Players in Zone ({})", zone.summary());
    if let Some(error) = &state.error {
        println!("  {error}");
        return;
    }
    if let Some(empty) = zone.empty_message() {
        println!("  {empty}");
        return;
    }
    for row in zone.rows() {
        let pips = "*".repeat(usize::from(row.pips));
        println!("  ({}) {:<20} {} {}", row.initial, row.label, row.rank, pips);
    }
}

fn print_card(card: &MiniProfile) {
    println!(
        "{} lvl {} [{}] HP {}% ST {}% XP {}%",
        card.nickname, card.level, card.rank, card.health, card.stamina, card.experience
    );
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    warhundred::init_tracing();

    let args = Args::parse();
    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api_base_url, "connecting");

    let client = GameClient::builder()
        .config(config)
        .use_fixtures(args.fixtures)
        .build()?;

    if let Err(e) = client.login(&args.username, &args.password).await {
        for error in &client.auth().snapshot().errors {
            eprintln!("login failed: {error}");
        }
        return Err(e.into());
    }
    println!(
        "logged in as {} ({:?}, page {:?})",
        client.auth().user().unwrap_or_default(),
        client.selector(),
        client.page("/"),
    );

    let canvas = client.mount_canvas(FrameBuffer::default(), 800, 600);
    println!("view: {}", client.views().current());

    client.zone().refresh().await;
    print_zone(&client);

    match client.mini_profile().await {
        Ok(card) => print_card(&card),
        Err(e) => tracing::warn!(error = %e, "profile unavailable"),
    }

    client.views().change_view(ViewState::Battle);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let frames = canvas.stop().await?;
    println!("view: {} ({frames} frames drawn)", client.views().current());

    client.logout().await?;
    println!("logged out");
    Ok(())
}
