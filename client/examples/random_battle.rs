//! Random Battle Example
//!
//! Plays one Pokemon battle against the server's random AI, picking
//! uniformly among the offered options each turn, and prints the
//! battle log as it grows.
//!
//! Usage: `cargo run --example random_battle -- http://localhost:5000`

use anyhow::{Context, Result};
use maison_client::{BattleClient, MoveOption, Session};
use maison_protocol::{GameMode, OpponentKind, SessionConfig};
use maison_view::sprite_url;
use rand::seq::SliceRandom;

fn pick_option(session: &Session) -> Option<MoveOption> {
    let moves = session.view()?.moves.as_ref()?;
    let options: Vec<MoveOption> = moves
        .attacks
        .iter()
        .chain(moves.switches.iter())
        .cloned()
        .collect();
    options.choose(&mut rand::thread_rng()).cloned()
}

fn pick_team(teams: &[String]) -> Option<String> {
    teams.choose(&mut rand::thread_rng()).cloned()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let server = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:5000".to_string());
    println!("Random battle against {server}");

    let mut session = Session::new(BattleClient::new(&server));

    let teams = session.team_choices(GameMode::Pkmn).await?;
    let player_team = pick_team(&teams).context("server offered no teams")?;
    let opp_team = pick_team(&teams).context("server offered no teams")?;
    println!("Teams: {player_team} vs {opp_team}");

    let config = SessionConfig::new(
        GameMode::Pkmn,
        OpponentKind::RandomPkmn,
        &player_team,
        &opp_team,
    );
    session.start(&config).await?;

    {
        let view = session.view().context("no view after setup")?;
        println!(
            "Player sends out {} ({})",
            view.player.species,
            sprite_url(&view.player.species)
        );
        println!(
            "Opponent sends out {} at {:.0}%",
            view.opponent.species,
            view.opponent.hp.percent()
        );
    }

    let mut printed = 0;
    while session.phase().accepts_moves() {
        let option = pick_option(&session).context("battle running but no options offered")?;
        println!("> {} [{}]", option.label, option.category);

        session.choose(option.category, option.key).await?;

        for entry in &session.log().entries()[printed..] {
            println!("{entry}");
        }
        printed = session.log().len();
    }

    Ok(())
}
