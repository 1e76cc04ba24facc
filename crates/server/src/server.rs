// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game runner entry point.
use anyhow::{Result, bail};
use log::{info, warn};
use std::path::PathBuf;
use tokio::signal;

use holdem_core::{Action, Chips, GameError, GameId, Player, PlayerId};

use crate::{
    bot::{RandomStrategy, Strategy},
    db::{Db, DbError},
    games::Games,
};

static NICKNAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Mike",
];

/// Game runner config.
#[derive(Debug)]
pub struct Config {
    /// The database path.
    pub db_path: PathBuf,
    /// The game to create or resume.
    pub game_id: GameId,
    /// The number of players for a new game.
    pub players: usize,
    /// The starting chips for a new game.
    pub chips: Chips,
    /// The small blind for a new game.
    pub small_blind: Chips,
    /// The big blind for a new game.
    pub big_blind: Chips,
    /// The number of hands to play.
    pub hands: usize,
    /// The seed for the deck and the bots, random if not set.
    pub seed: Option<u64>,
}

/// Runs a game between bots until all hands are played or a Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let db = Db::open(&config.db_path)?;
    info!("Opened database {}", config.db_path.display());

    let games = Games::new(db);

    tokio::select! {
        res = play(&games, &config) => {
            res?;
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal...");
        }
    }

    // Every action is saved, on shutdown only report the standings.
    if let Some(view) = games.view(&config.game_id, None) {
        for player in &view.players {
            info!("{} {} chips", player.name, player.stack);
        }
    }

    let hands = games.db().history(&config.game_id).await?;
    info!("Game {} has {} hands recorded", config.game_id, hands.len());

    Ok(())
}

/// Plays the configured number of hands.
async fn play(games: &Games, config: &Config) -> Result<()> {
    let game_id = &config.game_id;

    let view = match games.resume(game_id.clone(), config.seed).await {
        Ok(view) => view,
        Err(e) if matches!(e.downcast_ref::<DbError>(), Some(DbError::NotFound(_))) => {
            let players = (0..config.players)
                .map(|idx| {
                    let name = NICKNAMES[idx % NICKNAMES.len()];
                    Player::new(
                        PlayerId::new(format!("{}-{idx}", name.to_lowercase())),
                        name,
                        config.chips,
                    )
                })
                .collect();

            games
                .create(
                    game_id.clone(),
                    players,
                    config.small_blind,
                    config.big_blind,
                    config.seed,
                )
                .await?
        }
        Err(e) => return Err(e),
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut bots = (0..view.players.len() as u64)
        .map(|idx| RandomStrategy::new(seed.wrapping_add(idx)))
        .collect::<Vec<_>>();

    let mut played = 0;
    while played < config.hands {
        let Some(hand_over) = games.is_hand_over(game_id) else {
            bail!("Game {game_id} not found");
        };

        // A resumed game may have a hand in progress.
        if hand_over {
            match games.start_hand(game_id).await {
                Ok(_) => played += 1,
                Err(e) if e.downcast_ref::<GameError>() == Some(&GameError::NotEnoughPlayers) => {
                    info!("Game {game_id} over, one player left");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        while let Some(req) = games.action_request(game_id) {
            let Some(view) = games.view(game_id, Some(&req.player_id)) else {
                break;
            };

            let (action, amount) = bots[req.seat].execute(&req, &view);
            if let Err(e) = games.act(game_id, &req.player_id, action, amount).await {
                warn!("Bot {} {action} {amount} refused: {e}", req.player_id);
                games
                    .act(game_id, &req.player_id, Action::Fold, Chips::ZERO)
                    .await?;
            }
        }
    }

    Ok(())
}
