// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use holdem_core::{Chips, GameId};
use holdem_server::server;
use log::error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Cli {
    /// The database path.
    #[clap(long, default_value = "holdem.db")]
    db: PathBuf,
    /// The game to create or resume.
    #[clap(long, short, default_value = "main")]
    game: String,
    /// Number of players for a new game.
    #[clap(long, short, default_value_t = 6, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,
    /// Starting chips for a new game.
    #[clap(long, default_value_t = 1_000)]
    chips: u32,
    /// Small blind for a new game.
    #[clap(long, default_value_t = 5)]
    small_blind: u32,
    /// Big blind for a new game.
    #[clap(long, default_value_t = 10)]
    big_blind: u32,
    /// Number of hands to play.
    #[clap(long, default_value_t = 100)]
    hands: usize,
    /// Seed for the deck and the bots.
    #[clap(long, short)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = holdem_server::Config {
        db_path: cli.db,
        game_id: GameId::new(cli.game),
        players: cli.players as usize,
        chips: Chips::new(cli.chips),
        small_blind: Chips::new(cli.small_blind),
        big_blind: Chips::new(cli.big_blind),
        hands: cli.hands,
        seed: cli.seed,
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
    }
}
