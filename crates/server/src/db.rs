// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Database types for persisting games state.
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use thiserror::Error;

use holdem_core::{Chips, GameId, HandPayoff, PlayerId, Table};

/// A database error.
#[derive(Debug, Error)]
pub enum DbError {
    /// No game is saved with the given id.
    #[error("Game {0} not found")]
    NotFound(GameId),
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A saved value cannot be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),
    /// The blocking database task failed.
    #[error("Database task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A database result.
pub type Result<T> = std::result::Result<T, DbError>;

/// A finished hand row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// The table hand number.
    pub hand_number: u64,
    /// The pot paid to the winners.
    pub pot: Chips,
    /// The winners.
    pub payoffs: Vec<HandPayoff>,
}

/// A database player row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    /// The player id.
    pub player_id: PlayerId,
    /// The player name.
    pub name: String,
    /// The number of games joined.
    pub games_played: u32,
    /// The number of hands won, a split pot counts as a win.
    pub hands_won: u32,
    /// The biggest pot share won.
    pub biggest_pot: Chips,
}

/// A change to a player profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileUpdate {
    /// The player joined a game.
    GameJoined,
    /// The player won chips in a hand.
    HandWon(Chips),
}

/// Database for persisting games and players state.
#[derive(Debug, Clone)]
pub struct Db {
    db: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open a database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // Create tables
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS games (
               id TEXT PRIMARY KEY,
               hand_number INTEGER NOT NULL,
               state BLOB NOT NULL,
               created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
               last_update DATETIME DEFAULT CURRENT_TIMESTAMP
             );
             CREATE TABLE IF NOT EXISTS hands (
               game_id TEXT NOT NULL,
               hand_number INTEGER NOT NULL,
               pot INTEGER NOT NULL,
               payoffs BLOB NOT NULL,
               created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
               PRIMARY KEY (game_id, hand_number)
             );
             CREATE TABLE IF NOT EXISTS players (
               id TEXT PRIMARY KEY,
               name TEXT NOT NULL,
               games_played INTEGER NOT NULL DEFAULT 0,
               hands_won INTEGER NOT NULL DEFAULT 0,
               biggest_pot INTEGER NOT NULL DEFAULT 0,
               created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
               last_update DATETIME DEFAULT CURRENT_TIMESTAMP
             );",
        )?;

        Ok(Db {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Saves a table snapshot, replacing any snapshot with the same id.
    pub async fn save(&self, game_id: &GameId, table: &Table) -> Result<()> {
        let state = bincode::serialize(table)?;
        let hand_number = table.hand_number() as i64;
        let game_id = game_id.clone();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            db.execute(
                "INSERT INTO games (id, hand_number, state)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                   hand_number = excluded.hand_number,
                   state = excluded.state,
                   last_update = CURRENT_TIMESTAMP",
                params![game_id.as_str(), hand_number, state],
            )?;

            Ok(())
        })
        .await?
    }

    /// Loads a table snapshot.
    pub async fn load(&self, game_id: &GameId) -> Result<Table> {
        let game_id = game_id.clone();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            let state = db
                .query_row(
                    "SELECT state FROM games WHERE id = ?1",
                    params![game_id.as_str()],
                    |row| row.get::<usize, Vec<u8>>(0),
                )
                .optional()?;

            match state {
                Some(state) => Ok(bincode::deserialize(&state)?),
                None => Err(DbError::NotFound(game_id)),
            }
        })
        .await?
    }

    /// Deletes a game and its hands history.
    ///
    /// Returns false if the game was not found.
    pub async fn delete(&self, game_id: &GameId) -> Result<bool> {
        let game_id = game_id.clone();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut db = db.lock();
            let tx = db.transaction()?;
            let deleted = tx.execute(
                "DELETE FROM games WHERE id = ?1",
                params![game_id.as_str()],
            )?;
            tx.execute(
                "DELETE FROM hands WHERE game_id = ?1",
                params![game_id.as_str()],
            )?;
            tx.commit()?;

            Ok(deleted > 0)
        })
        .await?
    }

    /// Records a finished hand.
    pub async fn record_hand(
        &self,
        game_id: &GameId,
        hand_number: u64,
        pot: Chips,
        payoffs: &[HandPayoff],
    ) -> Result<()> {
        let payoffs = bincode::serialize(payoffs)?;
        let game_id = game_id.clone();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            db.execute(
                "INSERT OR REPLACE INTO hands (game_id, hand_number, pot, payoffs)
                 VALUES (?1, ?2, ?3, ?4)",
                params![game_id.as_str(), hand_number as i64, pot.amount(), payoffs],
            )?;

            Ok(())
        })
        .await?
    }

    /// Returns the finished hands of a game in hand order.
    pub async fn history(&self, game_id: &GameId) -> Result<Vec<HandRecord>> {
        let game_id = game_id.clone();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            let mut stmt = db.prepare(
                "SELECT hand_number, pot, payoffs
                 FROM hands
                 WHERE game_id = ?1
                 ORDER BY hand_number",
            )?;

            let rows = stmt.query_map(params![game_id.as_str()], |row| {
                Ok((
                    row.get::<usize, i64>(0)?,
                    row.get::<usize, u32>(1)?,
                    row.get::<usize, Vec<u8>>(2)?,
                ))
            })?;

            let mut hands = Vec::new();
            for row in rows {
                let (hand_number, pot, payoffs) = row?;
                hands.push(HandRecord {
                    hand_number: hand_number as u64,
                    pot: Chips::new(pot),
                    payoffs: bincode::deserialize(&payoffs)?,
                });
            }

            Ok(hands)
        })
        .await?
    }

    /// Updates a player profile, the player is created if not found.
    pub async fn update_profile(
        &self,
        player_id: &PlayerId,
        name: &str,
        update: ProfileUpdate,
    ) -> Result<()> {
        let player_id = player_id.clone();
        let name = name.to_string();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            match update {
                ProfileUpdate::GameJoined => db.execute(
                    "INSERT INTO players (id, name, games_played)
                     VALUES (?1, ?2, 1)
                     ON CONFLICT(id) DO UPDATE SET
                       name = excluded.name,
                       games_played = games_played + 1,
                       last_update = CURRENT_TIMESTAMP",
                    params![player_id.as_str(), name],
                )?,
                ProfileUpdate::HandWon(chips) => db.execute(
                    "INSERT INTO players (id, name, hands_won, biggest_pot)
                     VALUES (?1, ?2, 1, ?3)
                     ON CONFLICT(id) DO UPDATE SET
                       hands_won = hands_won + 1,
                       biggest_pot = MAX(biggest_pot, excluded.biggest_pot),
                       last_update = CURRENT_TIMESTAMP",
                    params![player_id.as_str(), name, chips.amount()],
                )?,
            };

            Ok(())
        })
        .await?
    }

    /// Get a player profile.
    pub async fn profile(&self, player_id: &PlayerId) -> Result<Option<PlayerProfile>> {
        let player_id = player_id.clone();

        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            let profile = db
                .query_row(
                    "SELECT name, games_played, hands_won, biggest_pot
                     FROM players
                     WHERE id = ?1",
                    params![player_id.as_str()],
                    |row| {
                        Ok(PlayerProfile {
                            player_id: player_id.clone(),
                            name: row.get(0)?,
                            games_played: row.get(1)?,
                            hands_won: row.get(2)?,
                            biggest_pot: Chips::new(row.get(3)?),
                        })
                    },
                )
                .optional()?;

            Ok(profile)
        })
        .await?
    }
}
