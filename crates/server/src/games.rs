// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Running games registry.
use ahash::AHashMap;
use anyhow::{Result, bail};
use log::info;
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;

use holdem_core::{
    Action, ActionRequest, Chips, GameId, Player, PlayerId, Table, TableView,
};

use crate::db::{Db, ProfileUpdate};

/// A game state.
#[derive(Debug)]
struct Game {
    table: Table,
    rng: StdRng,
}

/// A registered game.
///
/// Readers take the state lock for a snapshot, writers hold the writer lock
/// from the table update until the snapshot is saved.
#[derive(Debug)]
struct GameHandle {
    state: Mutex<Game>,
    writer: tokio::sync::Mutex<()>,
}

impl GameHandle {
    fn new(table: Table, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            state: Mutex::new(Game { table, rng }),
            writer: tokio::sync::Mutex::new(()),
        }
    }

    fn table(&self) -> Table {
        self.state.lock().table.clone()
    }
}

/// The games running on this server.
///
/// Each game has its own lock, a game is persisted after every change before
/// the next change to the same game is applied.
#[derive(Debug, Clone)]
pub struct Games {
    games: Arc<Mutex<AHashMap<GameId, Arc<GameHandle>>>>,
    db: Db,
}

impl Games {
    /// Creates a new registry.
    pub fn new(db: Db) -> Self {
        Self {
            games: Arc::default(),
            db,
        }
    }

    /// The database used to persist games.
    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Creates and persists a new game.
    pub async fn create(
        &self,
        game_id: GameId,
        players: Vec<Player>,
        small_blind: Chips,
        big_blind: Chips,
        seed: Option<u64>,
    ) -> Result<TableView> {
        let table = Table::new(players, small_blind, big_blind)?;
        let handle = Arc::new(GameHandle::new(table.clone(), seed));

        // Nobody else can write to the game until it is saved.
        let _writer = handle.writer.lock().await;

        {
            let mut games = self.games.lock();
            if games.contains_key(&game_id) {
                bail!("Game {game_id} already running");
            }

            games.insert(game_id.clone(), handle.clone());
        }

        if let Err(e) = self.save_new(&game_id, &table).await {
            self.games.lock().remove(&game_id);
            return Err(e);
        }

        let view = table.view(None);
        info!("Game {game_id} created with {} players", view.players.len());
        Ok(view)
    }

    /// Resumes a saved game.
    pub async fn resume(&self, game_id: GameId, seed: Option<u64>) -> Result<TableView> {
        if let Some(view) = self.view(&game_id, None) {
            return Ok(view);
        }

        let table = self.db.load(&game_id).await?;
        let handle = Arc::new(GameHandle::new(table, seed));

        // Another task may have registered the game while loading.
        let handle = self
            .games
            .lock()
            .entry(game_id.clone())
            .or_insert(handle)
            .clone();

        let view = handle.table().view(None);
        info!("Game {game_id} resumed at hand {}", view.hand_number);
        Ok(view)
    }

    /// Removes a game from the registry, the saved game is kept.
    pub fn remove(&self, game_id: &GameId) -> bool {
        self.games.lock().remove(game_id).is_some()
    }

    /// Returns a game view as seen by `viewer`.
    pub fn view(&self, game_id: &GameId, viewer: Option<&PlayerId>) -> Option<TableView> {
        let handle = self.get(game_id)?;
        let game = handle.state.lock();
        Some(game.table.view(viewer))
    }

    /// Returns the actions available to the acting player.
    pub fn action_request(&self, game_id: &GameId) -> Option<ActionRequest> {
        let handle = self.get(game_id)?;
        let game = handle.state.lock();
        game.table.action_request()
    }

    /// Checks if a game hand has ended.
    pub fn is_hand_over(&self, game_id: &GameId) -> Option<bool> {
        let handle = self.get(game_id)?;
        let game = handle.state.lock();
        Some(game.table.is_hand_over())
    }

    /// Starts a new hand and persists the game.
    pub async fn start_hand(&self, game_id: &GameId) -> Result<TableView> {
        self.update(game_id, |game| {
            let Game { table, rng } = game;
            table.start_new_hand(rng)?;
            Ok(())
        })
        .await
    }

    /// Applies an action for `player_id` and persists the game.
    pub async fn act(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
        action: Action,
        amount: Chips,
    ) -> Result<TableView> {
        self.update(game_id, |game| {
            match game.table.action_request() {
                Some(req) if &req.player_id == player_id => {}
                Some(_) => bail!("Player {player_id} is not the acting player"),
                None => bail!("No hand in progress"),
            }

            game.table.process_action(action, amount)?;
            Ok(())
        })
        .await
    }

    fn get(&self, game_id: &GameId) -> Option<Arc<GameHandle>> {
        self.games.lock().get(game_id).cloned()
    }

    /// Updates a game and persists it while holding the game writer lock.
    async fn update<F>(&self, game_id: &GameId, f: F) -> Result<TableView>
    where
        F: FnOnce(&mut Game) -> Result<()>,
    {
        let Some(handle) = self.get(game_id) else {
            bail!("Game {game_id} not found");
        };

        let _writer = handle.writer.lock().await;

        let table = {
            let mut game = handle.state.lock();
            f(&mut game)?;
            game.table.clone()
        };

        self.persist(game_id, &table).await?;
        Ok(table.view(None))
    }

    async fn save_new(&self, game_id: &GameId, table: &Table) -> Result<()> {
        self.db.save(game_id, table).await?;

        for player in table.players() {
            self.db
                .update_profile(player.player_id(), player.name(), ProfileUpdate::GameJoined)
                .await?;
        }

        Ok(())
    }

    /// Saves a table snapshot and records the hand if it has ended.
    async fn persist(&self, game_id: &GameId, table: &Table) -> Result<()> {
        self.db.save(game_id, table).await?;

        if table.hand_number() > 0 && table.is_hand_over() && !table.payoffs().is_empty() {
            let pot = table.payoffs().iter().map(|p| p.chips).sum::<Chips>();
            self.db
                .record_hand(game_id, table.hand_number(), pot, table.payoffs())
                .await?;

            for payoff in table.payoffs() {
                let name = table.players()[payoff.seat].name();
                self.db
                    .update_profile(&payoff.player_id, name, ProfileUpdate::HandWon(payoff.chips))
                    .await?;
            }

            info!("Game {game_id} hand {} recorded", table.hand_number());
        }

        Ok(())
    }
}
