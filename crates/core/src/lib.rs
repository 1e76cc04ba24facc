// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em betting engine.
//!
//! A [Table] runs hands of No-Limit Texas Hold'em for a fixed set of players,
//! clients read [TableView] snapshots and submit one action at a time:
//!
//! ```
//! use holdem_core::{Action, Chips, Player, PlayerId, Table};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let players = vec![
//!     Player::new(PlayerId::new("alice"), "Alice", Chips::new(1_000)),
//!     Player::new(PlayerId::new("bob"), "Bob", Chips::new(1_000)),
//! ];
//!
//! let mut table = Table::new(players, Chips::new(5), Chips::new(10)).unwrap();
//! table.start_new_hand(&mut StdRng::seed_from_u64(1)).unwrap();
//!
//! while let Some(req) = table.action_request() {
//!     let action = if req.can_check() { Action::Check } else { Action::Call };
//!     table.process_action(action, Chips::ZERO).unwrap();
//! }
//!
//! assert!(table.is_hand_over());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod player;
pub mod poker;
pub mod table;
pub mod view;

pub use error::GameError;
pub use player::{Action, Player, PlayerAction, PlayerStatus};
pub use poker::{Card, Chips, Deck, GameId, HandRank, HandValue, PlayerCards, PlayerId};
pub use table::{HandPayoff, Phase, Table};
pub use view::{ActionRequest, PlayerView, TableView};
