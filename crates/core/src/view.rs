// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Read-only table views for clients.
use serde::{Deserialize, Serialize};

use crate::{
    player::{Action, PlayerAction, PlayerStatus},
    poker::{Card, Chips, PlayerCards, PlayerId},
    table::{HandPayoff, Phase},
};

/// A player details as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// The player id.
    pub player_id: PlayerId,
    /// The player name.
    pub name: String,
    /// The player chips.
    pub stack: Chips,
    /// The player current bet.
    pub bet: Chips,
    /// The player status.
    pub status: PlayerStatus,
    /// The last player action.
    pub action: PlayerAction,
    /// The player seat.
    pub seat: usize,
    /// The player cards, covered for other players until the showdown.
    pub cards: PlayerCards,
    /// The player has the button.
    pub has_button: bool,
}

/// An immutable snapshot of the table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// The hand number, zero before the first hand.
    pub hand_number: u64,
    /// The hand phase.
    pub phase: Phase,
    /// The players in seat order.
    pub players: Vec<PlayerView>,
    /// The community cards.
    pub board: Vec<Card>,
    /// The pot.
    pub pot: Chips,
    /// The bet to match in this round.
    pub current_bet: Chips,
    /// The seat with the button.
    pub dealer_seat: usize,
    /// The seat that should act, `None` when the hand is over.
    pub acting_seat: Option<usize>,
    /// The payoffs of the last finished hand.
    pub payoffs: Vec<HandPayoff>,
}

/// A request for the acting player to choose an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The seat that should act.
    pub seat: usize,
    /// The player that should act.
    pub player_id: PlayerId,
    /// The legal actions.
    pub actions: Vec<Action>,
    /// The chips needed to call.
    pub to_call: Chips,
    /// The minimum raise increment.
    pub min_raise: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
    /// The player chips behind.
    pub stack: Chips,
}

impl ActionRequest {
    /// Check if a call action is in the request.
    pub fn can_call(&self) -> bool {
        self.check_action(Action::Call)
    }

    /// Check if a check action is in the request.
    pub fn can_check(&self) -> bool {
        self.check_action(Action::Check)
    }

    /// Check if a bet action is in the request.
    pub fn can_bet(&self) -> bool {
        self.check_action(Action::Bet)
    }

    /// Check if a raise action is in the request.
    pub fn can_raise(&self) -> bool {
        self.check_action(Action::Raise)
    }

    fn check_action(&self, action: Action) -> bool {
        self.actions.iter().any(|a| a == &action)
    }
}
